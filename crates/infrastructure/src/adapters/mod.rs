//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod air_quality_adapter;
mod geocoder_adapter;
mod location_adapter;

pub use air_quality_adapter::AirQualityAdapter;
pub use geocoder_adapter::NominatimGeocoderAdapter;
pub use location_adapter::{ConfiguredLocationProvider, ConfiguredPermission};
