//! Reverse geocoding integration for AirCheck
//!
//! Resolves coordinates to a postal address via
//! [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org).
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_geocoding::{NominatimConfig, NominatimGeocodingClient, ReverseGeocodingClient};
//!
//! let client = NominatimGeocodingClient::new(&NominatimConfig::default())?;
//! let candidates = client.reverse_geocode(37.5665, 126.978, 7).await?;
//! ```

mod config;
mod error;
mod nominatim;

pub use config::NominatimConfig;
pub use error::GeocodingError;
pub use nominatim::{GeocodedAddress, NominatimGeocodingClient, ReverseGeocodingClient};
