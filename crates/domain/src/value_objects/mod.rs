//! Value Objects - Immutable, identity-less domain primitives

mod address;
mod air_quality;
mod geo_location;
mod severity_tier;
mod timezone;

pub use address::Address;
pub use air_quality::{AirQualityReading, CHECKED_AT_FORMAT, parse_timestamp};
pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use severity_tier::SeverityTier;
pub use timezone::DisplayTimezone;
