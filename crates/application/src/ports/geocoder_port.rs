//! Reverse geocoding port

use async_trait::async_trait;
use domain::value_objects::{Address, GeoLocation};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Classified reverse-geocoding failure
///
/// None of these are fatal to an air-quality check; they are surfaced to the
/// user as notices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The service could not be reached or did not answer usefully
    #[error("Geocoding service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The coordinate was rejected as malformed
    #[error("Invalid coordinate: {0}")]
    InvalidArgument(String),

    /// The service knows no address for the coordinate
    #[error("No address found")]
    NotFound,
}

impl GeocodeError {
    /// Message suitable for showing to the user
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable(_) => "The geocoding service is unavailable.",
            Self::InvalidArgument(_) => "Invalid latitude or longitude.",
            Self::NotFound => "No address was found for this location.",
        }
    }
}

/// Port for reverse geocoding
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReverseGeocoderPort: Send + Sync {
    /// Resolve a coordinate to at most `max_results` address candidates,
    /// best match first
    async fn reverse_geocode(
        &self,
        location: &GeoLocation,
        max_results: u8,
    ) -> Result<Vec<Address>, GeocodeError>;
}
