//! Geocoding error types

use thiserror::Error;

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,

    /// Geocoding service answered with a 5xx status
    #[error("Geocoding service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Request to geocoding service failed
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Rate limit exceeded (max 1 req/sec for Nominatim)
    #[error("Geocoding rate limit exceeded")]
    RateLimitExceeded,

    /// Coordinates rejected by the client or the service
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),
}

impl GeocodingError {
    /// Whether the service could not be reached or could not serve the request
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::Timeout
                | Self::ServiceUnavailable(_)
                | Self::RequestFailed(_)
                | Self::RateLimitExceeded
                | Self::ParseError(_)
        )
    }
}
