//! Air-quality service port
//!
//! Defines the interface for fetching the current air-quality index.

use async_trait::async_trait;
use domain::value_objects::{AirQualityReading, GeoLocation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for air-quality data retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AirQualityPort: Send + Sync {
    /// Fetch the current reading nearest to a location
    ///
    /// Implementations make a single attempt and never retry.
    async fn fetch_current(
        &self,
        location: &GeoLocation,
    ) -> Result<AirQualityReading, ApplicationError>;
}
