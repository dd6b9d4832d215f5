//! Coordinate to address resolution

use std::sync::Arc;

use domain::value_objects::{Address, GeoLocation};
use tracing::{debug, instrument};

use crate::ports::{GeocodeError, ReverseGeocoderPort};

/// Number of candidates requested from the geocoder
pub const DEFAULT_MAX_RESULTS: u8 = 7;

/// Resolves a coordinate to the best-ranked address
pub struct ReverseGeocoder {
    port: Arc<dyn ReverseGeocoderPort>,
    max_results: u8,
}

impl std::fmt::Debug for ReverseGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReverseGeocoder")
            .field("port", &"<ReverseGeocoderPort>")
            .field("max_results", &self.max_results)
            .finish()
    }
}

impl ReverseGeocoder {
    /// Create a geocoder requesting [`DEFAULT_MAX_RESULTS`] candidates
    #[must_use]
    pub fn new(port: Arc<dyn ReverseGeocoderPort>) -> Self {
        Self {
            port,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Change the number of requested candidates (at least one)
    #[must_use]
    pub fn with_max_results(mut self, max_results: u8) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    /// First-ranked address for a coordinate
    #[instrument(skip(self), fields(location = %location))]
    pub async fn resolve(&self, location: &GeoLocation) -> Result<Address, GeocodeError> {
        let candidates = self
            .port
            .reverse_geocode(location, self.max_results)
            .await?;

        debug!(count = candidates.len(), "Received address candidates");
        candidates.into_iter().next().ok_or(GeocodeError::NotFound)
    }
}
