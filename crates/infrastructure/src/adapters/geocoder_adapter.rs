//! Geocoder adapter - Implements ReverseGeocoderPort using integration_geocoding

use application::ports::{GeocodeError, ReverseGeocoderPort};
use async_trait::async_trait;
use domain::value_objects::{Address, GeoLocation};
use integration_geocoding::{
    GeocodedAddress, GeocodingError, NominatimConfig, NominatimGeocodingClient,
    ReverseGeocodingClient,
};
use tracing::{debug, instrument};

/// Adapter for Nominatim reverse geocoding
pub struct NominatimGeocoderAdapter {
    client: NominatimGeocodingClient,
}

impl std::fmt::Debug for NominatimGeocoderAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimGeocoderAdapter")
            .finish_non_exhaustive()
    }
}

impl NominatimGeocoderAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns `ServiceUnavailable` if the HTTP client fails to initialize.
    pub fn with_config(config: &NominatimConfig) -> Result<Self, GeocodeError> {
        let client = NominatimGeocodingClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    /// Map integration geocoding error to the port error
    fn map_error(err: GeocodingError) -> GeocodeError {
        match err {
            GeocodingError::InvalidCoordinates(e) => GeocodeError::InvalidArgument(e),
            e => GeocodeError::ServiceUnavailable(e.to_string()),
        }
    }

    fn map_address(address: GeocodedAddress) -> Address {
        Address::new(address.thoroughfare, address.country, address.admin_area)
    }
}

#[async_trait]
impl ReverseGeocoderPort for NominatimGeocoderAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn reverse_geocode(
        &self,
        location: &GeoLocation,
        max_results: u8,
    ) -> Result<Vec<Address>, GeocodeError> {
        let result = self
            .client
            .reverse_geocode(location.latitude(), location.longitude(), max_results)
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(candidates) => debug!(count = candidates.len(), "Resolved address candidates"),
            Err(e) => debug!(error = %e, "Reverse geocoding failed"),
        }

        result.map(|candidates| candidates.into_iter().map(Self::map_address).collect())
    }
}
