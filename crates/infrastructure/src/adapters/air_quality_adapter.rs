//! Air-quality adapter - Implements AirQualityPort using integration_airvisual

use application::error::ApplicationError;
use application::ports::AirQualityPort;
use async_trait::async_trait;
use domain::DomainError;
use domain::value_objects::{AirQualityReading, GeoLocation};
use integration_airvisual::{AirQualityClient, AirVisualClient, AirVisualConfig, AirVisualError, NearestCity};
use tracing::{debug, instrument};

/// Adapter for the AirVisual `nearest_city` API
pub struct AirQualityAdapter {
    client: AirVisualClient,
}

impl std::fmt::Debug for AirQualityAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirQualityAdapter")
            .field("client", &self.client)
            .finish()
    }
}

impl AirQualityAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no API key is set, or an internal
    /// error if the HTTP client fails to initialize.
    pub fn with_config(config: AirVisualConfig) -> Result<Self, ApplicationError> {
        let client = AirVisualClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    /// Map integration air-quality error to application error
    fn map_error(err: AirVisualError) -> ApplicationError {
        match err {
            AirVisualError::ConnectionFailed(e)
            | AirVisualError::RequestFailed(e)
            | AirVisualError::ServiceUnavailable(e)
            | AirVisualError::ApiError(e) => ApplicationError::ExternalService(e),
            e @ AirVisualError::Timeout { .. } => ApplicationError::ExternalService(e.to_string()),
            AirVisualError::RateLimitExceeded => ApplicationError::RateLimited,
            AirVisualError::ParseError(e) => ApplicationError::Internal(e),
            e @ AirVisualError::InvalidCoordinates => {
                ApplicationError::Domain(DomainError::ValidationError(e.to_string()))
            },
            e @ AirVisualError::MissingApiKey => ApplicationError::Configuration(e.to_string()),
        }
    }

    /// Convert the integration payload to the domain reading
    fn map_reading(city: NearestCity) -> AirQualityReading {
        let pollution = city.pollution;
        let reading = AirQualityReading::new(pollution.aqius, pollution.timestamp);
        match pollution.main_pollutant {
            Some(pollutant) => reading.with_main_pollutant(pollutant),
            None => reading,
        }
    }
}

#[async_trait]
impl AirQualityPort for AirQualityAdapter {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn fetch_current(
        &self,
        location: &GeoLocation,
    ) -> Result<AirQualityReading, ApplicationError> {
        let result = self
            .client
            .nearest_city(location.latitude(), location.longitude())
            .await
            .map_err(Self::map_error);

        match &result {
            Ok(city) => {
                debug!(
                    city = %city.label(),
                    aqius = city.pollution.aqius,
                    "Retrieved current air quality"
                );
            },
            Err(e) => {
                debug!(error = %e, "Failed to get current air quality");
            },
        }

        result.map(Self::map_reading)
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use integration_airvisual::CurrentPollution;
    use secrecy::SecretString;

    use super::*;

    fn config() -> AirVisualConfig {
        AirVisualConfig {
            api_key: Some(SecretString::from("test-key")),
            ..Default::default()
        }
    }

    #[test]
    fn with_config_creates_adapter() {
        assert!(AirQualityAdapter::with_config(config()).is_ok());
    }

    #[test]
    fn missing_key_is_configuration_error() {
        let result = AirQualityAdapter::with_config(AirVisualConfig::default());
        assert!(matches!(result, Err(ApplicationError::Configuration(_))));
    }

    #[test]
    fn debug_impl_hides_key() {
        let adapter = AirQualityAdapter::with_config(config()).unwrap();
        let debug_str = format!("{adapter:?}");
        assert!(debug_str.contains("AirQualityAdapter"));
        assert!(!debug_str.contains("test-key"));
    }

    #[test]
    fn map_error_transport_failures_are_external() {
        for err in [
            AirVisualError::ConnectionFailed("refused".into()),
            AirVisualError::Timeout { timeout_secs: 10 },
            AirVisualError::ServiceUnavailable("HTTP 500".into()),
            AirVisualError::RequestFailed("HTTP 404".into()),
            AirVisualError::ApiError("city_not_found".into()),
        ] {
            assert!(matches!(
                AirQualityAdapter::map_error(err),
                ApplicationError::ExternalService(_)
            ));
        }
    }

    #[test]
    fn map_error_rate_limited() {
        assert!(matches!(
            AirQualityAdapter::map_error(AirVisualError::RateLimitExceeded),
            ApplicationError::RateLimited
        ));
    }

    #[test]
    fn map_error_invalid_coords() {
        assert!(matches!(
            AirQualityAdapter::map_error(AirVisualError::InvalidCoordinates),
            ApplicationError::Domain(_)
        ));
    }

    #[test]
    fn map_reading_keeps_pollutant() {
        let city = NearestCity {
            city: Some("Seoul".into()),
            state: None,
            country: None,
            pollution: CurrentPollution {
                aqius: 87,
                timestamp: DateTime::parse_from_rfc3339("2023-01-01T00:00:00Z").unwrap(),
                main_pollutant: Some("p2".into()),
            },
        };
        let reading = AirQualityAdapter::map_reading(city);
        assert_eq!(reading.aqius(), 87);
        assert_eq!(reading.main_pollutant(), Some("p2"));
    }

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AirQualityAdapter>();
    }
}
