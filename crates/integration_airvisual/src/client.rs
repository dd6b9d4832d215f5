//! AirVisual air-quality client
//!
//! HTTP client for the AirVisual v2 `nearest_city` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{ApiData, ApiResponse, CityData, CurrentPollution, NearestCity};

/// AirVisual client errors
#[derive(Debug, Error)]
pub enum AirVisualError {
    /// Connection to the air-quality service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request did not complete in time
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The configured timeout in seconds
        timeout_secs: u64,
    },

    /// Request to the air-quality service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Service answered with a 5xx status
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The API answered with `"status": "fail"`
    #[error("API error: {0}")]
    ApiError(String),

    /// Failed to parse response from the service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// No API key configured
    #[error("AirVisual API key is not configured")]
    MissingApiKey,
}

/// AirVisual service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AirVisualConfig {
    /// API base URL (default: <https://api.airvisual.com/v2>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for AirVisualConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirVisualConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.airvisual.com/v2".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for AirVisualConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl AirVisualConfig {
    /// Get the API key as a string reference (for API calls)
    #[must_use]
    pub fn api_key_str(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|key| !key.trim().is_empty())
    }
}

/// Air-quality client trait
#[async_trait]
pub trait AirQualityClient: Send + Sync {
    /// Current pollution of the station nearest to a coordinate
    ///
    /// Exactly one HTTP request is made; failures are never retried.
    async fn nearest_city(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<NearestCity, AirVisualError>;
}

/// AirVisual HTTP client implementation
pub struct AirVisualClient {
    client: Client,
    config: AirVisualConfig,
    api_key: SecretString,
}

impl std::fmt::Debug for AirVisualClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirVisualClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AirVisualClient {
    /// Create a new AirVisual client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` if no key is configured, or `ConnectionFailed`
    /// if the HTTP client cannot be initialized.
    pub fn new(config: AirVisualConfig) -> Result<Self, AirVisualError> {
        let api_key = config
            .api_key_str()
            .map(|key| SecretString::from(key.to_owned()))
            .ok_or(AirVisualError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AirVisualError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), AirVisualError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(AirVisualError::InvalidCoordinates);
        }
        Ok(())
    }

    fn endpoint(&self) -> String {
        format!("{}/nearest_city", self.config.base_url.trim_end_matches('/'))
    }

    fn map_send_error(&self, e: &reqwest::Error) -> AirVisualError {
        if e.is_timeout() {
            AirVisualError::Timeout {
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            AirVisualError::ConnectionFailed(e.to_string())
        }
    }

    /// Map a non-success HTTP status, preferring the API's own message
    fn map_status(status: StatusCode, body: &str) -> AirVisualError {
        if status == StatusCode::TOO_MANY_REQUESTS {
            return AirVisualError::RateLimitExceeded;
        }
        if status.is_server_error() {
            return AirVisualError::ServiceUnavailable(format!("HTTP {status}"));
        }
        match serde_json::from_str::<ApiResponse>(body) {
            Ok(ApiResponse {
                data: Some(ApiData::Message { message }),
                ..
            }) => AirVisualError::ApiError(message),
            _ => AirVisualError::RequestFailed(format!("HTTP {status}")),
        }
    }

    /// Turn a 2xx body into a `NearestCity`
    fn parse_body(body: &str) -> Result<NearestCity, AirVisualError> {
        let response: ApiResponse =
            serde_json::from_str(body).map_err(|e| AirVisualError::ParseError(e.to_string()))?;

        match response.data {
            Some(ApiData::Message { message }) => Err(AirVisualError::ApiError(message)),
            _ if response.status.as_deref().is_some_and(|s| s != "success") => {
                Err(AirVisualError::ApiError(format!(
                    "status {}",
                    response.status.unwrap_or_default()
                )))
            },
            Some(ApiData::City(city)) => Self::parse_city(city),
            None => Err(AirVisualError::ParseError(
                "No data in response".to_string(),
            )),
        }
    }

    fn parse_city(city: CityData) -> Result<NearestCity, AirVisualError> {
        let pollution = city.current.pollution;
        let timestamp = domain::parse_timestamp(&pollution.ts)
            .map_err(|e| AirVisualError::ParseError(e.to_string()))?;

        Ok(NearestCity {
            city: city.city,
            state: city.state,
            country: city.country,
            pollution: CurrentPollution {
                aqius: pollution.aqius,
                timestamp,
                main_pollutant: pollution.mainus,
            },
        })
    }
}

#[async_trait]
impl AirQualityClient for AirVisualClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn nearest_city(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<NearestCity, AirVisualError> {
        Self::validate_coordinates(latitude, longitude)?;

        let url = self.endpoint();
        let params = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("key", self.api_key.expose_secret().to_string()),
        ];

        debug!(url = %url, "Fetching nearest city air quality");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        if !status.is_success() {
            return Err(Self::map_status(status, &body));
        }

        let city = Self::parse_body(&body)?;
        debug!(
            city = %city.label(),
            aqius = city.pollution.aqius,
            "Retrieved air quality"
        );
        Ok(city)
    }
}
