//! Nominatim reverse-geocoding client
//!
//! Turns coordinates into structured postal addresses using the
//! [Nominatim](https://nominatim.openstreetmap.org) `/reverse` endpoint.
//!
//! Requests are spaced according to the Nominatim usage policy
//! (max 1 request/second) and carry an identifying User-Agent.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::{GeocodingError, NominatimConfig};

/// Structured address candidate returned by a reverse lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodedAddress {
    /// Street or other thoroughfare name
    pub thoroughfare: Option<String>,
    /// Country name in the requested language
    pub country: Option<String>,
    /// First-level administrative area (state, province, region)
    pub admin_area: Option<String>,
    /// Full formatted address as provided by the service
    pub display_name: Option<String>,
}

/// Trait for reverse-geocoding clients
#[async_trait]
pub trait ReverseGeocodingClient: Send + Sync {
    /// Look up address candidates for a coordinate
    ///
    /// Returns at most `max_results` candidates, best match first. An empty
    /// list means the service had no address for this point.
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
        max_results: u8,
    ) -> Result<Vec<GeocodedAddress>, GeocodingError>;
}

/// Nominatim-based reverse-geocoding client with rate limiting
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    last_request: Mutex<Option<Instant>>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            last_request: Mutex::new(None),
        })
    }

    /// Enforce Nominatim's rate limit
    async fn rate_limit(&self) {
        let interval = Duration::from_millis(self.config.min_interval_ms);
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < interval {
                let wait = interval.saturating_sub(elapsed);
                debug!(?wait, "Rate limiting geocoding request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }

    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), GeocodingError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeocodingError::InvalidCoordinates(format!(
                "lat={latitude}, lon={longitude}"
            )));
        }
        Ok(())
    }

    fn endpoint(&self) -> String {
        format!("{}/reverse", self.config.base_url.trim_end_matches('/'))
    }

    fn map_send_error(e: &reqwest::Error) -> GeocodingError {
        if e.is_timeout() {
            GeocodingError::Timeout
        } else {
            GeocodingError::ConnectionFailed(e.to_string())
        }
    }

    fn map_status(status: StatusCode, latitude: f64, longitude: f64) -> GeocodingError {
        match status {
            StatusCode::BAD_REQUEST => {
                GeocodingError::InvalidCoordinates(format!("lat={latitude}, lon={longitude}"))
            },
            StatusCode::TOO_MANY_REQUESTS => GeocodingError::RateLimitExceeded,
            s if s.is_server_error() => GeocodingError::ServiceUnavailable(format!("HTTP {s}")),
            s => GeocodingError::RequestFailed(format!("HTTP {s}")),
        }
    }

    /// Turn a 2xx body into address candidates
    ///
    /// Nominatim reports "nothing here" as `{"error": "Unable to geocode"}`
    /// with a 200 status.
    fn parse_body(body: &str) -> Result<Vec<GeocodedAddress>, GeocodingError> {
        let response: ReverseResponse =
            serde_json::from_str(body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        if let Some(error) = response.error {
            debug!(%error, "Reverse geocoding returned no result");
            return Ok(Vec::new());
        }

        let candidate = response.into_address();
        if candidate == GeocodedAddress::default() {
            return Ok(Vec::new());
        }
        Ok(vec![candidate])
    }
}

#[async_trait]
impl ReverseGeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
        max_results: u8,
    ) -> Result<Vec<GeocodedAddress>, GeocodingError> {
        Self::validate_coordinates(latitude, longitude)?;
        if max_results == 0 {
            return Ok(Vec::new());
        }

        self.rate_limit().await;

        let url = self.endpoint();
        let params = [
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("format", "jsonv2".to_string()),
            ("addressdetails", "1".to_string()),
            ("accept-language", self.config.language.clone()),
        ];

        debug!(%latitude, %longitude, "Reverse geocoding");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_status(status, latitude, longitude));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        let mut candidates = Self::parse_body(&body)?;
        candidates.truncate(usize::from(max_results));
        debug!(count = candidates.len(), "Reverse geocoded coordinates");
        Ok(candidates)
    }
}

/// Raw Nominatim `/reverse` response
#[derive(Debug, Default, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    address: Option<RawAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAddress {
    road: Option<String>,
    pedestrian: Option<String>,
    footway: Option<String>,
    path: Option<String>,
    square: Option<String>,
    country: Option<String>,
    state: Option<String>,
    province: Option<String>,
    region: Option<String>,
    city: Option<String>,
}

fn first_present<const N: usize>(values: [Option<String>; N]) -> Option<String> {
    values
        .into_iter()
        .flatten()
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

impl ReverseResponse {
    fn into_address(self) -> GeocodedAddress {
        let display_name = self.display_name.filter(|d| !d.trim().is_empty());
        let Some(raw) = self.address else {
            return GeocodedAddress {
                display_name,
                ..Default::default()
            };
        };

        GeocodedAddress {
            thoroughfare: first_present([raw.road, raw.pedestrian, raw.footway, raw.path, raw.square]),
            country: first_present([raw.country]),
            admin_area: first_present([raw.state, raw.province, raw.region, raw.city]),
            display_name,
        }
    }
}
