//! Integration configurations: air-quality service and reverse geocoding.

use integration_airvisual::AirVisualConfig;
use integration_geocoding::NominatimConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

// ==============================
// Air-Quality Configuration
// ==============================

/// AirVisual (IQAir) service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AirQualityAppConfig {
    /// API base URL
    #[serde(default = "default_air_quality_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_air_quality_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for AirQualityAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirQualityAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_air_quality_base_url() -> String {
    "https://api.airvisual.com/v2".to_string()
}

const fn default_air_quality_timeout() -> u64 {
    10
}

impl Default for AirQualityAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_air_quality_base_url(),
            api_key: None,
            timeout_secs: default_air_quality_timeout(),
        }
    }
}

impl AirQualityAppConfig {
    /// Whether a non-blank API key is configured
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Convert to the client configuration
    #[must_use]
    pub fn to_client_config(&self) -> AirVisualConfig {
        AirVisualConfig {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            timeout_secs: self.timeout_secs,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("air_quality.base_url must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("air_quality.timeout_secs must be greater than 0".to_string());
        }
        if !self.has_api_key() {
            return Err(
                "air_quality.api_key is required (set AIRCHECK_AIR_QUALITY__API_KEY)".to_string(),
            );
        }
        Ok(())
    }
}

// ==============================
// Geocoding Configuration
// ==============================

/// Reverse geocoding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Nominatim base URL
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_geocoding_timeout")]
    pub timeout_secs: u64,

    /// Preferred address language
    #[serde(default = "default_geocoding_language")]
    pub language: String,

    /// Number of address candidates to request
    #[serde(default = "default_max_results")]
    pub max_results: u8,

    /// User-Agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_geocoding_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_geocoding_timeout() -> u64 {
    5
}

fn default_geocoding_language() -> String {
    "en".to_string()
}

const fn default_max_results() -> u8 {
    application::DEFAULT_MAX_RESULTS
}

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoding_base_url(),
            timeout_secs: default_geocoding_timeout(),
            language: default_geocoding_language(),
            max_results: default_max_results(),
            user_agent: None,
        }
    }
}

impl GeocodingAppConfig {
    /// Convert to the client configuration
    #[must_use]
    pub fn to_client_config(&self) -> NominatimConfig {
        let defaults = NominatimConfig::default();
        NominatimConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            language: self.language.clone(),
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            min_interval_ms: defaults.min_interval_ms,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_results == 0 {
            return Err("geocoding.max_results must be at least 1".to_string());
        }
        self.to_client_config()
            .validate()
            .map_err(|e| format!("geocoding: {e}"))
    }
}
