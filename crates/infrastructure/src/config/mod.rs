//! Application configuration
//!
//! Split into focused sub-modules:
//! - `integrations`: AirVisual and Nominatim settings
//! - `location`: permission flag and location providers
//!
//! Sources are layered: serde defaults, then an optional TOML file, then
//! `AIRCHECK_` environment variables with `__` as the section separator
//! (e.g. `AIRCHECK_AIR_QUALITY__API_KEY`).

mod integrations;
mod location;

use std::collections::HashMap;
use std::path::Path;

use application::RefreshPolicy;
use domain::value_objects::DisplayTimezone;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use integrations::{AirQualityAppConfig, GeocodingAppConfig};
pub use location::{LocationAppConfig, LocationProviderConfig, OVERRIDE_PROVIDER};

use crate::telemetry::TelemetryConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "AIRCHECK";

/// Default configuration file name (without extension)
pub const DEFAULT_CONFIG_FILE: &str = "config";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Display settings
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// IANA timezone used to render reading timestamps
    #[serde(default)]
    pub timezone: DisplayTimezone,
}

/// Refresh behaviour
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// What a trigger does while a check is outstanding
    #[serde(default)]
    pub policy: RefreshPolicy,
}

/// Invalid configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid configuration: {}", .0.join("; "))]
pub struct ConfigValidationError(pub Vec<String>);

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Air-quality service configuration
    #[serde(default)]
    pub air_quality: AirQualityAppConfig,

    /// Reverse geocoding configuration
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// Device location configuration
    #[serde(default)]
    pub location: LocationAppConfig,

    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Refresh configuration
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Logging and tracing configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment and an optional file
    ///
    /// Without `path`, `config.toml` in the working directory is read if it
    /// exists. An explicit `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Load configuration with an explicit environment map instead of the
    /// process environment
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., AIRCHECK_AIR_QUALITY__API_KEY)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns all problems found, not just the first.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let problems: Vec<String> = [
            self.air_quality.validate(),
            self.geocoding.validate(),
            self.location.validate(),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigValidationError(problems))
        }
    }
}
