//! Location configuration: permission flag and statically configured providers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::default_true;

/// Name of the provider inserted by [`LocationAppConfig::override_fix`]
pub const OVERRIDE_PROVIDER: &str = "manual";

/// Device location configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationAppConfig {
    /// Whether location access is granted
    #[serde(default = "default_true")]
    pub permission_granted: bool,

    /// Location providers in priority-free order
    #[serde(default = "default_providers")]
    pub providers: Vec<LocationProviderConfig>,
}

/// A single configured location provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationProviderConfig {
    /// Provider name (`gps`, `network`, ...)
    pub name: String,

    /// Whether the provider is switched on
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Last-known latitude; no fix when absent
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Last-known longitude; no fix when absent
    #[serde(default)]
    pub longitude: Option<f64>,

    /// Accuracy radius of the fix in meters
    #[serde(default)]
    pub accuracy_m: Option<f64>,

    /// When the fix was taken; defaults to load time
    #[serde(default)]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl LocationProviderConfig {
    /// Enabled provider without a fix
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            latitude: None,
            longitude: None,
            accuracy_m: None,
            recorded_at: None,
        }
    }

    /// Set the last-known coordinate
    #[must_use]
    pub fn with_fix(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

fn default_providers() -> Vec<LocationProviderConfig> {
    vec![
        LocationProviderConfig::named("gps"),
        LocationProviderConfig::named("network"),
    ]
}

impl Default for LocationAppConfig {
    fn default() -> Self {
        Self {
            permission_granted: true,
            providers: default_providers(),
        }
    }
}

impl LocationAppConfig {
    /// Replace the configured providers with a fixed coordinate
    ///
    /// Used for command-line overrides. The configured providers stay listed
    /// but are disabled, so the override is the only fix a check can see.
    pub fn override_fix(&mut self, latitude: f64, longitude: f64) {
        let mut provider =
            LocationProviderConfig::named(OVERRIDE_PROVIDER).with_fix(latitude, longitude);
        provider.recorded_at = Some(Utc::now());
        self.providers.retain(|p| p.name != OVERRIDE_PROVIDER);
        for configured in &mut self.providers {
            configured.enabled = false;
        }
        self.providers.insert(0, provider);
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid provider.
    pub fn validate(&self) -> Result<(), String> {
        for provider in &self.providers {
            if provider.name.trim().is_empty() {
                return Err("location.providers[].name must not be empty".to_string());
            }
            if provider.latitude.is_some() != provider.longitude.is_some() {
                return Err(format!(
                    "location provider '{}' needs both latitude and longitude",
                    provider.name
                ));
            }
            if provider.accuracy_m.is_some_and(|accuracy| accuracy < 0.0) {
                return Err(format!(
                    "location provider '{}' has a negative accuracy",
                    provider.name
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_gps_and_network_without_fix() {
        let config = LocationAppConfig::default();
        assert!(config.permission_granted);
        let names: Vec<_> = config.providers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["gps", "network"]);
        assert!(config.providers.iter().all(|p| p.enabled && p.latitude.is_none()));
    }

    #[test]
    fn override_fix_goes_first_and_replaces_previous() {
        let mut config = LocationAppConfig::default();
        config.override_fix(37.5, 127.0);
        config.override_fix(52.5, 13.4);
        assert_eq!(config.providers.len(), 3);
        assert_eq!(config.providers[0].name, "manual");
        assert_eq!(config.providers[0].latitude, Some(52.5));
        assert!(config.providers[0].recorded_at.is_some());
    }

    #[test]
    fn override_fix_disables_configured_providers() {
        let mut config = LocationAppConfig {
            permission_granted: true,
            providers: vec![LocationProviderConfig::named("gps").with_fix(37.5665, 126.978)],
        };
        config.override_fix(52.52, 13.405);

        assert!(config.providers[0].enabled);
        assert!(!config.providers[1].enabled);
        assert_eq!(config.providers[1].latitude, Some(37.5665));
    }

    #[test]
    fn validate_requires_complete_coordinates() {
        let mut provider = LocationProviderConfig::named("gps");
        provider.latitude = Some(37.5);
        let config = LocationAppConfig {
            permission_granted: true,
            providers: vec![provider],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_accuracy() {
        let mut provider = LocationProviderConfig::named("gps").with_fix(37.5, 127.0);
        provider.accuracy_m = Some(-3.0);
        let config = LocationAppConfig {
            permission_granted: true,
            providers: vec![provider],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn deserializes_partial_provider() {
        let json = r#"{"providers": [{"name": "gps", "latitude": 37.5, "longitude": 127.0}]}"#;
        let config: LocationAppConfig = serde_json::from_str(json).unwrap();
        assert!(config.permission_granted);
        assert!(config.providers[0].enabled);
        assert!(config.validate().is_ok());
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn override_always_leads_and_validates(
                lat in -90.0f64..=90.0,
                lon in -180.0f64..=180.0,
                repeats in 1usize..4,
            ) {
                let mut config = LocationAppConfig::default();
                for _ in 0..repeats {
                    config.override_fix(lat, lon);
                }
                prop_assert_eq!(config.providers.len(), 3);
                prop_assert_eq!(config.providers[0].name.as_str(), OVERRIDE_PROVIDER);
                prop_assert_eq!(config.providers.iter().filter(|p| p.enabled).count(), 1);
                prop_assert!(config.validate().is_ok());
            }
        }
    }
}
