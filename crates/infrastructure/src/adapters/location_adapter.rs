//! Location adapters - Location providers and permission backed by configuration
//!
//! A headless host has no platform location service, so providers and the
//! permission flag come from `[location]` in the configuration.

use application::ports::{LocationFix, LocationPermissionPort, LocationProviderPort};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::{LocationAppConfig, LocationProviderConfig};

/// Location provider reporting a fixed, configured fix
#[derive(Debug, Clone)]
pub struct ConfiguredLocationProvider {
    name: String,
    enabled: bool,
    fix: Option<LocationFix>,
}

impl ConfiguredLocationProvider {
    /// Build from a provider section; a missing `recorded_at` is stamped with
    /// the time of construction
    #[must_use]
    pub fn from_config(config: &LocationProviderConfig) -> Self {
        Self::from_config_at(config, Utc::now())
    }

    fn from_config_at(config: &LocationProviderConfig, now: DateTime<Utc>) -> Self {
        let fix = match (config.latitude, config.longitude) {
            (Some(latitude), Some(longitude)) => Some(LocationFix {
                latitude,
                longitude,
                accuracy_m: config.accuracy_m,
                recorded_at: config.recorded_at.unwrap_or(now),
            }),
            _ => None,
        };
        Self {
            name: config.name.clone(),
            enabled: config.enabled,
            fix,
        }
    }

    /// All providers of a location section, in configured order
    #[must_use]
    pub fn all_from(config: &LocationAppConfig) -> Vec<Self> {
        let now = Utc::now();
        config
            .providers
            .iter()
            .map(|provider| Self::from_config_at(provider, now))
            .collect()
    }
}

#[async_trait]
impl LocationProviderPort for ConfiguredLocationProvider {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn last_known_fix(&self) -> Option<LocationFix> {
        self.fix
    }
}

/// Permission answer taken from configuration
#[derive(Debug, Clone, Copy)]
pub struct ConfiguredPermission {
    granted: bool,
}

impl ConfiguredPermission {
    #[must_use]
    pub const fn new(granted: bool) -> Self {
        Self { granted }
    }
}

#[async_trait]
impl LocationPermissionPort for ConfiguredPermission {
    async fn is_granted(&self) -> bool {
        self.granted
    }
}
