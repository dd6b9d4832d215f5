//! Device location ports
//!
//! Platform location services are external collaborators. Providers expose a
//! snapshot of their last-known fix; the permission port answers whether the
//! user allowed location access at all.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Last-known fix as reported by a location provider
///
/// Coordinates are kept raw so that the `{0, 0}` "no fix" sentinel some
/// platforms emit can be recognised and discarded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Estimated horizontal accuracy radius in meters
    pub accuracy_m: Option<f64>,
    /// When the fix was taken
    pub recorded_at: DateTime<Utc>,
}

impl LocationFix {
    /// Create a fix recorded now
    #[must_use]
    pub fn now(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m: None,
            recorded_at: Utc::now(),
        }
    }

    /// Attach an accuracy radius
    #[must_use]
    pub const fn with_accuracy(mut self, accuracy_m: f64) -> Self {
        self.accuracy_m = Some(accuracy_m);
        self
    }

    /// Override the recording time
    #[must_use]
    pub const fn recorded_at(mut self, recorded_at: DateTime<Utc>) -> Self {
        self.recorded_at = recorded_at;
        self
    }

    /// The usable coordinate, or `None` for the sentinel and out-of-range values
    #[must_use]
    pub fn location(&self) -> Option<GeoLocation> {
        GeoLocation::from_platform(self.latitude, self.longitude)
    }
}

/// Port for a single location provider (GPS, network, ...)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationProviderPort: Send + Sync {
    /// Provider name used in logs
    fn name(&self) -> String;

    /// Whether the provider is currently switched on
    fn is_enabled(&self) -> bool;

    /// Snapshot of the provider's cached fix; never waits for a fresh one
    async fn last_known_fix(&self) -> Option<LocationFix>;
}

/// Port answering whether location access has been granted
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationPermissionPort: Send + Sync {
    /// Whether fine or coarse location access is granted
    async fn is_granted(&self) -> bool;
}
