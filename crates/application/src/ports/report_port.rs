//! Reporting port
//!
//! The presentation side of an air-quality check. Every run ends with exactly
//! one [`RunOutcome`] handed to the [`ReportPort`].

use std::fmt;

use domain::value_objects::{Address, AirQualityReading, GeoLocation, SeverityTier};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Message reported with every successful run
pub const UPDATED_MESSAGE: &str = "Air quality updated.";

/// Why a run ended without a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Location permission denied or every provider switched off
    LocationUnavailable,
    /// No usable coordinate (including the `{0, 0}` sentinel)
    NoFix,
    /// The air-quality request failed (transport error or non-2xx status)
    FetchFailed,
}

impl FailureReason {
    /// Default user-facing message for this reason
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::LocationUnavailable => "Location services are unavailable.",
            Self::NoFix => "Could not read your location. Press refresh to try again.",
            Self::FetchFailed => "Air quality update failed.",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LocationUnavailable => "location unavailable",
            Self::NoFix => "no fix",
            Self::FetchFailed => "fetch failed",
        };
        f.write_str(name)
    }
}

/// Progress of a single air-quality check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "reason")]
pub enum RunState {
    /// Nothing running
    Idle,
    /// Reading the last-known fix
    LocatingDevice,
    /// Reverse geocoding the fix
    ResolvingAddress,
    /// Waiting for the air-quality service
    FetchingAirQuality,
    /// Terminal: a reading was reported
    Ready,
    /// Terminal: the run failed
    Failed(FailureReason),
}

impl RunState {
    /// Whether the state ends a run
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed(_))
    }
}

/// Everything the screen shows after a successful check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReport {
    /// Headline: the thoroughfare, empty when no address was resolved
    pub location_title: String,
    /// Second line: country and administrative area
    pub location_subtitle: String,
    /// US AQI value
    pub count: i32,
    /// Reading time rendered in the display timezone
    pub checked_at: String,
    /// Severity tier of `count`
    pub tier: SeverityTier,
    /// Label of `tier`
    pub tier_label: String,
    /// Background artwork key of `tier`
    pub background: String,
    /// The raw reading
    pub reading: AirQualityReading,
    /// Coordinate the reading was fetched for
    pub location: GeoLocation,
    /// Resolved address, if geocoding succeeded
    pub address: Option<Address>,
    /// Non-fatal problems encountered during the run
    pub notices: Vec<String>,
    /// User-facing status message
    pub message: String,
}

/// Terminal result of one check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum RunOutcome {
    /// A reading was obtained
    Ready(AirQualityReport),
    /// The run failed
    Failed {
        /// Failure classification
        reason: FailureReason,
        /// User-facing message
        message: String,
    },
}

impl RunOutcome {
    /// Failed outcome carrying the reason's default message
    #[must_use]
    pub fn failed(reason: FailureReason) -> Self {
        Self::failed_with(reason, reason.message())
    }

    /// Failed outcome with a specific message
    #[must_use]
    pub fn failed_with(reason: FailureReason, message: impl Into<String>) -> Self {
        Self::Failed {
            reason,
            message: message.into(),
        }
    }

    /// The terminal state this outcome represents
    #[must_use]
    pub const fn state(&self) -> RunState {
        match self {
            Self::Ready(_) => RunState::Ready,
            Self::Failed { reason, .. } => RunState::Failed(*reason),
        }
    }

    /// The user-facing message
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Ready(report) => &report.message,
            Self::Failed { message, .. } => message,
        }
    }

    /// The report, if the run succeeded
    #[must_use]
    pub const fn report(&self) -> Option<&AirQualityReport> {
        match self {
            Self::Ready(report) => Some(report),
            Self::Failed { .. } => None,
        }
    }
}

/// Port receiving the outcome of every run
///
/// Called exactly once per completed run, never for a superseded one.
#[cfg_attr(test, automock)]
pub trait ReportPort: Send + Sync {
    /// Present an outcome to the user
    fn report(&self, outcome: &RunOutcome);
}
