//! Air-quality reading value object

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::{DisplayTimezone, SeverityTier};
use crate::errors::DomainError;

/// Pattern used for the "checked at" line
pub const CHECKED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A single measurement reported by the air-quality provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQualityReading {
    /// US AQI value
    aqius: i32,
    /// Instant of the measurement, with the offset the provider sent
    timestamp: DateTime<FixedOffset>,
    /// Main pollutant code for the US AQI (e.g. "p2" for PM2.5), if reported
    main_pollutant: Option<String>,
}

impl AirQualityReading {
    /// Create a reading from already-parsed parts
    #[must_use]
    pub const fn new(aqius: i32, timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            aqius,
            timestamp,
            main_pollutant: None,
        }
    }

    /// Create a reading from the provider's ISO-8601 timestamp string
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateTime` if `ts` is not an offset timestamp.
    pub fn parse(aqius: i32, ts: &str) -> Result<Self, DomainError> {
        Ok(Self::new(aqius, parse_timestamp(ts)?))
    }

    /// Attach the main pollutant code
    #[must_use]
    pub fn with_main_pollutant(mut self, pollutant: impl Into<String>) -> Self {
        self.main_pollutant = Some(pollutant.into());
        self
    }

    /// US AQI value
    #[must_use]
    pub const fn aqius(&self) -> i32 {
        self.aqius
    }

    /// Measurement instant
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Main pollutant code, if reported
    #[must_use]
    pub fn main_pollutant(&self) -> Option<&str> {
        self.main_pollutant.as_deref()
    }

    /// Severity tier of this reading
    #[must_use]
    pub const fn tier(&self) -> SeverityTier {
        SeverityTier::from_aqius(self.aqius)
    }

    /// Measurement instant rendered in `zone` as `yyyy-MM-dd HH:mm`
    #[must_use]
    pub fn format_checked_at(&self, zone: &DisplayTimezone) -> String {
        self.timestamp
            .with_timezone(&zone.tz())
            .format(CHECKED_AT_FORMAT)
            .to_string()
    }
}

/// Parse an offset or zoned ISO-8601 timestamp
///
/// Accepts RFC 3339 (`2023-01-01T00:00:00.000Z`, `2023-01-01T09:00:00+09:00`)
/// and the bracketed region suffix some providers append
/// (`2023-01-01T09:00:00+09:00[Asia/Seoul]`), where the offset wins.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateTime` if no offset can be found.
pub fn parse_timestamp(ts: &str) -> Result<DateTime<FixedOffset>, DomainError> {
    let trimmed = ts.trim();
    let without_region = trimmed
        .split_once('[')
        .map_or(trimmed, |(instant, _)| instant);

    DateTime::parse_from_rfc3339(without_region)
        .map_err(|e| DomainError::InvalidDateTime(format!("{ts}: {e}")))
}
