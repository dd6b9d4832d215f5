//! AQI classification and timestamp presentation

use domain::value_objects::{AirQualityReading, DisplayTimezone, SeverityTier};

/// Maps readings to severity tiers and renders their timestamps
#[derive(Debug, Clone, Copy, Default)]
pub struct SeverityClassifier {
    timezone: DisplayTimezone,
}

impl SeverityClassifier {
    /// Create a classifier rendering times in `timezone`
    #[must_use]
    pub const fn new(timezone: DisplayTimezone) -> Self {
        Self { timezone }
    }

    /// Zone used by [`Self::format_checked_at`]
    #[must_use]
    pub const fn timezone(&self) -> DisplayTimezone {
        self.timezone
    }

    /// Tier of a US AQI value; negative values fall back to `Hazardous`
    #[must_use]
    pub const fn classify(&self, aqius: i32) -> SeverityTier {
        SeverityTier::from_aqius(aqius)
    }

    /// Reading time as `YYYY-MM-DD HH:MM` in the display zone
    #[must_use]
    pub fn format_checked_at(&self, reading: &AirQualityReading) -> String {
        reading.format_checked_at(&self.timezone)
    }
}
