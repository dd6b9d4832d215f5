//! Severity tier derived from the US air-quality index

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete severity bucket for an `aqius` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    /// 0 to 50
    Good,
    /// 51 to 150
    Moderate,
    /// 151 to 200
    Unhealthy,
    /// 201 and above, plus anything the bands above do not cover
    Hazardous,
}

impl SeverityTier {
    /// All tiers from least to most severe
    pub const ALL: [Self; 4] = [Self::Good, Self::Moderate, Self::Unhealthy, Self::Hazardous];

    /// Classify an `aqius` value (inclusive bands)
    ///
    /// Negative values fall through to `Hazardous`, matching the catch-all
    /// band of the reference screen.
    #[must_use]
    pub const fn from_aqius(aqius: i32) -> Self {
        match aqius {
            0..=50 => Self::Good,
            51..=150 => Self::Moderate,
            151..=200 => Self::Unhealthy,
            _ => Self::Hazardous,
        }
    }

    /// Human-readable label shown as the screen title
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Unhealthy => "Unhealthy",
            Self::Hazardous => "Hazardous",
        }
    }

    /// Key of the background artwork for this tier
    #[must_use]
    pub const fn background(&self) -> &'static str {
        match self {
            Self::Good => "bg_good",
            Self::Moderate => "bg_soso",
            Self::Unhealthy => "bg_bad",
            Self::Hazardous => "bg_worst",
        }
    }

    /// Emoji used by text presentations
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Good => "😀",
            Self::Moderate => "🙂",
            Self::Unhealthy => "😷",
            Self::Hazardous => "☠️",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
