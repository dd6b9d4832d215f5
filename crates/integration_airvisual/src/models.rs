//! AirVisual data models
//!
//! Public types returned by the client plus the raw API response shapes.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Pollution measurement of the nearest monitoring station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPollution {
    /// US AQI value
    pub aqius: i32,
    /// Measurement time as reported (offset preserved)
    pub timestamp: DateTime<FixedOffset>,
    /// Main pollutant for the US AQI (`p2`, `p1`, `o3`, `n2`, `s2`, `co`)
    pub main_pollutant: Option<String>,
}

/// Nearest city with its current pollution reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearestCity {
    /// City name as known to AirVisual
    pub city: Option<String>,
    /// State or province
    pub state: Option<String>,
    /// Country name
    pub country: Option<String>,
    /// Current pollution reading
    pub pollution: CurrentPollution,
}

impl NearestCity {
    /// Short "city, country" label for logging
    #[must_use]
    pub fn label(&self) -> String {
        [self.city.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ============================================================================
// Raw API response types
// ============================================================================

/// Envelope of every AirVisual response
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    /// `"success"` or `"fail"`; some gateways omit it
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<ApiData>,
}

/// `data` is either the payload or an error message object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ApiData {
    City(CityData),
    Message { message: String },
}

#[derive(Debug, Deserialize)]
pub(crate) struct CityData {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub current: CurrentData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentData {
    pub pollution: PollutionData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PollutionData {
    pub ts: String,
    pub aqius: i32,
    #[serde(default)]
    pub mainus: Option<String>,
}
