//! Geographic location value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic location with latitude and longitude
///
/// A missing fix is expressed as `Option<GeoLocation>::None`, never as a
/// magic coordinate. [`GeoLocation::from_platform`] converts the `{0, 0}`
/// "no fix" sentinel that platform location services report into `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

/// Error type for invalid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCoordinates;

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180"
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

impl GeoLocation {
    /// Create a new location with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180] (NaN included)
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a location without validation (for trusted sources)
    ///
    /// Caller must ensure latitude is in [-90, 90] and longitude in [-180, 180]
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Interpret a raw platform reading
    ///
    /// Platform location services report "no fix" as `{0, 0}`. That sentinel
    /// and out-of-range values both map to `None`.
    #[must_use]
    pub fn from_platform(latitude: f64, longitude: f64) -> Option<Self> {
        Self::new(latitude, longitude)
            .ok()
            .filter(|location| !location.is_unset())
    }

    /// Whether this is the `{0, 0}` "no fix" sentinel
    ///
    /// Platforms treat a location as unset when *either*
    /// component is exactly zero.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.latitude == 0.0 || self.longitude == 0.0
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude as a decimal-degree query string
    #[must_use]
    pub fn latitude_param(&self) -> String {
        self.latitude.to_string()
    }

    /// Longitude as a decimal-degree query string
    #[must_use]
    pub fn longitude_param(&self) -> String {
        self.longitude.to_string()
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Common locations for defaults
impl GeoLocation {
    /// Seoul, South Korea
    #[must_use]
    pub const fn seoul() -> Self {
        Self::new_unchecked(37.5665, 126.978)
    }

    /// Berlin, Germany
    #[must_use]
    pub const fn berlin() -> Self {
        Self::new_unchecked(52.52, 13.405)
    }
}
