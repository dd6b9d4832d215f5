//! Timezone value object

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// IANA timezone used to render reading timestamps
///
/// Validated against the chrono-tz database on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayTimezone(Tz);

impl DisplayTimezone {
    /// Parse an IANA timezone name
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimezone` if the name is not in the IANA database.
    pub fn new(name: &str) -> Result<Self, DomainError> {
        Tz::from_str(name.trim())
            .map(Self)
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
    }

    /// Get the underlying chrono-tz zone
    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.0
    }

    /// Get the timezone name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0.name()
    }

    /// Check if this is a UTC timezone
    #[must_use]
    pub fn is_utc(&self) -> bool {
        matches!(self.as_str(), "UTC" | "Etc/UTC" | "Etc/GMT")
    }

    /// Asia/Seoul, the default display zone
    #[must_use]
    pub const fn seoul() -> Self {
        Self(Tz::Asia__Seoul)
    }

    /// UTC timezone
    #[must_use]
    pub const fn utc() -> Self {
        Self(Tz::UTC)
    }
}

impl Default for DisplayTimezone {
    fn default() -> Self {
        Self::seoul()
    }
}

impl fmt::Display for DisplayTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for DisplayTimezone {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<DisplayTimezone> for String {
    fn from(value: DisplayTimezone) -> Self {
        value.as_str().to_string()
    }
}

impl FromStr for DisplayTimezone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timezone_creation() {
        let tz = DisplayTimezone::new("Europe/Berlin").expect("valid zone");
        assert_eq!(tz.as_str(), "Europe/Berlin");
    }

    #[test]
    fn test_timezone_default_is_seoul() {
        assert_eq!(DisplayTimezone::default().as_str(), "Asia/Seoul");
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        let err = DisplayTimezone::new("Mars/Olympus").unwrap_err();
        assert!(matches!(err, DomainError::InvalidTimezone(_)));
    }

    #[test]
    fn test_timezone_is_utc() {
        assert!(DisplayTimezone::utc().is_utc());
        assert!(!DisplayTimezone::seoul().is_utc());
    }

    #[test]
    fn test_timezone_serde() {
        let json = serde_json::to_string(&DisplayTimezone::seoul()).expect("serialize");
        assert_eq!(json, "\"Asia/Seoul\"");

        let parsed: DisplayTimezone =
            serde_json::from_str("\"America/New_York\"").expect("deserialize");
        assert_eq!(parsed.as_str(), "America/New_York");

        assert!(serde_json::from_str::<DisplayTimezone>("\"Nowhere/City\"").is_err());
    }

    #[test]
    fn test_timezone_from_str() {
        let tz: DisplayTimezone = "UTC".parse().expect("valid");
        assert!(tz.is_utc());
    }
}
