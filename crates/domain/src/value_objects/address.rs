//! Postal address value object produced by reverse geocoding

use serde::{Deserialize, Serialize};
use std::fmt;

/// A human-readable address for a coordinate
///
/// Geocoders routinely omit components, so every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street or other thoroughfare name
    pub thoroughfare: Option<String>,
    /// Country name in the requested language
    pub country_name: Option<String>,
    /// Top-level administrative area (state, province, metropolitan city)
    pub admin_area: Option<String>,
}

impl Address {
    /// Create an address from its three components
    #[must_use]
    pub fn new(
        thoroughfare: Option<String>,
        country_name: Option<String>,
        admin_area: Option<String>,
    ) -> Self {
        Self {
            thoroughfare: non_blank(thoroughfare),
            country_name: non_blank(country_name),
            admin_area: non_blank(admin_area),
        }
    }

    /// Headline shown above the reading: the thoroughfare
    #[must_use]
    pub fn title(&self) -> String {
        self.thoroughfare.clone().unwrap_or_default()
    }

    /// Secondary line: country followed by administrative area
    #[must_use]
    pub fn subtitle(&self) -> String {
        [self.country_name.as_deref(), self.admin_area.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether no component is present
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.thoroughfare.is_none() && self.country_name.is_none() && self.admin_area.is_none()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.title();
        let subtitle = self.subtitle();
        match (title.is_empty(), subtitle.is_empty()) {
            (false, false) => write!(f, "{title}, {subtitle}"),
            (false, true) => write!(f, "{title}"),
            (true, _) => write!(f, "{subtitle}"),
        }
    }
}
