//! Application services - Use case implementations

mod air_quality_service;
mod location_source;
mod reverse_geocoder;
mod severity_classifier;

pub use air_quality_service::{
    AirQualityService, PERMISSION_DENIED_MESSAGE, RefreshError, RefreshPolicy,
};
pub use location_source::{LocationSource, best_fix};
pub use reverse_geocoder::{DEFAULT_MAX_RESULTS, ReverseGeocoder};
pub use severity_classifier::SeverityClassifier;
