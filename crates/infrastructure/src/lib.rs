//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the AirVisual and Nominatim adapters, configuration-backed
//! location providers, configuration loading and telemetry setup.

pub mod adapters;
pub mod config;
pub mod telemetry;
pub mod wiring;

pub use adapters::*;
pub use config::{
    AirQualityAppConfig, AppConfig, ConfigValidationError, DisplayConfig, GeocodingAppConfig,
    LocationAppConfig, LocationProviderConfig, RefreshConfig,
};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryGuard, init_telemetry};
pub use wiring::build_service;
