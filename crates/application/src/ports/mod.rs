//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod air_quality_port;
mod geocoder_port;
mod location_port;
mod report_port;

#[cfg(test)]
pub use air_quality_port::MockAirQualityPort;
pub use air_quality_port::AirQualityPort;
#[cfg(test)]
pub use geocoder_port::MockReverseGeocoderPort;
pub use geocoder_port::{GeocodeError, ReverseGeocoderPort};
#[cfg(test)]
pub use location_port::{MockLocationPermissionPort, MockLocationProviderPort};
pub use location_port::{LocationFix, LocationPermissionPort, LocationProviderPort};
#[cfg(test)]
pub use report_port::MockReportPort;
pub use report_port::{
    AirQualityReport, FailureReason, ReportPort, RunOutcome, RunState, UPDATED_MESSAGE,
};
