//! Application layer - Use cases and orchestration
//!
//! Contains the port definitions for location, geocoding, air-quality and
//! reporting collaborators, plus the services that sequence them into one
//! air-quality check. Infrastructure adapters implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
