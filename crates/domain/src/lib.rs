//! Domain layer for AirCheck
//!
//! Contains the value objects that describe a single air-quality check:
//! where the device is, what the address is, what the provider measured and
//! how severe it is. This layer performs no I/O.

pub mod errors;
pub mod value_objects;

pub use errors::DomainError;
pub use value_objects::*;
