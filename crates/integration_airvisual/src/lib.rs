//! AirVisual air-quality integration
//!
//! Client for the AirVisual (IQAir) v2 API (<https://api-docs.iqair.com>).
//! Fetches the current pollution reading of the station nearest to a coordinate.

pub mod client;
mod models;

pub use client::{AirVisualClient, AirVisualConfig, AirVisualError, AirQualityClient};
pub use models::{CurrentPollution, NearestCity};
