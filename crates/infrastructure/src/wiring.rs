//! Service assembly from configuration

use std::sync::Arc;

use application::ports::{LocationProviderPort, ReportPort};
use application::{
    AirQualityService, ApplicationError, LocationSource, ReverseGeocoder, SeverityClassifier,
};
use tracing::info;

use crate::adapters::{
    AirQualityAdapter, ConfiguredLocationProvider, ConfiguredPermission, NominatimGeocoderAdapter,
};
use crate::config::AppConfig;

/// Build an [`AirQualityService`] wired to the HTTP adapters described by
/// `config`
///
/// # Errors
///
/// Returns a configuration error if an adapter cannot be created, e.g. when
/// no air-quality API key is set.
pub fn build_service(
    config: &AppConfig,
    reporter: Arc<dyn ReportPort>,
) -> Result<AirQualityService, ApplicationError> {
    let air_quality = AirQualityAdapter::with_config(config.air_quality.to_client_config())?;
    let geocoder = NominatimGeocoderAdapter::with_config(&config.geocoding.to_client_config())
        .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

    let providers: Vec<Arc<dyn LocationProviderPort>> =
        ConfiguredLocationProvider::all_from(&config.location)
            .into_iter()
            .map(|provider| Arc::new(provider) as Arc<dyn LocationProviderPort>)
            .collect();

    info!(
        providers = providers.len(),
        permission = config.location.permission_granted,
        timezone = %config.display.timezone,
        policy = ?config.refresh.policy,
        "Air-quality service assembled"
    );

    let service = AirQualityService::new(
        Arc::new(ConfiguredPermission::new(config.location.permission_granted)),
        LocationSource::new(providers),
        ReverseGeocoder::new(Arc::new(geocoder)).with_max_results(config.geocoding.max_results),
        Arc::new(air_quality),
        reporter,
    )
    .with_classifier(SeverityClassifier::new(config.display.timezone))
    .with_policy(config.refresh.policy);

    Ok(service)
}
