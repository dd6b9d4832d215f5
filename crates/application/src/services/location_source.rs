//! Last-known location selection across providers

use std::cmp::Ordering;
use std::sync::Arc;

use domain::value_objects::GeoLocation;
use tracing::{debug, instrument};

use crate::ports::{LocationFix, LocationProviderPort};

/// Picks the best last-known fix from the enabled providers
pub struct LocationSource {
    providers: Vec<Arc<dyn LocationProviderPort>>,
}

impl std::fmt::Debug for LocationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationSource")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl LocationSource {
    /// Create a source over the given providers
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn LocationProviderPort>>) -> Self {
        Self { providers }
    }

    /// Whether at least one provider is switched on
    #[must_use]
    pub fn services_available(&self) -> bool {
        self.providers.iter().any(|p| p.is_enabled())
    }

    /// Best last-known coordinate, or `None` when no enabled provider has a
    /// usable fix
    #[instrument(skip(self))]
    pub async fn last_location(&self) -> Option<GeoLocation> {
        let mut fixes = Vec::with_capacity(self.providers.len());
        for provider in self.providers.iter().filter(|p| p.is_enabled()) {
            match provider.last_known_fix().await {
                Some(fix) if fix.location().is_some() => fixes.push(fix),
                Some(_) => debug!(provider = %provider.name(), "Discarding unusable fix"),
                None => debug!(provider = %provider.name(), "Provider has no fix"),
            }
        }
        best_fix(&fixes).and_then(LocationFix::location)
    }
}

/// Most recent fix; equally recent fixes are ranked by accuracy radius
#[must_use]
pub fn best_fix(fixes: &[LocationFix]) -> Option<&LocationFix> {
    fixes.iter().max_by(|a, b| {
        a.recorded_at
            .cmp(&b.recorded_at)
            .then_with(|| compare_accuracy(b.accuracy_m, a.accuracy_m))
    })
}

/// Orders accuracy radii ascending, unknown radius last
fn compare_accuracy(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
