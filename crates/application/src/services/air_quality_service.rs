//! Air-quality check orchestration
//!
//! Sequences one check: permission and provider check, last-known location,
//! reverse geocoding, air-quality fetch, classification and reporting.
//!
//! Each service instance runs at most one check at a time. What happens to a
//! trigger that arrives while a check is outstanding is governed by
//! [`RefreshPolicy`]. A superseded check stops at its next await point and
//! never reports.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use domain::value_objects::{Address, AirQualityReading, GeoLocation};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use super::{LocationSource, ReverseGeocoder, SeverityClassifier};
use crate::ports::{
    AirQualityPort, AirQualityReport, FailureReason, LocationPermissionPort, ReportPort,
    RunOutcome, RunState, UPDATED_MESSAGE,
};

/// Message reported when location permission has been denied
pub const PERMISSION_DENIED_MESSAGE: &str = "Location permission was denied.";

/// What to do with a trigger while a check is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Refuse the new trigger
    Reject,
    /// Cancel the outstanding check and start over
    #[default]
    Supersede,
}

/// Why a trigger did not produce a terminal state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RefreshError {
    /// A check is already running and the policy is [`RefreshPolicy::Reject`]
    #[error("An air-quality check is already in progress")]
    Busy,
    /// A newer trigger cancelled this check before it finished
    #[error("Superseded by a newer air-quality check")]
    Superseded,
}

struct InFlight {
    id: u64,
    cancel: watch::Sender<bool>,
}

/// Orchestrates air-quality checks
pub struct AirQualityService {
    permission: Arc<dyn LocationPermissionPort>,
    locations: LocationSource,
    geocoder: ReverseGeocoder,
    air_quality: Arc<dyn AirQualityPort>,
    reporter: Arc<dyn ReportPort>,
    classifier: SeverityClassifier,
    policy: RefreshPolicy,
    in_flight: Mutex<Option<InFlight>>,
    next_run: AtomicU64,
    state: watch::Sender<RunState>,
}

impl std::fmt::Debug for AirQualityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AirQualityService")
            .field("locations", &self.locations)
            .field("geocoder", &self.geocoder)
            .field("air_quality", &"<AirQualityPort>")
            .field("reporter", &"<ReportPort>")
            .field("classifier", &self.classifier)
            .field("policy", &self.policy)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl AirQualityService {
    /// Create a service with the default [`RefreshPolicy`] and classifier
    #[must_use]
    pub fn new(
        permission: Arc<dyn LocationPermissionPort>,
        locations: LocationSource,
        geocoder: ReverseGeocoder,
        air_quality: Arc<dyn AirQualityPort>,
        reporter: Arc<dyn ReportPort>,
    ) -> Self {
        Self {
            permission,
            locations,
            geocoder,
            air_quality,
            reporter,
            classifier: SeverityClassifier::default(),
            policy: RefreshPolicy::default(),
            in_flight: Mutex::new(None),
            next_run: AtomicU64::new(0),
            state: watch::Sender::new(RunState::Idle),
        }
    }

    /// Use a specific classifier (display timezone)
    #[must_use]
    pub fn with_classifier(mut self, classifier: SeverityClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Use a specific refresh policy
    #[must_use]
    pub fn with_policy(mut self, policy: RefreshPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The configured refresh policy
    #[must_use]
    pub const fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// State of the newest check
    #[must_use]
    pub fn state(&self) -> RunState {
        *self.state.borrow()
    }

    /// Observe state transitions of the newest check
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RunState> {
        self.state.subscribe()
    }

    /// Run one air-quality check (app start or manual refresh)
    ///
    /// Reports exactly once and returns the terminal state, unless the
    /// trigger was rejected or the check was superseded.
    #[instrument(skip(self), fields(policy = ?self.policy))]
    pub async fn refresh(&self) -> Result<RunState, RefreshError> {
        let (guard, mut cancel) = self.begin()?;
        let outcome = self.run(guard.id, &mut cancel).await;
        match outcome {
            Some(outcome) => self.complete(guard.id, &outcome),
            None => {
                debug!(run = guard.id, "Check superseded before completion");
                Err(RefreshError::Superseded)
            },
        }
    }

    /// Claim the in-flight slot according to the policy
    fn begin(&self) -> Result<(RunGuard<'_>, watch::Receiver<bool>), RefreshError> {
        let mut slot = self.in_flight.lock();
        if let Some(current) = slot.as_ref() {
            match self.policy {
                RefreshPolicy::Reject => {
                    debug!(run = current.id, "Rejecting trigger while check is running");
                    return Err(RefreshError::Busy);
                },
                RefreshPolicy::Supersede => {
                    debug!(run = current.id, "Superseding running check");
                    current.cancel.send_replace(true);
                },
            }
        }

        let id = self.next_run.fetch_add(1, Ordering::Relaxed) + 1;
        let (cancel, cancelled) = watch::channel(false);
        *slot = Some(InFlight { id, cancel });
        Ok((RunGuard { service: self, id }, cancelled))
    }

    /// Report a finished check if it is still the newest one
    fn complete(&self, id: u64, outcome: &RunOutcome) -> Result<RunState, RefreshError> {
        let mut slot = self.in_flight.lock();
        if !slot.as_ref().is_some_and(|current| current.id == id) {
            return Err(RefreshError::Superseded);
        }
        *slot = None;

        let state = outcome.state();
        self.state.send_replace(state);
        self.reporter.report(outcome);
        info!(run = id, ?state, message = outcome.message(), "Air-quality check finished");
        Ok(state)
    }

    fn release(&self, id: u64) {
        let mut slot = self.in_flight.lock();
        if slot.as_ref().is_some_and(|current| current.id == id) {
            *slot = None;
        }
    }

    fn transition(&self, id: u64, state: RunState) {
        let slot = self.in_flight.lock();
        if slot.as_ref().is_some_and(|current| current.id == id) {
            debug!(run = id, ?state, "State transition");
            self.state.send_replace(state);
        }
    }

    /// The check itself; `None` when superseded
    async fn run(&self, id: u64, cancel: &mut watch::Receiver<bool>) -> Option<RunOutcome> {
        let granted = until_superseded(cancel, self.permission.is_granted()).await?;
        if !granted {
            warn!("Location permission denied");
            return Some(RunOutcome::failed_with(
                FailureReason::LocationUnavailable,
                PERMISSION_DENIED_MESSAGE,
            ));
        }
        if !self.locations.services_available() {
            warn!("No location provider is enabled");
            return Some(RunOutcome::failed(FailureReason::LocationUnavailable));
        }

        self.transition(id, RunState::LocatingDevice);
        let Some(location) = until_superseded(cancel, self.locations.last_location()).await? else {
            warn!("No usable location fix");
            return Some(RunOutcome::failed(FailureReason::NoFix));
        };

        self.transition(id, RunState::ResolvingAddress);
        let mut notices = Vec::new();
        let address = match until_superseded(cancel, self.geocoder.resolve(&location)).await? {
            Ok(address) => Some(address),
            Err(e) => {
                warn!(error = %e, "Reverse geocoding failed, continuing without address");
                notices.push(e.user_message().to_string());
                None
            },
        };

        self.transition(id, RunState::FetchingAirQuality);
        let reading =
            match until_superseded(cancel, self.air_quality.fetch_current(&location)).await? {
                Ok(reading) => reading,
                Err(e) => {
                    warn!(error = %e, "Air-quality fetch failed");
                    return Some(RunOutcome::failed(FailureReason::FetchFailed));
                },
            };

        Some(RunOutcome::Ready(self.build_report(
            location, address, reading, notices,
        )))
    }

    fn build_report(
        &self,
        location: GeoLocation,
        address: Option<Address>,
        reading: AirQualityReading,
        notices: Vec<String>,
    ) -> AirQualityReport {
        let tier = self.classifier.classify(reading.aqius());
        AirQualityReport {
            location_title: address.as_ref().map(Address::title).unwrap_or_default(),
            location_subtitle: address.as_ref().map(Address::subtitle).unwrap_or_default(),
            count: reading.aqius(),
            checked_at: self.classifier.format_checked_at(&reading),
            tier,
            tier_label: tier.label().to_string(),
            background: tier.background().to_string(),
            reading,
            location,
            address,
            notices,
            message: UPDATED_MESSAGE.to_string(),
        }
    }
}

/// Frees the in-flight slot if the check is dropped before completing
struct RunGuard<'a> {
    service: &'a AirQualityService,
    id: u64,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.service.release(self.id);
    }
}

/// Race `future` against cancellation; `None` once superseded
async fn until_superseded<F: Future>(
    cancel: &mut watch::Receiver<bool>,
    future: F,
) -> Option<F::Output> {
    tokio::select! {
        biased;
        () = superseded(cancel) => None,
        output = future => Some(output),
    }
}

async fn superseded(cancel: &mut watch::Receiver<bool>) {
    let closed = cancel.wait_for(|superseded| *superseded).await.is_err();
    if closed {
        std::future::pending::<()>().await;
    }
}
