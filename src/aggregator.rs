// Per-request status aggregation: run the probes concurrently and merge their results.

use crate::error::ProbeError;
use crate::models::{AggregatedStatus, ContainerStatus, LedgerIndexReport, ValidatorStatus};
use crate::probes::{Probe, settle};
use std::sync::Arc;
use std::time::Duration;

/// Binary sync policy: Horizon having ingested any ledger counts as fully synced.
/// Always 0 or 100.
pub fn sync_progress(latest_ledger: u64) -> f64 {
    if latest_ledger > 0 { 100.0 } else { 0.0 }
}

/// Runs `probe` with an upper bound; an elapsed timeout reports the default value.
async fn bounded<T: Default>(probe: &dyn Probe<T>, limit: Duration) -> T {
    match tokio::time::timeout(limit, probe.probe()).await {
        Ok(v) => v,
        Err(_) => settle(
            probe.name(),
            Err(ProbeError::ProcessTimeout(limit.as_millis() as u64)),
        ),
    }
}

#[derive(Clone)]
pub struct StatusAggregator {
    container: Arc<dyn Probe<ContainerStatus>>,
    /// `None` when the deployment gives no access to the validator.
    validator: Option<Arc<dyn Probe<ValidatorStatus>>>,
    ledger_index: Arc<dyn Probe<LedgerIndexReport>>,
    probe_timeout: Duration,
}

impl StatusAggregator {
    pub fn new(
        container: Arc<dyn Probe<ContainerStatus>>,
        validator: Option<Arc<dyn Probe<ValidatorStatus>>>,
        ledger_index: Arc<dyn Probe<LedgerIndexReport>>,
        probe_timeout: Duration,
    ) -> Self {
        Self {
            container,
            validator,
            ledger_index,
            probe_timeout,
        }
    }

    /// One fresh snapshot. A failing probe only degrades its own fields.
    pub async fn aggregate(&self) -> AggregatedStatus {
        let limit = self.probe_timeout;
        let (container_status, validator_status, ledger_index) = tokio::join!(
            bounded(self.container.as_ref(), limit),
            async {
                match &self.validator {
                    Some(v) => Some(bounded(v.as_ref(), limit).await),
                    None => None,
                }
            },
            bounded(self.ledger_index.as_ref(), limit),
        );

        let latest_ledger = ledger_index.status.latest_ledger;
        let validator_status = validator_status
            .unwrap_or_else(|| ValidatorStatus::derived_from_ledger_index(latest_ledger));

        AggregatedStatus {
            container_status,
            validator_status,
            ledger_index_status: ledger_index.status,
            ledger_index_info: ledger_index.info,
            sync_progress: sync_progress(latest_ledger),
        }
    }
}
