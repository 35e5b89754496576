// Aggregated response for GET /api/status

use serde::{Deserialize, Serialize};

use super::{ContainerStatus, LedgerIndexInfo, LedgerIndexStatus, ValidatorStatus};

/// Every field is always present; failed probes only degrade values to placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedStatus {
    pub container_status: ContainerStatus,
    pub validator_status: ValidatorStatus,
    pub ledger_index_status: LedgerIndexStatus,
    pub ledger_index_info: LedgerIndexInfo,
    /// Percentage in [0, 100].
    pub sync_progress: f64,
}
