// Horizon (ledger-indexing service) snapshot and version info

use serde::{Deserialize, Serialize};

/// Placeholder for string fields Horizon didn't provide.
pub const PLACEHOLDER: &str = "-";
/// Placeholder for a missing close time.
pub const CLOSED_AT_UNAVAILABLE: &str = "unavailable";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerIndexStatus {
    pub latest_ledger: u64,
    pub closed_at: String,
}

impl Default for LedgerIndexStatus {
    fn default() -> Self {
        Self {
            latest_ledger: 0,
            closed_at: CLOSED_AT_UNAVAILABLE.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerIndexInfo {
    pub index_version: String,
    pub validator_version: String,
    pub ingest_latest_ledger: u64,
    pub history_latest_ledger: u64,
    pub history_ledger_closed_at: String,
    pub network_passphrase: String,
    pub current_protocol_version: u32,
    pub supported_protocol_version: u32,
    pub validator_supported_protocol_version: u32,
}

impl Default for LedgerIndexInfo {
    fn default() -> Self {
        Self {
            index_version: PLACEHOLDER.into(),
            validator_version: PLACEHOLDER.into(),
            ingest_latest_ledger: 0,
            history_latest_ledger: 0,
            history_ledger_closed_at: PLACEHOLDER.into(),
            network_passphrase: PLACEHOLDER.into(),
            current_protocol_version: 0,
            supported_protocol_version: 0,
            validator_supported_protocol_version: 0,
        }
    }
}

/// What one Horizon probe returns: the primary snapshot plus auxiliary info.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerIndexReport {
    pub status: LedgerIndexStatus,
    pub info: LedgerIndexInfo,
}
