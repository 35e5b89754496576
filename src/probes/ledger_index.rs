use super::{Probe, fetch_text, join_url, settle};
use crate::config::{LedgerIndexConfig, LedgerIndexEndpoint};
use crate::error::ProbeError;
use crate::models::{
    CLOSED_AT_UNAVAILABLE, LedgerIndexInfo, LedgerIndexReport, LedgerIndexStatus, PLACEHOLDER,
};
use futures_util::future::BoxFuture;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct LedgerPage {
    #[serde(rename = "_embedded")]
    embedded: LedgerRecords,
}

#[derive(Deserialize)]
struct LedgerRecords {
    records: Vec<LedgerRecord>,
}

#[derive(Deserialize)]
struct LedgerRecord {
    sequence: u64,
    closed_at: Option<String>,
}

fn field_u64(root: &Value, key: &str) -> Option<u64> {
    root.get(key).and_then(Value::as_u64)
}

fn field_u32(root: &Value, key: &str) -> u32 {
    field_u64(root, key)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0)
}

fn field_str(root: &Value, key: &str) -> Option<String> {
    root.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Maps the root document (`GET /`). Each field is read on its own, so a mistyped or
/// missing field only falls back to its own placeholder.
pub fn parse_root(raw: &str) -> Result<LedgerIndexReport, ProbeError> {
    let root: Value = serde_json::from_str(raw)?;
    if !root.is_object() {
        return Err(ProbeError::Parse("root document is not an object".into()));
    }
    let closed_at = field_str(&root, "history_latest_ledger_closed_at");
    let placeholder = || PLACEHOLDER.to_string();

    let status = LedgerIndexStatus {
        latest_ledger: field_u64(&root, "core_latest_ledger")
            .or_else(|| field_u64(&root, "history_latest_ledger"))
            .unwrap_or(0),
        closed_at: closed_at
            .clone()
            .unwrap_or_else(|| CLOSED_AT_UNAVAILABLE.into()),
    };
    let info = LedgerIndexInfo {
        index_version: field_str(&root, "horizon_version").unwrap_or_else(placeholder),
        validator_version: field_str(&root, "core_version").unwrap_or_else(placeholder),
        ingest_latest_ledger: field_u64(&root, "ingest_latest_ledger").unwrap_or(0),
        history_latest_ledger: field_u64(&root, "history_latest_ledger").unwrap_or(0),
        history_ledger_closed_at: closed_at.unwrap_or_else(placeholder),
        network_passphrase: field_str(&root, "network_passphrase").unwrap_or_else(placeholder),
        current_protocol_version: field_u32(&root, "current_protocol_version"),
        supported_protocol_version: field_u32(&root, "supported_protocol_version"),
        validator_supported_protocol_version: field_u32(&root, "core_supported_protocol_version"),
    };
    Ok(LedgerIndexReport { status, info })
}

/// Maps the first record of `/ledgers?order=desc&limit=1`.
pub fn parse_latest_ledger(raw: &str) -> Result<LedgerIndexReport, ProbeError> {
    let page: LedgerPage = serde_json::from_str(raw)?;
    let ledger = page
        .embedded
        .records
        .into_iter()
        .next()
        .ok_or_else(|| ProbeError::Parse("no ledger records".into()))?;

    let defaults = LedgerIndexInfo::default();
    let info = LedgerIndexInfo {
        history_latest_ledger: ledger.sequence,
        history_ledger_closed_at: ledger
            .closed_at
            .clone()
            .unwrap_or(defaults.history_ledger_closed_at.clone()),
        ..defaults
    };
    let status = LedgerIndexStatus {
        latest_ledger: ledger.sequence,
        closed_at: ledger
            .closed_at
            .unwrap_or_else(|| CLOSED_AT_UNAVAILABLE.into()),
    };
    Ok(LedgerIndexReport { status, info })
}

pub struct LedgerIndexProbe {
    client: reqwest::Client,
    base_url: String,
    endpoint: LedgerIndexEndpoint,
}

impl LedgerIndexProbe {
    pub fn new(client: reqwest::Client, config: &LedgerIndexConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            endpoint: config.endpoint,
        }
    }

    async fn check(&self) -> Result<LedgerIndexReport, ProbeError> {
        match self.endpoint {
            LedgerIndexEndpoint::Root => {
                let body = fetch_text(&self.client, &join_url(&self.base_url, "")).await?;
                parse_root(&body)
            }
            LedgerIndexEndpoint::LatestLedger => {
                let url = join_url(&self.base_url, "ledgers?order=desc&limit=1");
                let body = fetch_text(&self.client, &url).await?;
                parse_latest_ledger(&body)
            }
        }
    }
}

impl Probe<LedgerIndexReport> for LedgerIndexProbe {
    fn name(&self) -> &'static str {
        "ledger_index"
    }

    fn probe(&self) -> BoxFuture<'_, LedgerIndexReport> {
        Box::pin(async move { settle(self.name(), self.check().await) })
    }
}
