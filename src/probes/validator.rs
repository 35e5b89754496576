use super::{Probe, fetch_text, join_url, settle};
use crate::docker_repo::DockerRepo;
use crate::error::ProbeError;
use crate::models::{PeerCount, ValidatorState, ValidatorStatus};
use futures_util::future::BoxFuture;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
struct InfoEnvelope {
    info: Option<CoreInfo>,
}

#[derive(Deserialize)]
struct CoreInfo {
    state: Option<String>,
    ledger: Option<CoreLedger>,
    peers: Option<CorePeers>,
}

#[derive(Deserialize)]
struct CoreLedger {
    num: Option<u64>,
}

#[derive(Deserialize)]
struct CorePeers {
    authenticated_count: Option<u64>,
}

/// Parses the validator's `info` document. Missing ledger/peer values become 0 / unavailable;
/// a missing `info.state` is a parse failure.
pub fn parse_validator_info(raw: &str) -> Result<ValidatorStatus, ProbeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ProbeError::Parse("empty output".into()));
    }
    let envelope: InfoEnvelope = serde_json::from_str(raw)?;
    let info = envelope
        .info
        .ok_or_else(|| ProbeError::Parse("missing info".into()))?;
    let state = info
        .state
        .ok_or_else(|| ProbeError::Parse("missing info.state".into()))?;

    Ok(ValidatorStatus {
        state: ValidatorState::from_raw(&state),
        ledger_number: info.ledger.and_then(|l| l.num).unwrap_or(0),
        peer_count: info
            .peers
            .and_then(|p| p.authenticated_count)
            .map(PeerCount::Count)
            .unwrap_or(PeerCount::Unavailable),
    })
}

/// Where the validator's status document comes from.
pub enum ValidatorSource {
    /// Command executed inside the container.
    Exec {
        repo: Arc<DockerRepo>,
        container: String,
        command: Vec<String>,
    },
    /// The validator's HTTP admin interface on the host.
    Http { client: reqwest::Client, url: String },
}

pub struct ValidatorProbe {
    source: ValidatorSource,
}

impl ValidatorProbe {
    pub fn new(source: ValidatorSource) -> Self {
        Self { source }
    }

    async fn check(&self) -> Result<ValidatorStatus, ProbeError> {
        let raw = match &self.source {
            ValidatorSource::Exec {
                repo,
                container,
                command,
            } => repo.exec_output(container, command).await?,
            ValidatorSource::Http { client, url } => {
                fetch_text(client, &join_url(url, "info")).await?
            }
        };
        parse_validator_info(&raw)
    }
}

impl Probe<ValidatorStatus> for ValidatorProbe {
    fn name(&self) -> &'static str {
        "validator"
    }

    fn probe(&self) -> BoxFuture<'_, ValidatorStatus> {
        Box::pin(async move { settle(self.name(), self.check().await) })
    }
}
