// Status probes: each one always yields a value, collapsing its own failures to a default

mod container;
mod ledger_index;
mod validator;

pub use container::ContainerProbe;
pub use ledger_index::{LedgerIndexProbe, parse_latest_ledger, parse_root};
pub use validator::{ValidatorProbe, ValidatorSource, parse_validator_info};

use crate::error::ProbeError;
use futures_util::future::BoxFuture;
use std::time::Duration;

/// One external status source. `probe` never fails: errors are logged and replaced by the
/// type's default inside the implementation.
pub trait Probe<T>: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    fn probe(&self) -> BoxFuture<'_, T>;
}

/// Logs a probe failure and falls back to the default value.
pub fn settle<T: Default>(probe: &'static str, result: Result<T, ProbeError>) -> T {
    match result {
        Ok(v) => v,
        Err(ProbeError::NotFound(detail)) => {
            tracing::info!(probe, %detail, "target not found, reporting default");
            T::default()
        }
        Err(e) => {
            tracing::warn!(probe, error = %e, "probe failed, reporting default");
            T::default()
        }
    }
}

/// Shared HTTP client for Horizon and the validator's info endpoint. Every request is bounded
/// by `timeout`.
pub fn http_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(2)
        .build()
        .map_err(|e| anyhow::anyhow!("building HTTP client: {}", e))?;
    Ok(client)
}

/// GET `url` and return the body, mapping non-2xx to `HttpStatus`.
pub(crate) async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, ProbeError> {
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ProbeError::HttpStatus(status.as_u16()));
    }
    Ok(resp.text().await?)
}

/// Joins a base URL and a path without doubling the slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
