// Shared test helpers: fixed/stalled probes and in-process stub services

#![allow(dead_code)]

use axum::{Router, routing::get};
use futures_util::future::BoxFuture;
use pi_node_dashboard::probes::Probe;
use std::time::Duration;

/// Address that refuses connections.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

pub const HORIZON_ROOT: &str = r#"{
    "horizon_version": "2.27.0",
    "core_version": "stellar-core 19.14.0",
    "ingest_latest_ledger": 52341,
    "history_latest_ledger": 52341,
    "history_latest_ledger_closed_at": "2024-01-01T00:00:00Z",
    "core_latest_ledger": 52341,
    "network_passphrase": "Pi Network",
    "current_protocol_version": 19,
    "supported_protocol_version": 19,
    "core_supported_protocol_version": 19
}"#;

pub const CORE_INFO: &str =
    r#"{"info":{"state":"Synced!","ledger":{"num":52345},"peers":{"authenticated_count":8}}}"#;

/// Probe that always returns the same value.
pub struct Fixed<T>(pub T);

impl<T: Clone + Send + Sync> Probe<T> for Fixed<T> {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn probe(&self) -> BoxFuture<'_, T> {
        Box::pin(async move { self.0.clone() })
    }
}

/// Probe that never answers within any reasonable test timeout.
pub struct Stalled<T>(pub T);

impl<T: Clone + Send + Sync> Probe<T> for Stalled<T> {
    fn name(&self) -> &'static str {
        "stalled"
    }

    fn probe(&self) -> BoxFuture<'_, T> {
        Box::pin(async move {
            tokio::time::sleep(Duration::from_secs(30)).await;
            self.0.clone()
        })
    }
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Horizon stand-in answering the root document and the latest-ledger listing.
pub async fn spawn_horizon() -> String {
    spawn_stub(
        Router::new()
            .route("/", get(|| async { HORIZON_ROOT }))
            .route(
                "/ledgers",
                get(|| async {
                    r#"{"_embedded":{"records":[{"sequence":52341,"closed_at":"2024-01-01T00:00:00Z"}]}}"#
                }),
            ),
    )
    .await
}

/// Validator admin interface stand-in answering `/info` with `body`.
pub async fn spawn_core(body: &'static str) -> String {
    spawn_stub(Router::new().route("/info", get(move || async move { body }))).await
}

pub fn test_client() -> reqwest::Client {
    pi_node_dashboard::probes::http_client(Duration::from_secs(2)).unwrap()
}
