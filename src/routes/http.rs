// GET handlers: dashboard page, api/status, version

use axum::{Json, extract::State, response::Html, response::IntoResponse};

use super::AppState;
use crate::models::AggregatedStatus;
use crate::version::{NAME, VERSION};

/// Dashboard page; it polls /api/status from the browser.
const DASHBOARD_HTML: &str = include_str!("../../public/index.html");

/// GET / — the bundled dashboard page.
pub(super) async fn dashboard_handler() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// GET /api/status — fresh aggregated snapshot; always 200, degraded fields carry placeholders.
pub(super) async fn status_handler(State(state): State<AppState>) -> Json<AggregatedStatus> {
    let status = state.aggregator.aggregate().await;
    tracing::debug!(
        container = ?status.container_status,
        latest_ledger = status.ledger_index_status.latest_ledger,
        sync_progress = status.sync_progress,
        "status aggregated"
    );
    Json(status)
}

/// GET /version — returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}
