// HTTP routes

mod http;

use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::aggregator::StatusAggregator;
use crate::config::AppConfig;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) aggregator: StatusAggregator,
}

pub fn app(aggregator: StatusAggregator, config: &AppConfig) -> Router {
    let state = AppState { aggregator };
    Router::new()
        .route("/", get(http::dashboard_handler)) // GET /
        .route("/api/status", get(http::status_handler)) // GET /api/status
        .route("/version", get(http::version_handler)) // GET /version
        .fallback_service(ServeDir::new(&config.server.public_dir))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
