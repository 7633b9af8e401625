use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Name of the active generation tool (`mock` or `remote`).
    pub generator: &'static str,
    pub ws_connections: usize,
    /// Generation requests currently held in the registry.
    pub work_items: usize,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        generator: state.orchestrator.tool().name(),
        ws_connections: state.ws_manager.connection_count().await,
        work_items: state.registry.len().await,
    })
}

/// Root-level routes, mounted outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
