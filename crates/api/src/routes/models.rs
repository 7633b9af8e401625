//! Route definitions for direct generation tool calls.
//!
//! Mounted at `/models` by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::models;
use crate::state::AppState;

/// ```text
/// POST   /generate              -> generate_model
/// POST   /generate-from-image   -> generate_model_from_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(models::generate_model))
        .route("/generate-from-image", post(models::generate_model_from_image))
}
