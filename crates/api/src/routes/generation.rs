//! Route definitions for asynchronous generation requests.
//!
//! Mounted at `/generate` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// Generation request routes.
///
/// ```text
/// POST   /text              -> generate_from_text
/// POST   /image             -> generate_from_image
/// GET    /{request_id}      -> get_generation_status
/// DELETE /{request_id}      -> cancel_generation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/text", post(generation::generate_from_text))
        .route("/image", post(generation::generate_from_image))
        .route(
            "/{request_id}",
            get(generation::get_generation_status).delete(generation::cancel_generation),
        )
}
