use axum::routing::get;
use axum::Router;

use crate::handlers::samples;
use crate::state::AppState;

/// Mounted at `/samples`.
///
/// ```text
/// GET    /                  -> list_samples
/// GET    /{sample_id}       -> get_sample
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(samples::list_samples))
        .route("/{sample_id}", get(samples::get_sample))
}
