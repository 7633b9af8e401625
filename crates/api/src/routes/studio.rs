//! Route definitions for the studio view.
//!
//! Mounted at `/studio` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::studio;
use crate::state::AppState;

/// Studio routes.
///
/// ```text
/// POST   /submissions       -> submit
/// GET    /current           -> get_current
/// POST   /reset             -> reset
/// GET    /download          -> download (?format=obj|glb)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submissions", post(studio::submit))
        .route("/current", get(studio::get_current))
        .route("/reset", post(studio::reset))
        .route("/download", get(studio::download))
}
