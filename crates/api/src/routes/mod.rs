pub mod generation;
pub mod health;
pub mod models;
pub mod samples;
pub mod studio;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                  WebSocket (studio events)
///
/// /generate/text                       queue text generation (POST)
/// /generate/image                      queue image generation (POST)
/// /generate/{request_id}               generation status (GET), cancel (DELETE)
///
/// /models/generate                     call the tool from text (POST)
/// /models/generate-from-image          call the tool from an image (POST)
///
/// /studio/submissions                  submit and display a model (POST)
/// /studio/current                      displayed model snapshot (GET)
/// /studio/reset                        clear the view (POST)
/// /studio/download                     export the displayed model (GET)
///
/// /samples                             sample catalog (GET)
/// /samples/{sample_id}                 one sample (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/generate", generation::router())
        .nest("/models", models::router())
        .nest("/studio", studio::router())
        .nest("/samples", samples::router())
}
