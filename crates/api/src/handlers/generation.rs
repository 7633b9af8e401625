//! Handlers for asynchronous generation requests.
//!
//! Requests are queued in the work registry and advanced by simulated
//! timers; clients poll `GET /generate/{request_id}` for the result.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use forge3d_core::error::CoreError;
use forge3d_core::generation::{validate_prompt, DEFAULT_IMAGE_PROMPT, IMAGE_SCHEDULE, TEXT_SCHEDULE};
use forge3d_pipeline::registry::spawn_simulation;
use forge3d_pipeline::{WorkItem, WorkKind, WorkStatus};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct GenerateTextRequest {
    pub prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    pub image_id: Option<String>,
    pub prompt: Option<String>,
}

/// Body of a 202 response for a queued request.
#[derive(Debug, Serialize)]
pub struct GenerationAccepted {
    pub request_id: String,
    pub status: WorkStatus,
    pub message: &'static str,
}

impl From<WorkItem> for GenerationAccepted {
    fn from(item: WorkItem) -> Self {
        let message = match item.kind {
            WorkKind::Text => "Text prompt received and generation started",
            WorkKind::Image => "Image received and generation started",
        };
        Self {
            request_id: item.request_id,
            status: item.status,
            message,
        }
    }
}

// ---------------------------------------------------------------------------
// POST /generate/text
// ---------------------------------------------------------------------------

/// POST /api/v1/generate/text
///
/// Queue a text generation. Responds 202 with the request id.
pub async fn generate_from_text(
    State(state): State<AppState>,
    Json(input): Json<GenerateTextRequest>,
) -> AppResult<impl IntoResponse> {
    let prompt = input.prompt.unwrap_or_default();
    validate_prompt(&prompt)?;

    let item = state.registry.create(WorkKind::Text, prompt).await;
    spawn_simulation(state.registry.clone(), item.request_id.clone(), TEXT_SCHEDULE);
    tracing::info!(request_id = %item.request_id, "Text generation queued");

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: GenerationAccepted::from(item),
        }),
    ))
}

// ---------------------------------------------------------------------------
// POST /generate/image
// ---------------------------------------------------------------------------

/// POST /api/v1/generate/image
///
/// Queue an image generation for a previously uploaded image.
pub async fn generate_from_image(
    State(state): State<AppState>,
    Json(input): Json<GenerateImageRequest>,
) -> AppResult<impl IntoResponse> {
    let image_id = input
        .image_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Image ID is required".to_string()))?;

    let prompt = input
        .prompt
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE_PROMPT.to_string());

    let item = state.registry.create(WorkKind::Image, prompt).await;
    spawn_simulation(state.registry.clone(), item.request_id.clone(), IMAGE_SCHEDULE);
    tracing::info!(request_id = %item.request_id, image_id = %image_id, "Image generation queued");

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: GenerationAccepted::from(item),
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /generate/{request_id}
// ---------------------------------------------------------------------------

/// GET /api/v1/generate/{request_id}
pub async fn get_generation_status(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let item = state
        .registry
        .get(&request_id)
        .await
        .ok_or_else(|| not_found(request_id))?;
    Ok(Json(DataResponse { data: item }))
}

// ---------------------------------------------------------------------------
// DELETE /generate/{request_id}
// ---------------------------------------------------------------------------

/// DELETE /api/v1/generate/{request_id}
///
/// Drop a request. Its simulated timers stop at their next step.
pub async fn cancel_generation(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> AppResult<StatusCode> {
    let item = state
        .registry
        .remove(&request_id)
        .await
        .ok_or_else(|| not_found(request_id))?;
    tracing::info!(request_id = %item.request_id, status = ?item.status, "Generation cancelled");
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(request_id: String) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "GenerationRequest",
        id: request_id,
    })
}
