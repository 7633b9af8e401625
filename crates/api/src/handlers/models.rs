//! Handlers that call the generation tool directly.
//!
//! These bypass the studio view: the receipt is returned as-is and tool
//! failures surface as `502 GENERATION_FAILED`. Each call is bounded by the
//! configured generation timeout.

use std::future::Future;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use forge3d_core::generation::{resolve_asset_path, validate_prompt, Quality};
use forge3d_generator::{GenerationError, GenerationReceipt, ImageGeneration, TextGeneration};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Await a tool call, failing with [`GenerationError::TimedOut`] past the
/// configured generation timeout.
async fn bounded<F>(state: &AppState, call: F) -> Result<GenerationReceipt, GenerationError>
where
    F: Future<Output = Result<GenerationReceipt, GenerationError>>,
{
    let limit = state.config.generation_timeout();
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| GenerationError::TimedOut(limit))?
}

#[derive(Debug, Deserialize)]
pub struct GenerateModelRequest {
    pub description: String,
    pub file_path: String,
    pub quality: Option<Quality>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateModelFromImageRequest {
    pub image_data: String,
    pub file_path: String,
    pub quality: Option<Quality>,
}

/// POST /api/v1/models/generate
pub async fn generate_model(
    State(state): State<AppState>,
    Json(input): Json<GenerateModelRequest>,
) -> AppResult<impl IntoResponse> {
    validate_prompt(&input.description)?;
    let file_path = resolve_asset_path(&state.config.asset_dir, &input.file_path)?;

    let request = TextGeneration {
        description: input.description,
        file_path: file_path.to_string_lossy().into_owned(),
        quality: input.quality.unwrap_or(state.config.generation_quality),
    };
    let receipt = bounded(&state, state.orchestrator.tool().generate_from_text(&request)).await?;

    Ok(Json(DataResponse { data: receipt }))
}

/// POST /api/v1/models/generate-from-image
pub async fn generate_model_from_image(
    State(state): State<AppState>,
    Json(input): Json<GenerateModelFromImageRequest>,
) -> AppResult<impl IntoResponse> {
    if input.image_data.trim().is_empty() {
        return Err(AppError::BadRequest("image_data is required".to_string()));
    }
    let file_path = resolve_asset_path(&state.config.asset_dir, &input.file_path)?;

    let request = ImageGeneration {
        image_data: input.image_data,
        file_path: file_path.to_string_lossy().into_owned(),
        quality: input.quality.unwrap_or(state.config.generation_quality),
    };
    let receipt = bounded(&state, state.orchestrator.tool().generate_from_image(&request)).await?;

    Ok(Json(DataResponse { data: receipt }))
}
