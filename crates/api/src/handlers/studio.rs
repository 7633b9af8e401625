//! Handlers for the studio view: submissions, the displayed model, and
//! export of the displayed model.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Deserialize;

use forge3d_core::descriptor::ModelDescriptor;
use forge3d_core::error::CoreError;
use forge3d_core::obj::{descriptor_to_obj, obj_file_name};
use forge3d_events::{NotificationLevel, StudioEvent};
use forge3d_pipeline::Submission;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Report an export failure to connected clients and build the error.
fn export_failure(state: &AppState, message: &str) -> AppError {
    tracing::warn!(reason = message, "Export failed");
    state.event_bus.publish(StudioEvent::notification(
        NotificationLevel::Error,
        format!("Download failed: {message}"),
    ));
    AppError::Core(CoreError::Export(message.to_string()))
}

/// Where a GLB download should redirect for an asset reference.
fn asset_location(reference: &str) -> String {
    if reference.starts_with("http://") || reference.starts_with("https://") || reference.starts_with('/') {
        reference.to_string()
    } else {
        format!("/{reference}")
    }
}

// ---------------------------------------------------------------------------
// POST /studio/submissions
// ---------------------------------------------------------------------------

/// POST /api/v1/studio/submissions
///
/// Run a submission through the orchestrator. Generation failures are
/// absorbed (the outcome is `fallen_back`); only invalid input is an error.
///
/// The flow runs on its own task: a dropped request (client gone, request
/// timeout) still settles its token and clears the loading flag.
pub async fn submit(
    State(state): State<AppState>,
    Json(submission): Json<Submission>,
) -> AppResult<impl IntoResponse> {
    let orchestrator = Arc::clone(&state.orchestrator);
    let outcome = tokio::spawn(async move { orchestrator.submit(submission).await })
        .await
        .map_err(|e| AppError::InternalError(format!("Submission task failed: {e}")))??;
    Ok(Json(DataResponse { data: outcome }))
}

// ---------------------------------------------------------------------------
// GET /studio/current
// ---------------------------------------------------------------------------

/// GET /api/v1/studio/current
pub async fn get_current(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let snapshot = state.orchestrator.display().snapshot().await;
    Ok(Json(DataResponse { data: snapshot }))
}

// ---------------------------------------------------------------------------
// POST /studio/reset
// ---------------------------------------------------------------------------

/// POST /api/v1/studio/reset
pub async fn reset(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.orchestrator.reset().await;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// GET /studio/download
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Obj,
    Glb,
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

/// GET /api/v1/studio/download?format=obj|glb
///
/// `obj` tessellates the displayed descriptor and returns it as an
/// attachment. `glb` redirects to the generated asset and is only available
/// for external assets.
pub async fn download(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> AppResult<Response> {
    let descriptor = state
        .orchestrator
        .display()
        .current()
        .await
        .ok_or_else(|| export_failure(&state, "No model is currently displayed"))?;

    match query.format {
        ExportFormat::Obj => Ok(obj_attachment(&descriptor)),
        ExportFormat::Glb => {
            let reference = descriptor.asset_reference().ok_or_else(|| {
                export_failure(&state, "GLB export is only available for generated models")
            })?;
            tracing::info!(descriptor_id = %descriptor.id(), asset = reference, "Redirecting to GLB asset");
            Ok(Redirect::temporary(&asset_location(reference)).into_response())
        }
    }
}

fn obj_attachment(descriptor: &ModelDescriptor) -> Response {
    let obj = descriptor_to_obj(descriptor);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        obj_file_name(descriptor.display_name()).replace('"', "")
    );
    tracing::info!(descriptor_id = %descriptor.id(), bytes = obj.len(), "Exported OBJ");

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "model/obj".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        obj,
    )
        .into_response()
}
