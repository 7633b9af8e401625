use axum::extract::Path;
use axum::Json;

use forge3d_core::descriptor::ModelDescriptor;
use forge3d_core::error::CoreError;
use forge3d_core::samples::{find_sample, sample_models};

use crate::error::AppResult;
use crate::response::DataResponse;

/// GET /api/v1/samples
///
/// Built-in primitives shown before anything has been generated.
pub async fn list_samples() -> Json<DataResponse<Vec<ModelDescriptor>>> {
    Json(DataResponse {
        data: sample_models(),
    })
}

/// GET /api/v1/samples/{sample_id}
pub async fn get_sample(
    Path(sample_id): Path<String>,
) -> AppResult<Json<DataResponse<ModelDescriptor>>> {
    let sample = find_sample(&sample_id).ok_or(CoreError::NotFound {
        entity: "Sample",
        id: sample_id,
    })?;
    Ok(Json(DataResponse { data: sample }))
}
