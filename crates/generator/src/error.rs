use std::time::Duration;

use crate::api::GeneratorApiError;

/// Failure to obtain a generated asset.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    Api(#[from] GeneratorApiError),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Generation timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
}
