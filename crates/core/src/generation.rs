//! Generation constants, request validation, and description formatting.

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Quality
// ---------------------------------------------------------------------------

/// Requested output quality for the generation tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Medium,
    High,
}

impl Quality {
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Medium => "medium",
            Quality::High => "high",
        }
    }
}

impl std::str::FromStr for Quality {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "medium" => Ok(Quality::Medium),
            "high" => Ok(Quality::High),
            other => Err(CoreError::Validation(format!(
                "Invalid quality '{other}'. Must be one of: medium, high"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Submission limits
// ---------------------------------------------------------------------------

/// Images beyond this count are dropped from a multi-angle submission.
pub const MAX_MULTI_ANGLE_IMAGES: usize = 5;

/// Fewer images than this in a multi-angle submission produces a warning.
pub const MIN_RECOMMENDED_ANGLES: usize = 2;

/// Extension of generated asset files.
pub const ASSET_EXTENSION: &str = "glb";

// ---------------------------------------------------------------------------
// Simulated work-item timings
// ---------------------------------------------------------------------------

/// Simulated progress of a work item: `pending` becomes `processing` after
/// `until_processing`, which becomes `completed` `until_completed` later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSchedule {
    pub until_processing: Duration,
    pub until_completed: Duration,
}

pub const TEXT_SCHEDULE: StatusSchedule = StatusSchedule {
    until_processing: Duration::from_millis(500),
    until_completed: Duration::from_millis(3000),
};

pub const IMAGE_SCHEDULE: StatusSchedule = StatusSchedule {
    until_processing: Duration::from_millis(1000),
    until_completed: Duration::from_millis(4000),
};

/// Prompt recorded for image work items submitted without one.
pub const DEFAULT_IMAGE_PROMPT: &str = "Image-based generation";

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Validate that a text prompt is present and not blank.
pub fn validate_prompt(prompt: &str) -> Result<(), CoreError> {
    if prompt.trim().is_empty() {
        Err(CoreError::Validation("Valid text prompt is required".to_string()))
    } else {
        Ok(())
    }
}

/// Resolve a requested asset path beneath `asset_dir`.
///
/// Only plain relative paths are accepted: absolute paths, `..`, and
/// prefixes are rejected. A path that already starts with `asset_dir` is
/// not nested a second time.
pub fn resolve_asset_path(asset_dir: &Path, file_path: &str) -> Result<PathBuf, CoreError> {
    if file_path.trim().is_empty() {
        return Err(CoreError::Validation("file_path is required".to_string()));
    }

    let requested = Path::new(file_path);
    let safe = requested
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !safe {
        return Err(CoreError::Validation(format!(
            "file_path '{file_path}' must be a relative path without '..'"
        )));
    }

    if requested.starts_with(asset_dir) {
        Ok(requested.to_path_buf())
    } else {
        Ok(asset_dir.join(requested))
    }
}

/// Asset path requested for a generation with the given id.
pub fn asset_path_for(asset_dir: &Path, request_id: &str) -> PathBuf {
    asset_dir.join(format!("{request_id}.{ASSET_EXTENSION}"))
}

// ---------------------------------------------------------------------------
// Description formatting
// ---------------------------------------------------------------------------

/// Enrich a prompt for the generation tool.
///
/// Appends `3D model`, `high detail` and `game asset` hints unless the
/// prompt already mentions them (case-insensitively).
pub fn format_model_description(description: &str) -> String {
    let mut formatted = description.trim().to_string();

    if !formatted.to_lowercase().contains("3d") {
        formatted.push_str(", 3D model");
    }
    if !formatted.to_lowercase().contains("high detail") {
        formatted.push_str(", high detail");
    }
    let lower = formatted.to_lowercase();
    if !lower.contains("game asset") && !lower.contains("gaming asset") {
        formatted.push_str(", game asset");
    }
    formatted
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
