//! The generation tool seam.
//!
//! [`GenerationTool`] is what the orchestrator dispatches to. Two
//! implementations exist: [`MockTool`], which only logs and echoes the
//! requested path, and [`RemoteTool`], which calls a generation service over
//! HTTP.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use forge3d_core::generation::{format_model_description, Quality};

use crate::api::GeneratorApi;
use crate::error::GenerationError;
use crate::image::image_format;

// ---------------------------------------------------------------------------
// Requests and receipts
// ---------------------------------------------------------------------------

/// Generate a model from a text description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextGeneration {
    pub description: String,
    pub file_path: String,
    #[serde(default)]
    pub quality: Quality,
}

impl TextGeneration {
    /// The description with generation hints appended.
    pub fn formatted_description(&self) -> String {
        format_model_description(&self.description)
    }
}

/// Generate a model from a base64 image data URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGeneration {
    pub image_data: String,
    pub file_path: String,
    #[serde(default)]
    pub quality: Quality,
}

/// What the tool did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    /// The asset was written to `asset_path`.
    Generated,
    /// The call was accepted but nothing was generated.
    Accepted,
}

/// Result of a generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReceipt {
    pub asset_path: String,
    pub status: ReceiptStatus,
}

impl GenerationReceipt {
    pub fn generated(asset_path: impl Into<String>) -> Self {
        Self {
            asset_path: asset_path.into(),
            status: ReceiptStatus::Generated,
        }
    }

    pub fn accepted(asset_path: impl Into<String>) -> Self {
        Self {
            asset_path: asset_path.into(),
            status: ReceiptStatus::Accepted,
        }
    }

    /// Whether the receipt points at a real asset that can be displayed.
    pub fn is_usable(&self) -> bool {
        self.status == ReceiptStatus::Generated && !self.asset_path.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait GenerationTool: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn generate_from_text(
        &self,
        request: &TextGeneration,
    ) -> Result<GenerationReceipt, GenerationError>;

    async fn generate_from_image(
        &self,
        request: &ImageGeneration,
    ) -> Result<GenerationReceipt, GenerationError>;
}

// ---------------------------------------------------------------------------
// MockTool
// ---------------------------------------------------------------------------

/// Logs what it would generate and echoes the requested path.
///
/// Receipts are always [`ReceiptStatus::Accepted`], so callers fall back to
/// a primitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockTool;

#[async_trait]
impl GenerationTool for MockTool {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate_from_text(
        &self,
        request: &TextGeneration,
    ) -> Result<GenerationReceipt, GenerationError> {
        tracing::info!(
            description = %request.formatted_description(),
            file_path = %request.file_path,
            quality = request.quality.as_str(),
            "Would generate 3D model from text",
        );
        Ok(GenerationReceipt::accepted(request.file_path.clone()))
    }

    async fn generate_from_image(
        &self,
        request: &ImageGeneration,
    ) -> Result<GenerationReceipt, GenerationError> {
        let format = image_format(&request.image_data)?;
        tracing::info!(
            format,
            file_path = %request.file_path,
            quality = request.quality.as_str(),
            "Would generate 3D model from image",
        );
        Ok(GenerationReceipt::accepted(request.file_path.clone()))
    }
}

// ---------------------------------------------------------------------------
// RemoteTool
// ---------------------------------------------------------------------------

/// Dispatches to a remote generation service.
pub struct RemoteTool {
    api: GeneratorApi,
}

impl RemoteTool {
    pub fn new(api: GeneratorApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl GenerationTool for RemoteTool {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn generate_from_text(
        &self,
        request: &TextGeneration,
    ) -> Result<GenerationReceipt, GenerationError> {
        tracing::debug!(api_url = %self.api.api_url(), file_path = %request.file_path, "Remote text generation");
        Ok(self.api.generate_from_text(request).await?)
    }

    async fn generate_from_image(
        &self,
        request: &ImageGeneration,
    ) -> Result<GenerationReceipt, GenerationError> {
        image_format(&request.image_data)?;
        tracing::debug!(api_url = %self.api.api_url(), file_path = %request.file_path, "Remote image generation");
        Ok(self.api.generate_from_image(request).await?)
    }
}
