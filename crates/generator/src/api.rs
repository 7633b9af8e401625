//! REST client for a remote 3D generation service.
//!
//! Wraps the two generation endpoints (text and image) using [`reqwest`].
//! Responses are expected in the `{ "data": ... }` envelope.

use serde::Deserialize;

use crate::tool::{GenerationReceipt, ImageGeneration, TextGeneration};

/// HTTP client for a single generation service.
pub struct GeneratorApi {
    client: reqwest::Client,
    api_url: String,
}

/// Success envelope returned by the generation service.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Errors from the generation REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Generator API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl GeneratorApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://host:3001`. A trailing
    ///   slash is ignored.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Request a model from a text description.
    ///
    /// Sends `POST /api/v1/models/generate`.
    pub async fn generate_from_text(
        &self,
        request: &TextGeneration,
    ) -> Result<GenerationReceipt, GeneratorApiError> {
        let body = serde_json::json!({
            "description": request.formatted_description(),
            "file_path": request.file_path,
            "quality": request.quality,
        });

        let response = self
            .client
            .post(format!("{}/api/v1/models/generate", self.api_url))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Request a model from a base64 image data URL.
    ///
    /// Sends `POST /api/v1/models/generate-from-image`.
    pub async fn generate_from_image(
        &self,
        request: &ImageGeneration,
    ) -> Result<GenerationReceipt, GeneratorApiError> {
        let response = self
            .client
            .post(format!("{}/api/v1/models/generate-from-image", self.api_url))
            .json(request)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`GeneratorApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GeneratorApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeneratorApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful enveloped JSON body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GeneratorApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<DataEnvelope<T>>().await?.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let api = GeneratorApi::new("http://localhost:3001/");
        assert_eq!(api.api_url(), "http://localhost:3001");
    }

    #[test]
    fn envelope_unwraps_receipt() {
        let json = r#"{"data":{"asset_path":"models/a.glb","status":"generated"}}"#;
        let env: DataEnvelope<GenerationReceipt> = serde_json::from_str(json).unwrap();
        assert!(env.data.is_usable());
        assert_eq!(env.data.asset_path, "models/a.glb");
    }
}
