//! Model descriptors: the canonical record of a displayable 3D object.
//!
//! A descriptor is built once per generation (successful or fallback) and
//! never mutated afterwards. Fields are private so the id and the
//! kind/asset pairing cannot change after [`build`] returns.

use serde::{Deserialize, Serialize};

use crate::classifier::{Classification, Shape};
use crate::ids;

/// Maximum length of a display name, in characters.
pub const MAX_DISPLAY_NAME_CHARS: usize = 30;

/// Default uniform scale.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Label used when the source label is blank.
pub const FALLBACK_LABEL: &str = "Generated_Model";

/// Whether a descriptor renders a built-in shape or an external file.
///
/// The asset reference lives inside the `ExternalAsset` variant, so it is
/// present exactly when the kind is external.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    Primitive,
    ExternalAsset { asset_reference: String },
}

/// A displayable 3D object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    id: String,
    display_name: String,
    #[serde(flatten)]
    kind: ModelKind,
    shape: Shape,
    color: String,
    scale: f64,
}

impl ModelDescriptor {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn kind(&self) -> &ModelKind {
        &self.kind
    }

    pub fn is_external(&self) -> bool {
        matches!(self.kind, ModelKind::ExternalAsset { .. })
    }

    /// Fallback shape; always set, even for external assets.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn asset_reference(&self) -> Option<&str> {
        match &self.kind {
            ModelKind::Primitive => None,
            ModelKind::ExternalAsset { asset_reference } => Some(asset_reference),
        }
    }
}

impl ModelDescriptor {
    /// Fixed-id primitive for the built-in sample catalog.
    pub(crate) fn fixed_primitive(
        id: &str,
        display_name: &str,
        shape: Shape,
        color: &str,
        scale: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name_from(display_name),
            kind: ModelKind::Primitive,
            shape,
            color: color.to_string(),
            scale,
        }
    }
}

/// Optional inputs to [`build`].
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub scale: Option<f64>,
    pub asset_reference: Option<String>,
}

impl BuildOptions {
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_asset_reference(mut self, asset_reference: impl Into<String>) -> Self {
        self.asset_reference = Some(asset_reference.into());
        self
    }
}

/// Build a new descriptor with a freshly allocated id.
///
/// - `kind` is `ExternalAsset` only when a non-blank asset reference is given.
/// - `shape` and `color` always come from `classification`.
/// - A non-finite or non-positive scale is replaced by [`DEFAULT_SCALE`].
pub fn build(
    source_label: &str,
    classification: Classification,
    options: BuildOptions,
) -> ModelDescriptor {
    let kind = match options.asset_reference {
        Some(reference) if !reference.trim().is_empty() => ModelKind::ExternalAsset {
            asset_reference: reference,
        },
        _ => ModelKind::Primitive,
    };

    let scale = options
        .scale
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(DEFAULT_SCALE);

    ModelDescriptor {
        id: ids::new_id(ids::MODEL_PREFIX),
        display_name: display_name_from(source_label),
        kind,
        shape: classification.shape,
        color: classification.color,
        scale,
    }
}

/// Truncate a label to [`MAX_DISPLAY_NAME_CHARS`] characters.
///
/// Blank labels become [`FALLBACK_LABEL`].
pub fn display_name_from(label: &str) -> String {
    if label.trim().is_empty() {
        return FALLBACK_LABEL.to_string();
    }
    label.chars().take(MAX_DISPLAY_NAME_CHARS).collect()
}

/// The part of a file name before its first `.`.
///
/// `"red_car.front.png"` becomes `"red_car"`; names with an empty stem
/// (`".png"`) become [`FALLBACK_LABEL`].
pub fn label_from_file_name(file_name: &str) -> String {
    let stem = file_name.split('.').next().unwrap_or_default();
    if stem.trim().is_empty() {
        FALLBACK_LABEL.to_string()
    } else {
        stem.to_string()
    }
}
