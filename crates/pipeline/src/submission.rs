//! Submission input and its validation.
//!
//! A [`Submission`] is what the user sent; [`Submission::validate`] turns it
//! into a [`ValidatedSubmission`] that says exactly what will be dispatched,
//! or rejects it before any token is issued.

use serde::{Deserialize, Serialize};

use forge3d_core::descriptor::label_from_file_name;
use forge3d_core::error::CoreError;
use forge3d_core::generation::{validate_prompt, MAX_MULTI_ANGLE_IMAGES, MIN_RECOMMENDED_ANGLES};

/// An image selected by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    pub file_name: String,
    /// Base64 data URL (`data:image/<format>;base64,...`).
    pub data_url: String,
}

/// What the user submitted, by mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Submission {
    Text { prompt: String },
    Image { images: Vec<ImageFile> },
    MultiImage { images: Vec<ImageFile> },
}

/// The request that will actually reach the generation tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Text { prompt: String },
    Image { image: ImageFile },
}

/// A submission that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedSubmission {
    pub dispatch: Dispatch,
    /// Label used for classification and the display name.
    pub label: String,
    /// Number of images kept after truncation (0 for text).
    pub images_used: usize,
    /// Non-fatal problems with the input.
    pub warnings: Vec<String>,
}

impl Submission {
    pub fn mode(&self) -> &'static str {
        match self {
            Submission::Text { .. } => "text",
            Submission::Image { .. } => "image",
            Submission::MultiImage { .. } => "multi_image",
        }
    }

    /// Check the input for its mode.
    ///
    /// Text needs a non-blank prompt. Both image modes need at least one
    /// file. Multi-image input warns below the recommended angle count and
    /// drops files beyond the maximum. Only the first image is dispatched.
    pub fn validate(self) -> Result<ValidatedSubmission, CoreError> {
        match self {
            Submission::Text { prompt } => {
                validate_prompt(&prompt)?;
                Ok(ValidatedSubmission {
                    label: prompt.clone(),
                    dispatch: Dispatch::Text { prompt },
                    images_used: 0,
                    warnings: Vec::new(),
                })
            }
            Submission::Image { images } => {
                let mut warnings = Vec::new();
                if images.len() > 1 {
                    warnings.push(format!(
                        "Only the first of {} images is used in image mode",
                        images.len()
                    ));
                }
                image_submission(images, 1, warnings)
            }
            Submission::MultiImage { mut images } => {
                let mut warnings = Vec::new();
                if !images.is_empty() && images.len() < MIN_RECOMMENDED_ANGLES {
                    warnings.push(format!(
                        "At least {MIN_RECOMMENDED_ANGLES} angles are recommended for multi-image generation"
                    ));
                }
                if images.len() > MAX_MULTI_ANGLE_IMAGES {
                    warnings.push(format!(
                        "Using the first {MAX_MULTI_ANGLE_IMAGES} of {} images",
                        images.len()
                    ));
                    images.truncate(MAX_MULTI_ANGLE_IMAGES);
                }
                let used = images.len();
                image_submission(images, used, warnings)
            }
        }
    }
}

fn image_submission(
    images: Vec<ImageFile>,
    images_used: usize,
    warnings: Vec<String>,
) -> Result<ValidatedSubmission, CoreError> {
    let image = images
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::Validation("At least one image is required".to_string()))?;

    Ok(ValidatedSubmission {
        label: label_from_file_name(&image.file_name),
        dispatch: Dispatch::Image { image },
        images_used,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn files(n: usize) -> Vec<ImageFile> {
        (0..n)
            .map(|i| ImageFile {
                file_name: format!("angle_{i}.png"),
                data_url: "data:image/png;base64,AAAA".to_string(),
            })
            .collect()
    }

    #[test]
    fn text_requires_prompt() {
        assert_matches!(
            Submission::Text { prompt: "  ".into() }.validate(),
            Err(CoreError::Validation(_))
        );
        let v = Submission::Text { prompt: "a blue donut".into() }.validate().unwrap();
        assert_eq!(v.label, "a blue donut");
        assert!(v.warnings.is_empty());
    }

    #[test]
    fn image_with_zero_files_is_rejected() {
        assert_matches!(
            Submission::Image { images: vec![] }.validate(),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            Submission::MultiImage { images: vec![] }.validate(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn image_label_comes_from_first_file_name() {
        let v = Submission::Image { images: files(2) }.validate().unwrap();
        assert_eq!(v.label, "angle_0");
        assert_eq!(v.images_used, 1);
        assert_eq!(v.warnings.len(), 1);
        assert_matches!(v.dispatch, Dispatch::Image { image } if image.file_name == "angle_0.png");
    }

    #[test]
    fn single_angle_multi_image_warns() {
        let v = Submission::MultiImage { images: files(1) }.validate().unwrap();
        assert_eq!(v.images_used, 1);
        assert_eq!(v.warnings.len(), 1);
    }

    #[test]
    fn multi_image_truncates_to_max() {
        let v = Submission::MultiImage { images: files(7) }.validate().unwrap();
        assert_eq!(v.images_used, MAX_MULTI_ANGLE_IMAGES);
        assert_eq!(v.warnings.len(), 1);

        let v = Submission::MultiImage { images: files(3) }.validate().unwrap();
        assert_eq!(v.images_used, 3);
        assert!(v.warnings.is_empty());
    }

    #[test]
    fn deserializes_mode_tag() {
        let s: Submission = serde_json::from_str(r#"{"mode":"text","prompt":"tree"}"#).unwrap();
        assert_eq!(s.mode(), "text");
        let s: Submission =
            serde_json::from_str(r#"{"mode":"multi_image","images":[]}"#).unwrap();
        assert_eq!(s.mode(), "multi_image");
    }
}
