//! Base64 image data URL checks.

use crate::error::GenerationError;

/// Required prefix of an image data URL.
pub const DATA_URL_PREFIX: &str = "data:image/";

/// Extract the image format from a data URL.
///
/// `data:image/png;base64,...` yields `png`. Anything that does not start
/// with [`DATA_URL_PREFIX`], or carries an empty subtype, is rejected.
pub fn image_format(data_url: &str) -> Result<&str, GenerationError> {
    let rest = data_url.strip_prefix(DATA_URL_PREFIX).ok_or_else(|| {
        GenerationError::InvalidImage(
            "Invalid image data format. Expected base64 data URL.".to_string(),
        )
    })?;

    let format = rest.split([';', ',']).next().unwrap_or_default();
    if format.is_empty() {
        return Err(GenerationError::InvalidImage(
            "Image data URL is missing its format".to_string(),
        ));
    }
    Ok(format)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn format_is_subtype_before_semicolon() {
        assert_eq!(image_format("data:image/png;base64,iVBORw0").unwrap(), "png");
        assert_eq!(image_format("data:image/jpeg;base64,/9j/").unwrap(), "jpeg");
    }

    #[test]
    fn non_image_data_urls_are_rejected() {
        assert_matches!(
            image_format("data:text/plain;base64,aGk="),
            Err(GenerationError::InvalidImage(_))
        );
        assert_matches!(image_format("iVBORw0"), Err(GenerationError::InvalidImage(_)));
    }

    #[test]
    fn empty_subtype_is_rejected() {
        assert_matches!(
            image_format("data:image/;base64,abc"),
            Err(GenerationError::InvalidImage(_))
        );
    }
}
