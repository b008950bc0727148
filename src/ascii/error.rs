//! Error types for image conversion.

/// Errors that can occur while turning an image into ASCII art.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The source bytes could not be interpreted as an image.
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The image file could not be read.
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),

    /// Zero output width or a degenerate source image.
    #[error("Invalid dimensions: {reason}")]
    InvalidDimension {
        /// What was wrong with the geometry
        reason: String,
    },

    /// Contrast multiplier is not a finite positive number.
    #[error("Invalid contrast {0}: must be a positive number")]
    InvalidContrast(f32),

    /// The resolved charset has no glyphs.
    #[error("Charset '{key}' has no glyphs")]
    EmptyCharset {
        /// Registry key of the offending charset
        key: String,
    },
}

impl ConvertError {
    pub(crate) fn invalid_dimension(reason: impl Into<String>) -> Self {
        ConvertError::InvalidDimension {
            reason: reason.into(),
        }
    }
}
