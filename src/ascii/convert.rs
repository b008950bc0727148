//! Image to ASCII art conversion entry points.

use std::fmt;
use std::path::Path;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use super::charset::{self, DEFAULT_CHARSET_KEY};
use super::dimensions::MAX_OUTPUT_WIDTH;
use super::downsample::rasterize;
use super::error::ConvertError;
use super::mapping::render_grid;

/// Default output width in glyph columns.
pub const DEFAULT_OUTPUT_WIDTH: u32 = 100;

/// Default contrast multiplier (no change).
pub const DEFAULT_CONTRAST: f32 = 1.0;

/// Settings for one conversion.
///
/// Every field has a default, so partial TOML/JSON documents deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Number of glyph columns in the result.
    #[serde(default = "default_output_width")]
    pub output_width: u32,
    /// Registry key of the glyph ramp. Unknown keys use the default ramp.
    #[serde(default = "default_charset_key")]
    pub charset_key: String,
    /// Reflect luminance before mapping (bright areas become sparse glyphs).
    #[serde(default = "default_invert")]
    pub invert: bool,
    /// Contrast multiplier around mid-gray.
    #[serde(default = "default_contrast")]
    pub contrast: f32,
}

fn default_output_width() -> u32 {
    DEFAULT_OUTPUT_WIDTH
}

fn default_charset_key() -> String {
    DEFAULT_CHARSET_KEY.to_string()
}

fn default_invert() -> bool {
    true // positive image on dark terminals
}

fn default_contrast() -> f32 {
    DEFAULT_CONTRAST
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            output_width: default_output_width(),
            charset_key: default_charset_key(),
            invert: default_invert(),
            contrast: default_contrast(),
        }
    }
}

impl ConversionOptions {
    /// Check the numeric fields. The charset key is never an error.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.output_width == 0 {
            return Err(ConvertError::invalid_dimension(
                "output width must be greater than 0",
            ));
        }
        if self.output_width > MAX_OUTPUT_WIDTH {
            return Err(ConvertError::invalid_dimension(format!(
                "output width {} exceeds the maximum of {}",
                self.output_width, MAX_OUTPUT_WIDTH
            )));
        }
        if !self.contrast.is_finite() || self.contrast <= 0.0 {
            return Err(ConvertError::InvalidContrast(self.contrast));
        }
        Ok(())
    }
}

/// Rendered ASCII art: `height` lines of exactly `width` glyphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AsciiArt(String);

impl AsciiArt {
    /// Wrap text produced elsewhere (history, enhancement).
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Lines of the art, without line breaks.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.split('\n')
    }

    /// Number of lines.
    pub fn height(&self) -> usize {
        self.lines().count()
    }

    /// Glyphs in the first line.
    pub fn width(&self) -> usize {
        self.lines().next().map(|l| l.chars().count()).unwrap_or(0)
    }
}

impl fmt::Display for AsciiArt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AsciiArt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Convert a decoded image to ASCII art.
///
/// Pure and deterministic: the same image and options always produce the
/// same text.
///
/// # Errors
/// * `InvalidDimension` - output width is zero or above [`MAX_OUTPUT_WIDTH`],
///   the grid would be too large, or the source is zero-sized
/// * `InvalidContrast` - contrast is not a finite positive number
/// * `EmptyCharset` - the resolved ramp has no glyphs
pub fn convert(image: &DynamicImage, options: &ConversionOptions) -> Result<AsciiArt, ConvertError> {
    options.validate()?;

    let charset = charset::resolve(&options.charset_key);
    if charset.is_empty() {
        return Err(ConvertError::EmptyCharset {
            key: charset.key.to_string(),
        });
    }

    let grid = rasterize(image, options.output_width)?;
    let text = render_grid(&grid, charset, options.invert, options.contrast);

    log::debug!(
        "Converted image to {}x{} art with '{}' charset",
        grid.width(),
        grid.height(),
        charset.key
    );

    Ok(AsciiArt(text))
}

/// Decode raw image bytes (PNG, JPEG, BMP, GIF, WebP).
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ConvertError> {
    Ok(image::load_from_memory(bytes)?)
}

/// Decode raw image bytes and convert them in one step.
pub fn convert_bytes(bytes: &[u8], options: &ConversionOptions) -> Result<AsciiArt, ConvertError> {
    let image = decode_image(bytes)?;
    convert(&image, options)
}

/// Read and decode an image file without blocking the async runtime.
///
/// Returns the decoded image together with the raw bytes, which callers use
/// to fingerprint the source.
pub async fn load_image(path: &Path) -> Result<(DynamicImage, Vec<u8>), ConvertError> {
    let bytes = tokio::fs::read(path).await?;

    let (image, bytes) = tokio::task::spawn_blocking(move || {
        let image = decode_image(&bytes);
        (image, bytes)
    })
    .await
    .map_err(|e| ConvertError::Io(std::io::Error::other(e)))?;

    Ok((image?, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn black_white() -> DynamicImage {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_default_options() {
        let options = ConversionOptions::default();
        assert_eq!(options.output_width, 100);
        assert_eq!(options.charset_key, "standard");
        assert!(options.invert);
        assert_eq!(options.contrast, 1.0);
    }

    #[test]
    fn test_partial_options_deserialize() {
        let options: ConversionOptions = toml::from_str("output_width = 40").unwrap();
        assert_eq!(options.output_width, 40);
        assert_eq!(options.charset_key, "standard");
        assert!(options.invert);
    }

    #[test]
    fn test_black_white_simple() {
        let options = ConversionOptions {
            output_width: 2,
            charset_key: "simple".to_string(),
            invert: false,
            contrast: 1.0,
        };
        let art = convert(&black_white(), &options).unwrap();
        assert_eq!(art.as_str(), " @");
        assert_eq!(art.width(), 2);
        assert_eq!(art.height(), 1);
    }

    #[test]
    fn test_invalid_contrast() {
        let mut options = ConversionOptions::default();
        options.contrast = 0.0;
        assert!(matches!(
            convert(&black_white(), &options),
            Err(ConvertError::InvalidContrast(_))
        ));
        options.contrast = f32::NAN;
        assert!(matches!(
            convert(&black_white(), &options),
            Err(ConvertError::InvalidContrast(_))
        ));
    }

    #[test]
    fn test_zero_width() {
        let options = ConversionOptions {
            output_width: 0,
            ..Default::default()
        };
        assert!(matches!(
            convert(&black_white(), &options),
            Err(ConvertError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_width_above_maximum() {
        for output_width in [MAX_OUTPUT_WIDTH + 1, u32::MAX] {
            let options = ConversionOptions {
                output_width,
                ..Default::default()
            };
            assert!(matches!(
                convert(&black_white(), &options),
                Err(ConvertError::InvalidDimension { .. })
            ));
        }
    }

    #[test]
    fn test_decode_garbage() {
        let result = convert_bytes(b"definitely not an image", &ConversionOptions::default());
        assert!(matches!(result, Err(ConvertError::Decode(_))));
    }

    #[test]
    fn test_ascii_art_accessors() {
        let art = AsciiArt::from_text("ab\ncd\nef");
        assert_eq!(art.width(), 2);
        assert_eq!(art.height(), 3);
        assert_eq!(art.lines().collect::<Vec<_>>(), vec!["ab", "cd", "ef"]);
        assert_eq!(art.to_string(), "ab\ncd\nef");
    }
}
