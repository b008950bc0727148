//! Output grid geometry for aspect-ratio-correct ASCII rendering.

use super::error::ConvertError;

/// Character cell aspect-ratio correction.
///
/// Monospace glyphs are taller than wide, so each output row covers more
/// source height than each column covers source width. Lower values give
/// fewer rows.
pub const CHAR_ASPECT_RATIO_CORRECTION: f64 = 0.55;

/// Widest output accepted, in glyph columns.
pub const MAX_OUTPUT_WIDTH: u32 = 1000;

/// Calculate the number of output rows for a given output width.
///
/// `height = max(1, floor(output_width * (img_height / img_width) * 0.55))`
///
/// # Arguments
/// * `img_width` - Natural width of the source image in pixels
/// * `img_height` - Natural height of the source image in pixels
/// * `output_width` - Requested glyph columns
///
/// # Errors
/// Returns `ConvertError::InvalidDimension` when any input is zero.
///
/// # Example
/// ```
/// use meme_ascii::ascii::output_height;
/// // 2x1 source, 2 columns: floor(2 * 0.5 * 0.55) = 0, raised to 1
/// assert_eq!(output_height(2, 1, 2).unwrap(), 1);
/// // 100x100 source, 100 columns: floor(100 * 1.0 * 0.55) = 55
/// assert_eq!(output_height(100, 100, 100).unwrap(), 55);
/// ```
pub fn output_height(img_width: u32, img_height: u32, output_width: u32) -> Result<u32, ConvertError> {
    if output_width == 0 {
        return Err(ConvertError::invalid_dimension("output width must be greater than 0"));
    }
    if img_width == 0 || img_height == 0 {
        return Err(ConvertError::invalid_dimension(format!(
            "source image is {}x{}",
            img_width, img_height
        )));
    }

    let aspect = img_height as f64 / img_width as f64;
    let rows = (output_width as f64 * aspect * CHAR_ASPECT_RATIO_CORRECTION).floor();

    // Saturate absurdly tall sources instead of wrapping
    Ok((rows.min(u32::MAX as f64) as u32).max(1))
}
