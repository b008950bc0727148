//! Luminance to glyph mapping.

use image::RgbaImage;

use super::charset::Charset;
use super::grayscale::pixel_luminance;

/// Mid-gray pivot for contrast adjustment.
pub const CONTRAST_PIVOT: f32 = 127.5;

/// Apply invert and contrast to a luminance value and clamp to [0, 255].
///
/// Order matters: invert first (`255 - L`), then contrast around mid-gray:
/// `L' = (L - 127.5) * contrast + 127.5`. A contrast of 1.0 leaves the value
/// untouched; larger values push samples away from mid-gray, smaller values
/// pull them toward it.
#[inline]
pub fn adjust_luminance(luminance: f32, invert: bool, contrast: f32) -> f32 {
    let l = if invert { 255.0 - luminance } else { luminance };
    let l = (l - CONTRAST_PIVOT) * contrast + CONTRAST_PIVOT;
    l.clamp(0.0, 255.0)
}

/// Select the ramp index for an adjusted luminance.
///
/// `i = floor((L / 255) * (levels - 1))`, clamped to `[0, levels - 1]`.
/// `levels` must be non-zero.
#[inline]
pub fn glyph_index(luminance: f32, levels: usize) -> usize {
    let max_index = levels.saturating_sub(1);
    let idx = ((luminance / 255.0) * max_index as f32).floor();
    if idx <= 0.0 {
        0
    } else {
        (idx as usize).min(max_index)
    }
}

/// Map a sample grid to text, one glyph per sample.
///
/// Glyphs are concatenated left-to-right, rows are joined with a single
/// `'\n'`, and there is no trailing line break.
///
/// # Arguments
/// * `grid` - Downsampled RGBA samples, one per output glyph
/// * `charset` - Non-empty ramp ordered from least to most ink
/// * `invert` - Reflect luminance before mapping
/// * `contrast` - Contrast multiplier (1.0 = unchanged)
pub fn render_grid(grid: &RgbaImage, charset: &Charset, invert: bool, contrast: f32) -> String {
    let (width, height) = grid.dimensions();
    let levels = charset.len();

    // Glyphs may be multi-byte (block shading), reserve for the worst case
    let mut out = String::with_capacity((width as usize + 1) * height as usize * 3);

    for (y, row) in grid.rows().enumerate() {
        if y > 0 {
            out.push('\n');
        }
        for pixel in row {
            let l = adjust_luminance(pixel_luminance(pixel), invert, contrast);
            out.push(charset.glyphs[glyph_index(l, levels)]);
        }
    }

    out
}
