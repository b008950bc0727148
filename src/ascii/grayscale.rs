//! RGB to luminance conversion using the ITU-R BT.601 luma weights.

/// Compute the luminance of an RGB sample.
///
/// The luminance formula is: Y = 0.299*R + 0.587*G + 0.114*B
///
/// The weights are applied as integers scaled by 1000 and divided once, so
/// gray samples (R = G = B) map to exactly their channel value and pure
/// white is exactly 255.0.
///
/// # Returns
/// Luminance in the range [0.0, 255.0]
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    let weighted = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
    weighted as f32 / 1000.0
}

/// Luminance of an RGBA pixel. Alpha is ignored.
#[inline]
pub fn pixel_luminance(pixel: &image::Rgba<u8>) -> f32 {
    let [r, g, b, _] = pixel.0;
    luminance(r, g, b)
}
