//! Box downsampling from source pixels to the character grid.

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

use super::dimensions::output_height;
use super::error::ConvertError;

/// Largest sample grid `rasterize` will allocate, in cells.
pub const MAX_GRID_CELLS: usize = 4_000_000;

/// Source pixel span `[start, end)` covered by output cell `cell` along one axis.
///
/// Every cell covers at least one source pixel, so grids larger than the
/// source replicate the nearest pixel instead of leaving gaps.
#[inline]
fn cell_span(cell: u32, cells: u32, source_len: u32) -> (u32, u32) {
    let start = (cell as u64 * source_len as u64 / cells as u64) as u32;
    let end = ((cell as u64 + 1) * source_len as u64 / cells as u64) as u32;
    let start = start.min(source_len - 1);
    (start, end.max(start + 1).min(source_len))
}

/// Downsample an RGBA image to a `char_width x char_height` grid.
///
/// Each output sample is the per-channel average of every source pixel in
/// its cell, rounded to nearest.
///
/// # Arguments
/// * `source` - Decoded RGBA8 pixels
/// * `char_width` - Output columns
/// * `char_height` - Output rows
///
/// # Returns
/// An RGBA grid of exactly `char_width x char_height` samples.
///
/// # Errors
/// Returns `ConvertError::InvalidDimension` if any dimension is zero.
pub fn downsample(
    source: &RgbaImage,
    char_width: u32,
    char_height: u32,
) -> Result<RgbaImage, ConvertError> {
    let (img_width, img_height) = source.dimensions();

    if char_width == 0 || char_height == 0 {
        return Err(ConvertError::invalid_dimension(format!(
            "output grid is {}x{}",
            char_width, char_height
        )));
    }
    if img_width == 0 || img_height == 0 {
        return Err(ConvertError::invalid_dimension(format!(
            "source image is {}x{}",
            img_width, img_height
        )));
    }

    let mut grid = RgbaImage::new(char_width, char_height);

    for cy in 0..char_height {
        let (start_y, end_y) = cell_span(cy, char_height, img_height);

        for cx in 0..char_width {
            let (start_x, end_x) = cell_span(cx, char_width, img_width);

            let mut sum = [0u64; 4];
            let mut count = 0u64;

            for py in start_y..end_y {
                for px in start_x..end_x {
                    let pixel = source.get_pixel(px, py);
                    for (acc, &channel) in sum.iter_mut().zip(pixel.0.iter()) {
                        *acc += channel as u64;
                    }
                    count += 1;
                }
            }

            let mut avg = [0u8; 4];
            for (out, acc) in avg.iter_mut().zip(sum) {
                *out = ((acc + count / 2) / count) as u8;
            }
            grid.put_pixel(cx, cy, Rgba(avg));
        }
    }

    Ok(grid)
}

/// Rasterize a decoded image to the sample grid for `output_width` columns.
///
/// The row count is derived from the image's aspect ratio with the
/// character-cell correction applied (see [`output_height`]).
///
/// # Errors
/// Returns `ConvertError::InvalidDimension` for degenerate geometry or when
/// the grid would exceed [`MAX_GRID_CELLS`].
pub fn rasterize(image: &DynamicImage, output_width: u32) -> Result<RgbaImage, ConvertError> {
    let (img_width, img_height) = image.dimensions();
    let rows = output_height(img_width, img_height, output_width)?;

    let cells = (output_width as usize)
        .checked_mul(rows as usize)
        .filter(|&cells| cells <= MAX_GRID_CELLS && cells.checked_mul(4).is_some());
    if cells.is_none() {
        return Err(ConvertError::invalid_dimension(format!(
            "{}x{} grid exceeds {} cells",
            output_width, rows, MAX_GRID_CELLS
        )));
    }

    log::debug!(
        "Rasterizing {}x{} source to {}x{} grid",
        img_width,
        img_height,
        output_width,
        rows
    );

    downsample(&image.to_rgba8(), output_width, rows)
}
