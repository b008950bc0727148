//! Image to ASCII art conversion.
//!
//! This module provides a deterministic pipeline for converting images
//! to character-grid art:
//!
//! 1. **Rasterizing** - Box-downsample the image to the character grid,
//!    with the row count corrected for tall monospace cells
//! 2. **Luminance** - RGB to brightness using BT.601 weights
//! 3. **Adjustment** - Optional inversion and contrast around mid-gray
//! 4. **Glyph mapping** - Index into an ordered glyph ramp
//!
//! # Character Sets
//!
//! Ramps are looked up by key in a static registry (see [`CHARSETS`]):
//! `standard` (default), `simple`, `block`, `detailed_alt` and `symbols`.
//! Unknown keys fall back to the default ramp.

mod charset;
mod convert;
mod dimensions;
mod downsample;
mod error;
mod grayscale;
mod mapping;

pub use charset::{
    default_charset, keys as charset_keys, lookup as lookup_charset, resolve as resolve_charset,
    Charset, BLOCK_GLYPHS, CHARSETS, DEFAULT_CHARSET_KEY, DETAILED_ALT_GLYPHS, SIMPLE_GLYPHS,
    STANDARD_GLYPHS, SYMBOLS_GLYPHS,
};
pub use convert::{
    convert, convert_bytes, decode_image, load_image, AsciiArt, ConversionOptions,
    DEFAULT_CONTRAST, DEFAULT_OUTPUT_WIDTH,
};
pub use dimensions::{output_height, CHAR_ASPECT_RATIO_CORRECTION, MAX_OUTPUT_WIDTH};
pub use downsample::{downsample, rasterize, MAX_GRID_CELLS};
pub use error::ConvertError;
pub use grayscale::{luminance, pixel_luminance};
pub use mapping::{adjust_luminance, glyph_index, render_grid, CONTRAST_PIVOT};
