//! meme-ascii library crate.
//!
//! Converts images to ASCII art, optionally reworks the art with a remote
//! text generator, and keeps a short history of results.
//!
//! ```
//! use meme_ascii::ascii::{convert, ConversionOptions};
//! use image::{DynamicImage, Rgba, RgbaImage};
//!
//! let mut img = RgbaImage::new(2, 1);
//! img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
//! img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
//!
//! let options = ConversionOptions {
//!     output_width: 2,
//!     charset_key: "simple".to_string(),
//!     invert: false,
//!     contrast: 1.0,
//! };
//! let art = convert(&DynamicImage::ImageRgba8(img), &options).unwrap();
//! assert_eq!(art.as_str(), " @");
//! ```

pub mod ascii;
pub mod cli;
pub mod config;
pub mod enhance;
pub mod export;
pub mod history;
pub mod session;
