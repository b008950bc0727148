//! AI enhancement of ASCII art.
//!
//! Sends rendered art to a remote text generator with a fixed instruction
//! and returns the reworked art. Text in both directions is restricted to
//! printable ASCII, line breaks and the block shading glyphs.

mod client;
mod prompt;
mod sanitize;

pub use client::{
    EnhanceClient, EnhanceError, DEFAULT_MODEL, GEMINI_API_BASE_URL, GEMINI_API_KEY_ENV,
};
pub use prompt::{build_user_prompt, ENHANCE_INSTRUCTION};
pub use sanitize::{is_allowed_char, sanitize, ALLOWED_BLOCK_GLYPHS, REPLACEMENT_CHAR};
