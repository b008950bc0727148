//! Restricting text to the glyphs the remote generator may exchange.

/// Block shading glyphs allowed alongside printable ASCII.
pub const ALLOWED_BLOCK_GLYPHS: &[char] = &['░', '▒', '▓', '█'];

/// Replacement for any disallowed character.
pub const REPLACEMENT_CHAR: char = ' ';

/// Check whether a character may pass through the enhancement adapter.
///
/// Allowed: printable ASCII (U+0020 to U+007E), `\n`, `\r`, and the block
/// glyphs U+2591, U+2592, U+2593, U+2588.
#[inline]
pub fn is_allowed_char(ch: char) -> bool {
    matches!(ch, ' '..='~' | '\n' | '\r') || ALLOWED_BLOCK_GLYPHS.contains(&ch)
}

/// Replace every disallowed character with a space.
///
/// Idempotent: sanitizing already-sanitized text returns it unchanged.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|ch| if is_allowed_char(ch) { ch } else { REPLACEMENT_CHAR })
        .collect()
}
