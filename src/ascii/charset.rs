//! Glyph ramp registry for ASCII rendering.
//!
//! Every ramp is ordered from "least ink" (index 0) to "most ink" (last index).

/// A named glyph ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    /// Stable registry key.
    pub key: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Glyphs ordered from lightest to densest.
    pub glyphs: &'static [char],
    pub description: &'static str,
}

impl Charset {
    /// Number of glyphs in the ramp.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Whether `ch` is one of this ramp's glyphs.
    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains(&ch)
    }

    /// Position of `ch` in the ramp, if present.
    pub fn index_of(&self, ch: char) -> Option<usize> {
        self.glyphs.iter().position(|&g| g == ch)
    }
}

/// Key of the registry's default charset.
pub const DEFAULT_CHARSET_KEY: &str = "standard";

/// Long density ramp (70 levels) for detailed gradients.
pub const STANDARD_GLYPHS: &[char] = &[
    ' ', '.', '\'', '`', '^', '"', ',', ':', ';', 'I', 'l', '!', 'i', '>', '<', '~', '+', '_',
    '-', '?', ']', '[', '}', '{', '1', ')', '(', '|', '\\', '/', 't', 'f', 'j', 'r', 'x', 'n',
    'u', 'v', 'c', 'z', 'X', 'Y', 'U', 'J', 'C', 'L', 'Q', '0', 'O', 'Z', 'm', 'w', 'q', 'p',
    'd', 'b', 'k', 'h', 'a', 'o', '*', '#', 'M', 'W', '&', '8', '%', 'B', '@', '$',
];

/// Classic 10-level ramp.
pub const SIMPLE_GLYPHS: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Unicode shading blocks (5 levels).
pub const BLOCK_GLYPHS: &[char] = &[' ', '░', '▒', '▓', '█'];

/// Alternative long ramp.
pub const DETAILED_ALT_GLYPHS: &[char] = &[
    ' ', '`', '.', '-', '\'', ':', '_', ',', '^', '=', ';', '>', '<', '+', '!', 'r', 'c', '*',
    '/', 'z', '?', 's', 'L', 'T', 'v', ')', 'J', '7', '(', '|', 'F', 'i', '{', 'C', '}', 'f',
    'I', '3', '1', 't', 'l', 'u', '[', 'n', 'e', 'o', 'Z', '5', 'Y', 'x', 'j', 'A', 'd', 'P',
    'Q', 'P', 'D', 'S', 'G', 'F', 'B', 'J', 'O', 'M', 'W', 'X', '%', '#', '@', '$',
];

/// Symbol-only ramp.
pub const SYMBOLS_GLYPHS: &[char] = &[' ', '.', ',', '*', '&', '%', '#', '@', '$', '+'];

/// All registered charsets, in display order.
pub const CHARSETS: &[Charset] = &[
    Charset {
        key: "standard",
        name: "Standard",
        glyphs: STANDARD_GLYPHS,
        description: "A comprehensive set for detailed gradients.",
    },
    Charset {
        key: "simple",
        name: "Simple",
        glyphs: SIMPLE_GLYPHS,
        description: "Basic characters for a classic ASCII look.",
    },
    Charset {
        key: "block",
        name: "Block",
        glyphs: BLOCK_GLYPHS,
        description: "Uses block characters for a pixelated effect.",
    },
    Charset {
        key: "detailed_alt",
        name: "Detailed Alt",
        glyphs: DETAILED_ALT_GLYPHS,
        description: "An alternative detailed character set.",
    },
    Charset {
        key: "symbols",
        name: "Symbols",
        glyphs: SYMBOLS_GLYPHS,
        description: "Uses common symbols for a unique texture.",
    },
];

/// Look up a charset by exact key.
pub fn lookup(key: &str) -> Option<&'static Charset> {
    CHARSETS.iter().find(|c| c.key == key)
}

/// The registry's default charset.
pub fn default_charset() -> &'static Charset {
    // The default key is part of the static table; see the registry tests.
    lookup(DEFAULT_CHARSET_KEY).unwrap_or(&CHARSETS[0])
}

/// Resolve a key to a charset, falling back to the default for unknown keys.
pub fn resolve(key: &str) -> &'static Charset {
    match lookup(key) {
        Some(charset) => charset,
        None => {
            log::warn!(
                "Unknown charset '{}', falling back to '{}'",
                key,
                DEFAULT_CHARSET_KEY
            );
            default_charset()
        }
    }
}

/// All registry keys, in display order.
pub fn keys() -> impl Iterator<Item = &'static str> {
    CHARSETS.iter().map(|c| c.key)
}
