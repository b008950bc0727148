//! CLI enum types for the character set option.

use clap::ValueEnum;

use crate::ascii;

/// Character set choice on the command line.
///
/// Each variant names an entry in the charset registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CharacterSet {
    /// 70-level density ramp
    #[default]
    Standard,
    /// 10-level ramp, clean look
    Simple,
    /// Unicode shading blocks
    Block,
    /// Alternative 70-level ramp
    DetailedAlt,
    /// Symbol-heavy ramp
    Symbols,
}

impl CharacterSet {
    /// Registry key for this choice.
    pub fn key(self) -> &'static str {
        match self {
            CharacterSet::Standard => "standard",
            CharacterSet::Simple => "simple",
            CharacterSet::Block => "block",
            CharacterSet::DetailedAlt => "detailed_alt",
            CharacterSet::Symbols => "symbols",
        }
    }

    /// Registry entry for this choice.
    pub fn charset(self) -> &'static ascii::Charset {
        ascii::resolve_charset(self.key())
    }
}
