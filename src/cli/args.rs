//! CLI argument parsing with clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use super::enums::CharacterSet;
use crate::ascii::MAX_OUTPUT_WIDTH;

/// Turn images into ASCII art memes
#[derive(Parser, Debug)]
#[command(name = "meme-ascii")]
#[command(version, about = "Convert images to ASCII art and punch them up with AI", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert an image to ASCII art
    Convert(ConvertArgs),
    /// Enhance the newest (or a chosen) history entry with AI
    Enhance {
        /// History entry to enhance (default: newest)
        #[arg(long, short)]
        entry: Option<u64>,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Browse and manage past results
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// List available character sets
    Charsets,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(ClapArgs, Debug)]
pub struct ConvertArgs {
    /// Image file (PNG, JPEG, BMP, GIF, WebP)
    pub image: PathBuf,

    /// Output width in characters
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..=MAX_OUTPUT_WIDTH as i64))]
    pub width: Option<u32>,

    /// ASCII character set
    #[arg(long)]
    pub charset: Option<CharacterSet>,

    /// Invert brightness (bright areas become sparse glyphs)
    #[arg(long, overrides_with = "no_invert")]
    pub invert: bool,

    /// Do not invert brightness (for light terminals)
    #[arg(long, overrides_with = "invert")]
    pub no_invert: bool,

    /// Contrast multiplier, 1.0 = unchanged
    #[arg(long, value_parser = parse_contrast)]
    pub contrast: Option<f32>,

    #[command(flatten)]
    pub export: ExportArgs,

    /// Share a snippet (copied to the clipboard)
    #[arg(long)]
    pub share: bool,

    /// Do not record the result in history
    #[arg(long)]
    pub no_history: bool,
}

impl ConvertArgs {
    /// Invert setting from the flags, if either was given.
    pub fn invert_override(&self) -> Option<bool> {
        if self.invert {
            Some(true)
        } else if self.no_invert {
            Some(false)
        } else {
            None
        }
    }
}

/// Where results go besides stdout.
#[derive(ClapArgs, Debug, Default)]
pub struct ExportArgs {
    /// Write the art to a file (directories get meme-ascii.txt)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Copy the art to the clipboard
    #[arg(long)]
    pub copy: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum HistoryAction {
    /// List entries, newest first
    List,
    /// Print an entry's art
    Show { id: u64 },
    /// Delete an entry
    Delete { id: u64 },
    /// Delete all entries
    Clear,
    /// Write an entry's art to a file
    Export {
        id: u64,
        /// Target file or directory (default: ./meme-ascii.txt)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

/// Parse and validate contrast (finite, greater than 0)
fn parse_contrast(s: &str) -> Result<f32, String> {
    let contrast: f32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !contrast.is_finite() || contrast <= 0.0 {
        return Err(format!("Contrast must be greater than 0, got {}", contrast));
    }
    Ok(contrast)
}
