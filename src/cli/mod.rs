//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, Command, ConfigAction, ConvertArgs, ExportArgs, HistoryAction};
pub use commands::{
    handle_config_action, handle_convert, handle_enhance, handle_history_action, list_charsets,
    run,
};
pub use enums::CharacterSet;
