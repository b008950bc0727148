//! Subcommand handlers.
//!
//! Every handler returns `Result<(), String>`; `main` prints the error and
//! exits with status 1.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::args::{Args, Command, ConfigAction, ConvertArgs, ExportArgs, HistoryAction};
use crate::ascii::{self, AsciiArt};
use crate::config::{default_path as get_config_path, Config};
use crate::enhance::{EnhanceClient, EnhanceError, GEMINI_API_KEY_ENV};
use crate::export;
use crate::history::{History, HistoryEntry};
use crate::session::Session;

/// Run the parsed command line.
pub fn run(args: Args) -> Result<(), String> {
    let config = Config::load(args.config.as_deref()).map_err(|e| e.to_string())?;

    match args.command {
        Command::Convert(convert) => handle_convert(convert, &config),
        Command::Enhance { entry, export } => handle_enhance(entry, &export, &config),
        Command::History { action } => handle_history_action(action, &config),
        Command::Charsets => {
            list_charsets();
            Ok(())
        }
        Command::Config { action } => handle_config_action(action, &config, args.config.as_deref()),
    }
}

fn load_history(config: &Config) -> Result<History, String> {
    History::load(&config.history_path(), config.history.capacity).map_err(|e| e.to_string())
}

fn save_history(history: &History, config: &Config) -> Result<(), String> {
    history
        .save(&config.history_path())
        .map_err(|e| format!("Failed to save history: {}", e))
}

fn new_runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Runtime::new().map_err(|e| format!("Failed to create async runtime: {}", e))
}

/// Send art wherever the export flags ask. Prints to stdout unless a file
/// was requested.
fn emit(art: &AsciiArt, export_args: &ExportArgs, share: bool) -> Result<(), String> {
    match &export_args.output {
        Some(target) => {
            let path = export::write_file(target, art.as_str()).map_err(|e| e.to_string())?;
            eprintln!("Saved to {}", path.display());
        }
        None => export::print_stdout(art.as_str()).map_err(|e| e.to_string())?,
    }

    if export_args.copy {
        export::copy_to_clipboard(art.as_str()).map_err(|e| e.to_string())?;
        eprintln!("Copied to clipboard.");
    }

    if share {
        export::share(art.as_str()).map_err(|e| e.to_string())?;
        eprintln!("Share snippet copied to clipboard.");
    }

    Ok(())
}

/// Convert an image, print or export it, and record it in history.
pub fn handle_convert(convert: ConvertArgs, config: &Config) -> Result<(), String> {
    let mut options = config.conversion_options();
    if let Some(width) = convert.width {
        options.output_width = width;
    }
    if let Some(charset) = convert.charset {
        options.charset_key = charset.key().to_string();
    }
    if let Some(invert) = convert.invert_override() {
        options.invert = invert;
    }
    if let Some(contrast) = convert.contrast {
        options.contrast = contrast;
    }

    let history = if convert.no_history {
        History::new(config.history.capacity)
    } else {
        load_history(config)?
    };

    let mut session = Session::new(options, history);
    session.set_record_history(!convert.no_history);

    let rt = new_runtime()?;
    rt.block_on(session.load_image(&convert.image))
        .map_err(|e| format!("Failed to load '{}': {}", convert.image.display(), e))?;

    let art = session.regenerate().map_err(|e| e.to_string())?.clone();
    emit(&art, &convert.export, convert.share)?;

    if !convert.no_history {
        save_history(session.history(), config)?;
    }
    Ok(())
}

fn missing_key_message() -> String {
    format!(
        "{env} environment variable is not set.\n\n\
        To use AI enhancement, add your API key to a .env file:\n\
            echo '{env}=your-api-key-here' >> .env\n\n\
        Or set it as an environment variable:\n\
            export {env}=\"your-api-key-here\"",
        env = GEMINI_API_KEY_ENV
    )
}

/// Enhance a history entry and record the result as a new entry.
pub fn handle_enhance(
    entry: Option<u64>,
    export_args: &ExportArgs,
    config: &Config,
) -> Result<(), String> {
    let history = load_history(config)?;

    let target = match entry {
        Some(id) => history
            .get(id)
            .ok_or_else(|| format!("No history entry with id {}", id))?,
        None => history.latest().ok_or_else(|| {
            "History is empty. Run 'meme-ascii convert <IMAGE>' first.".to_string()
        })?,
    };
    let (id, options) = (target.id, target.options.clone());

    let client = EnhanceClient::new()
        .map_err(|e| match e {
            EnhanceError::MissingApiKey => missing_key_message(),
            _ => format!("Failed to create enhancement client: {}", e),
        })?
        .with_base_url(config.enhance_base_url())
        .with_model(config.enhance_model());

    let mut session = Session::new(options, history);
    session.restore(id).map_err(|e| e.to_string())?;

    eprintln!("Enhancing entry {} with {}...", id, client.model());

    let rt = new_runtime()?;
    let art = rt
        .block_on(session.enhance(&client))
        .map_err(|e| format!("Enhancement failed: {}", e))?
        .clone();

    emit(&art, export_args, false)?;
    save_history(session.history(), config)
}

fn format_age(now_ms: u64, created_ms: u64) -> String {
    let secs = now_ms.saturating_sub(created_ms) / 1000;
    match secs {
        0..=59 => "just now".to_string(),
        60..=3599 => format!("{}m ago", secs / 60),
        3600..=86_399 => format!("{}h ago", secs / 3600),
        _ => format!("{}d ago", secs / 86_400),
    }
}

fn describe_source(entry: &HistoryEntry) -> String {
    entry
        .source
        .path
        .as_deref()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| entry.source.short_digest().to_string())
}

/// Handle history subcommand actions.
pub fn handle_history_action(action: HistoryAction, config: &Config) -> Result<(), String> {
    let mut history = load_history(config)?;

    match action {
        HistoryAction::List => {
            if history.is_empty() {
                println!("No history yet.");
                return Ok(());
            }
            let now = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0);
            println!("History (newest first):");
            for entry in history.iter() {
                println!(
                    "  {:>4}  {:<9} {:>9}  {}x{} {:<12} {}",
                    entry.id,
                    entry.kind.to_string(),
                    format_age(now, entry.created_at),
                    entry.art.width(),
                    entry.art.height(),
                    entry.options.charset_key,
                    describe_source(entry)
                );
            }
            Ok(())
        }
        HistoryAction::Show { id } => {
            let entry = history
                .get(id)
                .ok_or_else(|| format!("No history entry with id {}", id))?;
            export::print_stdout(entry.art.as_str()).map_err(|e| e.to_string())
        }
        HistoryAction::Delete { id } => {
            history.remove(id).map_err(|e| e.to_string())?;
            save_history(&history, config)?;
            println!("Deleted entry {}.", id);
            Ok(())
        }
        HistoryAction::Clear => {
            let count = history.len();
            history.clear();
            save_history(&history, config)?;
            println!("Cleared {} entries.", count);
            Ok(())
        }
        HistoryAction::Export { id, output } => {
            let entry = history
                .get(id)
                .ok_or_else(|| format!("No history entry with id {}", id))?;
            let target = output.unwrap_or_else(|| PathBuf::from(export::DEFAULT_EXPORT_FILENAME));
            let path = export::write_file(&target, entry.art.as_str()).map_err(|e| e.to_string())?;
            println!("Saved to {}", path.display());
            Ok(())
        }
    }
}

/// List the charset registry.
pub fn list_charsets() {
    println!("Available character sets:");
    for charset in ascii::CHARSETS {
        let marker = if charset.key == ascii::DEFAULT_CHARSET_KEY {
            " (default)"
        } else {
            ""
        };
        println!(
            "  {:<13} {} - {} levels{}",
            charset.key,
            charset.name,
            charset.len(),
            marker
        );
        println!("                {}", charset.description);
    }
}

/// Handle config subcommand actions.
pub fn handle_config_action(
    action: ConfigAction,
    config: &Config,
    explicit_path: Option<&Path>,
) -> Result<(), String> {
    let config_path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(get_config_path);

    match action {
        ConfigAction::Show => {
            let text = config
                .to_effective_toml()
                .map_err(|e| format!("Failed to render config: {}", e))?;
            println!("{}", text);

            if config_path.exists() {
                println!("# Config file: {} (exists)", config_path.display());
            } else {
                println!("# Config file: {} (not found)", config_path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            Config::write_template(&config_path).map_err(|e| {
                format!(
                    "{}\nUse 'meme-ascii config show' to view current settings.",
                    e
                )
            })?;
            println!("Created config file: {}", config_path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_age() {
        let now = 10 * 86_400_000;
        assert_eq!(format_age(now, now), "just now");
        assert_eq!(format_age(now, now - 120_000), "2m ago");
        assert_eq!(format_age(now, now - 3 * 3_600_000), "3h ago");
        assert_eq!(format_age(now, now - 2 * 86_400_000), "2d ago");
        // Clock skew
        assert_eq!(format_age(now, now + 5_000), "just now");
    }

    #[test]
    fn test_missing_key_message_names_env_var() {
        assert!(missing_key_message().contains("GEMINI_API_KEY"));
    }
}
