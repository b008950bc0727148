//! Getting ASCII art out of the program: files, stdout, clipboard, share.
//!
//! The clipboard is set with an OSC 52 escape sequence, which most modern
//! terminal emulators (and tmux with `set-clipboard on`) forward to the
//! system clipboard. No platform clipboard API is used.

use std::io::Write;
use std::path::{Path, PathBuf};

use base64::Engine;

/// File name used when the target is a directory.
pub const DEFAULT_EXPORT_FILENAME: &str = "meme-ascii.txt";

/// Text placed before the snippet in a share payload.
pub const SHARE_PREFIX: &str = "Check out this ASCII art I made:\n\n";

/// Number of characters of art included in a share payload.
pub const SHARE_SNIPPET_CHARS: usize = 200;

/// Errors that can occur while exporting art.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Nothing to export")]
    Empty,

    #[error("Failed to write '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolve the file an export should land in.
///
/// Existing directories get [`DEFAULT_EXPORT_FILENAME`] appended.
pub fn export_path(target: &Path) -> PathBuf {
    if target.is_dir() {
        target.join(DEFAULT_EXPORT_FILENAME)
    } else {
        target.to_path_buf()
    }
}

/// Write art to a UTF-8 plain text file and return the path written.
pub fn write_file(target: &Path, art: &str) -> Result<PathBuf, ExportError> {
    if art.is_empty() {
        return Err(ExportError::Empty);
    }

    let path = export_path(target);
    std::fs::write(&path, art).map_err(|e| ExportError::File {
        path: path.clone(),
        source: e,
    })?;

    log::info!("Wrote ASCII art to {}", path.display());
    Ok(path)
}

/// Write art followed by a line break.
pub fn write_to<W: Write>(out: &mut W, art: &str) -> Result<(), ExportError> {
    writeln!(out, "{}", art)?;
    out.flush()?;
    Ok(())
}

/// Print art to stdout.
pub fn print_stdout(art: &str) -> Result<(), ExportError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_to(&mut handle, art)
}

/// Build the OSC 52 sequence that puts `text` on the clipboard.
pub fn osc52_sequence(text: &str) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    // c: clipboard selection, BEL terminated
    format!("\x1b]52;c;{}\x07", b64)
}

/// Emit an OSC 52 clipboard sequence to `out`.
pub fn copy_to<W: Write>(out: &mut W, text: &str) -> Result<(), ExportError> {
    if text.is_empty() {
        return Err(ExportError::Empty);
    }
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Copy text to the system clipboard through the terminal.
pub fn copy_to_clipboard(text: &str) -> Result<(), ExportError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    copy_to(&mut handle, text)?;
    log::info!("Sent {} chars to clipboard", text.chars().count());
    Ok(())
}

/// Build the share text: a fixed prefix, the first 200 characters of the
/// art, then `...`.
pub fn share_text(art: &str) -> String {
    let snippet: String = art.chars().take(SHARE_SNIPPET_CHARS).collect();
    format!("{}{}...", SHARE_PREFIX, snippet)
}

/// Share art. Terminals have no share sheet, so the payload is copied.
pub fn share(art: &str) -> Result<String, ExportError> {
    if art.is_empty() {
        return Err(ExportError::Empty);
    }
    let payload = share_text(art);
    copy_to_clipboard(&payload)?;
    Ok(payload)
}
