//! Bounded history of conversion results, persisted as JSON.
//!
//! Entries are kept newest-first. When the history is full, pushing a new
//! entry evicts the oldest one.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ascii::{AsciiArt, ConversionOptions};

/// Default number of entries kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Errors that can occur while persisting history.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Failed to access history file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse history file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No history entry with id {0}")]
    NotFound(u64),
}

/// Reference to the image an entry was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceImage {
    /// Where the image was loaded from, if it came from a file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// SHA-256 of the raw image bytes, hex encoded.
    pub digest: String,
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
}

impl SourceImage {
    /// Describe an image from its raw bytes and decoded size.
    pub fn from_bytes(path: Option<&Path>, bytes: &[u8], width: u32, height: u32) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
            digest: Self::fingerprint(bytes),
            width,
            height,
        }
    }

    /// Hex-encoded SHA-256 of the bytes.
    pub fn fingerprint(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        hex::encode(hasher.finalize())
    }

    /// Short form of the digest for listings.
    pub fn short_digest(&self) -> &str {
        &self.digest[..self.digest.len().min(12)]
    }
}

/// How an entry's art was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    #[default]
    Converted,
    Enhanced,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Converted => write!(f, "converted"),
            EntryKind::Enhanced => write!(f, "enhanced"),
        }
    }
}

/// One recorded result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    /// Creation time, Unix milliseconds.
    pub created_at: u64,
    #[serde(default)]
    pub kind: EntryKind,
    pub source: SourceImage,
    pub art: AsciiArt,
    pub options: ConversionOptions,
}

/// On-disk layout.
#[derive(Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    entries: Vec<HistoryEntry>,
}

/// Newest-first bounded list of results.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    next_id: u64,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl History {
    /// Create an empty history. A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY)),
            capacity,
            next_id: 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a result as the newest entry and return its id.
    ///
    /// Evicts the oldest entries beyond capacity.
    pub fn push(
        &mut self,
        kind: EntryKind,
        source: SourceImage,
        art: AsciiArt,
        options: ConversionOptions,
    ) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);

        self.entries.push_front(HistoryEntry {
            id,
            created_at: now_millis(),
            kind,
            source,
            art,
            options,
        });

        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_back() {
                log::debug!("History full, evicted entry {}", evicted.id);
            }
        }

        id
    }

    pub fn get(&self, id: u64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Newest entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Remove an entry by id.
    pub fn remove(&mut self, id: u64) -> Result<HistoryEntry, HistoryError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(HistoryError::NotFound(id))?;
        self.entries.remove(index).ok_or(HistoryError::NotFound(id))
    }

    /// Remove all entries. Ids keep increasing afterwards.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Load history from a JSON file.
    ///
    /// A missing file yields an empty history. Entries beyond `capacity`
    /// (the oldest ones) are dropped.
    pub fn load(path: &Path, capacity: usize) -> Result<Self, HistoryError> {
        let mut history = Self::new(capacity);

        if !path.exists() {
            return Ok(history);
        }

        let content = std::fs::read_to_string(path).map_err(|e| HistoryError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file: HistoryFile =
            serde_json::from_str(&content).map_err(|e| HistoryError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut entries = file.entries;
        entries.sort_by(|a, b| b.id.cmp(&a.id));
        let max_id = entries.iter().map(|e| e.id).max().unwrap_or(0);
        entries.truncate(history.capacity);

        history.next_id = file.next_id.max(max_id.saturating_add(1)).max(1);
        history.entries = entries.into();

        log::debug!(
            "Loaded {} history entries from {}",
            history.len(),
            path.display()
        );
        Ok(history)
    }

    /// Save history to a JSON file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), HistoryError> {
        let io_err = |e| HistoryError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let file = HistoryFile {
            next_id: self.next_id,
            entries: self.entries.iter().cloned().collect(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        // Write then rename so an interrupted save keeps the old file
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(io_err)?;
        std::fs::rename(&tmp, path).map_err(io_err)?;
        Ok(())
    }
}

/// Get the default history file path.
/// Default: <data_dir>/meme-ascii/history.json
pub fn default_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from(".local/share"))
        .join("meme-ascii")
        .join("history.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> SourceImage {
        SourceImage::from_bytes(None, b"image bytes", 4, 2)
    }

    fn push_art(history: &mut History, text: &str) -> u64 {
        history.push(
            EntryKind::Converted,
            source(),
            AsciiArt::from_text(text),
            ConversionOptions::default(),
        )
    }

    #[test]
    fn test_fingerprint_is_sha256_hex() {
        assert_eq!(
            SourceImage::fingerprint(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(source().short_digest().len(), 12);
    }

    #[test]
    fn test_newest_first() {
        let mut history = History::default();
        let a = push_art(&mut history, "a");
        let b = push_art(&mut history, "b");
        assert!(b > a);
        let ids: Vec<u64> = history.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![b, a]);
        assert_eq!(history.latest().unwrap().art.as_str(), "b");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::new(3);
        for i in 0..5 {
            push_art(&mut history, &i.to_string());
        }
        assert_eq!(history.len(), 3);
        let arts: Vec<&str> = history.iter().map(|e| e.art.as_str()).collect();
        assert_eq!(arts, vec!["4", "3", "2"]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut history = History::new(0);
        push_art(&mut history, "a");
        push_art(&mut history, "b");
        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().unwrap().art.as_str(), "b");
    }

    #[test]
    fn test_unbounded_capacity_does_not_preallocate() {
        let mut history = History::new(usize::MAX);
        let a = push_art(&mut history, "a");
        let b = push_art(&mut history, "b");
        assert_eq!(history.capacity(), usize::MAX);
        assert_eq!(history.len(), 2);
        assert!(b > a);
    }

    #[test]
    fn test_remove() {
        let mut history = History::default();
        let a = push_art(&mut history, "a");
        let b = push_art(&mut history, "b");
        assert_eq!(history.remove(a).unwrap().art.as_str(), "a");
        assert!(history.get(a).is_none());
        assert!(history.get(b).is_some());
        assert!(matches!(history.remove(a), Err(HistoryError::NotFound(id)) if id == a));
    }

    #[test]
    fn test_ids_survive_clear() {
        let mut history = History::default();
        let a = push_art(&mut history, "a");
        history.clear();
        assert!(history.is_empty());
        let b = push_art(&mut history, "b");
        assert!(b > a);
    }

    #[test]
    fn test_entry_kind_defaults_when_missing() {
        let json = serde_json::json!({
            "id": 7,
            "created_at": 0,
            "source": {"digest": "00", "width": 1, "height": 1},
            "art": "@",
            "options": {}
        });
        let entry: HistoryEntry = serde_json::from_value(json).unwrap();
        assert_eq!(entry.kind, EntryKind::Converted);
        assert_eq!(entry.options, ConversionOptions::default());
        assert_eq!(entry.art.as_str(), "@");
    }
}
