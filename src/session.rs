//! Session state: the loaded image, current settings, current art and history.
//!
//! Settings changes never convert implicitly on their own; `set_options`
//! regenerates explicitly and `regenerate` can be called at any time.

use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::ascii::{self, AsciiArt, ConversionOptions, ConvertError};
use crate::enhance::{EnhanceClient, EnhanceError};
use crate::history::{EntryKind, History, HistoryEntry, HistoryError, SourceImage};

/// Errors surfaced by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Enhance(#[from] EnhanceError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("No image loaded")]
    NoImage,

    #[error("No ASCII art to work with")]
    NoArt,
}

/// Orchestrates conversions, enhancement and history for one user.
pub struct Session {
    image: Option<DynamicImage>,
    source: Option<SourceImage>,
    options: ConversionOptions,
    art: Option<AsciiArt>,
    history: History,
    record_history: bool,
}

impl Session {
    pub fn new(options: ConversionOptions, history: History) -> Self {
        Self {
            image: None,
            source: None,
            options,
            art: None,
            history,
            record_history: true,
        }
    }

    /// Enable or disable recording results in history.
    pub fn set_record_history(&mut self, record: bool) {
        self.record_history = record;
    }

    /// Read and decode an image file. Clears the current art.
    pub async fn load_image(&mut self, path: &Path) -> Result<(), SessionError> {
        let (image, bytes) = ascii::load_image(path).await?;
        self.set_image(image, &bytes, Some(path));
        log::info!("Loaded image {}", path.display());
        Ok(())
    }

    /// Decode an in-memory image. Clears the current art.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let image = ascii::decode_image(bytes)?;
        self.set_image(image, bytes, None);
        Ok(())
    }

    fn set_image(&mut self, image: DynamicImage, bytes: &[u8], path: Option<&Path>) {
        let (width, height) = image.dimensions();
        self.source = Some(SourceImage::from_bytes(path, bytes, width, height));
        self.image = Some(image);
        self.art = None;
    }

    /// Replace the settings and regenerate if an image is loaded.
    pub fn set_options(&mut self, options: ConversionOptions) -> Result<(), SessionError> {
        self.options = options;
        if self.image.is_some() {
            self.regenerate()?;
        }
        Ok(())
    }

    /// Convert the loaded image with the current settings.
    ///
    /// On success the art becomes current and is recorded in history. On
    /// failure the current art is cleared.
    pub fn regenerate(&mut self) -> Result<&AsciiArt, SessionError> {
        let image = self.image.as_ref().ok_or(SessionError::NoImage)?;

        let art = match ascii::convert(image, &self.options) {
            Ok(art) => art,
            Err(e) => {
                self.art = None;
                return Err(e.into());
            }
        };

        if self.record_history {
            if let Some(source) = &self.source {
                self.history.push(
                    EntryKind::Converted,
                    source.clone(),
                    art.clone(),
                    self.options.clone(),
                );
            }
        }

        Ok(&*self.art.insert(art))
    }

    /// Enhance the current art through the remote generator.
    ///
    /// On success the enhanced art becomes current and is recorded in
    /// history. On failure the current art is left untouched.
    pub async fn enhance(&mut self, client: &EnhanceClient) -> Result<&AsciiArt, SessionError> {
        let current = self.art.as_ref().ok_or(SessionError::NoArt)?;

        let enhanced = match client.enhance(current.as_str()).await {
            Ok(text) => AsciiArt::from_text(text),
            Err(e) => {
                log::warn!("Enhancement failed: {}", e);
                return Err(e.into());
            }
        };

        if self.record_history {
            if let Some(source) = &self.source {
                self.history.push(
                    EntryKind::Enhanced,
                    source.clone(),
                    enhanced.clone(),
                    self.options.clone(),
                );
            }
        }

        Ok(&*self.art.insert(enhanced))
    }

    /// Make a history entry's art and settings current.
    ///
    /// The decoded image is kept only if it is the entry's source.
    pub fn restore(&mut self, id: u64) -> Result<&AsciiArt, SessionError> {
        let entry = self
            .history
            .get(id)
            .ok_or(HistoryError::NotFound(id))?
            .clone();

        let same_image = self
            .source
            .as_ref()
            .is_some_and(|s| s.digest == entry.source.digest);
        if !same_image {
            self.image = None;
        }

        self.options = entry.options;
        self.source = Some(entry.source);
        Ok(&*self.art.insert(entry.art))
    }

    /// Remove a history entry.
    pub fn delete(&mut self, id: u64) -> Result<HistoryEntry, SessionError> {
        Ok(self.history.remove(id)?)
    }

    pub fn art(&self) -> Option<&AsciiArt> {
        self.art.as_ref()
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn into_history(self) -> History {
        self.history
    }
}
