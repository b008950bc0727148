//! Configuration file handling for meme-ascii.
//!
//! Loads configuration from `<config_dir>/meme-ascii/config.toml` or a custom path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ascii::{ConversionOptions, DEFAULT_CHARSET_KEY, DEFAULT_CONTRAST, DEFAULT_OUTPUT_WIDTH};
use crate::enhance::{DEFAULT_MODEL, GEMINI_API_BASE_URL};
use crate::history::{self, DEFAULT_HISTORY_CAPACITY};

/// Configuration file structure for meme-ascii.
/// Loaded from <config_dir>/meme-ascii/config.toml (or custom path via --config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub enhance: EnhanceConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Default conversion settings. Unset fields use the built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConversionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invert: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EnhanceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            path: None,
        }
    }
}

fn default_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

/// Commented template written by `config init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# meme-ascii configuration

[conversion]
# Output width in characters
# width = 100
# Character set: standard, simple, block, detailed_alt, symbols
# charset = "standard"
# Invert brightness (bright areas become sparse glyphs)
# invert = true
# Contrast multiplier, 1.0 = unchanged
# contrast = 1.0

[enhance]
# model = "gemini-2.0-flash"
# base_url = "https://generativelanguage.googleapis.com"

[history]
# Number of results kept
capacity = 10
# path = "/path/to/history.json"
"#;

impl Config {
    /// Load configuration from a file path.
    ///
    /// With no explicit path, a missing default file yields the default
    /// config. An explicit path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path.is_some();
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            if explicit {
                return Err(ConfigError::NotFound { path });
            }
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            path: path.clone(),
            source: e,
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            source: e,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Conversion options from the file, falling back to built-in defaults.
    pub fn conversion_options(&self) -> ConversionOptions {
        let c = &self.conversion;
        ConversionOptions {
            output_width: c.width.unwrap_or(DEFAULT_OUTPUT_WIDTH),
            charset_key: c
                .charset
                .clone()
                .unwrap_or_else(|| DEFAULT_CHARSET_KEY.to_string()),
            invert: c.invert.unwrap_or(true),
            contrast: c.contrast.unwrap_or(DEFAULT_CONTRAST),
        }
    }

    /// History file location.
    pub fn history_path(&self) -> PathBuf {
        self.history.path.clone().unwrap_or_else(history::default_path)
    }

    pub fn enhance_model(&self) -> &str {
        self.enhance.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn enhance_base_url(&self) -> &str {
        self.enhance.base_url.as_deref().unwrap_or(GEMINI_API_BASE_URL)
    }

    /// Effective configuration as TOML, with every default filled in.
    pub fn to_effective_toml(&self) -> Result<String, toml::ser::Error> {
        let options = self.conversion_options();
        let effective = Config {
            conversion: ConversionConfig {
                width: Some(options.output_width),
                charset: Some(options.charset_key),
                invert: Some(options.invert),
                contrast: Some(options.contrast),
            },
            enhance: EnhanceConfig {
                model: Some(self.enhance_model().to_string()),
                base_url: Some(self.enhance_base_url().to_string()),
            },
            history: HistoryConfig {
                capacity: self.history.capacity,
                path: Some(self.history_path()),
            },
        };
        toml::to_string_pretty(&effective)
    }

    /// Write the commented default config. Refuses to overwrite.
    pub fn write_template(path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    NotFound {
        path: PathBuf,
    },
    AlreadyExists {
        path: PathBuf,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::NotFound { path } => {
                write!(f, "Config file '{}' does not exist", path.display())
            }
            ConfigError::AlreadyExists { path } => {
                write!(f, "Config file '{}' already exists", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::NotFound { .. } | ConfigError::AlreadyExists { .. } => None,
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("meme-ascii").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/meme-ascii/config.toml")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.conversion_options(), ConversionOptions::default());
        assert_eq!(config.history.capacity, DEFAULT_HISTORY_CAPACITY);
        assert_eq!(config.enhance_model(), DEFAULT_MODEL);
        assert_eq!(config.enhance_base_url(), GEMINI_API_BASE_URL);
    }

    #[test]
    fn test_partial_conversion_section() {
        let config: Config = toml::from_str(
            r#"
            [conversion]
            width = 60
            charset = "block"
            "#,
        )
        .unwrap();
        let options = config.conversion_options();
        assert_eq!(options.output_width, 60);
        assert_eq!(options.charset_key, "block");
        assert!(options.invert);
        assert_eq!(options.contrast, 1.0);
    }

    #[test]
    fn test_template_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn test_load_and_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "[history]\ncapacity = 3\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.history.capacity, 3);

        std::fs::write(&path, "[history\n").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_write_template_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");
        Config::write_template(&path).unwrap();
        assert!(path.exists());
        assert!(matches!(
            Config::write_template(&path),
            Err(ConfigError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_effective_toml_round_trips() {
        let config = Config::default();
        let text = config.to_effective_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.conversion_options(), ConversionOptions::default());
    }
}
