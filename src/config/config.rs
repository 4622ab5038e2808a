//! Config file handling

use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::FilekitError;
use crate::path::DEFAULT_DIR_MODE;

/// filekit configuration
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base directory that relative path names are placed under
    pub base_path: String,
    /// Prefix for public file URLs
    pub base_url: Option<String>,
    /// Default MIME table source (a TOML file path); the bundled table when unset
    pub mime_table: Option<String>,
    /// Permission bits for created directories, e.g. `"0755"` or `493`
    #[serde(deserialize_with = "deserialize_mode")]
    pub dir_mode: u32,
    /// Create missing parent directories
    pub recursive: bool,
    /// Use the extension table when content sniffing is unavailable or inconclusive
    pub allow_extension_fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            base_url: None,
            mime_table: None,
            dir_mode: DEFAULT_DIR_MODE,
            recursive: true,
            allow_extension_fallback: true,
        }
    }
}

impl Config {
    /// Load configuration from the default config file (TOML format)
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, FilekitError> {
        let config_file = Self::default_config_dir().join("config.toml");

        if !config_file.exists() {
            debug!(path = %config_file.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        Self::from_file(&config_file)
    }

    /// Load configuration from a specific TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FilekitError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| FilekitError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, FilekitError> {
        toml::from_str(content)
            .map_err(|e| FilekitError::Config(format!("Invalid config TOML: {}", e)))
    }

    /// Get the default config directory
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("filekit"))
            .unwrap_or_else(|| PathBuf::from(".filekit"))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModeValue {
    Number(u32),
    Octal(String),
}

fn deserialize_mode<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match ModeValue::deserialize(deserializer)? {
        ModeValue::Number(mode) => Ok(mode),
        ModeValue::Octal(text) => {
            let digits = text.trim();
            let digits = digits.strip_prefix("0o").unwrap_or(digits);
            u32::from_str_radix(digits, 8)
                .map_err(|_| serde::de::Error::custom(format!("invalid octal mode '{}'", text)))
        }
    }
}
