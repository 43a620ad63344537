//! Editor configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! Serde is Rust's standard for serialization/deserialization.
//! The `#[derive(Serialize, Deserialize)]` macro generates
//! code to convert structs to/from TOML.
//!
//! `#[serde(default)]` uses Default::default() for missing fields,
//! making configs backward-compatible.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use werf_buffer::BufferConfig;

/// Main editor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editing behavior settings
    pub editor: EditorConfig,

    /// File handling settings
    pub files: FileConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from_default_path().unwrap_or_default()
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Loads from the default config path.
    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("werf").join("config.toml"))
    }

    /// Saves the config to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::default_path()?)
    }

    /// Saves the config to a file, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The settings a text buffer needs.
    pub fn buffer_config(&self) -> BufferConfig {
        BufferConfig {
            max_history: self.editor.undo_limit,
            read_chunk_size: self.editor.read_chunk_size,
        }
    }

    /// Largest file to open, in bytes. `None` means no limit.
    pub fn max_file_bytes(&self) -> Option<u64> {
        match self.files.max_file_size {
            0 => None,
            mib => Some(mib as u64 * 1024 * 1024),
        }
    }
}

/// Editing behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Undo history limit (0 = unlimited)
    pub undo_limit: usize,

    /// Bytes per read when loading a file
    pub read_chunk_size: usize,

    /// Merge consecutive keystrokes into one undo step
    pub coalesce_typing: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            undo_limit: 1000,
            read_chunk_size: 8192,
            coalesce_typing: true,
        }
    }
}

/// File handling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Max file size to load (MB, 0 = unlimited)
    pub max_file_size: usize,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self { max_file_size: 100 }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.editor.undo_limit, 1000);
        assert_eq!(config.editor.read_chunk_size, 8192);
        assert!(config.editor.coalesce_typing);
        assert_eq!(config.files.max_file_size, 100);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.editor.undo_limit, config.editor.undo_limit);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Config = toml::from_str("[editor]\nundo_limit = 5\n").unwrap();
        assert_eq!(parsed.editor.undo_limit, 5);
        assert!(parsed.editor.coalesce_typing);
        assert_eq!(parsed.files.max_file_size, 100);
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.editor.coalesce_typing = false;
        config.files.max_file_size = 0;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(!loaded.editor.coalesce_typing);
        assert_eq!(loaded.max_file_bytes(), None);
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "editor = [").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_buffer_config() {
        let mut config = Config::default();
        config.editor.undo_limit = 7;
        config.editor.read_chunk_size = 64;
        let buffer = config.buffer_config();
        assert_eq!(buffer.max_history, 7);
        assert_eq!(buffer.read_chunk_size, 64);
        assert_eq!(Config::default().max_file_bytes(), Some(100 * 1024 * 1024));
    }
}
