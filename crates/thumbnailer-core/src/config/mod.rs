//! Configuration management for the thumbnailer.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. All config structs implement `Default`.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input and output directories
    pub directories: DirectoriesConfig,

    /// Thumbnail generation settings
    pub thumbnail: ThumbnailConfig,

    /// Pipeline settings
    pub pipeline: PipelineConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.thumbnailer.thumbnailer/config.toml
    /// - Linux: ~/.config/thumbnailer/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\thumbnailer\config\config.toml
    ///
    /// Falls back to ~/.thumbnailer/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "thumbnailer", "thumbnailer")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".thumbnailer").join("config.toml")
            })
    }

    /// Resolved input directory (with ~ expansion).
    pub fn input_dir(&self) -> PathBuf {
        expand(&self.directories.input)
    }

    /// Resolved output directory (with ~ expansion).
    pub fn output_dir(&self) -> PathBuf {
        expand(&self.directories.output)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

fn expand(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.directories.input, PathBuf::from("producer"));
        assert_eq!(config.directories.output, PathBuf::from("consumer"));
        assert_eq!(config.thumbnail.bounds(), (200, 200));
        assert_eq!(config.thumbnail.quality, 75);
        assert_eq!(config.pipeline.buffer_size, 16);
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[directories]"));
        assert!(toml.contains("[thumbnail]"));
        assert!(toml.contains("[pipeline]"));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[thumbnail]\nwidth = 64\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.thumbnail.width, 64);
        assert_eq!(config.thumbnail.height, 200);
        assert_eq!(config.directories.input, PathBuf::from("producer"));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[pipeline]\nbuffer_size = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[thumbnail\nwidth = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
