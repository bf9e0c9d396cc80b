//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Input and output directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoriesConfig {
    /// Directory scanned for source images
    pub input: PathBuf,

    /// Directory thumbnails are written to
    pub output: PathBuf,
}

impl Default for DirectoriesConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("producer"),
            output: PathBuf::from("consumer"),
        }
    }
}

/// Thumbnail generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Maximum thumbnail width in pixels
    pub width: u32,

    /// Maximum thumbnail height in pixels
    pub height: u32,

    /// JPEG quality (1-100)
    pub quality: u8,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            quality: 75,
        }
    }
}

impl ThumbnailConfig {
    /// The bounding box thumbnails are fitted into.
    pub fn bounds(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Pipeline settings for backpressure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Max thumbnails buffered between producer and consumer
    pub buffer_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { buffer_size: 16 }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
