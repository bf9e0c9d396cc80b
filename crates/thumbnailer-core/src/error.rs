//! Error types for the thumbnail pipeline.
//!
//! Per-item failures (`DecodeError`, `SaveError`) are recovered inside the
//! stage that hit them. Everything in `PipelineError` aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for thumbnailer operations.
#[derive(Error, Debug)]
pub enum ThumbnailerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline coordination errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Run-level failures. None of these are skipped over.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input or output directory could not be created or listed
    #[error("Directory error for {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The work channel closed before the end-of-stream marker arrived
    #[error("Work channel closed before end of stream")]
    StreamClosed,

    /// The consumer stopped receiving while the producer still had work
    #[error("Consumer stopped before the producer finished")]
    ConsumerGone,

    /// A worker task panicked or was cancelled
    #[error("Task failed: {0}")]
    Task(String),
}

/// A source file could not be decoded as an image.
#[derive(Error, Debug)]
#[error("Decode error for {path}: {message}")]
pub struct DecodeError {
    pub path: PathBuf,
    pub message: String,
}

/// A thumbnail could not be encoded or written.
#[derive(Error, Debug)]
pub enum SaveError {
    /// JPEG encoding failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Writing the encoded bytes failed
    #[error("Write error for {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for thumbnailer results.
pub type Result<T> = std::result::Result<T, ThumbnailerError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
