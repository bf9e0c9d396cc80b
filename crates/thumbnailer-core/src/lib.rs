//! Thumbnailer Core - turns a directory of images into JPEG thumbnails.
//!
//! Work is split between two concurrent units joined by a bounded channel:
//!
//! ```text
//! input dir → Producer (list, decode, flatten, resize) ─┐
//!                                                       │ Item(name, image) … End
//! output dir ← Consumer (encode JPEG, write) ←──────────┘
//! ```
//!
//! The producer always finishes the stream with a single `End` marker, and
//! the consumer stops only when it sees it. Images that fail to decode or
//! save are logged and skipped; they never travel through the channel.
//!
//! # Usage
//!
//! ```rust,ignore
//! use thumbnailer_core::{Config, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> thumbnailer_core::Result<()> {
//!     let config = Config::load()?;
//!     let summary = Orchestrator::new(&config).run().await?;
//!     println!("Saved {} thumbnails", summary.saved);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{
    ConfigError, DecodeError, PipelineError, PipelineResult, Result, SaveError, ThumbnailerError,
};
pub use output::{JpegWriter, ThumbnailWriter};
pub use pipeline::{ImageSource, Orchestrator, Transformer};
pub use types::{Message, ProcessedImage, RunSummary, WorkItem};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
