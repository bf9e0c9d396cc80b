//! Thumbnail pipeline components.
//!
//! - **discovery**: Find image files in the input directory
//! - **thumbnail**: Decode, flatten and resize images
//! - **channel**: Bounded work channel with an explicit end-of-stream marker
//! - **producer**: Transforms images and feeds the channel
//! - **consumer**: Drains the channel and writes thumbnails
//! - **orchestrator**: Runs producer and consumer side by side

pub mod channel;
pub mod consumer;
pub mod discovery;
pub mod orchestrator;
pub mod producer;
pub mod thumbnail;

use std::path::Path;

use crate::error::{PipelineError, PipelineResult};

// Re-exports for convenient access
pub use channel::{work_channel, WorkReceiver, WorkSender};
pub use consumer::Consumer;
pub use discovery::{DirectorySource, ImageSource};
pub use orchestrator::Orchestrator;
pub use producer::Producer;
pub use thumbnail::{ThumbnailGenerator, Transformer};

/// Create `dir` and its parents if missing. An existing directory is fine.
pub fn ensure_dir(dir: &Path) -> PipelineResult<()> {
    std::fs::create_dir_all(dir).map_err(|source| PipelineError::Directory {
        path: dir.to_path_buf(),
        source,
    })
}
