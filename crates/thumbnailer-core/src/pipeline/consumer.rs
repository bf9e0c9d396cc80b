//! Consumer: drains the work channel and persists each thumbnail.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{PipelineError, PipelineResult};
use crate::output::ThumbnailWriter;
use crate::types::Message;

use super::channel::WorkReceiver;
use super::ensure_dir;

/// The consuming half of the pipeline.
pub struct Consumer {
    output_dir: PathBuf,
    writer: Arc<dyn ThumbnailWriter>,
}

impl Consumer {
    /// Create a consumer that writes into `output_dir` through `writer`.
    pub fn new(output_dir: PathBuf, writer: Arc<dyn ThumbnailWriter>) -> Self {
        Self { output_dir, writer }
    }

    /// Run until the end-of-stream marker arrives, returning the number of
    /// thumbnails saved.
    ///
    /// A channel that closes without the marker is an error, never a
    /// successful finish.
    pub async fn run(self, mut rx: WorkReceiver) -> PipelineResult<usize> {
        tracing::info!("Starting... Saving to {:?}", self.output_dir);
        ensure_dir(&self.output_dir)?;

        let mut saved = 0usize;
        loop {
            let item = match rx.recv().await? {
                Message::End => {
                    tracing::debug!("Received end of stream");
                    break;
                }
                Message::Item(item) => item,
            };

            let writer = Arc::clone(&self.writer);
            let result = tokio::task::spawn_blocking(move || {
                let outcome = writer.save(&item.name, &item.image);
                (item.name, outcome)
            })
            .await
            .map_err(|e| PipelineError::Task(format!("save failed: {e}")))?;

            match result {
                (_, Ok(path)) => {
                    saved += 1;
                    tracing::info!("Saved: {:?}", path);
                }
                (name, Err(e)) => {
                    tracing::error!("Error saving {}: {}", name, e);
                }
            }
        }

        tracing::info!("Finished! Saved {} thumbnails", saved);
        Ok(saved)
    }
}
