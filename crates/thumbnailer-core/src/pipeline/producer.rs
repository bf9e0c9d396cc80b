//! Producer: lists the input directory, transforms each image and hands the
//! results to the consumer.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{PipelineError, PipelineResult};
use crate::types::WorkItem;

use super::channel::WorkSender;
use super::discovery::ImageSource;
use super::thumbnail::Transformer;

/// The producing half of the pipeline.
pub struct Producer {
    input_dir: PathBuf,
    bounds: (u32, u32),
    source: Arc<dyn ImageSource>,
    transformer: Arc<dyn Transformer>,
}

impl Producer {
    /// Create a producer reading from `input_dir`.
    pub fn new(
        input_dir: PathBuf,
        bounds: (u32, u32),
        source: Arc<dyn ImageSource>,
        transformer: Arc<dyn Transformer>,
    ) -> Self {
        Self {
            input_dir,
            bounds,
            source,
            transformer,
        }
    }

    /// Run to completion, returning the number of images transformed.
    ///
    /// The end-of-stream marker is sent on every path that still has a
    /// consumer to talk to, including a failed directory listing.
    pub async fn run(self, tx: WorkSender) -> PipelineResult<usize> {
        let result = self.produce(&tx).await;

        match (result, tx.finish().await) {
            (Ok(processed), Ok(())) => {
                tracing::info!("Finished! Processed {} images", processed);
                Ok(processed)
            }
            (Err(e), _) => Err(e),
            (Ok(_), Err(e)) => Err(e),
        }
    }

    async fn produce(&self, tx: &WorkSender) -> PipelineResult<usize> {
        tracing::info!("Starting... Reading from {:?}", self.input_dir);
        let names = self.source.list(&self.input_dir)?;
        tracing::info!("Found {} images to process", names.len());

        let mut processed = 0usize;
        for name in names {
            let path = self.input_dir.join(&name);
            let transformer = Arc::clone(&self.transformer);
            let bounds = self.bounds;

            let result = tokio::task::spawn_blocking(move || transformer.transform(&path, bounds))
                .await
                .map_err(|e| PipelineError::Task(format!("transform of {name} failed: {e}")))?;

            match result {
                Ok(image) => {
                    tx.send(WorkItem {
                        name: name.clone(),
                        image,
                    })
                    .await?;
                    processed += 1;
                    tracing::info!("Processed: {}", name);
                }
                Err(e) => {
                    tracing::error!("Error processing {}: {}", name, e);
                }
            }
        }

        Ok(processed)
    }
}
