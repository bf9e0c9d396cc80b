//! Pipeline orchestration: wires the producer and consumer together and
//! manages their lifecycle.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::Instrument;

use crate::config::{Config, PipelineConfig};
use crate::error::{PipelineError, PipelineResult};
use crate::output::{count_thumbnails, JpegWriter, ThumbnailWriter};
use crate::types::RunSummary;

use super::channel::work_channel;
use super::consumer::Consumer;
use super::discovery::{DirectorySource, ImageSource};
use super::ensure_dir;
use super::producer::Producer;
use super::thumbnail::{ThumbnailGenerator, Transformer};

/// Owns the collaborators of one run and drives producer and consumer.
pub struct Orchestrator {
    input_dir: PathBuf,
    output_dir: PathBuf,
    bounds: (u32, u32),
    pipeline: PipelineConfig,
    source: Arc<dyn ImageSource>,
    transformer: Arc<dyn Transformer>,
    writer: Arc<dyn ThumbnailWriter>,
}

impl Orchestrator {
    /// Create an orchestrator using the filesystem-backed collaborators.
    pub fn new(config: &Config) -> Self {
        let output_dir = config.output_dir();
        Self {
            input_dir: config.input_dir(),
            writer: Arc::new(JpegWriter::new(&output_dir, config.thumbnail.quality)),
            output_dir,
            bounds: config.thumbnail.bounds(),
            pipeline: config.pipeline.clone(),
            source: Arc::new(DirectorySource::new()),
            transformer: Arc::new(ThumbnailGenerator::new()),
        }
    }

    /// Replace the image source.
    pub fn with_source(mut self, source: Arc<dyn ImageSource>) -> Self {
        self.source = source;
        self
    }

    /// Replace the transformer.
    pub fn with_transformer(mut self, transformer: Arc<dyn Transformer>) -> Self {
        self.transformer = transformer;
        self
    }

    /// Replace the thumbnail writer.
    pub fn with_writer(mut self, writer: Arc<dyn ThumbnailWriter>) -> Self {
        self.writer = writer;
        self
    }

    /// Input directory scanned by the producer.
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Output directory written by the consumer.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run producer and consumer concurrently and wait for both.
    ///
    /// Per-image failures only lower the counters. Directory failures and a
    /// side that dies abort the run. When the consumer dies first the
    /// producer only sees `ConsumerGone`, so the consumer's error is reported.
    pub async fn run(&self) -> PipelineResult<RunSummary> {
        ensure_dir(&self.input_dir)?;
        ensure_dir(&self.output_dir)?;

        let (tx, rx) = work_channel(&self.pipeline);

        let producer = Producer::new(
            self.input_dir.clone(),
            self.bounds,
            Arc::clone(&self.source),
            Arc::clone(&self.transformer),
        );
        let consumer = Consumer::new(self.output_dir.clone(), Arc::clone(&self.writer));

        tracing::debug!(
            "Launching producer and consumer (buffer size {})",
            self.pipeline.buffer_size
        );
        let producer_handle =
            tokio::spawn(producer.run(tx).instrument(tracing::info_span!("producer")));
        let consumer_handle =
            tokio::spawn(consumer.run(rx).instrument(tracing::info_span!("consumer")));

        let (produced, consumed) = tokio::join!(producer_handle, consumer_handle);
        let (processed, saved) =
            settle(joined(produced, "producer"), joined(consumed, "consumer"))?;

        let found = count_thumbnails(&self.output_dir)?;
        let summary = RunSummary {
            processed,
            saved,
            found,
        };
        if !summary.is_consistent() {
            tracing::warn!(
                "Counts differ: processed {}, saved {}, found {} in {:?}",
                processed,
                saved,
                found,
                self.output_dir
            );
        }
        Ok(summary)
    }
}

fn joined(
    result: Result<PipelineResult<usize>, tokio::task::JoinError>,
    side: &str,
) -> PipelineResult<usize> {
    result.map_err(|e| PipelineError::Task(format!("{side} task failed: {e}")))?
}

/// Combine both sides' outcomes into one, keeping the root cause.
fn settle(
    produced: PipelineResult<usize>,
    consumed: PipelineResult<usize>,
) -> PipelineResult<(usize, usize)> {
    match (produced, consumed) {
        (Ok(processed), Ok(saved)) => Ok((processed, saved)),
        (Err(PipelineError::ConsumerGone), Err(e)) => Err(e),
        (Err(e), Err(other)) => {
            tracing::error!("Consumer also failed: {}", other);
            Err(e)
        }
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
    }
}
