//! Bounded work channel between the producer and the consumer.
//!
//! The sending half is not `Clone` and emits the end-of-stream marker only by
//! being consumed in [`WorkSender::finish`], so a stream carries at most one
//! `End` and nothing can be sent after it.

use tokio::sync::mpsc;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::types::{Message, WorkItem};

/// Create a bounded work channel with the configured buffer size.
///
/// When the buffer is full, [`WorkSender::send`] waits, providing backpressure
/// so the producer cannot run more than `buffer_size` items ahead of the
/// consumer.
pub fn work_channel(config: &PipelineConfig) -> (WorkSender, WorkReceiver) {
    let (tx, rx) = mpsc::channel(config.buffer_size);
    (WorkSender { tx }, WorkReceiver { rx })
}

/// Producer side of the work channel.
#[derive(Debug)]
pub struct WorkSender {
    tx: mpsc::Sender<Message>,
}

impl WorkSender {
    /// Enqueue a work item, waiting while the channel is full.
    pub async fn send(&self, item: WorkItem) -> PipelineResult<()> {
        self.tx
            .send(Message::Item(item))
            .await
            .map_err(|_| PipelineError::ConsumerGone)
    }

    /// Enqueue the end-of-stream marker and close the sending side.
    pub async fn finish(self) -> PipelineResult<()> {
        self.tx
            .send(Message::End)
            .await
            .map_err(|_| PipelineError::ConsumerGone)
    }
}

/// Consumer side of the work channel.
#[derive(Debug)]
pub struct WorkReceiver {
    rx: mpsc::Receiver<Message>,
}

impl WorkReceiver {
    /// Wait for the next message.
    ///
    /// Fails with [`PipelineError::StreamClosed`] if the sender was dropped
    /// without calling [`WorkSender::finish`].
    pub async fn recv(&mut self) -> PipelineResult<Message> {
        self.rx.recv().await.ok_or(PipelineError::StreamClosed)
    }
}
