//! Core data types passed between pipeline stages.

use image::RgbImage;

/// A thumbnail in memory, ready for encoding.
///
/// Always three-channel 8-bit RGB; alpha has been flattened away by the
/// transformer.
pub type ProcessedImage = RgbImage;

/// One transformed image travelling from producer to consumer.
#[derive(Debug)]
pub struct WorkItem {
    /// Original filename, extension included
    pub name: String,

    /// The transformed thumbnail
    pub image: ProcessedImage,
}

/// Element type of the work channel.
#[derive(Debug)]
pub enum Message {
    /// A thumbnail to persist
    Item(WorkItem),

    /// No more items will follow
    End,
}

/// Counters reported after a run.
///
/// `processed` and `saved` are tracked independently by the producer and
/// consumer. `found` comes from listing the output directory afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Images the producer transformed successfully
    pub processed: usize,

    /// Thumbnails the consumer wrote successfully
    pub saved: usize,

    /// Thumbnail files present in the output directory after the run
    pub found: usize,
}

impl RunSummary {
    /// True when both counters and the directory listing agree.
    pub fn is_consistent(&self) -> bool {
        self.processed == self.saved && self.saved == self.found
    }
}
