//! Thumbnail persistence: naming, JPEG encoding and writing.

use image::codecs::jpeg::JpegEncoder;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult, SaveError};
use crate::types::ProcessedImage;

/// Suffix appended to the source stem.
pub const THUMBNAIL_SUFFIX: &str = "-thumbnail";

/// Extension of every written thumbnail.
pub const THUMBNAIL_EXTENSION: &str = "jpg";

/// Persists thumbnails received by the consumer.
pub trait ThumbnailWriter: Send + Sync {
    /// Store `image` for the source file `name`, returning the written path.
    fn save(&self, name: &str, image: &ProcessedImage) -> Result<PathBuf, SaveError>;
}

/// Writes thumbnails as JPEG files into a directory.
#[derive(Debug, Clone)]
pub struct JpegWriter {
    output_dir: PathBuf,
    quality: u8,
}

impl JpegWriter {
    /// Create a writer targeting `output_dir` with the given JPEG quality.
    pub fn new(output_dir: impl Into<PathBuf>, quality: u8) -> Self {
        Self {
            output_dir: output_dir.into(),
            quality,
        }
    }

    /// Encode an image to JPEG bytes.
    pub fn encode(&self, image: &ProcessedImage) -> Result<Vec<u8>, image::ImageError> {
        let mut buffer = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut buffer, self.quality).encode_image(image)?;
        Ok(buffer.into_inner())
    }
}

impl ThumbnailWriter for JpegWriter {
    fn save(&self, name: &str, image: &ProcessedImage) -> Result<PathBuf, SaveError> {
        let path = self.output_dir.join(thumbnail_file_name(name));

        let bytes = self.encode(image).map_err(|e| SaveError::Encode {
            path: path.clone(),
            message: e.to_string(),
        })?;

        std::fs::write(&path, bytes).map_err(|source| SaveError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

/// Output file name for a source file name.
///
/// Only the final extension is stripped: `photo.png` becomes
/// `photo-thumbnail.jpg`, `archive.tar.gif` becomes `archive.tar-thumbnail.jpg`.
pub fn thumbnail_file_name(name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    format!("{stem}{THUMBNAIL_SUFFIX}.{THUMBNAIL_EXTENSION}")
}

/// Count files in `dir` that follow the thumbnail naming convention.
pub fn count_thumbnails(dir: &Path) -> PipelineResult<usize> {
    let entries = std::fs::read_dir(dir).map_err(|source| PipelineError::Directory {
        path: dir.to_path_buf(),
        source,
    })?;

    let pattern = format!("{THUMBNAIL_SUFFIX}.{THUMBNAIL_EXTENSION}");
    let count = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|e| {
            e.file_name()
                .to_str()
                .map(|n| n.ends_with(&pattern))
                .unwrap_or(false)
        })
        .count();
    Ok(count)
}
