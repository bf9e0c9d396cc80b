//! File discovery for finding images in the input directory.

use std::path::Path;
use walkdir::WalkDir;

use crate::error::{PipelineError, PipelineResult};

/// Extensions accepted as input, compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "gif"];

/// Enumerates candidate image files in a directory.
pub trait ImageSource: Send + Sync {
    /// Return the file names (not paths) of eligible images in `dir`, in a
    /// stable order.
    fn list(&self, dir: &Path) -> PipelineResult<Vec<String>>;
}

/// Lists supported image files directly inside a directory.
///
/// Subdirectories are not entered. Results are sorted by file name.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectorySource;

impl DirectorySource {
    /// Create a new directory source.
    pub fn new() -> Self {
        Self
    }
}

impl ImageSource for DirectorySource {
    fn list(&self, dir: &Path) -> PipelineResult<Vec<String>> {
        let mut names = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(PipelineError::Directory {
                        path: dir.to_path_buf(),
                        source: e.into(),
                    });
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !is_supported(entry.path()) {
                continue;
            }

            match entry.file_name().to_str() {
                Some(name) => names.push(name.to_string()),
                None => tracing::warn!("Skipping non-UTF-8 file name: {:?}", entry.path()),
            }
        }

        Ok(names)
    }
}

/// Check if a file has a supported extension.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}
