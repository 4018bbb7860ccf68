//! Static asset copying.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Asset processing errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Asset outside the source directory.
    #[error("invalid asset path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Copies static files into the output directory, preserving layout.
#[derive(Debug, Default)]
pub struct AssetProcessor;

impl AssetProcessor {
    /// Create a new asset processor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Copy every non-hidden file under `source_dir` into `dest_dir`.
    ///
    /// Returns the copied paths relative to `dest_dir`, sorted.
    pub fn process(&self, source_dir: &Path, dest_dir: &Path) -> Result<Vec<String>> {
        info!(
            source = %source_dir.display(),
            dest = %dest_dir.display(),
            "processing assets"
        );

        let mut copied = Vec::new();
        for entry in WalkDir::new(source_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(source_dir)
                .map_err(|_| AssetError::InvalidPath(entry.path().to_path_buf()))?;
            let dest = dest_dir.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest)?;
            debug!(asset = %relative.display(), "copied asset");

            copied.push(relative.to_string_lossy().replace('\\', "/"));
        }

        info!(count = copied.len(), "assets processed");
        Ok(copied)
    }
}
