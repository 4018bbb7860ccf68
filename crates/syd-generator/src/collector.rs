//! Route collection.
//!
//! Walks the content directory for pre-rendered HTML fragments and maps each
//! to the route it is served under. Fragment bodies are passed through
//! untouched.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Extension of page fragments.
pub const FRAGMENT_EXTENSION: &str = "html";

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Path that cannot be mapped to a route.
    #[error("invalid content path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// A page body and the route it renders at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSource {
    /// Route path, including the site's path prefix.
    pub pathname: String,

    /// Human-readable name derived from the file name.
    pub name: String,

    /// Pre-rendered HTML body.
    pub body: String,

    /// Fragment the body was read from.
    pub source_path: PathBuf,
}

/// Collected site content, keyed by route.
#[derive(Debug, Default)]
pub struct SiteContent {
    /// Pages by pathname.
    pub pages: BTreeMap<String, PageSource>,
}

impl SiteContent {
    /// Page served at the root path, if any.
    #[must_use]
    pub fn root_page(&self, root_path: &str) -> Option<&PageSource> {
        self.pages.get(root_path)
    }
}

/// Collects page fragments from a content directory.
#[derive(Debug)]
pub struct ContentCollector {
    content_dir: PathBuf,
    root_path: String,
}

impl ContentCollector {
    /// Create a collector mapping routes under `root_path`.
    #[must_use]
    pub fn new(content_dir: impl Into<PathBuf>, root_path: impl Into<String>) -> Self {
        Self {
            content_dir: content_dir.into(),
            root_path: root_path.into(),
        }
    }

    /// Collect all fragments. A missing content directory yields no pages.
    pub fn collect(&self) -> Result<SiteContent> {
        info!(dir = %self.content_dir.display(), "collecting content");

        let files = self.find_fragments()?;
        info!(count = files.len(), "found page fragments");

        let parsed: Vec<_> = files
            .par_iter()
            .filter_map(|path| match self.read_fragment(path) {
                Ok(page) => Some(page),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to read fragment");
                    None
                }
            })
            .collect();

        let mut content = SiteContent::default();
        for page in parsed {
            if let Some(existing) = content.pages.get(&page.pathname) {
                warn!(
                    route = %page.pathname,
                    kept = %existing.source_path.display(),
                    ignored = %page.source_path.display(),
                    "duplicate route"
                );
                continue;
            }
            content.pages.insert(page.pathname.clone(), page);
        }

        info!(pages = content.pages.len(), "content collection complete");
        Ok(content)
    }

    /// Find fragments, skipping hidden files and directories. Sorted for stable output.
    fn find_fragments(&self) -> Result<Vec<PathBuf>> {
        if !self.content_dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.content_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        {
            let entry = entry?;
            if entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext == FRAGMENT_EXTENSION)
            {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    fn read_fragment(&self, path: &Path) -> Result<PageSource> {
        debug!(path = %path.display(), "reading fragment");

        let relative = path.strip_prefix(&self.content_dir).unwrap_or(path);
        let pathname = route_for(relative, &self.root_path)
            .ok_or_else(|| CollectorError::InvalidPath(path.to_path_buf()))?;
        let body = fs::read_to_string(path)?;

        Ok(PageSource {
            name: page_name(relative),
            pathname,
            body,
            source_path: path.to_path_buf(),
        })
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Map a fragment path relative to the content directory to its route.
///
/// - `index.html` → `root_path`
/// - `posts/abc.html` → `{root_path}posts/abc`
/// - `posts/abc/index.html` → `{root_path}posts/abc`
#[must_use]
pub fn route_for(relative: &Path, root_path: &str) -> Option<String> {
    let stem = relative.file_stem()?.to_str()?;

    let mut segments = Vec::new();
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            segments.push(component.as_os_str().to_str()?);
        }
    }
    if stem != "index" {
        segments.push(stem);
    }

    let slug = segments.join("/");
    if slug.is_empty() {
        Some(root_path.to_string())
    } else {
        Some(format!("{}/{slug}", root_path.trim_end_matches('/')))
    }
}

/// Human-readable page name from a fragment path.
fn page_name(relative: &Path) -> String {
    let stem = relative
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let base = if stem == "index" {
        relative
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    } else {
        stem
    };

    base.replace(['-', '_'], " ")
}
