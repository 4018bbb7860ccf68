//! Build orchestration.
//!
//! Coordinates the full site build process.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Instant,
};

use rayon::prelude::*;
use syd_core::{CoreError, SharedConfig};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    assets::{AssetError, AssetProcessor},
    collector::{CollectorError, ContentCollector, SiteContent},
    html::{HtmlError, HtmlGenerator},
    template::{TemplateError, TemplateRegistry},
};

/// File name of the exported site metadata.
pub const SITE_METADATA_FILE: &str = "site-metadata.json";

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Collector error.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// HTML generation error.
    #[error("HTML error: {0}")]
    Html(#[from] HtmlError),

    /// Template loading error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Asset error.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    /// Site metadata export error.
    #[error("metadata error: {0}")]
    Metadata(#[from] CoreError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of pages generated.
    pub pages: usize,

    /// Number of pages that failed to render.
    pub failed: usize,

    /// Number of assets copied.
    pub assets: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: SharedConfig,
    content_dir: PathBuf,
    output_dir: PathBuf,
    static_dir: Option<PathBuf>,
    templates_dir: Option<PathBuf>,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(
        config: SharedConfig,
        content_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            content_dir: content_dir.into(),
            output_dir: output_dir.into(),
            static_dir: None,
            templates_dir: None,
        }
    }

    /// Set the static assets directory.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Set the template overrides directory.
    #[must_use]
    pub fn with_templates_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates_dir = Some(dir.into());
        self
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(
            content = %self.content_dir.display(),
            output = %self.output_dir.display(),
            root = %self.config.root_path(),
            "starting build"
        );

        // 1. Clean output directory
        self.clean_output()?;

        // 2. Templates
        let generator = HtmlGenerator::with_templates(self.config.clone(), self.load_templates()?);

        // 3. Collect content
        let collector = ContentCollector::new(&self.content_dir, generator.root_path());
        let content = collector.collect()?;

        // 4. Generate HTML pages
        let (pages, failed) = self.generate_pages(&generator, &content);
        stats.pages = pages;
        stats.failed = failed;

        // 5. Export site metadata
        self.write_site_metadata()?;

        // 6. Copy assets
        if let Some(ref static_dir) = self.static_dir {
            if static_dir.is_dir() {
                stats.assets = AssetProcessor::new()
                    .process(static_dir, &self.output_dir)?
                    .len();
            } else {
                debug!(dir = %static_dir.display(), "static directory not found, skipping");
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            pages = stats.pages,
            failed = stats.failed,
            assets = stats.assets,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Clean the output directory.
    ///
    /// Refuses when the output directory is, or contains, one of the source
    /// directories.
    fn clean_output(&self) -> Result<()> {
        let output = resolve_path(&self.output_dir)?;
        let sources = [
            Some(&self.content_dir),
            self.static_dir.as_ref(),
            self.templates_dir.as_ref(),
        ];
        for source in sources.into_iter().flatten() {
            if resolve_path(source)?.starts_with(&output) {
                return Err(BuildError::Config(format!(
                    "output directory {} would delete source directory {}",
                    self.output_dir.display(),
                    source.display()
                )));
            }
        }

        if self.output_dir.exists() {
            debug!(dir = %self.output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    fn load_templates(&self) -> Result<TemplateRegistry> {
        let mut templates = TemplateRegistry::new();
        if let Some(ref dir) = self.templates_dir {
            let count = templates.load_overrides(dir)?;
            if count > 0 {
                info!(count, dir = %dir.display(), "loaded template overrides");
            }
        }
        Ok(templates)
    }

    /// Generate HTML pages for all content. Returns (written, failed).
    fn generate_pages(&self, generator: &HtmlGenerator, content: &SiteContent) -> (usize, usize) {
        let pages: Vec<_> = content.pages.values().collect();

        info!(count = pages.len(), "generating HTML pages");

        let results: Vec<_> = pages
            .par_iter()
            .map(|page| {
                let html = generator.generate_page(page)?;
                let output_path = generator.output_path(page, &self.output_dir);

                if let Some(parent) = output_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&output_path, &html)?;

                debug!(path = %output_path.display(), "wrote page");
                Ok::<_, BuildError>(())
            })
            .collect();

        let mut written = 0;
        let mut failed = 0;
        for (page, result) in pages.iter().zip(results) {
            match result {
                Ok(()) => written += 1,
                Err(e) => {
                    failed += 1;
                    warn!(route = %page.pathname, error = %e, "failed to generate page");
                }
            }
        }

        (written, failed)
    }

    /// Write the site configuration as JSON, unmodified.
    fn write_site_metadata(&self) -> Result<()> {
        let json = self.config.site.to_metadata_json()?;
        let output_path = self.output_dir.join(SITE_METADATA_FILE);
        fs::write(&output_path, json)?;

        info!(path = %output_path.display(), "generated site metadata");
        Ok(())
    }
}

/// Absolute form of `path` with symlinks, `.` and `..` resolved as far as the
/// path exists on disk.
fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_owned());
                existing = parent;
            }
            _ => return Ok(absolute),
        }
    }

    let mut resolved = fs::canonicalize(existing)?;
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use syd_core::{Config, SiteConfig};
    use tempfile::TempDir;

    use super::*;

    fn test_config() -> SharedConfig {
        let config: Config = toml::from_str(
            r#"
[site]
title = "Test Site"
site_url = "https://example.com"
"#,
        )
        .unwrap();
        config.into_shared()
    }

    #[test]
    fn test_build_empty_site() {
        let content_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();

        let builder = Builder::new(test_config(), content_dir.path(), output_dir.path());
        let stats = builder.build().unwrap();

        assert_eq!(stats.pages, 0);
        assert!(output_dir.path().join(SITE_METADATA_FILE).exists());
    }

    #[test]
    fn test_build_with_content() {
        let content_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        fs::create_dir_all(content_dir.path().join("posts")).unwrap();
        fs::write(content_dir.path().join("index.html"), "<p>home</p>").unwrap();
        fs::write(content_dir.path().join("posts/abc.html"), "<p>abc</p>").unwrap();

        let builder = Builder::new(test_config(), content_dir.path(), output_dir.path());
        let stats = builder.build().unwrap();

        assert_eq!(stats.pages, 2);
        assert_eq!(stats.failed, 0);

        let home = fs::read_to_string(output_dir.path().join("index.html")).unwrap();
        assert!(home.contains("home-header"));
        assert!(home.contains("<p>home</p>"));

        let post = fs::read_to_string(output_dir.path().join("posts/abc/index.html")).unwrap();
        assert!(!post.contains("home-header"));
        assert!(post.contains("<p>abc</p>"));
    }

    #[test]
    fn test_failed_page_is_counted_and_skipped() {
        let content_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let templates_dir = TempDir::new().unwrap();
        fs::write(content_dir.path().join("index.html"), "<p>home</p>").unwrap();
        fs::write(
            templates_dir.path().join("page.html"),
            "{{ body }} {{ unknown }}",
        )
        .unwrap();

        let builder = Builder::new(test_config(), content_dir.path(), output_dir.path())
            .with_templates_dir(templates_dir.path());
        let stats = builder.build().unwrap();

        assert_eq!(stats.pages, 0);
        assert_eq!(stats.failed, 1);
        assert!(!output_dir.path().join("index.html").exists());
    }

    #[test]
    fn test_site_metadata_is_unmodified() {
        let content_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let config = test_config();

        Builder::new(config.clone(), content_dir.path(), output_dir.path())
            .build()
            .unwrap();

        let json = fs::read_to_string(output_dir.path().join(SITE_METADATA_FILE)).unwrap();
        let exported = SiteConfig::from_metadata_json(&json).unwrap();
        assert_eq!(exported, config.site);
    }

    #[test]
    fn test_builder_with_static_dir() {
        let content_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let static_dir = TempDir::new().unwrap();
        fs::write(static_dir.path().join("style.css"), "body {}").unwrap();

        let builder = Builder::new(test_config(), content_dir.path(), output_dir.path())
            .with_static_dir(static_dir.path());
        let stats = builder.build().unwrap();

        assert_eq!(stats.assets, 1);
        assert!(output_dir.path().join("style.css").exists());
    }

    #[test]
    fn test_refuses_to_clean_content_dir() {
        let site = TempDir::new().unwrap();
        let content_dir = site.path().join("content");
        fs::create_dir_all(&content_dir).unwrap();

        let builder = Builder::new(test_config(), &content_dir, site.path());
        assert!(matches!(builder.build(), Err(BuildError::Config(_))));
        assert!(content_dir.exists());
    }

    #[test]
    fn test_refuses_unnormalized_output_over_content() {
        let site = TempDir::new().unwrap();
        let content_dir = site.path().join("content");
        fs::create_dir_all(&content_dir).unwrap();
        fs::write(content_dir.join("index.html"), "<p>home</p>").unwrap();

        for output in [content_dir.join(".."), content_dir.join(".")] {
            let builder = Builder::new(test_config(), &content_dir, &output);
            assert!(matches!(builder.build(), Err(BuildError::Config(_))));
        }
        assert!(content_dir.join("index.html").exists());
    }

    #[test]
    fn test_refuses_dot_relative_output_over_content() {
        let site = tempfile::tempdir_in(".").unwrap();
        let name = site.path().file_name().unwrap();
        let content_dir = Path::new(name).join("content");
        fs::create_dir_all(&content_dir).unwrap();
        fs::write(content_dir.join("index.html"), "<p>home</p>").unwrap();

        let builder = Builder::new(test_config(), &content_dir, Path::new(".").join(name));
        assert!(matches!(builder.build(), Err(BuildError::Config(_))));
        assert!(content_dir.join("index.html").exists());
    }

    #[test]
    fn test_refuses_to_clean_static_and_templates_dirs() {
        let site = TempDir::new().unwrap();
        let content_dir = site.path().join("content");
        let static_dir = site.path().join("static");
        let templates_dir = site.path().join("templates");
        for dir in [&content_dir, &static_dir, &templates_dir] {
            fs::create_dir_all(dir).unwrap();
        }
        fs::write(static_dir.join("favicon.svg"), "<svg/>").unwrap();
        fs::write(templates_dir.join("page.html"), "{{ body }}").unwrap();

        let builder = Builder::new(test_config(), &content_dir, &static_dir)
            .with_static_dir(&static_dir);
        assert!(matches!(builder.build(), Err(BuildError::Config(_))));
        assert!(static_dir.join("favicon.svg").exists());

        let builder = Builder::new(test_config(), &content_dir, &templates_dir)
            .with_templates_dir(&templates_dir);
        assert!(matches!(builder.build(), Err(BuildError::Config(_))));
        assert!(templates_dir.join("page.html").exists());
    }

    #[test]
    fn test_output_dir_may_not_exist_yet() {
        let site = TempDir::new().unwrap();
        let content_dir = site.path().join("content");
        fs::create_dir_all(&content_dir).unwrap();
        let output_dir = site.path().join("out/nested/public");

        let builder = Builder::new(test_config(), &content_dir, &output_dir);
        builder.build().unwrap();
        assert!(output_dir.join(SITE_METADATA_FILE).exists());
    }
}
