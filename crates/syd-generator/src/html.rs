//! Page shell rendering.
//!
//! Wraps a page body with the document head, header and footer. Header props
//! are injected from the shared configuration for every page.

use std::path::{Path, PathBuf};

use syd_core::{HeaderProps, SharedConfig};
use thiserror::Error;
use tracing::debug;

use crate::{
    collector::PageSource,
    layout::{render_footer, render_header},
    template::{TemplateContext, TemplateError, TemplateRegistry, escape_html},
};

/// HTML generation errors.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

/// Result type for HTML generation.
pub type Result<T> = std::result::Result<T, HtmlError>;

/// Renders pages into the site shell.
#[derive(Debug)]
pub struct HtmlGenerator {
    templates: TemplateRegistry,
    config: SharedConfig,
    root_path: String,
}

impl HtmlGenerator {
    /// Create a generator with the built-in templates.
    #[must_use]
    pub fn new(config: SharedConfig) -> Self {
        Self::with_templates(config, TemplateRegistry::new())
    }

    /// Create a generator with custom templates.
    #[must_use]
    pub fn with_templates(config: SharedConfig, templates: TemplateRegistry) -> Self {
        let root_path = config.root_path();
        Self {
            templates,
            config,
            root_path,
        }
    }

    /// Path of the home page.
    #[must_use]
    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    /// Render a full HTML document for a page.
    pub fn generate_page(&self, page: &PageSource) -> Result<String> {
        debug!(route = %page.pathname, "generating HTML for page");

        let header = HeaderProps::for_route(&self.config, page.pathname.as_str());
        let body = self.templates.render(
            "page",
            &TemplateContext::new().with_var("body", page.body.as_str()),
        )?;

        let ctx = self.base_context(&header, page, body);
        Ok(self.templates.render("base", &ctx)?)
    }

    fn base_context(&self, header: &HeaderProps, page: &PageSource, body: String) -> TemplateContext {
        let site = &self.config.site;

        let mut ctx = TemplateContext::new()
            .with_var("lang", escape_html(&self.config.build.lang))
            .with_var("title", escape_html(&self.document_title(header, page)))
            .with_var(
                "canonical_url",
                escape_html(&self.config.url_for(&page.pathname)),
            )
            .with_var("content", body)
            .with_var("footer", render_footer());

        if let Some(header_html) = render_header(header) {
            ctx.insert("header", header_html);
        }

        for (name, value) in [
            ("description", site.description.clone()),
            ("author", site.author.clone()),
            ("keywords", site.keywords.join(", ")),
        ] {
            if !value.is_empty() {
                ctx.insert(
                    format!("{name}_meta"),
                    format!(r#"<meta name="{name}" content="{}">"#, escape_html(&value)),
                );
            }
        }

        if !site.icon.is_empty() {
            ctx.insert(
                "icon_link",
                format!(
                    r#"<link rel="icon" href="{}">"#,
                    escape_html(&self.asset_url(&site.icon))
                ),
            );
        }

        ctx
    }

    /// Site title on the home page, `"{page} | {site}"` elsewhere.
    fn document_title(&self, header: &HeaderProps, page: &PageSource) -> String {
        let site_title = self.config.site.title.as_str();
        if header.is_root() || page.name.is_empty() {
            site_title.to_string()
        } else if site_title.is_empty() {
            page.name.clone()
        } else {
            format!("{} | {site_title}", page.name)
        }
    }

    /// Public URL of a static file, honoring the path prefix.
    ///
    /// Absolute URLs are kept as-is. A leading `static/` segment is dropped
    /// because static files are copied to the output root.
    #[must_use]
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let static_dir = self.config.build.static_dir.trim_matches('/');
        let relative = path.trim_start_matches('/');
        let relative = relative
            .strip_prefix(static_dir)
            .and_then(|r| r.strip_prefix('/'))
            .unwrap_or(relative);
        format!("{}{relative}", self.root_path)
    }

    /// Output file for a page.
    #[must_use]
    pub fn output_path(&self, page: &PageSource, output_dir: &Path) -> PathBuf {
        let relative = page
            .pathname
            .strip_prefix(self.root_path.as_str())
            .unwrap_or(&page.pathname)
            .trim_matches('/');

        if relative.is_empty() {
            output_dir.join("index.html")
        } else {
            output_dir.join(relative).join("index.html")
        }
    }
}
