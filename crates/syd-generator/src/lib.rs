//! syd-blog generator library
//!
//! Static build host for the blog shell.
//!
//! # Modules
//!
//! - [`template`] - HTML template system with variable interpolation
//! - [`layout`] - Static header and footer renderers
//! - [`html`] - Page shell rendering
//! - [`collector`] - Route collection from pre-rendered fragments
//! - [`assets`] - Static asset copying
//! - [`build`] - Build orchestration

pub mod assets;
pub mod build;
pub mod collector;
pub mod html;
pub mod layout;
pub mod template;

pub use assets::AssetProcessor;
pub use build::{BuildError, BuildStats, Builder, SITE_METADATA_FILE};
pub use collector::{ContentCollector, PageSource, SiteContent};
pub use html::HtmlGenerator;
pub use layout::{render_footer, render_header};
pub use template::{Template, TemplateContext, TemplateRegistry};
