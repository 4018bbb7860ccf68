//! Site configuration management.
//!
//! The configuration is loaded once per process and then shared read-only as a
//! [`SharedConfig`]. Nothing downstream of the loader mutates it.

use std::{collections::BTreeMap, path::Path, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Configuration frozen after load and shared across the build.
pub type SharedConfig = Arc<Config>;

/// Environment variable prefix for overrides (`SYD__SITE__TITLE=...`).
pub const ENV_PREFIX: &str = "SYD";

/// Main configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Site metadata.
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Site metadata consumed by the page shell and exported as site metadata.
///
/// Every field may be empty. Empty values are rendered as absent, never
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title, shown in the header on the root route.
    pub title: String,

    /// Site description for meta tags.
    pub description: String,

    /// Site author name.
    pub author: String,

    /// Public URL of the site (e.g., "https://syd-dev.com").
    pub site_url: String,

    /// Platform name to handle. Handles may be empty.
    pub social: BTreeMap<String, String>,

    /// Path of the site icon.
    pub icon: String,

    /// Keywords, in configured order.
    pub keywords: Vec<String>,

    /// Comment provider name to identifier.
    pub comment: BTreeMap<String, String>,

    /// Listing settings.
    pub configs: ListingConfig,

    /// Sponsorship settings.
    pub sponsor: SponsorConfig,

    /// Share settings.
    pub share: ShareConfig,

    /// Analytics tracking id.
    pub ga: String,
}

/// Listing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Number of posts shown before "load more".
    pub count_of_initial_post: usize,
}

/// Sponsorship settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SponsorConfig {
    /// Buy Me a Coffee account id.
    pub buy_me_a_coffee_id: String,
}

/// Share settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Facebook application id.
    pub facebook_app_id: String,
}

/// Build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory for the generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Directory holding pre-rendered page bodies.
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    /// Directory of static files copied verbatim.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Directory of template overrides.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,

    /// Sub-path the site is deployed under (e.g., "/blog"). Empty for the domain root.
    #[serde(default)]
    pub path_prefix: String,

    /// Document language code.
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_output_dir() -> String {
    "public".to_string()
}

fn default_content_dir() -> String {
    "content".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_templates_dir() -> String {
    "templates".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            content_dir: default_content_dir(),
            static_dir: default_static_dir(),
            templates_dir: default_templates_dir(),
            path_prefix: String::new(),
            lang: default_lang(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.log_warnings();
        Ok(config)
    }

    /// Load configuration with `SYD__`-prefixed environment overrides.
    ///
    /// Nested keys use `__` as separator, e.g. `SYD__BUILD__PATH_PREFIX=/blog`.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        Self::load_with_env_prefix(path, ENV_PREFIX)
    }

    fn load_with_env_prefix(path: &Path, prefix: &str) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix(prefix).separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.log_warnings();
        Ok(config)
    }

    /// Freeze the configuration for sharing.
    #[must_use]
    pub fn into_shared(self) -> SharedConfig {
        Arc::new(self)
    }

    /// Path of the home page: the path prefix followed by `/`.
    #[must_use]
    pub fn root_path(&self) -> String {
        let prefix = self.build.path_prefix.trim_matches('/');
        if prefix.is_empty() {
            "/".to_string()
        } else {
            format!("/{prefix}/")
        }
    }

    /// Get the absolute URL for a path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.site_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Non-fatal findings about the configuration.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.site.title.trim().is_empty() {
            warnings.push("site.title is empty, the home header will be blank".to_string());
        }

        if self.site.site_url.is_empty() {
            warnings.push("site.site_url is empty, canonical links will be relative".to_string());
        } else {
            if !(self.site.site_url.starts_with("http://")
                || self.site.site_url.starts_with("https://"))
            {
                warnings.push(format!(
                    "site.site_url '{}' should start with http:// or https://",
                    self.site.site_url
                ));
            }
            if self.site.site_url.ends_with('/') {
                warnings.push("site.site_url should not have a trailing slash".to_string());
            }
        }

        if !self.build.path_prefix.is_empty() && !self.build.path_prefix.starts_with('/') {
            warnings.push(format!(
                "build.path_prefix '{}' should start with '/'",
                self.build.path_prefix
            ));
        }

        warnings
    }

    fn log_warnings(&self) {
        for warning in self.warnings() {
            tracing::warn!("{warning}");
        }
    }
}

impl SiteConfig {
    /// Serialize the site metadata as pretty JSON.
    pub fn to_metadata_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read site metadata back from JSON.
    pub fn from_metadata_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
