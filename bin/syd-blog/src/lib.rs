//! syd-blog CLI library
//!
//! Command implementations for the `syd-blog` binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use syd_blog::cmd;
//!
//! cmd::build::run(Path::new("site/config.toml"), None, None).unwrap();
//! ```

use std::path::{Path, PathBuf};

pub mod cmd;

pub use syd_core::Config;
pub use syd_generator::{BuildStats, Builder, ContentCollector};

/// Initialize tracing with the specified verbosity level.
///
/// `verbose`: 0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE. `RUST_LOG` directives
/// are honored on top of the level.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

/// Resolve a configured directory against the directory holding the config file.
pub fn site_path(config_path: &Path, configured: &str) -> PathBuf {
    let configured = Path::new(configured);
    if configured.is_absolute() {
        return configured.to_path_buf();
    }
    config_path
        .parent()
        .map_or_else(|| configured.to_path_buf(), |root| root.join(configured))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_path() {
        assert_eq!(
            site_path(Path::new("site/config.toml"), "content"),
            PathBuf::from("site/content")
        );
        assert_eq!(
            site_path(Path::new("config.toml"), "content"),
            PathBuf::from("content")
        );
        assert_eq!(
            site_path(Path::new("site/config.toml"), "/srv/content"),
            PathBuf::from("/srv/content")
        );
    }
}
