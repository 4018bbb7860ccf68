//! Props for the page shell components.
//!
//! Both renderers (the Leptos components and the static HTML layout) take
//! their decisions from these types so the two never disagree.

use serde::{Deserialize, Serialize};

use crate::config::{Config, SiteConfig};

/// Routing context for the page being rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Path of the current route.
    pub pathname: String,
}

impl Location {
    /// Create a location for a path.
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
        }
    }
}

/// Header inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderProps {
    /// Site title.
    pub title: String,

    /// Current route.
    pub location: Location,

    /// Path of the home page.
    pub root_path: String,
}

impl HeaderProps {
    /// Create header props.
    pub fn new(
        title: impl Into<String>,
        location: Location,
        root_path: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            location,
            root_path: root_path.into(),
        }
    }

    /// Header props for a route, with the title taken unmodified from the site config.
    pub fn for_route(config: &Config, pathname: impl Into<String>) -> Self {
        Self::from_site(&config.site, Location::new(pathname), config.root_path())
    }

    /// Header props built from site metadata.
    pub fn from_site(site: &SiteConfig, location: Location, root_path: impl Into<String>) -> Self {
        Self::new(site.title.clone(), location, root_path)
    }

    /// Whether the current route is the home page.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.location.pathname == self.root_path
    }

    /// The title to show, only on the home page.
    #[must_use]
    pub fn visible_title(&self) -> Option<&str> {
        self.is_root().then_some(self.title.as_str())
    }
}

/// Static footer content.
pub mod footer {
    /// Name shown after the copyright sign.
    pub const COPYRIGHT_HOLDER: &str = "Syd";

    /// Link behind the copyright holder.
    pub const COPYRIGHT_URL: &str = "https://github.com/syd-dev";

    /// Label of the "built with" link.
    pub const BUILT_WITH_LABEL: &str = "syd-blog";

    /// Link to the generator.
    pub const BUILT_WITH_URL: &str = "https://github.com/syd-dev/syd-blog";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pathname: &str, root_path: &str) -> HeaderProps {
        HeaderProps::new("syd-dev.com", Location::new(pathname), root_path)
    }

    #[test]
    fn test_title_on_root() {
        let header = props("/", "/");
        assert!(header.is_root());
        assert_eq!(header.visible_title(), Some("syd-dev.com"));
    }

    #[test]
    fn test_no_title_off_root() {
        let header = props("/posts/abc", "/");
        assert!(!header.is_root());
        assert_eq!(header.visible_title(), None);
    }

    #[test]
    fn test_title_iff_path_equals_root() {
        let paths = ["/", "", "/blog", "/blog/", "/posts/abc", "/posts/abc/", "//"];
        let roots = ["/", "/blog/", ""];

        for root in roots {
            for path in paths {
                let header = props(path, root);
                assert_eq!(
                    header.visible_title().is_some(),
                    path == root,
                    "path={path:?} root={root:?}"
                );
            }
        }
    }

    #[test]
    fn test_empty_title_is_still_rendered_on_root() {
        let header = HeaderProps::new("", Location::new("/"), "/");
        assert_eq!(header.visible_title(), Some(""));
    }

    #[test]
    fn test_for_route_passes_title_through() {
        let config: Config = toml::from_str(
            "[site]\ntitle = \"  syd-dev.com <beta> \"\n[build]\npath_prefix = \"/blog\"\n",
        )
        .expect("parse");

        let header = HeaderProps::for_route(&config, "/blog/");
        assert_eq!(header.title, config.site.title);
        assert_eq!(header.root_path, "/blog/");
        assert_eq!(header.visible_title(), Some("  syd-dev.com <beta> "));

        let header = HeaderProps::for_route(&config, "/blog/posts/abc");
        assert_eq!(header.title, config.site.title);
        assert!(header.visible_title().is_none());
    }
}
