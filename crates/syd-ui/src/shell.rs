//! Page shell components: header, footer, and the layout that wires them to the router.

use leptos::prelude::*;
use leptos_router::hooks::use_location;
use syd_core::props::{self as shell, footer};

/// Site header. Shows the title on the home page and nothing elsewhere.
#[component]
pub fn Header(
    /// Site title.
    #[prop(into)]
    title: String,
    /// Current route.
    location: shell::Location,
    /// Path of the home page.
    #[prop(into)]
    root_path: String,
) -> impl IntoView {
    let header = shell::HeaderProps::new(title, location, root_path);

    header.visible_title().map(|title| {
        let title = title.to_string();
        let href = header.root_path.clone();
        view! {
          <h1 class="home-header">
            <a href=href class="link">
              {title}
            </a>
          </h1>
        }
    })
}

/// Static copyright footer.
#[component]
pub fn Footer() -> impl IntoView {
    view! {
      <footer class="footer">
        "© "
        <a href={footer::COPYRIGHT_URL}>{footer::COPYRIGHT_HOLDER}</a>
        ", Built with "
        <a href={footer::BUILT_WITH_URL}>{footer::BUILT_WITH_LABEL}</a>
      </footer>
    }
}

/// Header bound to the router's current location.
///
/// Must be rendered inside a `<Router>`.
#[component]
pub fn RoutedHeader(
    /// Site title.
    #[prop(into)]
    title: String,
    /// Path of the home page.
    #[prop(into)]
    root_path: String,
) -> impl IntoView {
    let location = use_location();

    move || {
        let pathname = location.pathname.get();
        view! {
          <Header
            title={title.clone()}
            location={shell::Location::new(pathname)}
            root_path={root_path.clone()}
          />
        }
    }
}

/// Page layout: routed header, page content, footer.
#[component]
pub fn Layout(
    /// Site title.
    #[prop(into)]
    title: String,
    /// Path of the home page.
    #[prop(into)]
    root_path: String,
    /// Page content.
    children: Children,
) -> impl IntoView {
    view! {
      <div class="layout">
        <RoutedHeader title=title root_path=root_path />
        <main>{children()}</main>
        <Footer />
      </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_html(pathname: &str, root_path: &str) -> String {
        view! {
          <Header
            title="syd-dev.com"
            location=shell::Location::new(pathname)
            root_path=root_path.to_string()
          />
        }
        .to_html()
    }

    #[test]
    fn test_header_shows_title_on_root() {
        let html = header_html("/", "/");
        assert!(html.contains("home-header"));
        assert!(html.contains(r#"href="/""#));
        assert!(html.contains("syd-dev.com"));
    }

    #[test]
    fn test_header_hidden_off_root() {
        for pathname in ["/posts/abc", "/about", ""] {
            let html = header_html(pathname, "/");
            assert!(!html.contains("home-header"));
            assert!(!html.contains("syd-dev.com"));
        }
    }

    #[test]
    fn test_header_with_path_prefix() {
        assert!(header_html("/blog/", "/blog/").contains(r#"href="/blog/""#));
        assert!(!header_html("/", "/blog/").contains("syd-dev.com"));
    }

    #[test]
    fn test_footer_is_constant() {
        let first = view! { <Footer /> }.to_html();
        let second = view! { <Footer /> }.to_html();

        assert_eq!(first, second);
        assert!(first.contains(footer::COPYRIGHT_URL));
        assert!(first.contains(footer::BUILT_WITH_URL));
    }
}
