//! Static HTML renderers for the header and footer.
//!
//! Markup matches the `syd-ui` Leptos components so client and static pages
//! share class names.

use syd_core::{HeaderProps, props::footer};

use crate::template::escape_html;

/// Render the header, or `None` off the home page.
#[must_use]
pub fn render_header(props: &HeaderProps) -> Option<String> {
    props.visible_title().map(|title| {
        format!(
            r#"<h1 class="home-header"><a href="{}" class="link">{}</a></h1>"#,
            escape_html(&props.root_path),
            escape_html(title)
        )
    })
}

/// Render the copyright footer.
#[must_use]
pub fn render_footer() -> String {
    format!(
        r#"<footer class="footer">© <a href="{}">{}</a>, Built with <a href="{}">{}</a></footer>"#,
        footer::COPYRIGHT_URL,
        footer::COPYRIGHT_HOLDER,
        footer::BUILT_WITH_URL,
        footer::BUILT_WITH_LABEL
    )
}
