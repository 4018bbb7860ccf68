//! syd-blog UI components
//!
//! Leptos components for the client-rendered blog shell.
//!
//! - [`Header`] - Site title, shown on the home page only
//! - [`Footer`] - Static copyright notice
//! - [`RoutedHeader`] - [`Header`] driven by `leptos_router`'s location
//! - [`Layout`] - Header, content and footer
//!
//! The show/hide decision lives in [`syd_core::HeaderProps`], shared with the
//! static HTML renderer in `syd-generator`.
//!
//! # Example
//!
//! ```ignore
//! use leptos::prelude::*;
//! use leptos_router::components::Router;
//! use syd_ui::Layout;
//!
//! #[component]
//! fn App() -> impl IntoView {
//!     view! {
//!         <Router>
//!             <Layout title="syd-dev.com" root_path="/">
//!                 <p>"Hello"</p>
//!             </Layout>
//!         </Router>
//!     }
//! }
//! ```

pub mod shell;

pub use shell::{Footer, Header, Layout, RoutedHeader};
