//! syd-blog core library
//!
//! Site configuration, error handling, and the props shared by the page shell
//! renderers.

pub mod config;
pub mod error;
pub mod props;

pub use config::{Config, SharedConfig, SiteConfig};
pub use error::{CoreError, Result};
pub use props::{HeaderProps, Location};
