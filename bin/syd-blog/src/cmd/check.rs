//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use crate::{Config, ContentCollector, site_path};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration and the site directories.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let result = validate(config_path);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

fn validate(config_path: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            println!("  ✗ Configuration invalid: {e}");
            result.add_error(format!("Configuration error: {e}"));
            return result;
        }
    };

    println!("\nChecking configuration values...");
    for warning in config.warnings() {
        result.add_warning(warning);
    }
    check_icon(config_path, &config, &mut result);

    println!("\nChecking content...");
    check_content(config_path, &config, &mut result);

    result
}

fn check_icon(config_path: &Path, config: &Config, result: &mut ValidationResult) {
    let icon = &config.site.icon;
    if icon.is_empty() || icon.starts_with("http://") || icon.starts_with("https://") {
        return;
    }

    if !site_path(config_path, icon).exists() {
        result.add_warning(format!("site.icon '{icon}' does not exist"));
    }
}

fn check_content(config_path: &Path, config: &Config, result: &mut ValidationResult) {
    let content_dir = site_path(config_path, &config.build.content_dir);
    if !content_dir.is_dir() {
        result.add_warning(format!(
            "Content directory {} does not exist",
            content_dir.display()
        ));
        return;
    }

    let root_path = config.root_path();
    match ContentCollector::new(&content_dir, root_path.as_str()).collect() {
        Ok(content) => {
            println!("  ✓ {} page(s)", content.pages.len());
            if content.root_page(&root_path).is_none() {
                result.add_warning(format!(
                    "No index.html in {}, the home page will not be generated",
                    content_dir.display()
                ));
            }
        }
        Err(e) => result.add_error(format!("Content error: {e}")),
    }
}
