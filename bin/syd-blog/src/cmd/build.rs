//! Build command - generates the static site

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use crate::{Builder, Config, site_path};

/// Run the build command.
///
/// Loads the configuration once, applies CLI overrides, then freezes it for
/// the rest of the build.
pub fn run(config_path: &Path, output: Option<&Path>, path_prefix: Option<&str>) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, ?path_prefix, "Starting build");

    let config = load_config(config_path, path_prefix)?;

    let warnings = config.warnings();
    if !warnings.is_empty() {
        println!();
        println!("  Warnings:");
        for warn in &warnings {
            println!("  ⚠ {warn}");
        }
        println!();
    }

    let output_dir = match output {
        Some(dir) => dir.to_path_buf(),
        None => site_path(config_path, &config.build.output_dir),
    };
    let content_dir = site_path(config_path, &config.build.content_dir);
    let static_dir = site_path(config_path, &config.build.static_dir);
    let templates_dir = site_path(config_path, &config.build.templates_dir);

    tracing::debug!(?config, "Loaded configuration");
    let config = config.into_shared();

    let stats = Builder::new(config, &content_dir, &output_dir)
        .with_static_dir(static_dir)
        .with_templates_dir(templates_dir)
        .build()
        .wrap_err("Build failed")?;

    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Pages:      {}", stats.pages);
    if stats.failed > 0 {
        println!("  Failed:     {}", stats.failed);
    }
    println!("  Assets:     {}", stats.assets);
    println!();
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", output_dir.display());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(())
}

/// Load the configuration and apply CLI overrides.
fn load_config(config_path: &Path, path_prefix: Option<&str>) -> Result<Config> {
    let mut config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;

    if let Some(prefix) = path_prefix {
        tracing::info!(path_prefix = prefix, "Overriding path prefix from CLI");
        config.build.path_prefix = prefix.to_string();
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_build_resolves_dirs_from_config_location() {
        let site = tempfile::tempdir().unwrap();
        fs::write(
            site.path().join("config.toml"),
            "[site]\ntitle = \"syd-dev.com\"\nsite_url = \"https://syd-dev.com\"\n",
        )
        .unwrap();
        fs::create_dir_all(site.path().join("content")).unwrap();
        fs::write(site.path().join("content/index.html"), "<p>home</p>").unwrap();

        run(&site.path().join("config.toml"), None, Some("/blog")).unwrap();

        let home = fs::read_to_string(site.path().join("public/index.html")).unwrap();
        assert!(home.contains(r#"<a href="/blog/" class="link">syd-dev.com</a>"#));
    }

    #[test]
    fn test_cli_path_prefix_is_validated() {
        let site = tempfile::tempdir().unwrap();
        let config_path = site.path().join("config.toml");
        fs::write(
            &config_path,
            "[site]\ntitle = \"syd-dev.com\"\nsite_url = \"https://syd-dev.com\"\n",
        )
        .unwrap();

        let config = load_config(&config_path, None).unwrap();
        assert!(config.warnings().is_empty());

        let config = load_config(&config_path, Some("blog")).unwrap();
        assert_eq!(config.build.path_prefix, "blog");
        assert!(config.warnings().iter().any(|w| w.contains("path_prefix")));
    }

    #[test]
    fn test_build_missing_config() {
        let site = tempfile::tempdir().unwrap();
        let result = run(&site.path().join("config.toml"), None, None);
        assert!(result.is_err());
    }
}
