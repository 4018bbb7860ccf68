//! syd-blog CLI
//!
//! Builds the syd-dev.com blog shell.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for syd-blog.
#[derive(Parser)]
#[command(name = "syd-blog", version, about = "Builds the syd-dev.com blog")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the static site
    Build {
        /// Output directory (defaults to build.output_dir)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Override the path prefix (e.g., /blog)
        #[arg(long)]
        path_prefix: Option<String>,
    },
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    syd_blog::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            output,
            path_prefix,
        } => {
            syd_blog::cmd::build::run(&cli.config, output.as_deref(), path_prefix.as_deref())?;
        }
        Commands::Check { strict } => {
            syd_blog::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_build_command_parsing() {
        let args = ["syd-blog", "build", "--output", "dist"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, std::path::PathBuf::from("config.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Build {
                output,
                path_prefix,
            } => {
                assert_eq!(output, Some(std::path::PathBuf::from("dist")));
                assert!(path_prefix.is_none());
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_with_path_prefix() {
        let args = ["syd-blog", "build", "--path-prefix", "/blog"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Build {
                output,
                path_prefix,
            } => {
                assert!(output.is_none());
                assert_eq!(path_prefix.as_deref(), Some("/blog"));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_check_command_parsing() {
        let args = ["syd-blog", "check", "--strict"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Check { strict } => assert!(strict),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let cli = Cli::parse_from(["syd-blog", "-vvv", "build"]);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_config_path() {
        let cli = Cli::parse_from(["syd-blog", "--config", "site/config.toml", "check"]);
        assert_eq!(cli.config, std::path::PathBuf::from("site/config.toml"));
    }
}
