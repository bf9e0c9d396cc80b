//! Thumbnailer CLI - turn a directory of images into JPEG thumbnails.
//!
//! A producer decodes and resizes images while a consumer writes them out,
//! joined by a bounded channel.
//!
//! # Usage
//!
//! ```bash
//! # Thumbnail ./producer into ./consumer with defaults
//! thumbnailer
//!
//! # Custom directories and size
//! thumbnailer run --input photos --output thumbs --size 128
//!
//! # View configuration
//! thumbnailer config show
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use thumbnailer_core::Config;

mod cli;
mod logging;

/// Thumbnailer - turn a directory of images into JPEG thumbnails.
#[derive(Parser, Debug)]
#[command(name = "thumbnailer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Use this config file instead of the default location
    #[arg(long, global = true, env = "THUMBNAILER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate thumbnails (the default when no command is given)
    Run(cli::run::RunArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.command.as_ref())?;
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Thumbnailer v{}", thumbnailer_core::VERSION);

    let config_path = cli.config.unwrap_or_else(Config::default_path);
    match cli.command {
        None => cli::run::execute(cli::run::RunArgs::default(), config).await,
        Some(Commands::Run(args)) => cli::run::execute(args, config).await,
        Some(Commands::Config(args)) => cli::config::execute(args, config, &config_path).await,
    }
}

/// Resolve the configuration for this invocation.
///
/// An explicit `--config` path must exist, except for the commands that
/// create or print it.
fn load_config(explicit: Option<&Path>, command: Option<&Commands>) -> anyhow::Result<Config> {
    let Some(path) = explicit else {
        // Logging isn't initialized yet, so use eprintln for config warnings.
        return Ok(Config::load().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `thumbnailer config path`."
            );
            Config::default()
        }));
    };

    if path.exists() {
        return Ok(Config::load_from(path)?);
    }

    let tolerates_missing = matches!(
        command,
        Some(Commands::Config(cli::config::ConfigArgs {
            command: cli::config::ConfigCommand::Init { .. } | cli::config::ConfigCommand::Path,
        }))
    );
    if !tolerates_missing {
        anyhow::bail!(
            "Config file not found: {}\nCreate it with `thumbnailer config init`.",
            path.display()
        );
    }
    Ok(Config::default())
}
