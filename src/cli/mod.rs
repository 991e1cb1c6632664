//! Command-line interface.

mod check;
mod locate;
mod output;
mod parse;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use capsule::Config;

#[derive(Parser)]
#[command(name = "capsule")]
#[command(about = "Validate capsule manifests and score archive completeness")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true, env = "CAPSULE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect a capsule (zip file or directory) and print its completion report
    Check {
        /// Capsule zip file or extracted directory
        path: String,
        /// Fill empty titles and tags from embedded PDF metadata (needs pdfinfo)
        #[arg(short, long)]
        metadata: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a manifest file on its own
    Parse {
        /// Manifest file
        manifest: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which explanation file belongs to an item
    Locate {
        /// Capsule zip file or extracted directory
        path: String,
        /// Item filename as written in the manifest
        filename: String,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Check {
            path,
            metadata,
            json,
        } => check::cmd_check(config, &Config::resolve_path(&path), metadata, json).await,
        Commands::Parse { manifest, json } => {
            parse::cmd_parse(&Config::resolve_path(&manifest), json).await
        }
        Commands::Locate { path, filename } => {
            locate::cmd_locate(&Config::resolve_path(&path), &filename).await
        }
    }
}

/// An explicit config path must load; discovery falls back to defaults.
async fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Ok(Config::load_from_path(path).await?)
        }
        None => Ok(Config::load().await),
    }
}
