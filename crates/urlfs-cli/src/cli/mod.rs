//! CLI for the urlfs transcoder and URL store.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use urlfs_core::config::{self, UrlfsConfig};
use urlfs_core::{Transcoder, UrlStore};

use commands::{
    run_components, run_config, run_decode, run_encode, run_get, run_list, run_put, run_remove,
};

/// Top-level CLI for urlfs.
#[derive(Debug, Parser)]
#[command(name = "urlfs")]
#[command(about = "urlfs: bijective URL <-> filesystem path transcoder", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/urlfs/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Store root directory (overrides `store_root` from the config).
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the filesystem path for a URL.
    Encode {
        /// URL (any string) to encode.
        url: String,
    },

    /// Print the URL a path was encoded from.
    Decode {
        /// Path produced by `encode`.
        path: String,
    },

    /// Print the encoded path components of a URL, one per line.
    Components {
        /// URL (any string) to split.
        url: String,

        /// Print a JSON array instead.
        #[arg(long)]
        json: bool,
    },

    /// Store content for a URL.
    Put {
        /// URL to store under.
        url: String,

        /// Read content from this file instead of stdin.
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Write the content stored for a URL to stdout.
    Get {
        /// URL to look up.
        url: String,
    },

    /// List every URL in the store.
    List,

    /// Remove a URL from the store.
    Remove {
        /// URL to remove.
        url: String,
    },

    /// Show the effective transcoder configuration.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        let transcoder = Transcoder::new(cfg.transcoder.clone()).context("invalid [transcoder] config")?;

        match cli.command {
            CliCommand::Encode { url } => run_encode(&transcoder, &url)?,
            CliCommand::Decode { path } => run_decode(&transcoder, &path)?,
            CliCommand::Components { url, json } => run_components(&transcoder, &url, json)?,
            CliCommand::Put { url, file } => {
                let store = open_store(cli.root, &cfg, transcoder)?;
                run_put(&store, &url, file.as_deref())?;
            }
            CliCommand::Get { url } => run_get(&open_store(cli.root, &cfg, transcoder)?, &url)?,
            CliCommand::List => run_list(&open_store(cli.root, &cfg, transcoder)?)?,
            CliCommand::Remove { url } => {
                run_remove(&open_store(cli.root, &cfg, transcoder)?, &url)?
            }
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

/// Store root precedence: `--root`, then `store_root` in the config, then the XDG data dir.
fn open_store(root: Option<PathBuf>, cfg: &UrlfsConfig, transcoder: Transcoder) -> Result<UrlStore> {
    let root = match root.or_else(|| cfg.store_root.clone()) {
        Some(root) => root,
        None => config::default_store_root()?,
    };
    UrlStore::open(root, transcoder)
}
