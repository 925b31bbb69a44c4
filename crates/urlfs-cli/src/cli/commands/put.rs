//! `urlfs put <url> [--file F]` – store content for a URL.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use urlfs_core::UrlStore;

pub fn run_put(store: &UrlStore, url: &str, file: Option<&Path>) -> Result<()> {
    let contents = match file {
        Some(path) => std::fs::read(path).with_context(|| format!("read {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf).context("read stdin")?;
            buf
        }
    };
    let path = store.write(url, &contents)?;
    tracing::info!("put {} ({} bytes)", url, contents.len());
    println!("{}", path.display());
    Ok(())
}
