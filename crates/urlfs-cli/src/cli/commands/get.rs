//! `urlfs get <url>` – write stored content to stdout.

use anyhow::Result;
use std::io::Write;
use urlfs_core::UrlStore;

pub fn run_get(store: &UrlStore, url: &str) -> Result<()> {
    let contents = store.read(url)?;
    let mut out = std::io::stdout().lock();
    out.write_all(&contents)?;
    out.flush()?;
    Ok(())
}
