//! `urlfs remove <url>` – delete a stored URL.

use anyhow::Result;
use urlfs_core::UrlStore;

pub fn run_remove(store: &UrlStore, url: &str) -> Result<()> {
    store.remove(url)?;
    tracing::info!("removed {}", url);
    println!("Removed {url}");
    Ok(())
}
