//! `urlfs list` – show every stored URL.

use anyhow::Result;
use urlfs_core::UrlStore;

pub fn run_list(store: &UrlStore) -> Result<()> {
    let urls = store.list()?;
    if urls.is_empty() {
        println!("No URLs in {}.", store.root().display());
    } else {
        for url in urls {
            println!("{url}");
        }
    }
    Ok(())
}
