//! `urlfs decode <path>` – print the URL a path stands for.

use anyhow::{Context, Result};
use urlfs_core::Transcoder;

pub fn run_decode(transcoder: &Transcoder, path: &str) -> Result<()> {
    let url = transcoder
        .decode(path)
        .with_context(|| format!("decode {path}"))?;
    println!("{url}");
    Ok(())
}
