//! `urlfs encode <url>` – print the path for a URL.

use anyhow::Result;
use urlfs_core::Transcoder;

pub fn run_encode(transcoder: &Transcoder, url: &str) -> Result<()> {
    println!("{}", transcoder.encode(url));
    Ok(())
}
