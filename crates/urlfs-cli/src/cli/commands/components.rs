//! `urlfs components <url>` – show the encoded components.

use anyhow::Result;
use urlfs_core::Transcoder;

pub fn run_components(transcoder: &Transcoder, url: &str, json: bool) -> Result<()> {
    let components = transcoder.path_components(url);
    if json {
        println!("{}", serde_json::to_string_pretty(&components)?);
    } else {
        for c in components {
            println!("{c}");
        }
    }
    Ok(())
}
