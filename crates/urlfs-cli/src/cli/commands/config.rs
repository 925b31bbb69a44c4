//! `urlfs config` – print the effective configuration.

use anyhow::Result;
use urlfs_core::config::UrlfsConfig;

pub fn run_config(cfg: &UrlfsConfig) -> Result<()> {
    let t = &cfg.transcoder;
    println!("path_separator       {:?}", t.path_separator);
    println!("max_component_length {}", t.max_component_length);
    println!("marker               {:?}", t.marker);
    println!("reserved_characters  \"{}\"", t.reserved_characters);
    match &cfg.store_root {
        Some(root) => println!("store_root           {}", root.display()),
        None => println!("store_root           (default)"),
    }
    Ok(())
}
