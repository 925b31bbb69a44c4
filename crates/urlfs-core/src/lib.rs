//! urlfs: store URLs as filesystem paths and read them back.
//!
//! [`transcode`] is the pure URL ⇄ path mapping; [`store`] writes URL content
//! into a directory tree using it.

pub mod config;
pub mod logging;
pub mod store;
pub mod transcode;

pub use config::TranscoderConfig;
pub use store::UrlStore;
pub use transcode::{decode, encode, path_components, TranscodeError, Transcoder};
