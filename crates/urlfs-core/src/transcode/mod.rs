//! Bijective URL ⇄ path transcoding.
//!
//! Encoding runs four stages: [`segment`] splits the URL into tokens,
//! [`pct_encode`] escapes reserved characters per token, [`limit`] cuts
//! over-length tokens, and [`mark`] tags the final component. Decoding splits
//! on the separator, strips the marker, concatenates and [`pct_decode`]s.
//!
//! # Examples
//!
//! - `http://example.com/toto?param=value` →
//!   `http%3A%2F%2F/example.com%2F/toto/%3Fparam/_%3Dvalue`

mod error;
mod limit;
mod marker;
mod percent;
mod segment;

pub use error::TranscodeError;
pub use limit::limit;
pub use marker::{mark, strip_marker};
pub use percent::{pct_decode, pct_encode};
pub use segment::segment;

use crate::config::TranscoderConfig;

/// A validated configuration with the encode/decode operations attached.
///
/// Holds only immutable data; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Transcoder {
    config: TranscoderConfig,
}

impl Transcoder {
    /// Validates `config` once so later calls cannot fail on it.
    pub fn new(config: TranscoderConfig) -> Result<Self, TranscodeError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TranscoderConfig {
        &self.config
    }

    /// Encoded components for `url`; the last one carries the marker.
    pub fn path_components(&self, url: &str) -> Vec<String> {
        let cfg = &self.config;
        let max = cfg.max_component_length;
        let tokens = segment(url);
        let last_token = tokens.len() - 1;

        let encoded: Vec<String> = tokens
            .iter()
            .map(|token| pct_encode(token, &cfg.reserved_characters))
            .collect();

        let mut components: Vec<&str> = Vec::with_capacity(encoded.len());
        for (i, token) in encoded.iter().enumerate() {
            let mut chunks = limit(token, max);
            if i == last_token {
                // The final chunk must leave room for the marker.
                let budget = max - cfg.marker.len_utf8();
                if let Some(tail) = chunks.pop() {
                    chunks.extend(limit(tail, budget));
                }
            }
            components.extend(chunks);
        }

        let last = components.pop().unwrap_or_default();
        let mut out: Vec<String> = components.into_iter().map(escape_dot_segment).collect();
        out.push(mark(last, cfg.marker));
        out
    }

    /// Components of the directory holding `url`'s file: all but the last.
    pub fn parent_components(&self, url: &str) -> Vec<String> {
        let mut components = self.path_components(url);
        components.pop();
        components
    }

    /// Encodes `url` as a path of bounded, filesystem-safe components.
    pub fn encode(&self, url: &str) -> String {
        let mut sep = [0u8; 4];
        let sep: &str = self.config.path_separator.encode_utf8(&mut sep);
        self.path_components(url).join(sep)
    }

    /// Reverses [`Transcoder::encode`].
    pub fn decode(&self, path: &str) -> Result<String, TranscodeError> {
        let mut components: Vec<&str> = path.split(self.config.path_separator).collect();
        // `split` always yields at least one item.
        let last = components.len() - 1;
        components[last] = strip_marker(components[last], self.config.marker)?;
        pct_decode(&components.concat())
    }
}

/// Escapes a directory component that is exactly `.` or `..`. Final
/// components always start with the marker and never need this.
fn escape_dot_segment(chunk: &str) -> String {
    match chunk {
        "." => "%2E".to_string(),
        ".." => "%2E%2E".to_string(),
        other => other.to_string(),
    }
}

/// Encodes `url` with `config`.
pub fn encode(url: &str, config: &TranscoderConfig) -> Result<String, TranscodeError> {
    Ok(Transcoder::new(config.clone())?.encode(url))
}

/// Decodes a path produced by [`encode`] with the same `config`.
pub fn decode(path: &str, config: &TranscoderConfig) -> Result<String, TranscodeError> {
    Transcoder::new(config.clone())?.decode(path)
}

/// The encoded components of `url` before joining.
pub fn path_components(url: &str, config: &TranscoderConfig) -> Result<Vec<String>, TranscodeError> {
    Ok(Transcoder::new(config.clone())?.path_components(url))
}
