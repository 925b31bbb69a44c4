//! Error type for encoding and decoding.

use thiserror::Error;

/// Why a URL or path could not be transcoded.
///
/// Every failure is local and deterministic; retrying the same call with the
/// same input yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscodeError {
    /// The input decodes to something that is not valid text.
    #[error("input cannot be represented: {reason}")]
    Unrepresentable { reason: String },

    /// `%` not followed by two hex digits.
    #[error("invalid percent escape at byte {offset}")]
    InvalidEscape { offset: usize },

    /// The final path component does not start with the disambiguation marker.
    #[error("final component {component:?} lacks the marker {marker:?}")]
    MissingMarker { component: String, marker: char },

    /// `max_component_length` cannot hold a marker plus one escaped character.
    #[error("max_component_length {configured} is below the minimum of {minimum}")]
    LengthConfig { configured: usize, minimum: usize },

    /// Separator, marker or reserved set are inconsistent with each other.
    #[error("invalid transcoder configuration: {reason}")]
    InvalidConfig { reason: String },
}
