//! Terminal-component disambiguation.
//!
//! The marker is a reserved character, so it only ever appears unescaped as
//! the first character of a final component. Intermediate (directory)
//! components never start with it, which keeps `http://a/dir` and
//! `http://a/dir/file` from needing `dir` as both a file and a directory.

use super::error::TranscodeError;

/// Prepends `marker` to the final component.
pub fn mark(component: &str, marker: char) -> String {
    let mut out = String::with_capacity(component.len() + marker.len_utf8());
    out.push(marker);
    out.push_str(component);
    out
}

/// Removes exactly one leading `marker`.
pub fn strip_marker(component: &str, marker: char) -> Result<&str, TranscodeError> {
    component
        .strip_prefix(marker)
        .ok_or_else(|| TranscodeError::MissingMarker {
            component: component.to_string(),
            marker,
        })
}
