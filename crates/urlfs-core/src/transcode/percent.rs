//! Percent-encoding restricted to a configurable reserved set.
//!
//! Unlike URL encoders that escape all non-ASCII text, only reserved
//! characters are escaped here so filenames stay readable.

use super::error::TranscodeError;
use crate::config::ReservedSet;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Escapes every reserved character of `token` as `%XX` per UTF-8 byte.
pub fn pct_encode(token: &str, reserved: &ReservedSet) -> String {
    let mut out = String::with_capacity(token.len());
    let mut buf = [0u8; 4];
    for c in token.chars() {
        if reserved.contains(c) {
            for &b in c.encode_utf8(&mut buf).as_bytes() {
                push_escape(&mut out, b);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Appends `%XX` for one byte.
pub(crate) fn push_escape(out: &mut String, b: u8) {
    out.push('%');
    out.push(HEX_UPPER[(b >> 4) as usize] as char);
    out.push(HEX_UPPER[(b & 0x0f) as usize] as char);
}

/// Reverses [`pct_encode`]. Hex digits may be upper or lower case.
pub fn pct_decode(input: &str) -> Result<String, TranscodeError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).copied().and_then(hex_value);
            let lo = bytes.get(i + 2).copied().and_then(hex_value);
            match (hi, lo) {
                (Some(h), Some(l)) => out.push((h << 4) | l),
                _ => return Err(TranscodeError::InvalidEscape { offset: i }),
            }
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|e| TranscodeError::Unrepresentable {
        reason: format!(
            "escapes decode to invalid UTF-8 at byte {}",
            e.utf8_error().valid_up_to()
        ),
    })
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
