//! Cutting over-length encoded tokens into bounded chunks.

/// Splits an encoded `component` into chunks of at most `max` bytes.
///
/// Cuts never fall inside a UTF-8 character or a `%XX` escape. Requires
/// `max >= 4` so every cut makes progress; `TranscoderConfig::validate`
/// guarantees this.
pub fn limit(component: &str, max: usize) -> Vec<&str> {
    debug_assert!(max >= 4);
    let mut chunks = Vec::with_capacity(component.len() / max.max(1) + 1);
    let mut rest = component;
    while rest.len() > max {
        let (head, tail) = rest.split_at(cut_point(rest, max));
        chunks.push(head);
        rest = tail;
    }
    chunks.push(rest);
    chunks
}

/// Largest index `<= max` at which `s` can be cut. `s.len() > max`.
fn cut_point(s: &str, max: usize) -> usize {
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    // Every `%` in encoded text starts an escape.
    let bytes = s.as_bytes();
    if bytes[cut - 1] == b'%' {
        cut -= 1;
    } else if cut >= 2 && bytes[cut - 2] == b'%' {
        cut -= 2;
    }
    cut
}
