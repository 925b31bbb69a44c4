//! Splitting a URL into tokens along its structural boundaries.

/// Delimiters that start a new token and stay attached as its prefix.
/// Applied in this order.
const PARAM_DELIMITERS: [char; 4] = ['?', '&', '=', '#'];

/// Splits `url` into tokens whose concatenation is exactly `url`.
///
/// - `//` and `/` stay attached as a suffix of the token they end. A protocol
///   piece such as `http://` is kept whole.
/// - `?`, `&`, `=` and `#` stay attached as a prefix of the token they start.
///
/// The result always has at least one element; an empty URL yields `[""]`.
pub fn segment(url: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for piece in split_keep_suffix(url, "//") {
        if is_protocol(piece) {
            split_params(piece, &mut tokens);
        } else {
            for sub in split_keep_suffix(piece, "/") {
                split_params(sub, &mut tokens);
            }
        }
    }
    tokens
}

/// True for pieces starting with one or more word characters followed by `://`.
pub(crate) fn is_protocol(piece: &str) -> bool {
    let word_len: usize = piece
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .map(char::len_utf8)
        .sum();
    word_len > 0 && piece[word_len..].starts_with("://")
}

/// Splits on `sep`, keeping it as a suffix. An empty trailing piece is dropped
/// unless it is the only piece.
fn split_keep_suffix<'a>(s: &'a str, sep: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut start = 0;
    for (idx, _) in s.match_indices(sep) {
        let end = idx + sep.len();
        out.push(&s[start..end]);
        start = end;
    }
    if start < s.len() || out.is_empty() {
        out.push(&s[start..]);
    }
    out
}

/// Splits `piece` on each parameter delimiter in turn, keeping the delimiter as
/// a prefix, and appends the pieces to `out`.
fn split_params<'a>(piece: &'a str, out: &mut Vec<&'a str>) {
    let mut parts = vec![piece];
    for delim in PARAM_DELIMITERS {
        let mut next = Vec::with_capacity(parts.len());
        for part in parts {
            split_keep_prefix(part, delim, &mut next);
        }
        parts = next;
    }
    out.extend(parts);
}

/// Splits on `delim`, keeping it as a prefix. An empty leading piece is dropped
/// unless it is the only piece.
fn split_keep_prefix<'a>(s: &'a str, delim: char, out: &mut Vec<&'a str>) {
    let mut start = 0;
    for (idx, _) in s.match_indices(delim) {
        // Only the leading piece can be empty; later ones begin with `delim`.
        if idx > start {
            out.push(&s[start..idx]);
        }
        start = idx;
    }
    out.push(&s[start..]);
}
