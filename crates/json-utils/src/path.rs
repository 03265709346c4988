//! Dotted path tokenization.

/// Separator between path segments.
pub const DELIMITER: char = '.';

/// Split a path into its raw segments, empty ones included.
///
/// ```
/// use json_utils::path::split;
///
/// assert_eq!(split("a..b"), vec!["a", "", "b"]);
/// assert_eq!(split(""), vec![""]);
/// ```
pub fn split(path: &str) -> Vec<&str> {
    path.split(DELIMITER).collect()
}

/// Iterate over the non-empty segments of a path.
///
/// Consecutive delimiters produce empty segments, which are skipped.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(DELIMITER).filter(|segment| !segment.is_empty())
}

/// Append `key` to a parent path. A missing prefix yields `key` itself.
pub fn join(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => {
            let mut out = String::with_capacity(prefix.len() + 1 + key.len());
            out.push_str(prefix);
            out.push(DELIMITER);
            out.push_str(key);
            out
        }
        None => key.to_string(),
    }
}

/// Parse a segment as a sequence index.
///
/// Only canonical non-negative decimals are accepted: `"0"` and `"42"` are
/// indices, `"042"`, `"-1"` and `"1.5"` are not.
pub fn parse_index(segment: &str) -> Option<usize> {
    let bytes = segment.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    segment.parse().ok()
}
