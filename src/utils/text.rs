/// Collapse every run of whitespace to a single space and trim both ends.
///
/// Idempotent: normalizing an already-normalized string is a no-op.
#[must_use]
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of whitespace-delimited, non-empty tokens.
#[must_use]
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// First `max_chars` characters of `s`, respecting char boundaries.
#[must_use]
pub fn char_prefix(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[must_use]
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    let prefix = char_prefix(s, max_chars);
    if prefix.len() == s.len() {
        s.to_string()
    } else {
        format!("{}...", prefix.trim_end())
    }
}
