//! Utility functions shared across the conversion pipeline.

use url::Url;

/// Collapse every run of whitespace (including newlines) to a single space.
///
/// This is what makes inline text reflow-safe outside preformatted regions.
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_whitespace = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
        }
    }

    result
}

/// Resolve a link target against an optional base URL.
///
/// Absolute URLs pass through the join unchanged; relative URLs are joined
/// against the base. Values that fail to resolve are returned verbatim.
pub(crate) fn resolve_url(value: &str, base: Option<&Url>) -> String {
    let Some(base) = base else {
        return value.to_string();
    };

    match base.join(value) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => value.to_string(),
    }
}

/// Estimate the token count of a Markdown string.
///
/// This is a deliberately crude heuristic (about four characters per token),
/// not a real tokenizer.
pub fn estimate_tokens(markdown: &str) -> usize {
    let compact = markdown.trim();
    if compact.is_empty() {
        return 0;
    }

    compact.chars().count().div_ceil(4)
}
