//! URL spec normalization.
//!
//! Helpers for turning user-supplied page specs (`example.com/docs`,
//! `https://example.com/docs#intro`, ...) into the canonical URL the fetch
//! pipeline requests and then hands back to the converter as its base URL.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::{HtmldownError, Result};

static PROTOCOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").expect("protocol pattern"));

/// Parse a page spec into a URL.
///
/// A missing scheme defaults to `https://`, the fragment is stripped, and
/// anything other than http/https is rejected.
pub fn parse_url_spec(spec: &str) -> Result<Url> {
    let trimmed = spec.trim();
    if trimmed.is_empty() {
        return Err(HtmldownError::EmptyUrl);
    }

    let with_protocol = if PROTOCOL_RE.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let mut url = Url::parse(&with_protocol)
        .map_err(|_| HtmldownError::InvalidUrl(spec.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(HtmldownError::UnsupportedProtocol(other.to_string()));
        }
    }

    url.set_fragment(None);
    Ok(url)
}

/// Canonical string form of a page spec.
pub fn normalize_url(spec: &str) -> Result<String> {
    Ok(parse_url_spec(spec)?.to_string())
}

/// Lowercase hostname of a page spec.
pub fn get_url_host(spec: &str) -> Result<String> {
    let url = parse_url_spec(spec)?;
    Ok(url.host_str().unwrap_or_default().to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_https_when_protocol_is_omitted() {
        let url = parse_url_spec("developers.cloudflare.com/fundamentals/").unwrap();
        assert_eq!(
            url.to_string(),
            "https://developers.cloudflare.com/fundamentals/"
        );
    }

    #[test]
    fn test_supports_http_and_strips_hash_fragments() {
        let url = parse_url_spec("http://example.com/docs#intro").unwrap();
        assert_eq!(url.to_string(), "http://example.com/docs");
    }

    #[test]
    fn test_rejects_unsupported_protocols() {
        let err = parse_url_spec("ftp://example.com/file").unwrap_err();
        assert!(matches!(err, HtmldownError::UnsupportedProtocol(_)));
    }

    #[test]
    fn test_rejects_empty_spec() {
        assert!(matches!(
            parse_url_spec("   ").unwrap_err(),
            HtmldownError::EmptyUrl
        ));
    }

    #[test]
    fn test_normalize_url_returns_canonical_form() {
        assert_eq!(normalize_url("example.com").unwrap(), "https://example.com/");
    }

    #[test]
    fn test_get_url_host_lowercases() {
        assert_eq!(
            get_url_host("https://Developers.Cloudflare.com/path").unwrap(),
            "developers.cloudflare.com"
        );
    }
}
