//! # htmldown
//!
//! Convert fetched web pages into clean, agent-ready Markdown.
//!
//! The converter is a pure function from an HTML string (plus an optional
//! base URL for resolving relative links) to normalized Markdown text: it
//! performs no I/O, keeps no state between calls, and deterministically
//! produces the same output for the same input. Fetching, storage and index
//! bookkeeping live with the caller.
//!
//! ## Design
//!
//! The pipeline picks the most relevant content root (`main`, else
//! `article`, else `body`, else the whole document), walks the DOM tree
//! recursively with an immutable render context, normalizes the concatenated
//! fragments, and prepends the document `<title>` when the content does not
//! already start with a top-level heading.
//!
//! ## Example
//!
//! ```rust
//! use htmldown::{convert, estimate_tokens};
//!
//! let html = r#"<main><h2>Intro</h2><p>Hello <strong>world</strong></p></main>"#;
//! let markdown = convert(html, Some("https://example.com/")).unwrap();
//!
//! assert!(markdown.contains("## Intro"));
//! assert!(markdown.contains("Hello **world**"));
//! assert!(estimate_tokens(&markdown) > 0);
//! ```

pub mod dom;
pub mod html;
mod normalize;
mod render;
mod service;
mod urls;
mod utilities;

pub use dom::DomNode;
pub use html::parse_html;
pub use normalize::normalize_markdown;
pub use service::{convert, ConvertOptions, Converter};
pub use urls::{get_url_host, normalize_url, parse_url_spec};
pub use utilities::{collapse_whitespace, estimate_tokens};

/// Error type for htmldown operations.
///
/// Conversion itself absorbs malformed input rather than failing; these
/// errors surface from URL spec validation.
#[derive(Debug, thiserror::Error)]
pub enum HtmldownError {
    #[error("URL cannot be empty")]
    EmptyUrl,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("unsupported URL protocol: {0}")]
    UnsupportedProtocol(String),
}

pub type Result<T> = std::result::Result<T, HtmldownError>;
