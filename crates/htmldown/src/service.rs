//! Conversion pipeline entry points.
//!
//! The pipeline is: parse → select the content root → render recursively →
//! normalize → inject the document title. Conversion is deterministic and
//! side-effect-free; the same input always produces byte-identical output.

use tracing::debug;
use url::Url;

use crate::dom::DomNode;
use crate::html::parse_html;
use crate::normalize::normalize_markdown;
use crate::render::{render_children, RenderContext};
use crate::Result;

/// Options for a [`Converter`].
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Base URL used to resolve relative links and image sources.
    ///
    /// Typically the resolved URL of the fetched page. When absent, or when
    /// the value does not parse as a URL, link targets pass through verbatim.
    pub base_url: Option<String>,
}

/// The main service for converting page HTML to Markdown.
///
/// # Example
///
/// ```rust
/// use htmldown::{ConvertOptions, Converter};
///
/// let converter = Converter::with_options(ConvertOptions {
///     base_url: Some("https://example.com/".to_string()),
/// });
/// let markdown = converter.convert("<h1>Hello World</h1>").unwrap();
/// assert!(markdown.contains("# Hello World"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a new converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom options.
    pub fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Get the current options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Get mutable access to options.
    pub fn options_mut(&mut self) -> &mut ConvertOptions {
        &mut self.options
    }

    /// Convert an HTML document to Markdown.
    pub fn convert(&self, html: &str) -> Result<String> {
        let document = parse_html(html);
        let markdown = self.convert_dom(&document)?;
        debug!(
            html_len = html.len(),
            markdown_len = markdown.len(),
            "converted page HTML to markdown"
        );
        Ok(markdown)
    }

    /// Convert an already-parsed [`DomNode`] tree to Markdown.
    ///
    /// Useful when the DOM is already in hand and parsing can be skipped.
    pub fn convert_dom(&self, document: &DomNode) -> Result<String> {
        let base_url = self
            .options
            .base_url
            .as_deref()
            .and_then(|raw| Url::parse(raw).ok());

        let root = select_root(document);
        let ctx = RenderContext::new(base_url);
        let fragment = render_children(root, &ctx);
        let markdown = normalize_markdown(&fragment);

        Ok(inject_title(document, markdown))
    }
}

/// Convert an HTML document to Markdown, resolving links against `base_url`.
pub fn convert(html: &str, base_url: Option<&str>) -> Result<String> {
    let options = ConvertOptions {
        base_url: base_url.map(str::to_string),
    };
    Converter::with_options(options).convert(html)
}

/// Pick the most relevant content root: first `main`, else first `article`,
/// else first `body`, else the document itself.
fn select_root(document: &DomNode) -> &DomNode {
    for tag in ["main", "article", "body"] {
        if let Some(found) = document.find_first(tag) {
            debug!(root = tag, "selected content root");
            return found;
        }
    }

    debug!("no main, article or body element; using document root");
    document
}

/// The first non-empty `title` text anywhere in the document.
fn document_title(document: &DomNode) -> Option<String> {
    let title = document.find_first("title")?;
    let text = title.text_content().trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Prepend `# <title>` unless the body already starts with a top-level
/// heading, re-normalizing the combined text.
fn inject_title(document: &DomNode, markdown: String) -> String {
    match document_title(document) {
        Some(title) if !markdown.starts_with("# ") => {
            normalize_markdown(&format!("# {title}\n\n{markdown}"))
        }
        _ => markdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_root_prefers_main() {
        let html = "<body><article>a</article><main><p>m</p></main></body>";
        let markdown = convert(html, None).unwrap();
        assert_eq!(markdown, "m\n");
    }

    #[test]
    fn test_select_root_falls_back_to_article_then_body() {
        let html = "<body><article><p>a</p></article></body>";
        assert_eq!(convert(html, None).unwrap(), "a\n");

        let html = "<body><p>b</p></body>";
        assert_eq!(convert(html, None).unwrap(), "b\n");
    }

    #[test]
    fn test_title_injected_when_body_has_no_top_heading() {
        let html = "<head><title>Example Page</title></head><body><p>text</p></body>";
        let markdown = convert(html, None).unwrap();
        assert_eq!(markdown, "# Example Page\n\ntext\n");
    }

    #[test]
    fn test_title_not_injected_over_existing_h1() {
        let html = "<head><title>Ignored</title></head><body><h1>Kept</h1></body>";
        let markdown = convert(html, None).unwrap();
        assert_eq!(markdown, "# Kept\n");
    }

    #[test]
    fn test_blank_title_is_ignored() {
        let html = "<head><title>   </title></head><body><p>text</p></body>";
        assert_eq!(convert(html, None).unwrap(), "text\n");
    }

    #[test]
    fn test_unparsable_base_url_leaves_links_verbatim() {
        let html = r#"<body><a href="/docs">docs</a></body>"#;
        let markdown = convert(html, Some("not a url")).unwrap();
        assert_eq!(markdown, "[docs](/docs)\n");
    }

    #[test]
    fn test_empty_document_converts_to_empty_string() {
        assert_eq!(convert("", None).unwrap(), "");
    }
}
