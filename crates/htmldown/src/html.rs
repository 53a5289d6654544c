//! HTML parsing support.
//!
//! This module is the boundary to the DOM parser collaborator: it parses an
//! HTML string with `scraper` (html5ever underneath, with its usual
//! error-recovery and auto-closing behavior) and converts the result into the
//! owned [`DomNode`] tree the renderer walks.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::dom::DomNode;

/// Parse an HTML string into a [`DomNode`] document tree.
///
/// # Example
///
/// ```rust
/// use htmldown::parse_html;
///
/// let document = parse_html("<h1>Hello <em>World</em></h1>");
/// assert!(document.find_first("h1").is_some());
/// ```
pub fn parse_html(html: &str) -> DomNode {
    let document = Html::parse_document(html);
    DomNode::document(vec![element_to_node(document.root_element())])
}

/// Convert a scraper element and its subtree to a [`DomNode`].
fn element_to_node(element: ElementRef) -> DomNode {
    let name = element.value().name().to_ascii_lowercase();
    let attrs = element
        .value()
        .attrs()
        .map(|(key, value)| (key.to_ascii_lowercase(), value.to_string()))
        .collect();

    let mut children = Vec::new();
    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                children.push(DomNode::text(&text.text));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    children.push(element_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    DomNode::Element {
        name,
        attrs,
        children,
    }
}
