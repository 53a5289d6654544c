//! Owned DOM tree used as the input to Markdown rendering.
//!
//! The tree is built once per conversion (usually by [`crate::html::parse_html`])
//! and only ever read top-down: each node exclusively owns its children and no
//! node holds a back-reference to its parent.

use indexmap::IndexMap;

/// A single node of the parsed document.
///
/// Tag names and attribute names are stored lowercase; lookups expect
/// lowercase names as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomNode {
    /// Root container for a parsed document.
    Document {
        children: Vec<DomNode>,
    },

    /// Element with its tag name, ordered attributes and child nodes.
    Element {
        name: String,
        attrs: IndexMap<String, String>,
        children: Vec<DomNode>,
    },

    /// Raw character data.
    Text {
        data: String,
    },
}

impl DomNode {
    /// Create a document node.
    pub fn document(children: Vec<DomNode>) -> Self {
        DomNode::Document { children }
    }

    /// Create an element node without attributes.
    pub fn element(name: &str, children: Vec<DomNode>) -> Self {
        DomNode::Element {
            name: name.to_ascii_lowercase(),
            attrs: IndexMap::new(),
            children,
        }
    }

    /// Create an element node with attributes.
    pub fn element_with_attrs(
        name: &str,
        attrs: Vec<(&str, &str)>,
        children: Vec<DomNode>,
    ) -> Self {
        DomNode::Element {
            name: name.to_ascii_lowercase(),
            attrs: attrs
                .into_iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
                .collect(),
            children,
        }
    }

    /// Create a text node.
    pub fn text(data: &str) -> Self {
        DomNode::Text {
            data: data.to_string(),
        }
    }

    /// Check if this is an element node.
    pub fn is_element(&self) -> bool {
        matches!(self, DomNode::Element { .. })
    }

    /// Check if this is a text node.
    pub fn is_text(&self) -> bool {
        matches!(self, DomNode::Text { .. })
    }

    /// Get the tag name of an element node (lowercase).
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            DomNode::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Get an attribute value by (lowercase) name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            DomNode::Element { attrs, .. } => attrs.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// Check if an attribute exists.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Get the child nodes. Text nodes have no children.
    pub fn children(&self) -> &[DomNode] {
        match self {
            DomNode::Document { children } | DomNode::Element { children, .. } => children,
            DomNode::Text { .. } => &[],
        }
    }

    /// Get the concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        match self {
            DomNode::Text { data } => data.clone(),
            _ => self.children().iter().map(DomNode::text_content).collect(),
        }
    }

    /// Find the first element with the given tag name, pre-order depth-first.
    pub fn find_first(&self, tag: &str) -> Option<&DomNode> {
        if self.tag_name() == Some(tag) {
            return Some(self);
        }

        self.children()
            .iter()
            .find_map(|child| child.find_first(tag))
    }
}
