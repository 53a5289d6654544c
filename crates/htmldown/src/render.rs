//! Recursive DOM-to-Markdown rendering.
//!
//! [`render`] is a pure tree transducer: one pass per node, no backtracking,
//! no side effects. Dispatch is an exhaustive match over [`Tag`], with a
//! catch-all variant that passes unrecognized elements through transparently.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::dom::DomNode;
use crate::utilities::{collapse_whitespace, resolve_url};

/// Elements whose subtrees contribute nothing to the output.
const SKIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "svg", "canvas", "iframe", "form", "input", "button",
];

/// Block-level containers that carry no Markdown syntax of their own.
const CONTAINER_TAGS: &[&str] = &[
    "article", "section", "main", "div", "header", "footer", "aside", "figure",
    "figcaption", "details", "summary", "dl", "dt", "dd",
];

static LANGUAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:language|lang)-([a-zA-Z0-9+-]+)").expect("language class pattern"));

/// Immutable state threaded through the recursive render.
///
/// A derived copy is made when descending into nested lists or preformatted
/// regions, so sibling branches never observe each other's state.
#[derive(Debug, Clone, Default)]
pub(crate) struct RenderContext {
    /// Base URL for resolving relative `href`/`src` values.
    pub base_url: Option<Url>,
    /// Whether rendering happens inside a preformatted region.
    pub in_pre: bool,
    /// Current list nesting depth.
    pub list_depth: usize,
}

impl RenderContext {
    pub fn new(base_url: Option<Url>) -> Self {
        Self {
            base_url,
            in_pre: false,
            list_depth: 0,
        }
    }

    /// Derive a context with preformatted mode switched on.
    fn preformatted(&self) -> Self {
        Self {
            in_pre: true,
            ..self.clone()
        }
    }

    /// Derive a context one list level deeper.
    fn nested(&self) -> Self {
        Self {
            list_depth: self.list_depth + 1,
            ..self.clone()
        }
    }
}

/// Tag semantics recognized by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Skipped,
    LineBreak,
    ThematicBreak,
    Heading(u8),
    Paragraph,
    Strong,
    Emphasis,
    Code,
    Preformatted,
    Anchor,
    Image,
    BulletList,
    NumberedList,
    Quote,
    Table,
    Container,
    Other,
}

impl Tag {
    fn classify(name: &str) -> Self {
        if SKIP_TAGS.contains(&name) {
            return Tag::Skipped;
        }

        match name {
            "br" => Tag::LineBreak,
            "hr" => Tag::ThematicBreak,
            "h1" => Tag::Heading(1),
            "h2" => Tag::Heading(2),
            "h3" => Tag::Heading(3),
            "h4" => Tag::Heading(4),
            "h5" => Tag::Heading(5),
            "h6" => Tag::Heading(6),
            "p" => Tag::Paragraph,
            "strong" | "b" => Tag::Strong,
            "em" | "i" => Tag::Emphasis,
            "code" => Tag::Code,
            "pre" => Tag::Preformatted,
            "a" => Tag::Anchor,
            "img" => Tag::Image,
            "ul" => Tag::BulletList,
            "ol" => Tag::NumberedList,
            "blockquote" => Tag::Quote,
            "table" => Tag::Table,
            _ if CONTAINER_TAGS.contains(&name) => Tag::Container,
            _ => Tag::Other,
        }
    }
}

/// Render a node and its subtree to a Markdown fragment.
pub(crate) fn render(node: &DomNode, ctx: &RenderContext) -> String {
    match node {
        DomNode::Text { data } => {
            if ctx.in_pre {
                data.clone()
            } else {
                collapse_whitespace(data)
            }
        }
        DomNode::Document { .. } => render_children(node, ctx),
        DomNode::Element { name, .. } => render_element(node, name, ctx),
    }
}

/// Render all children of a node, concatenated.
pub(crate) fn render_children(node: &DomNode, ctx: &RenderContext) -> String {
    node.children()
        .iter()
        .map(|child| render(child, ctx))
        .collect()
}

/// Render children as inline content: fragments concatenated, then whitespace
/// runs collapsed across the joined result.
fn render_inline<'a, I>(nodes: I, ctx: &RenderContext) -> String
where
    I: IntoIterator<Item = &'a DomNode>,
{
    let rendered: String = nodes.into_iter().map(|child| render(child, ctx)).collect();
    collapse_whitespace(&rendered)
}

/// Block padding: trim, drop empty content, otherwise wrap in blank lines so
/// adjacent blocks stay separated until normalization.
fn block(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n\n{trimmed}\n\n")
    }
}

fn render_element(node: &DomNode, name: &str, ctx: &RenderContext) -> String {
    match Tag::classify(name) {
        Tag::Skipped => String::new(),
        Tag::LineBreak => "  \n".to_string(),
        Tag::ThematicBreak => "\n\n---\n\n".to_string(),
        Tag::Heading(level) => {
            let text = render_inline(node.children(), ctx);
            block(&format!("{} {}", "#".repeat(level as usize), text.trim()))
        }
        Tag::Paragraph => block(&render_inline(node.children(), ctx)),
        Tag::Strong => wrap_inline(node, ctx, "**"),
        Tag::Emphasis => wrap_inline(node, ctx, "*"),
        Tag::Code => render_code(node, ctx),
        Tag::Preformatted => render_pre(node),
        Tag::Anchor => render_anchor(node, ctx),
        Tag::Image => render_image(node, ctx),
        Tag::BulletList => render_list(node, false, ctx),
        Tag::NumberedList => render_list(node, true, ctx),
        Tag::Quote => render_blockquote(node, ctx),
        Tag::Table => render_table(node, ctx),
        Tag::Container => block(&render_children(node, ctx)),
        Tag::Other => render_children(node, ctx),
    }
}

/// Wrap inline content in an emphasis marker; empty content yields nothing.
fn wrap_inline(node: &DomNode, ctx: &RenderContext, marker: &str) -> String {
    let text = render_inline(node.children(), ctx);
    let text = text.trim();
    if text.is_empty() {
        String::new()
    } else {
        format!("{marker}{text}{marker}")
    }
}

/// Inline `code`: children render with preformatted mode forced on, and the
/// backtick wrapping is skipped when already inside a code block.
fn render_code(node: &DomNode, ctx: &RenderContext) -> String {
    let text = render_inline(node.children(), &ctx.preformatted());
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    if ctx.in_pre {
        text.to_string()
    } else {
        format!("`{text}`")
    }
}

/// `pre`: fenced code block over the raw subtree text, with a language tag
/// scanned from the element's class attribute.
fn render_pre(node: &DomNode) -> String {
    let class = node.attr("class").unwrap_or("");
    let language = LANGUAGE_RE
        .captures(class)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
        .unwrap_or("");

    let raw = node.text_content().replace("\r\n", "\n");
    let raw = raw.trim_end();
    if raw.is_empty() {
        return String::new();
    }

    format!("\n\n```{language}\n{raw}\n```\n\n")
}

fn render_anchor(node: &DomNode, ctx: &RenderContext) -> String {
    let text = render_inline(node.children(), ctx);
    let text = text.trim();

    match node.attr("href") {
        Some(href) if !href.is_empty() => {
            let resolved = resolve_url(href, ctx.base_url.as_ref());
            let label = if text.is_empty() { resolved.as_str() } else { text };
            format!("[{label}]({resolved})")
        }
        _ => text.to_string(),
    }
}

fn render_image(node: &DomNode, ctx: &RenderContext) -> String {
    let alt = node
        .attr("alt")
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .unwrap_or("image");

    match node.attr("src") {
        Some(src) if !src.is_empty() => {
            let resolved = resolve_url(src, ctx.base_url.as_ref());
            format!("![{alt}]({resolved})")
        }
        _ => alt.to_string(),
    }
}

/// Lists collect only direct `li` children; anything else is ignored.
fn render_list(node: &DomNode, ordered: bool, ctx: &RenderContext) -> String {
    let items: Vec<&DomNode> = node
        .children()
        .iter()
        .filter(|child| child.tag_name() == Some("li"))
        .collect();

    if items.is_empty() {
        return String::new();
    }

    let lines: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(index, item)| render_list_item(item, ordered, index, ctx))
        .collect();

    block(&lines.join("\n"))
}

/// One `li`: own inline content on the marker line, nested lists appended on
/// following lines at the next depth.
///
/// The item number is always the source position among direct `li` siblings;
/// a `start` attribute on the list is not honored.
fn render_list_item(node: &DomNode, ordered: bool, index: usize, ctx: &RenderContext) -> String {
    let marker = if ordered {
        format!("{}. ", index + 1)
    } else {
        "- ".to_string()
    };
    let indent = "  ".repeat(ctx.list_depth);

    let mut content: Vec<&DomNode> = Vec::new();
    let mut nested: Vec<String> = Vec::new();

    for child in node.children() {
        match child.tag_name() {
            Some("ul") => nested.push(render_list(child, false, &ctx.nested())),
            Some("ol") => nested.push(render_list(child, true, &ctx.nested())),
            _ => content.push(child),
        }
    }

    let text = render_inline(content, ctx);
    let mut output = format!("{indent}{marker}{}", text.trim())
        .trim_end()
        .to_string();

    if !nested.is_empty() {
        output.push('\n');
        output.push_str(&nested.join("\n"));
    }

    output
}

fn render_blockquote(node: &DomNode, ctx: &RenderContext) -> String {
    let content = render_children(node, ctx);
    let content = content.trim();
    if content.is_empty() {
        return String::new();
    }

    let quoted: Vec<String> = content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect();

    format!("\n\n{}\n\n", quoted.join("\n"))
}

/// Tables are walked recursively so `tr` rows are found through `thead`,
/// `tbody`, `tfoot` or any other wrapper. All rows are padded to the widest
/// row; the first row becomes the header.
fn render_table(node: &DomNode, ctx: &RenderContext) -> String {
    let mut rows: Vec<Vec<String>> = Vec::new();
    collect_rows(node, ctx, &mut rows);

    if rows.is_empty() {
        return String::new();
    }

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(columns, String::new());
    }

    let separator = vec!["---".to_string(); columns];
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(&rows[0]));
    lines.push(format_row(&separator));
    for row in &rows[1..] {
        lines.push(format_row(row));
    }

    block(&lines.join("\n"))
}

fn collect_rows(node: &DomNode, ctx: &RenderContext, rows: &mut Vec<Vec<String>>) {
    if node.tag_name() == Some("tr") {
        let cells: Vec<String> = node
            .children()
            .iter()
            .filter(|child| matches!(child.tag_name(), Some("th" | "td")))
            .map(|cell| render_inline(cell.children(), ctx).trim().to_string())
            .collect();

        // Rows without any cell are dropped, not emitted blank.
        if !cells.is_empty() {
            rows.push(cells);
        }
        return;
    }

    for child in node.children() {
        if child.is_element() {
            collect_rows(child, ctx, rows);
        }
    }
}

fn format_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}
