//! Rendered-text walker over a parsed HTML tree.
//!
//! Approximates what a browser's `innerText` yields for unstyled markup:
//! invisible subtrees are skipped, inline whitespace collapses to a single
//! space, block-level boundaries and `<br>` become line breaks, and table
//! cells are separated by tabs.

use scraper::{ElementRef, Html, Node, Selector};

const HIDDEN_TAGS: &[&str] = &[
    "head", "script", "style", "noscript", "template", "title", "meta", "link",
];

const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "dd",
    "details",
    "dialog",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hgroup",
    "hr",
    "html",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "caption",
    "thead",
    "tbody",
    "tfoot",
    "tr",
    "ul",
];

const CELL_TAGS: &[&str] = &["td", "th"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Gap {
    None,
    Space,
    Tab,
    Line,
}

struct TextSink {
    out: String,
    gap: Gap,
}

impl TextSink {
    fn new() -> Self {
        Self {
            out: String::new(),
            gap: Gap::None,
        }
    }

    fn soft(&mut self, gap: Gap) {
        self.gap = self.gap.max(gap);
    }

    fn push_word(&mut self, word: &str) {
        if !self.out.is_empty() {
            match self.gap {
                Gap::None => {}
                Gap::Space => self.out.push(' '),
                Gap::Tab => self.out.push('\t'),
                Gap::Line => self.out.push('\n'),
            }
        }
        self.gap = Gap::None;
        self.out.push_str(word);
    }

    fn push_text(&mut self, raw: &str) {
        if raw.starts_with(char::is_whitespace) {
            self.soft(Gap::Space);
        }
        for (i, word) in raw.split_whitespace().enumerate() {
            if i > 0 {
                self.soft(Gap::Space);
            }
            self.push_word(word);
        }
        if raw.ends_with(char::is_whitespace) {
            self.soft(Gap::Space);
        }
    }

    fn walk(&mut self, element: ElementRef<'_>) {
        let value = element.value();
        let name = value.name();
        if HIDDEN_TAGS.contains(&name) || value.attr("hidden").is_some() {
            return;
        }
        if name == "br" {
            self.soft(Gap::Line);
            return;
        }

        let boundary = if BLOCK_TAGS.contains(&name) {
            Gap::Line
        } else if CELL_TAGS.contains(&name) {
            Gap::Tab
        } else {
            Gap::None
        };
        self.soft(boundary);
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.push_text(text),
                Node::Element(_) => {
                    if let Some(child_el) = ElementRef::wrap(child) {
                        self.walk(child_el);
                    }
                }
                _ => {}
            }
        }
        self.soft(boundary);
    }
}

/// Visible text of `element`, trimmed, with line breaks at block boundaries.
pub fn rendered_text(element: ElementRef<'_>) -> String {
    let mut sink = TextSink::new();
    sink.walk(element);
    sink.out
}

/// Parse a CSS selector, discarding invalid ones.
pub(crate) fn parse_selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// First element in document order matching `css`.
pub(crate) fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = parse_selector(css)?;
    document.select(&selector).next()
}

/// The `<body>` element, or the document root when there is none.
pub fn body_or_root(document: &Html) -> ElementRef<'_> {
    select_first(document, "body").unwrap_or_else(|| document.root_element())
}

/// `document.title`: the first `<title>` text with whitespace collapsed.
pub fn document_title(document: &Html) -> String {
    select_first(document, "title")
        .map(|el| crate::utils::normalize_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default()
}
