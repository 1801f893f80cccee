// src/document.rs

//! Read-only document handle consumed by the classifier and extractor.
//!
//! The engine never fetches or mutates pages. It only needs three things
//! from a loaded document: look up the first element for a selector, read
//! that element's visible text, and enumerate embedded JSON-LD blocks.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};

/// Selector for embedded linked-data blocks.
pub const LINKED_DATA_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

/// Elements whose text never counts as visible.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// An already-loaded, already-parsed document.
pub trait Document {
    /// Visible text of the first element matching `selector`.
    ///
    /// Returns `None` only when no element matches. An existing element with
    /// no text yields `Some("")`.
    fn text_of(&self, selector: &str) -> Option<String>;

    /// Whether any element matches `selector`.
    fn exists(&self, selector: &str) -> bool {
        self.text_of(selector).is_some()
    }

    /// Raw bodies of every linked-data script block, in document order.
    fn linked_data_blocks(&self) -> Vec<String>;
}

/// [`Document`] backed by a `scraper` HTML tree.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a full HTML document.
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// Wrap an already-parsed tree.
    pub fn from_html(html: Html) -> Self {
        Self { html }
    }

    /// The underlying tree.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Parse a selector, reporting malformed input as an error.
    pub fn try_select(selector: &str) -> Result<Selector> {
        Selector::parse(selector).map_err(|e| AppError::selector(selector, format!("{e:?}")))
    }

    fn first(&self, selector: &str) -> Option<ElementRef<'_>> {
        let parsed = match Self::try_select(selector) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("Skipping selector: {}", e);
                return None;
            }
        };
        self.html.select(&parsed).next()
    }
}

impl Document for HtmlDocument {
    fn text_of(&self, selector: &str) -> Option<String> {
        self.first(selector).map(visible_text)
    }

    fn exists(&self, selector: &str) -> bool {
        self.first(selector).is_some()
    }

    fn linked_data_blocks(&self) -> Vec<String> {
        let Ok(selector) = Self::try_select(LINKED_DATA_SELECTOR) else {
            return Vec::new();
        };
        self.html
            .select(&selector)
            .map(|script| script.text().collect::<String>())
            .collect()
    }
}

/// Elements rendered on their own line.
const BLOCK_ELEMENTS: [&str; 26] = [
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "li", "nav", "ol", "p",
    "section", "table", "tr", "ul",
];

/// Text of an element as a reader sees it: script-like descendants are
/// skipped, `<br>` and block boundaries become line breaks, and table
/// cells are separated by tabs.
pub fn visible_text(element: ElementRef<'_>) -> String {
    if HIDDEN_ELEMENTS.contains(&element.value().name()) {
        return String::new();
    }
    let mut text = String::new();
    push_visible(element, &mut text);
    text.trim_matches(['\n', '\t']).to_string()
}

fn push_visible(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };

        let name = child.value().name();
        if HIDDEN_ELEMENTS.contains(&name) {
            continue;
        }
        if name == "br" {
            out.push('\n');
            continue;
        }

        let separator = if BLOCK_ELEMENTS.contains(&name) {
            Some('\n')
        } else if matches!(name, "td" | "th") {
            Some('\t')
        } else {
            None
        };
        out.extend(separator);
        push_visible(child, out);
        out.extend(separator);
    }
}
