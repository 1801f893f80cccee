//! Book records from embedded JSON-LD.
//!
//! Every `application/ld+json` block is tried in document order. Blocks that
//! fail to parse are skipped. The first item typed `Book`, or carrying an
//! `isbn`, decides the outcome and scanning stops there.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::document::Document;
use crate::models::BookRecord;
use crate::utils::Normalizer;

/// A JSON-LD entity as far as book extraction cares about it.
#[derive(Debug, Clone, Deserialize)]
pub struct StructuredDataItem {
    /// `@type`, a string or a list of strings
    #[serde(rename = "@type", default)]
    pub kind: Option<Value>,

    #[serde(default)]
    pub name: Option<Value>,

    #[serde(default)]
    pub author: Option<AuthorField>,

    #[serde(default)]
    pub isbn: Option<Value>,
}

/// The shapes an `author` property takes in the wild.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AuthorField {
    Text(String),
    Many(Vec<Value>),
    One(Map<String, Value>),
    Other(Value),
}

impl AuthorField {
    /// Raw author text before normalization.
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Text(name) => Some(name.clone()),
            Self::Many(members) => Some(
                members
                    .iter()
                    .filter_map(|member| match member {
                        Value::String(name) => Some(name.as_str()),
                        other => other.get("name").and_then(Value::as_str),
                    })
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            Self::One(person) => person.get("name").and_then(Value::as_str).map(String::from),
            Self::Other(_) => None,
        }
    }
}

impl StructuredDataItem {
    /// Decode an entity; non-objects yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        Self::deserialize(value).ok()
    }

    /// Declared as a schema.org `Book`.
    pub fn is_book(&self) -> bool {
        match &self.kind {
            Some(Value::String(kind)) => kind == "Book",
            Some(Value::Array(kinds)) => kinds.iter().any(|k| k.as_str() == Some("Book")),
            _ => false,
        }
    }

    /// Carries a non-empty `isbn`.
    pub fn has_identifier(&self) -> bool {
        self.isbn.as_ref().is_some_and(is_truthy)
    }

    /// Whether this item describes the book on the page.
    pub fn qualifies(&self) -> bool {
        self.is_book() || self.has_identifier()
    }

    /// Identifier text: strings verbatim, other truthy values as JSON text.
    pub fn identifier(&self) -> Option<String> {
        match self.isbn.as_ref().filter(|isbn| is_truthy(isbn))? {
            Value::String(isbn) => Some(isbn.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Build a normalized record; `None` when the title normalizes to empty.
    pub fn to_record(&self, normalizer: &Normalizer) -> Option<BookRecord> {
        let title = match &self.name {
            Some(Value::String(name)) => normalizer.normalize(name),
            _ => String::new(),
        };
        let author = self.author.as_ref().and_then(AuthorField::text);

        BookRecord::new(
            title,
            normalizer.normalize_opt(author.as_deref()),
            self.identifier(),
        )
    }
}

/// Parse one block body, tolerating CDATA wrappers. Malformed JSON is `None`.
pub fn parse_block(raw: &str) -> Option<Value> {
    let content = raw
        .trim()
        .trim_start_matches("<![CDATA[")
        .trim_end_matches("]]>")
        .trim();
    if content.is_empty() {
        return None;
    }
    serde_json::from_str(content).ok()
}

/// First qualifying entity in a parsed block.
///
/// Arrays are searched element by element; an object is checked itself and
/// then through its `@graph` members.
pub fn find_book_item(value: &Value) -> Option<StructuredDataItem> {
    candidates(value)
        .filter_map(StructuredDataItem::from_value)
        .find(StructuredDataItem::qualifies)
}

fn candidates(value: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match value {
        Value::Array(items) => Box::new(items.iter()),
        Value::Object(obj) => {
            let graph = obj
                .get("@graph")
                .and_then(Value::as_array)
                .into_iter()
                .flatten();
            Box::new(std::iter::once(value).chain(graph))
        }
        _ => Box::new(std::iter::empty()),
    }
}

/// Phase one: a record from the first qualifying JSON-LD item.
pub fn extract_structured<D: Document + ?Sized>(
    document: &D,
    normalizer: &Normalizer,
) -> Option<BookRecord> {
    for (index, block) in document.linked_data_blocks().iter().enumerate() {
        let Some(value) = parse_block(block) else {
            log::debug!("Skipping unparseable JSON-LD block #{}", index);
            continue;
        };

        if let Some(item) = find_book_item(&value) {
            let record = item.to_record(normalizer);
            if record.is_none() {
                log::debug!("JSON-LD block #{} has a book item without a title", index);
            }
            return record;
        }
    }
    None
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
