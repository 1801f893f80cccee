//! Book record data structure.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// The result of a successful extraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookRecord {
    /// Normalized title, never empty
    pub title: String,

    /// Normalized author, if one was found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Identifier as published by the page, usually an ISBN
    #[serde(rename = "isbn", default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl BookRecord {
    /// Build a record, refusing an empty title.
    pub fn new(
        title: impl Into<String>,
        author: Option<String>,
        identifier: Option<String>,
    ) -> Option<Self> {
        let title = title.into();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            title,
            author,
            identifier,
        })
    }

    /// Title cut to at most `max` graphemes, with `...` appended when cut.
    pub fn short_title(&self, max: usize) -> String {
        let graphemes: Vec<&str> = self.title.graphemes(true).collect();
        if graphemes.len() <= max {
            return self.title.clone();
        }
        format!("{}...", graphemes[..max].concat())
    }
}
