//! Library search template.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Placeholder replaced by the search query in a template.
pub const QUERY_PLACEHOLDER: &str = "{{query}}";

/// A library catalog the user searches for extracted books.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Library {
    /// Catalog search URL; `{{query}}` marks where the query goes
    pub search_url: String,
}

impl Library {
    /// Create a library from a catalog search template.
    pub fn new(search_url: impl Into<String>) -> Self {
        Self {
            search_url: search_url.into(),
        }
    }

    /// Reject templates that are empty or not plain web URLs.
    pub fn validate(&self) -> Result<()> {
        let url = self.search_url.trim();
        if url.is_empty() {
            return Err(AppError::validation("library search_url is empty"));
        }
        if !has_web_scheme(url) {
            return Err(AppError::validation(format!(
                "library search_url must start with http:// or https://: {url}"
            )));
        }
        Ok(())
    }

    /// Whether the template carries an explicit query placeholder.
    pub fn has_placeholder(&self) -> bool {
        self.search_url.contains(QUERY_PLACEHOLDER)
    }
}

/// Whether `url` starts with `http://` or `https://`.
pub fn has_web_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
