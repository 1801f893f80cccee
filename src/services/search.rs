//! Library catalog links for an extracted book.
//!
//! Catalog search engines do poorly with subtitles and full author names,
//! so the query is the main title plus the primary author's last name.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::library::{QUERY_PLACEHOLDER, has_web_scheme};
use crate::models::{BookRecord, Library};

static TITLE_CUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[:\-(\[]").expect("title cut pattern is valid"));

static TRAILING_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bby\s+.*$").expect("trailing by pattern is valid"));

static LEADING_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^by\s+").expect("leading by pattern is valid"));

static AUTHOR_CUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[&,]|\sand\s").expect("author cut pattern is valid"));

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://").expect("scheme pattern is valid"));

static SAMPLE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)dune").expect("sample title pattern is valid"));

/// Search query for `record`: main title and primary author's last name.
pub fn search_query(record: &BookRecord) -> String {
    let title = TITLE_CUT.split(&record.title).next().unwrap_or_default();
    let title = TRAILING_BY.replace(title, "");

    let author = LEADING_BY.replace(record.author.as_deref().unwrap_or_default(), "");
    let primary = AUTHOR_CUT.split(&author).next().unwrap_or_default();
    let last_name: String = primary
        .split_whitespace()
        .last()
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();

    format!("{} {}", title.trim(), last_name)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fill a catalog template with `query`.
///
/// A template without a scheme is assumed to be `https`. Without a
/// `{{query}}` placeholder the query is appended as the `q` parameter.
pub fn expand_template(template: &str, query: &str) -> Result<String> {
    let template = template.trim();
    let mut url = if SCHEME.is_match(template) {
        template.to_string()
    } else {
        format!("https://{template}")
    };

    let encoded = urlencoding::encode(query);
    if url.contains(QUERY_PLACEHOLDER) {
        url = url.replacen(QUERY_PLACEHOLDER, &encoded, 1);
    } else {
        let separator = if url.contains('?') { '&' } else { '?' };
        url = format!("{url}{separator}q={encoded}");
    }

    Url::parse(&url)?;
    Ok(url)
}

/// One search URL per library, in the given order.
///
/// Blank templates are skipped. A template that does not expand to a valid
/// URL is logged and skipped without affecting the others.
pub fn search_links(record: &BookRecord, libraries: &[Library]) -> Vec<String> {
    let query = search_query(record);
    libraries
        .iter()
        .filter(|library| !library.search_url.trim().is_empty())
        .filter_map(|library| match expand_template(&library.search_url, &query) {
            Ok(link) => Some(link),
            Err(e) => {
                log::warn!("Skipping library template {}: {}", library.search_url, e);
                None
            }
        })
        .collect()
}

/// Turn a catalog search for "Dune" into a reusable template.
pub fn template_from_example(example_url: &str) -> Result<Library> {
    let url = example_url.trim();
    if url.is_empty() {
        return Err(AppError::validation("example URL is empty"));
    }
    if !has_web_scheme(url) {
        return Err(AppError::validation(
            "example URL must start with http:// or https://",
        ));
    }

    let found = SAMPLE_TITLE
        .find(url)
        .ok_or_else(|| AppError::validation("example URL must be a search for 'Dune'"))?;

    Ok(Library::new(format!(
        "{}{}{}",
        &url[..found.start()],
        QUERY_PLACEHOLDER,
        &url[found.end()..]
    )))
}

/// Map search for public libraries near `location`.
pub fn finder_url(finder_template: &str, location: &str) -> Result<String> {
    let location = location.trim();
    if location.is_empty() {
        return Err(AppError::validation("location is empty"));
    }
    expand_template(finder_template, &format!("{location} public library"))
}
