//! Book page detection.
//!
//! Signals are checked from strongest to weakest and the first hit wins:
//! address shape, breadcrumbs, Open Graph metadata, then a product-details
//! region that mentions an ISBN.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::document::Document;

static BOOK_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/book/show/|/p/books/|/books/|(?:978|979)\d{10}")
        .expect("book address pattern is valid")
});

const OG_BOOK_TYPE: &str = r#"meta[property="og:type"][content="book"]"#;
const OG_ISBN: &str = r#"meta[property="og:isbn"]"#;
const DETAIL_BULLETS: &str = "#detailBullets_feature_div";

/// Which layer identified the page as a book page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookSignal {
    /// Book-detail URL shape or an ISBN-13 in the address
    Address,
    /// Breadcrumb navigation names a book category
    Breadcrumb,
    /// Open Graph declares a book or an ISBN
    Metadata,
    /// Product details region mentions an ISBN
    DetailBullets,
}

/// A breadcrumb region and the categories that mark it as a book page.
#[derive(Debug, Clone)]
pub struct BreadcrumbProbe {
    /// Candidate containers; only the first one present is inspected
    pub containers: &'static [&'static str],

    /// Category vocabulary matched against the container text
    pub vocabulary: Regex,
}

impl BreadcrumbProbe {
    /// Create a probe over `containers` with a prebuilt vocabulary.
    pub fn new(containers: &'static [&'static str], vocabulary: Regex) -> Self {
        Self {
            containers,
            vocabulary,
        }
    }

    fn builtin(containers: &'static [&'static str], vocabulary: &str) -> Self {
        let vocabulary = Regex::new(&format!("(?i){vocabulary}"))
            .expect("breadcrumb vocabulary is valid");
        Self::new(containers, vocabulary)
    }

    fn matches<D: Document + ?Sized>(&self, document: &D) -> bool {
        self.containers
            .iter()
            .find_map(|selector| document.text_of(selector))
            .is_some_and(|text| self.vocabulary.is_match(&text))
    }
}

/// Decides whether a page is about a book.
#[derive(Debug, Clone)]
pub struct PageClassifier {
    probes: Vec<BreadcrumbProbe>,
}

impl PageClassifier {
    /// Create a classifier with the given breadcrumb probes.
    pub fn new(probes: Vec<BreadcrumbProbe>) -> Self {
        Self { probes }
    }

    /// Whether the page at `address` is a book page.
    pub fn is_book_page<D: Document + ?Sized>(&self, address: &str, document: &D) -> bool {
        self.classify(address, document).is_some()
    }

    /// The strongest book signal on the page, if any.
    pub fn classify<D: Document + ?Sized>(
        &self,
        address: &str,
        document: &D,
    ) -> Option<BookSignal> {
        let signal = Self::address_signal(address)
            .or_else(|| self.breadcrumb_signal(document))
            .or_else(|| Self::metadata_signal(document))
            .or_else(|| Self::detail_bullets_signal(document));

        match signal {
            Some(signal) => log::debug!("Book page detected via {:?}: {}", signal, address),
            None => log::debug!("No book signal for {}", address),
        }
        signal
    }

    /// Book-detail URL shapes and ISBN-13 tokens in the address.
    pub fn address_signal(address: &str) -> Option<BookSignal> {
        BOOK_ADDRESS
            .is_match(address)
            .then_some(BookSignal::Address)
    }

    /// Breadcrumb text naming a book category.
    pub fn breadcrumb_signal<D: Document + ?Sized>(&self, document: &D) -> Option<BookSignal> {
        self.probes
            .iter()
            .any(|probe| probe.matches(document))
            .then_some(BookSignal::Breadcrumb)
    }

    /// `og:type` of `book`, or any `og:isbn` declaration.
    pub fn metadata_signal<D: Document + ?Sized>(document: &D) -> Option<BookSignal> {
        (document.exists(OG_BOOK_TYPE) || document.exists(OG_ISBN))
            .then_some(BookSignal::Metadata)
    }

    /// Product details region mentioning `ISBN`.
    pub fn detail_bullets_signal<D: Document + ?Sized>(document: &D) -> Option<BookSignal> {
        document
            .text_of(DETAIL_BULLETS)
            .is_some_and(|text| text.contains("ISBN"))
            .then_some(BookSignal::DetailBullets)
    }
}

impl Default for PageClassifier {
    fn default() -> Self {
        Self::new(vec![
            BreadcrumbProbe::builtin(
                &["#wayfinding-breadcrumbs_feature_div", "#nav-subnav"],
                "Books|Kindle|Audible",
            ),
            BreadcrumbProbe::builtin(&["#breadcrumbs", ".breadcrumbs"], "Books|Audiobooks|eBooks"),
        ])
    }
}
