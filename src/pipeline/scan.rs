// src/pipeline/scan.rs

//! Classify-then-extract pass over one document snapshot.

use serde::Serialize;

use crate::document::Document;
use crate::models::BookRecord;
use crate::services::{BookSignal, PageClassifier, RecordExtractor};

/// What one scan of a page found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    /// Why the page counts as a book page; `None` for other pages
    pub signal: Option<BookSignal>,

    /// Extracted record; only attempted for book pages
    pub record: Option<BookRecord>,
}

impl ScanOutcome {
    /// Whether the page was classified as a book page.
    pub fn is_book_page(&self) -> bool {
        self.signal.is_some()
    }
}

/// Run the classifier and, for book pages only, the extractor.
pub fn scan<D: Document + ?Sized>(
    address: &str,
    document: &D,
    classifier: &PageClassifier,
    extractor: &RecordExtractor,
) -> ScanOutcome {
    let Some(signal) = classifier.classify(address, document) else {
        return ScanOutcome {
            signal: None,
            record: None,
        };
    };

    let record = extractor.extract(address, document);
    match &record {
        Some(record) => log::info!("Found book '{}' on {}", record.title, address),
        None => log::info!("Book page without a usable title: {}", address),
    }

    ScanOutcome {
        signal: Some(signal),
        record,
    }
}
