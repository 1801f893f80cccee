//! Service layer for the extraction engine.
//!
//! This module contains the decision logic for:
//! - Book page detection (`PageClassifier`)
//! - Record extraction (`RecordExtractor`), backed by JSON-LD parsing in `structured`
//! - Library search links (`search`)

mod classifier;
mod extractor;
pub mod search;
pub mod structured;

pub use classifier::{BookSignal, BreadcrumbProbe, PageClassifier};
pub use extractor::RecordExtractor;
pub use structured::StructuredDataItem;
