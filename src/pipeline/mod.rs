//! Pipeline entry points.
//!
//! - `scan`: classify a page and extract a record from book pages

pub mod scan;

pub use scan::{ScanOutcome, scan};
