// src/lib.rs

//! bookback library
//!
//! Decides whether a loaded web page is a book product page and extracts a
//! normalized title, author and ISBN from it.

pub mod config;
pub mod document;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;

pub use document::{Document, HtmlDocument};
pub use models::BookRecord;
pub use services::{BookSignal, PageClassifier, RecordExtractor};
