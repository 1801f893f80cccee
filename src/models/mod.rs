// src/models/mod.rs

//! Domain models for the extraction engine.
//!
//! This module contains all data structures used throughout the crate,
//! organized by their primary purpose.

mod config;
pub mod library;
pub mod profile;
mod record;

// Re-export all public types
pub use config::{CleaningConfig, Config, DisplayConfig, SearchConfig};
pub use library::Library;
pub use profile::{SITE_PROFILES, SiteProfile, resolve_profile};
pub use record::BookRecord;
