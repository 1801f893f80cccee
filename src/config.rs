// src/config.rs

//! Configuration loading utilities.
//!
//! This module provides convenience functions for loading configuration
//! from a storage directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::{Config, Library};

/// File name of the configuration inside the storage directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Path of the configuration file inside `storage_dir`.
pub fn config_path(storage_dir: &Path) -> PathBuf {
    storage_dir.join(CONFIG_FILE)
}

/// Load configuration from `storage_dir`, falling back to defaults when the
/// file is missing or unreadable.
pub fn load_config(storage_dir: &Path) -> Config {
    Config::load_or_default(config_path(storage_dir))
}

/// Load and validate configuration strictly.
pub fn load_all(storage_dir: &Path) -> Result<Config> {
    let config = Config::load(config_path(storage_dir))?;
    config
        .validate()
        .map_err(|e| AppError::config(format!("Invalid configuration: {e}")))?;
    Ok(config)
}

/// Load configuration that is about to be rewritten.
///
/// Only a missing file falls back to defaults. Any other failure is returned
/// so the existing file is never replaced by defaults.
pub fn load_for_update(storage_dir: &Path) -> Result<Config> {
    match Config::load(config_path(storage_dir)) {
        Err(AppError::Io(e)) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
        loaded => loaded,
    }
}

/// Append `library` to the stored configuration and write it back.
pub fn add_library(storage_dir: &Path, library: Library) -> Result<Config> {
    let mut config = load_for_update(storage_dir)?;
    config.libraries.push(library);
    config.validate()?;
    config.save(config_path(storage_dir))?;
    Ok(config)
}
