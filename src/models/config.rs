//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::library::QUERY_PLACEHOLDER;
use crate::models::Library;
use crate::utils::Normalizer;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Library catalogs to search, in the order links are produced
    #[serde(default)]
    pub libraries: Vec<Library>,

    /// Text cleanup settings
    #[serde(default)]
    pub cleaning: CleaningConfig,

    /// Output settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Library search settings
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Write configuration as TOML, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        for library in &self.libraries {
            library.validate()?;
        }
        if self.display.title_max_chars == 0 {
            return Err(AppError::validation("display.title_max_chars must be > 0"));
        }
        if !self.search.finder_template.contains(QUERY_PLACEHOLDER) {
            return Err(AppError::validation(format!(
                "search.finder_template must contain {QUERY_PLACEHOLDER}"
            )));
        }
        self.cleaning.normalizer()?;
        Ok(())
    }
}

/// Text cleaning settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CleaningConfig {
    /// Extra phrases removed from titles and authors
    #[serde(default)]
    pub extra_noise: Vec<String>,
}

impl CleaningConfig {
    /// Build the normalizer these settings describe.
    pub fn normalizer(&self) -> Result<Normalizer> {
        Normalizer::new(&self.extra_noise)
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Titles longer than this are shortened in summaries
    #[serde(default = "defaults::title_max_chars")]
    pub title_max_chars: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title_max_chars: defaults::title_max_chars(),
        }
    }
}

/// Library search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Map search used to find a nearby library
    #[serde(default = "defaults::finder_template")]
    pub finder_template: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            finder_template: defaults::finder_template(),
        }
    }
}

mod defaults {
    pub fn title_max_chars() -> usize {
        60
    }
    pub fn finder_template() -> String {
        "https://duckduckgo.com/?q={{query}}&ia=maps".into()
    }
}
