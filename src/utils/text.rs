// src/utils/text.rs

//! Text normalization applied to every extracted title and author.
//!
//! One pass runs, in order:
//! 1. collapse whitespace runs to a single space
//! 2. drop contributor-role annotations such as `(Author)`
//! 3. drop format noise such as `Kindle Edition`
//! 4. strip one trailing `:` or `|`
//! 5. trim
//!
//! A removal can expose new doubled spaces or a new trailing mark, so the
//! pass is repeated until the text stops changing. That makes
//! [`normalize`] idempotent.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, Result};

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static ROLE_ANNOTATIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\(Author\)|\(Editor\)|\(Illustrator\)").expect("role pattern is valid")
});

// "Kindle Edition" must come before its parts or only "Kindle" would be removed.
static FORMAT_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Format:|Kindle Edition|Kindle|Edition").expect("noise pattern is valid")
});

static TRAILING_MARK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[:|]\s*$").expect("trailing mark pattern is valid"));

static DEFAULT: LazyLock<Normalizer> = LazyLock::new(Normalizer::default);

/// Normalize with the built-in rules only.
pub fn normalize(text: &str) -> String {
    DEFAULT.normalize(text)
}

/// Normalize an optional string, mapping empty results to `None`.
pub fn normalize_opt(text: Option<&str>) -> Option<String> {
    DEFAULT.normalize_opt(text)
}

/// Title/author normalizer with optional extra noise phrases.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    extra_noise: Option<Regex>,
}

impl Normalizer {
    /// Build a normalizer that also removes the given literal phrases
    /// (case-insensitive) after the built-in format noise.
    pub fn new(extra_noise: &[String]) -> Result<Self> {
        let phrases: Vec<String> = extra_noise
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(regex::escape)
            .collect();

        if phrases.is_empty() {
            return Ok(Self::default());
        }

        let pattern = format!("(?i){}", phrases.join("|"));
        let regex = Regex::new(&pattern)
            .map_err(|e| AppError::config(format!("Invalid cleaning phrases: {e}")))?;

        Ok(Self {
            extra_noise: Some(regex),
        })
    }

    /// Normalize `text` until it reaches a fixed point.
    pub fn normalize(&self, text: &str) -> String {
        let mut current = self.pass(text);
        loop {
            let next = self.pass(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    /// Normalize an optional string; absent and empty both become `None`.
    pub fn normalize_opt(&self, text: Option<&str>) -> Option<String> {
        let cleaned = self.normalize(text.unwrap_or_default());
        (!cleaned.is_empty()).then_some(cleaned)
    }

    fn pass(&self, text: &str) -> String {
        let collapsed = WHITESPACE.replace_all(text, " ");
        let without_roles = ROLE_ANNOTATIONS.replace_all(&collapsed, "");
        let mut cleaned = FORMAT_NOISE.replace_all(&without_roles, "").into_owned();

        if let Some(extra) = &self.extra_noise {
            cleaned = extra.replace_all(&cleaned, "").into_owned();
        }

        TRAILING_MARK.replace(&cleaned, "").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_role_suffix() {
        assert_eq!(normalize("Jane Doe (Author)"), "Jane Doe");
        assert_eq!(normalize("Tolkien (editor)"), "Tolkien");
        assert_eq!(normalize("Pauline Baynes (ILLUSTRATOR)"), "Pauline Baynes");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  The \n\t Hobbit  "), "The Hobbit");
        assert_eq!(normalize("  The Hobbit (Author) "), "The Hobbit");
    }

    #[test]
    fn test_removes_format_noise() {
        assert_eq!(normalize("Dune Kindle Edition"), "Dune");
        assert_eq!(normalize("Format: Kindle"), "");
        assert_eq!(normalize("Collector's EDITION"), "Collector's");
    }

    #[test]
    fn test_strips_trailing_mark_exposed_by_noise() {
        assert_eq!(normalize("Dune: Kindle Edition"), "Dune");
        assert_eq!(normalize("Dune |"), "Dune");
        assert_eq!(normalize("Dune: Messiah"), "Dune: Messiah");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize_opt(None), None);
        assert_eq!(normalize_opt(Some(" (Author) ")), None);
        assert_eq!(normalize_opt(Some("Herbert")).as_deref(), Some("Herbert"));
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Jane (Author) Doe",
            "a : :",
            "KinKindledle Dune",
            "Title | Edition |",
            "  Format:  Paperback ",
            "The Hobbit (Author) ",
            "x\u{a0}\u{a0}y",
            "",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
        assert_eq!(normalize("Jane (Author) Doe"), "Jane Doe");
    }

    #[test]
    fn test_extra_noise_phrases() {
        let normalizer =
            Normalizer::new(&["Paperback".to_string(), "  ".to_string()]).unwrap();
        assert_eq!(normalizer.normalize("Dune paperback:"), "Dune");
        assert_eq!(normalize("Dune paperback"), "Dune paperback");
    }

    #[test]
    fn test_extra_noise_is_literal() {
        let normalizer = Normalizer::new(&["(Narrator)".to_string()]).unwrap();
        assert_eq!(normalizer.normalize("Scott Brick (Narrator)"), "Scott Brick");
        assert_eq!(normalizer.normalize("Narrator"), "Narrator");
    }
}
