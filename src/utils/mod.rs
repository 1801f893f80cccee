//! Utility functions and helpers.

pub mod text;

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

pub use text::{Normalizer, normalize, normalize_opt};

// ISBN-13 with optional hyphen/space group separators.
static ISBN13: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b97[89](?:[- ]?\d){10}\b").expect("ISBN-13 pattern is valid")
});

static ISBN10: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d(?:[- ]?\d){8}[- ]?[\dXx]\b").expect("ISBN-10 pattern is valid")
});

/// Extract the host from a URL string.
pub fn get_domain(url_str: &str) -> Option<String> {
    Url::parse(url_str)
        .ok()
        .and_then(|u| u.host_str().map(|s| s.to_string()))
}

/// Find the first ISBN in free text, returned as bare digits.
///
/// ISBN-13 (978/979 prefix) wins over ISBN-10 wherever they appear.
pub fn find_isbn(text: &str) -> Option<String> {
    [&*ISBN13, &*ISBN10].iter().find_map(|pattern| {
        pattern.find(text).map(|m| {
            m.as_str()
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == 'X' || *c == 'x')
                .map(|c| c.to_ascii_uppercase())
                .collect()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_domain() {
        assert_eq!(
            get_domain("https://www.amazon.com/dp/0441172717"),
            Some("www.amazon.com".to_string())
        );
        assert_eq!(
            get_domain("https://sub.example.com:8080/path"),
            Some("sub.example.com".to_string())
        );
        assert_eq!(get_domain("not a url"), None);
    }

    #[test]
    fn test_find_isbn13() {
        assert_eq!(
            find_isbn("ISBN-13 : 978-0441172719"),
            Some("9780441172719".to_string())
        );
        assert_eq!(
            find_isbn("ISBN-10: 0441172717 ISBN-13: 9780441172719"),
            Some("9780441172719".to_string())
        );
    }

    #[test]
    fn test_find_isbn10() {
        assert_eq!(
            find_isbn("ISBN-10 : 0-8044-2957-X"),
            Some("080442957X".to_string())
        );
    }

    #[test]
    fn test_find_isbn_none() {
        assert_eq!(find_isbn("Publisher : Ace (August 2, 2005)"), None);
    }
}
