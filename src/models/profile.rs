// src/models/profile.rs

//! Per-retailer selector profiles used when a page has no structured data.
//!
//! Profiles are static data in preference order. The generic profile has no
//! host marker, matches everything, and sits last.

use crate::document::HtmlDocument;
use crate::error::Result;
use crate::utils::get_domain;

/// Selector paths for one retailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteProfile {
    /// Profile name for logging and listings
    pub name: &'static str,

    /// Substring of the host identifying the retailer; `None` matches any page
    pub host_marker: Option<&'static str>,

    /// Candidate title locations, highest priority first
    pub title_selectors: &'static [&'static str],

    /// Candidate author locations, highest priority first
    pub author_selectors: &'static [&'static str],

    /// Regions that may mention the ISBN in free text
    pub identifier_selectors: &'static [&'static str],
}

impl SiteProfile {
    /// Whether this profile applies to the page at `address`.
    pub fn matches(&self, address: &str) -> bool {
        let Some(marker) = self.host_marker else {
            return true;
        };
        let host = get_domain(address).unwrap_or_else(|| address.to_string());
        host.to_lowercase().contains(marker)
    }

    /// Whether this is the catch-all profile.
    pub fn is_generic(&self) -> bool {
        self.host_marker.is_none()
    }

    fn selectors(&self) -> impl Iterator<Item = &'static str> {
        self.title_selectors
            .iter()
            .chain(self.author_selectors)
            .chain(self.identifier_selectors)
            .copied()
    }
}

/// Catch-all profile.
pub const GENERIC: SiteProfile = SiteProfile {
    name: "generic",
    host_marker: None,
    title_selectors: &["h1"],
    author_selectors: &[".author", ".byline", ".contributor"],
    identifier_selectors: &[],
};

/// All profiles, in preference order. The generic profile must stay last.
pub static SITE_PROFILES: &[SiteProfile] = &[
    SiteProfile {
        name: "amazon",
        host_marker: Some("amazon"),
        title_selectors: &["#productTitle", "#ebooksProductTitle", "#title", "h1"],
        author_selectors: &[
            ".contributorNameID",
            ".author a",
            "#bylineInfo a",
            "#bylineInfo",
        ],
        identifier_selectors: &["#detailBullets_feature_div", "#prodDetails"],
    },
    SiteProfile {
        name: "indigo",
        host_marker: Some("indigo"),
        title_selectors: &["h1.product-title", "h1"],
        author_selectors: &[".contributor-name", ".author"],
        identifier_selectors: &[],
    },
    SiteProfile {
        name: "barnes",
        host_marker: Some("barnes"),
        title_selectors: &["h1.pdp-header-title", "h1"],
        author_selectors: &["#key-contributors", ".contributors"],
        identifier_selectors: &[],
    },
    SiteProfile {
        name: "goodreads",
        host_marker: Some("goodreads"),
        title_selectors: &[r#"h1[data-testid="bookTitle"]"#, "h1"],
        author_selectors: &[r#"span[data-testid="name"]"#, ".authorName"],
        identifier_selectors: &[],
    },
    SiteProfile {
        name: "bookshop",
        host_marker: Some("bookshop"),
        title_selectors: &["h1", ".book-title"],
        author_selectors: &[".book-author", "h2"],
        identifier_selectors: &[],
    },
    SiteProfile {
        name: "thriftbooks",
        host_marker: Some("thriftbooks"),
        title_selectors: &["h1"],
        author_selectors: &[".WorkMeta-author"],
        identifier_selectors: &[],
    },
    GENERIC,
];

/// The profile that applies to `address`.
pub fn resolve_profile(address: &str) -> &'static SiteProfile {
    resolve_in(SITE_PROFILES, address)
}

/// First matching profile from `profiles`, or the generic profile of the
/// built-in table when none match.
pub fn resolve_in<'a>(profiles: &'a [SiteProfile], address: &str) -> &'a SiteProfile {
    profiles
        .iter()
        .filter(|p| !p.is_generic())
        .find(|p| p.matches(address))
        .or_else(|| profiles.iter().find(|p| p.is_generic()))
        .unwrap_or(&GENERIC)
}

/// Check every selector in the table parses.
pub fn validate_profiles() -> Result<()> {
    for selector in SITE_PROFILES.iter().flat_map(SiteProfile::selectors) {
        HtmlDocument::try_select(selector)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exactly_one_generic_and_it_is_last() {
        let generic: Vec<_> = SITE_PROFILES.iter().filter(|p| p.is_generic()).collect();
        assert_eq!(generic.len(), 1);
        assert!(SITE_PROFILES.last().unwrap().is_generic());
        assert_eq!(*generic[0], GENERIC);
        assert_eq!(resolve_profile("https://example.com/").name, "generic");
    }

    #[test]
    fn test_resolve_known_hosts() {
        let cases = [
            ("https://www.amazon.com/dp/0441172717", "amazon"),
            ("https://www.amazon.co.uk/gp/product/0441172717", "amazon"),
            ("https://www.indigo.ca/en-ca/dune/9780441172719.html", "indigo"),
            ("https://www.barnesandnoble.com/w/dune-frank-herbert/1100", "barnes"),
            ("https://www.goodreads.com/book/show/44767458-dune", "goodreads"),
            ("https://bookshop.org/p/books/dune-frank-herbert/1", "bookshop"),
            ("https://www.thriftbooks.com/w/dune_frank-herbert/1", "thriftbooks"),
            ("https://example.com/some/page", "generic"),
        ];
        for (address, expected) in cases {
            assert_eq!(resolve_profile(address).name, expected, "{address}");
        }
    }

    #[test]
    fn test_matches_host_not_path() {
        let profile = resolve_profile("https://example.com/amazon-reviews");
        assert_eq!(profile.name, "generic");
    }

    #[test]
    fn test_matches_raw_address_without_host() {
        assert_eq!(resolve_profile("goodreads book page").name, "goodreads");
    }

    #[test]
    fn test_resolve_in_prefers_table_order() {
        let profiles = [SITE_PROFILES[3], SITE_PROFILES[0]];
        let profile = resolve_in(&profiles, "https://amazon.goodreads.example/x");
        assert_eq!(profile.name, "goodreads");
    }

    #[test]
    fn test_resolve_in_falls_back_to_generic() {
        let profile = resolve_in(&[], "https://www.amazon.com/dp/1");
        assert!(profile.is_generic());
    }

    #[test]
    fn test_all_selectors_parse() {
        assert!(validate_profiles().is_ok());
    }
}
