//! Book record extraction.
//!
//! Structured data is tried first. When the page has none, the site profile
//! for the address supplies ordered selectors for title and author. Within a
//! selector list the first element that exists wins, even if its text is
//! empty.

use crate::document::Document;
use crate::error::Result;
use crate::models::profile::resolve_in;
use crate::models::{BookRecord, Config, SITE_PROFILES, SiteProfile};
use crate::services::structured::extract_structured;
use crate::utils::{Normalizer, find_isbn};

/// Produces a [`BookRecord`] from a page already classified as a book page.
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    normalizer: Normalizer,
    profiles: Vec<SiteProfile>,
}

impl RecordExtractor {
    /// Create an extractor with a normalizer and a profile table.
    pub fn new(normalizer: Normalizer, profiles: Vec<SiteProfile>) -> Self {
        Self {
            normalizer,
            profiles,
        }
    }

    /// Create an extractor using the configured cleaning rules.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            config.cleaning.normalizer()?,
            SITE_PROFILES.to_vec(),
        ))
    }

    /// Extract a record, or `None` when no title can be found.
    pub fn extract<D: Document + ?Sized>(
        &self,
        address: &str,
        document: &D,
    ) -> Option<BookRecord> {
        if let Some(record) = extract_structured(document, &self.normalizer) {
            log::debug!("Extracted '{}' from structured data", record.title);
            return Some(record);
        }
        self.extract_visual(address, document)
    }

    /// Selector-driven extraction using the site profile for `address`.
    pub fn extract_visual<D: Document + ?Sized>(
        &self,
        address: &str,
        document: &D,
    ) -> Option<BookRecord> {
        let profile = self.profile_for(address);
        log::debug!("Using site profile '{}' for {}", profile.name, address);

        let Some(title) = first_present(document, profile.title_selectors) else {
            log::debug!("No title element found with profile '{}'", profile.name);
            return None;
        };
        let author = first_present(document, profile.author_selectors);
        let identifier = first_present(document, profile.identifier_selectors)
            .and_then(|region| find_isbn(&region));

        BookRecord::new(
            self.normalizer.normalize(&title),
            self.normalizer.normalize_opt(author.as_deref()),
            identifier,
        )
    }

    /// The profile that applies to `address`.
    pub fn profile_for(&self, address: &str) -> &SiteProfile {
        resolve_in(&self.profiles, address)
    }
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new(Normalizer::default(), SITE_PROFILES.to_vec())
    }
}

/// Text of the first selector that resolves to an element.
fn first_present<D: Document + ?Sized>(document: &D, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|selector| document.text_of(selector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::HtmlDocument;

    const GENERIC_PAGE: &str = "https://example.com/catalog/item";

    #[test]
    fn test_hobbit_scenario() {
        let doc = HtmlDocument::parse("<body><h1>  The Hobbit (Author) </h1></body>");
        let record = RecordExtractor::default().extract(GENERIC_PAGE, &doc).unwrap();
        assert_eq!(record, BookRecord::new("The Hobbit", None, None).unwrap());
    }

    #[test]
    fn test_structured_data_beats_dom() {
        let doc = HtmlDocument::parse(
            r#"<head><script type="application/ld+json">
                 {"@type":"Book","name":"Dune","author":[{"name":"Frank Herbert"}],"isbn":"9780441172719"}
               </script></head>
               <body><h1>Totally Different</h1><span class="author">Someone Else</span></body>"#,
        );
        let record = RecordExtractor::default().extract(GENERIC_PAGE, &doc).unwrap();
        assert_eq!(record.title, "Dune");
        assert_eq!(record.author.as_deref(), Some("Frank Herbert"));
        assert_eq!(record.identifier.as_deref(), Some("9780441172719"));
    }

    #[test]
    fn test_no_title_means_no_record() {
        let doc = HtmlDocument::parse(r#"<div class="author">Jane Doe</div>"#);
        assert!(RecordExtractor::default().extract(GENERIC_PAGE, &doc).is_none());
    }

    #[test]
    fn test_second_selector_used_when_first_missing() {
        let doc = HtmlDocument::parse(
            r#"<span id="ebooksProductTitle">Project Hail Mary</span><h1>Amazon.com</h1>"#,
        );
        let record = RecordExtractor::default()
            .extract("https://www.amazon.com/dp/B08FHBV4ZX", &doc)
            .unwrap();
        assert_eq!(record.title, "Project Hail Mary");
    }

    #[test]
    fn test_existing_empty_element_stops_the_search() {
        let doc =
            HtmlDocument::parse(r#"<span id="ebooksProductTitle"> </span><h1>Amazon.com</h1>"#);
        let extractor = RecordExtractor::default();
        assert!(extractor.extract("https://www.amazon.com/dp/B08FHBV4ZX", &doc).is_none());

        let doc = HtmlDocument::parse(
            r#"<h1>Dune</h1><span class="author"></span><span class="byline">by Frank Herbert</span>"#,
        );
        let record = extractor.extract(GENERIC_PAGE, &doc).unwrap();
        assert_eq!(record.title, "Dune");
        assert_eq!(record.author, None);
    }

    #[test]
    fn test_custom_profile_selector_priority() {
        let profile = SiteProfile {
            name: "shop",
            host_marker: Some("shop.example"),
            title_selectors: &[".missing-title", ".book-name"],
            author_selectors: &[".writer"],
            identifier_selectors: &[],
        };
        let extractor = RecordExtractor::new(Normalizer::default(), vec![profile]);
        let doc = HtmlDocument::parse(
            r#"<h1>Shop Home</h1><p class="book-name">Middlemarch</p><p class="writer">George Eliot</p>"#,
        );
        let record = extractor.extract("https://shop.example/b/1", &doc).unwrap();
        assert_eq!(record.title, "Middlemarch");
        assert_eq!(record.author.as_deref(), Some("George Eliot"));
    }

    #[test]
    fn test_amazon_byline_is_cleaned() {
        let doc = HtmlDocument::parse(
            r#"<span id="productTitle">  Bewilderment  </span>
               <div id="bylineInfo">by Richard Powers (Author) Format: Kindle Edition</div>"#,
        );
        let record = RecordExtractor::default()
            .extract("https://www.amazon.com/dp/B08WJRX1RR", &doc)
            .unwrap();
        assert_eq!(record.title, "Bewilderment");
        assert_eq!(record.author.as_deref(), Some("by Richard Powers"));
    }

    #[test]
    fn test_amazon_identifier_from_detail_bullets() {
        let doc = HtmlDocument::parse(
            r#"<span id="productTitle">Dune</span>
               <a class="contributorNameID">Frank Herbert</a>
               <div id="detailBullets_feature_div">
                 <li>Publisher : Ace (August 2, 2005)</li>
                 <li>ISBN-10 : 0441013597</li>
                 <li>ISBN-13 : 978-0441013593</li>
               </div>"#,
        );
        let record = RecordExtractor::default()
            .extract("https://www.amazon.com/dp/0441013597", &doc)
            .unwrap();
        assert_eq!(record.author.as_deref(), Some("Frank Herbert"));
        assert_eq!(record.identifier.as_deref(), Some("9780441013593"));
    }

    #[test]
    fn test_line_breaks_separate_words() {
        let doc = HtmlDocument::parse(
            r#"<h1>Dune<br>Messiah</h1>
               <div class="author"><div>Frank</div><div>Herbert</div></div>"#,
        );
        let record = RecordExtractor::default().extract(GENERIC_PAGE, &doc).unwrap();
        assert_eq!(record.title, "Dune Messiah");
        assert_eq!(record.author.as_deref(), Some("Frank Herbert"));
    }

    #[test]
    fn test_adjacent_bullets_keep_identifier() {
        let doc = HtmlDocument::parse(
            r#"<span id="productTitle">Dune</span><div id="detailBullets_feature_div"><ul><li><span>ISBN-13 : </span><span>978-0441013593</span></li><li><span>Item Weight : 8.8 ounces</span></li></ul></div>"#,
        );
        let record = RecordExtractor::default()
            .extract("https://www.amazon.com/dp/0441013597", &doc)
            .unwrap();
        assert_eq!(record.identifier.as_deref(), Some("9780441013593"));
    }

    #[test]
    fn test_generic_profile_has_no_identifier() {
        let doc = HtmlDocument::parse(
            r#"<h1>Dune</h1><div id="detailBullets_feature_div">ISBN-13 : 9780441013593</div>"#,
        );
        let record = RecordExtractor::default().extract(GENERIC_PAGE, &doc).unwrap();
        assert_eq!(record.identifier, None);
    }

    #[test]
    fn test_untitled_structured_item_falls_back_to_dom() {
        let doc = HtmlDocument::parse(
            r#"<script type="application/ld+json">{"@type":"Book","isbn":"9780441172719"}</script>
               <h1>Dune</h1>"#,
        );
        let record = RecordExtractor::default().extract(GENERIC_PAGE, &doc).unwrap();
        assert_eq!(record.title, "Dune");
        assert_eq!(record.identifier, None);
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let doc = HtmlDocument::parse("<h1>Beloved</h1><p class=\"byline\">Toni Morrison</p>");
        let extractor = RecordExtractor::default();
        let first = extractor.extract(GENERIC_PAGE, &doc);
        assert_eq!(first, extractor.extract(GENERIC_PAGE, &doc));
        assert_eq!(first.unwrap().author.as_deref(), Some("Toni Morrison"));
    }
}
