//! Brookhurst Hobbies — DooFinder search overlay, rendered fetch.
//!
//! Product names live on the thumbnail image (`alt`, falling back to
//! `title`); prices are free text scanned for the lowest dollar amount.

use super::SourceAdapter;
use crate::document::PageDocument;
use crate::fetch::FetchMode;
use crate::listing::Listing;
use crate::price::lowest_dollar;
use crate::query::QueryString;
use crate::urls::{absolutize, encode_query};

const ORIGIN: &str = "https://brookhursthobbies.com";

pub struct Brookhurst {
    origin: String,
}

impl Brookhurst {
    pub fn new() -> Self {
        Self {
            origin: ORIGIN.to_string(),
        }
    }

    /// Point the adapter at a different origin (local test servers).
    pub fn with_origin(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }
}

impl Default for Brookhurst {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceAdapter for Brookhurst {
    fn name(&self) -> &str {
        "BrookhurstHobbies"
    }

    fn origin(&self) -> &str {
        &self.origin
    }

    fn fetch_mode(&self) -> FetchMode {
        FetchMode::Rendered
    }

    fn marker_selector(&self) -> Option<&str> {
        Some("div.dfd-card")
    }

    fn search_url(&self, query: &QueryString) -> String {
        format!(
            "{}/#99db/fullscreen/m=and&q={}",
            self.origin,
            encode_query(query.as_str())
        )
    }

    fn extract(&self, doc: &PageDocument, _query: &QueryString) -> Vec<Listing> {
        let mut items = Vec::new();
        for card in doc.select("div.dfd-card") {
            // The overlay spells its stock flag "autofstock".
            if let Some(badge) = card.select_first(".flag.autofstock") {
                if badge.text().to_lowercase().contains("sold out") {
                    continue;
                }
            }

            let thumb = card.select_first("div.dfd-card-thumbnail img");
            let picture = absolutize(
                &self.origin,
                thumb.and_then(|t| t.attr("src")).unwrap_or(""),
            );
            let name = thumb
                .and_then(|t| {
                    t.attr("alt")
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .or_else(|| t.attr("title").map(str::trim).filter(|s| !s.is_empty()))
                })
                .unwrap_or("")
                .to_string();

            let link = absolutize(
                &self.origin,
                card.select_first("a.dfd-card-link")
                    .and_then(|a| a.attr("href"))
                    .unwrap_or(""),
            );

            let Some(price) = lowest_dollar(&card.text()) else {
                continue;
            };

            if name.is_empty() || link.is_empty() {
                continue;
            }

            items.push(Listing {
                site: self.name().to_string(),
                name,
                price,
                link,
                picture,
            });
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SearchQuery;

    fn query() -> QueryString {
        SearchQuery::new(Some("PG"), "Unicorn").normalize().unwrap()
    }

    const CARDS: &str = r#"
        <div id="dfd-results">
            <div class="dfd-card">
                <div class="dfd-card-thumbnail"><img src="/media/unicorn.jpg" alt="PG Unicorn Gundam"></div>
                <a class="dfd-card-link" href="/product/pg-unicorn"></a>
                <div class="dfd-card-pricing">List $300.00 Sale $264.95</div>
            </div>
            <div class="dfd-card">
                <div class="flag autofstock">Sold Out</div>
                <div class="dfd-card-thumbnail"><img src="/media/banshee.jpg" alt="PG Unicorn Banshee"></div>
                <a class="dfd-card-link" href="/product/pg-banshee"></a>
                <div class="dfd-card-pricing">$289.00</div>
            </div>
            <div class="dfd-card">
                <div class="dfd-card-thumbnail"><img src="/media/mystery.jpg" title="PG Unicorn Phenex"></div>
                <a class="dfd-card-link" href="/product/pg-phenex"></a>
                <div class="dfd-card-pricing">No price listed</div>
            </div>
        </div>
    "#;

    #[test]
    fn lowest_amount_wins_and_sold_out_is_skipped() {
        let adapter = Brookhurst::new();
        let doc = PageDocument::parse(CARDS);
        let items = adapter.extract(&doc, &query());

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.site, "BrookhurstHobbies");
        assert_eq!(item.name, "PG Unicorn Gundam");
        assert_eq!(item.price, "$264.95");
        assert_eq!(item.link, "https://brookhursthobbies.com/product/pg-unicorn");
        assert_eq!(item.picture, "https://brookhursthobbies.com/media/unicorn.jpg");
    }

    #[test]
    fn title_attribute_is_the_name_fallback() {
        let html = r#"
            <div class="dfd-card">
                <div class="dfd-card-thumbnail"><img src="/m.jpg" title="PG Unicorn Phenex"></div>
                <a class="dfd-card-link" href="/product/pg-phenex"></a>
                $349.99
            </div>
        "#;
        let adapter = Brookhurst::new();
        let doc = PageDocument::parse(html);
        assert_eq!(adapter.extract(&doc, &query())[0].name, "PG Unicorn Phenex");
    }

    #[test]
    fn search_url_is_the_doofinder_fragment() {
        let adapter = Brookhurst::new();
        assert_eq!(
            adapter.search_url(&query()),
            "https://brookhursthobbies.com/#99db/fullscreen/m=and&q=PG+Unicorn"
        );
    }
}
