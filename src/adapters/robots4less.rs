//! Robots4Less — Shopify storefront with a server-rendered search grid.

use super::SourceAdapter;
use crate::document::PageDocument;
use crate::fetch::FetchMode;
use crate::listing::Listing;
use crate::query::QueryString;
use crate::urls::{absolutize, encode_query};

const ORIGIN: &str = "https://r4lus.com";

pub struct Robots4Less {
    origin: String,
}

impl Robots4Less {
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

impl Default for Robots4Less {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceAdapter for Robots4Less {
    fn name(&self) -> &str {
        "Robots4Less"
    }

    fn origin(&self) -> &str {
        &self.origin
    }

    fn fetch_mode(&self) -> FetchMode {
        FetchMode::Static
    }

    fn search_url(&self, query: &QueryString) -> String {
        format!("{}/search?q={}", self.origin, encode_query(query.as_str()))
    }

    fn extract(&self, doc: &PageDocument, _query: &QueryString) -> Vec<Listing> {
        let mut items = Vec::new();
        for card in doc.select(".grid__item") {
            // Sold-out badge short-circuits before any field work.
            if let Some(badge) = card.select_first(".badge") {
                if badge.text().to_lowercase().contains("sold out") {
                    continue;
                }
            }

            let Some(anchor) = card.select_first(".card-information__text a") else {
                continue;
            };
            let name = anchor.text();
            let link = absolutize(&self.origin, anchor.attr("href").unwrap_or(""));

            let price = card
                .select_first(".price-item--sale")
                .map(|e| e.text())
                .filter(|t| !t.is_empty())
                .or_else(|| {
                    card.select_first(".price-item--regular")
                        .map(|e| e.text())
                        .filter(|t| !t.is_empty())
                });
            let Some(price) = price else { continue };

            let picture = absolutize(
                &self.origin,
                card.select_first(".card-wrapper img")
                    .and_then(|img| img.attr("src"))
                    .unwrap_or(""),
            );

            // A missing or empty href is not a product; neither is a link
            // that resolves to the bare origin.
            if name.is_empty() || link.is_empty() || link == self.origin {
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
        SearchQuery::new(Some("MG"), "Strike Freedom")
            .normalize()
            .unwrap()
    }

    const GRID: &str = r#"
        <div class="grid__item">
            <div class="badge">Sold out</div>
            <div class="card-information__text"><a href="/products/gone">MG Strike Freedom Gundam</a></div>
            <span class="price-item--regular">$55.00</span>
        </div>
        <div class="grid__item">
            <div class="card-wrapper"><img src="//cdn.shopify.com/sf.jpg"></div>
            <div class="card-information__text"><a href="/products/strike-freedom">MG Strike Freedom Gundam</a></div>
            <span class="price-item--sale">$39.99</span>
            <span class="price-item--regular">$45.00</span>
        </div>
        <div class="grid__item">
            <div class="card-information__text"><a href="/products/no-price">MG Freedom Gundam</a></div>
        </div>
        <div class="grid__item">
            <div class="card-information__text"><a href="">MG Empty Link Gundam</a></div>
            <span class="price-item--regular">$12.00</span>
        </div>
    "#;

    #[test]
    fn extracts_in_stock_cards_with_sale_price_preference() {
        let adapter = Robots4Less::new();
        let doc = PageDocument::parse(GRID);
        let items = adapter.extract(&doc, &query());

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.site, "Robots4Less");
        assert_eq!(item.name, "MG Strike Freedom Gundam");
        assert_eq!(item.price, "$39.99");
        assert_eq!(item.link, "https://r4lus.com/products/strike-freedom");
        assert_eq!(item.picture, "https://cdn.shopify.com/sf.jpg");
    }

    #[test]
    fn regular_price_is_the_fallback() {
        let html = r#"
            <div class="grid__item">
                <div class="card-information__text"><a href="/products/zaku">HG Zaku II</a></div>
                <span class="price-item--regular">$14.50</span>
            </div>
        "#;
        let adapter = Robots4Less::new();
        let doc = PageDocument::parse(html);
        let items = adapter.extract(&doc, &query());
        assert_eq!(items[0].price, "$14.50");
    }

    #[test]
    fn empty_href_card_is_discarded() {
        let html = r#"
            <div class="grid__item">
                <div class="card-information__text"><a href="">MG Strike Freedom Gundam</a></div>
                <span class="price-item--regular">$12.00</span>
            </div>
        "#;
        let adapter = Robots4Less::new();
        let doc = PageDocument::parse(html);
        let items = adapter.extract(&doc, &query());
        assert!(items.is_empty(), "empty-link card must be discarded, got {items:?}");
    }

    #[test]
    fn search_url_encodes_the_query() {
        let adapter = Robots4Less::new();
        assert_eq!(
            adapter.search_url(&query()),
            "https://r4lus.com/search?q=MG+Strike+Freedom"
        );
    }

    #[test]
    fn picture_is_optional_here() {
        assert!(!Robots4Less::new().picture_required());
    }
}
