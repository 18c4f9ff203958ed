//! USA Gundam Store — the search grid is populated client-side, so this
//! source uses the rendered fetch strategy and waits for the results list.

use super::SourceAdapter;
use crate::document::PageDocument;
use crate::fetch::FetchMode;
use crate::listing::Listing;
use crate::query::QueryString;
use crate::urls::{absolutize, encode_query};

const ORIGIN: &str = "https://usagundamstore.com";

pub struct UsaGundamStore {
    origin: String,
}

impl UsaGundamStore {
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

impl Default for UsaGundamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceAdapter for UsaGundamStore {
    fn name(&self) -> &str {
        "USAGundamStore"
    }

    fn origin(&self) -> &str {
        &self.origin
    }

    fn fetch_mode(&self) -> FetchMode {
        FetchMode::Rendered
    }

    fn marker_selector(&self) -> Option<&str> {
        Some("li.ss__result")
    }

    fn search_url(&self, query: &QueryString) -> String {
        format!(
            "{}/collections/shop?q={}",
            self.origin,
            encode_query(query.as_str())
        )
    }

    fn extract(&self, doc: &PageDocument, _query: &QueryString) -> Vec<Listing> {
        let mut items = Vec::new();
        for card in doc.select("li.ss__result") {
            if card.has(".flag.outofstock") {
                continue;
            }

            let Some(anchor) = card.select_first("span.card-information__text.h5 a") else {
                continue;
            };
            let name = anchor.text();
            let link = absolutize(&self.origin, anchor.attr("href").unwrap_or(""));

            let sale = card
                .select_first(".price--on-sale .price-item--sale")
                .map(|e| e.text())
                .filter(|t| !t.is_empty());
            let regular = card
                .select_first(".price__regular .price-item--regular")
                .map(|e| e.text())
                .filter(|t| !t.is_empty());
            let Some(price) = sale.or(regular) else {
                continue;
            };

            let picture = absolutize(
                &self.origin,
                card.select_first(".media--hover-effect img")
                    .and_then(|img| img.attr("src"))
                    .unwrap_or(""),
            );

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
