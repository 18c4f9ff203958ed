//! HobbyHolics — BigCommerce storefront with a server-rendered product grid.
//!
//! Cards carry no structured sale/regular price fields, only free text with
//! one or more dollar amounts; the lowest wins. This source discards
//! candidates without a resolvable picture.

use super::SourceAdapter;
use crate::document::PageDocument;
use crate::fetch::FetchMode;
use crate::listing::Listing;
use crate::price::lowest_dollar;
use crate::query::QueryString;
use crate::urls::{absolutize, encode_query};

const ORIGIN: &str = "https://hobbyholics.com";

pub struct HobbyHolics {
    origin: String,
}

impl HobbyHolics {
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

impl Default for HobbyHolics {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceAdapter for HobbyHolics {
    fn name(&self) -> &str {
        "HobbyHolics"
    }

    fn origin(&self) -> &str {
        &self.origin
    }

    fn fetch_mode(&self) -> FetchMode {
        FetchMode::Static
    }

    fn picture_required(&self) -> bool {
        true
    }

    fn search_url(&self, query: &QueryString) -> String {
        format!(
            "{}/search.php?search_query={}",
            self.origin,
            encode_query(query.as_str())
        )
    }

    fn extract(&self, doc: &PageDocument, _query: &QueryString) -> Vec<Listing> {
        let mut items = Vec::new();
        for card in doc.select("ul.productGrid li.product") {
            let Some(anchor) = card.select_first("figure.card-figure > a.card-figure__link")
            else {
                continue;
            };
            let link = absolutize(&self.origin, anchor.attr("href").unwrap_or(""));
            let name = anchor
                .attr("aria-label")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| anchor.text());

            let Some(price) = lowest_dollar(&card.html()) else {
                continue;
            };

            let image = card.select_first("img.card-image");
            let raw_src = image
                .and_then(|img| {
                    img.attr("src")
                        .filter(|s| !s.is_empty())
                        .or_else(|| img.attr("data-src"))
                })
                .unwrap_or("");
            if raw_src.is_empty() {
                continue;
            }
            let picture = absolutize(&self.origin, raw_src);

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
