//! Source adapters — one per external catalog.
//!
//! An adapter pairs a search-URL builder and fetch mode with a pure
//! extraction function over the fetched page. The registry is a fixed,
//! ordered list built once at startup and handed to the aggregator as a
//! dependency, so tests can substitute fakes; result ordering follows it.

mod brookhurst;
mod hobbyholics;
mod robots4less;
mod usagundamstore;

pub use brookhurst::Brookhurst;
pub use hobbyholics::HobbyHolics;
pub use robots4less::Robots4Less;
pub use usagundamstore::UsaGundamStore;

use crate::document::PageDocument;
use crate::fetch::FetchMode;
use crate::listing::Listing;
use crate::query::QueryString;
use std::sync::Arc;

/// One external catalog: URL builder, fetch mode, extraction rules.
pub trait SourceAdapter: Send + Sync {
    /// Stable identifier, used as `Listing::site` and in error rows.
    fn name(&self) -> &str;

    /// Scheme + host used to absolutize relative links and images.
    fn origin(&self) -> &str;

    fn fetch_mode(&self) -> FetchMode;

    /// CSS selector whose appearance signals that a rendered page is ready.
    /// Only meaningful for [`FetchMode::Rendered`].
    fn marker_selector(&self) -> Option<&str> {
        None
    }

    /// Whether a candidate without a resolvable picture is discarded.
    /// Per-source policy, not a universal rule.
    fn picture_required(&self) -> bool {
        false
    }

    /// Search-page URL for the query, encoded for this source's transport.
    fn search_url(&self, query: &QueryString) -> String;

    /// Normalize the fetched page into listings, in document order.
    ///
    /// Pure and total: unrecognized markup yields an empty list, never an
    /// error. Candidates failing the stock filter, the price policy, or the
    /// validity gate are silently skipped.
    fn extract(&self, doc: &PageDocument, query: &QueryString) -> Vec<Listing>;
}

/// The fixed adapter collection, in result order.
pub type Registry = Vec<Arc<dyn SourceAdapter>>;

/// Build the production registry. Order is significant: merged results are
/// concatenated in this order.
pub fn registry() -> Registry {
    vec![
        Arc::new(Robots4Less::new()),
        Arc::new(HobbyHolics::new()),
        Arc::new(UsaGundamStore::new()),
        Arc::new(Brookhurst::new()),
    ]
}
