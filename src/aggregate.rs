//! Concurrent multi-source aggregation.
//!
//! Fans one normalized query out to every registered adapter, isolates
//! per-source failures, and fans back in preserving registry order. A failed
//! source contributes exactly one error row; it never aborts the request or
//! its siblings. The merged list then passes the term filter.

use crate::adapters::{Registry, SourceAdapter};
use crate::document::PageDocument;
use crate::fetch::{Fetch, FetchError};
use crate::filter::retain_matching;
use crate::listing::Listing;
use crate::query::QueryString;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct Aggregator {
    registry: Registry,
    fetcher: Arc<dyn Fetch>,
}

impl Aggregator {
    /// The registry and fetch executor are dependencies, never ambient
    /// state, so tests can substitute fakes for either.
    pub fn new(registry: Registry, fetcher: Arc<dyn Fetch>) -> Self {
        Self { registry, fetcher }
    }

    pub fn adapters(&self) -> &Registry {
        &self.registry
    }

    /// Run the full pipeline for one query: fan-out, fan-in, post-filter.
    pub async fn search(&self, query: &QueryString) -> Vec<Listing> {
        retain_matching(self.collect(query).await, query)
    }

    /// Fan out to every adapter and flatten the settled results, unfiltered.
    ///
    /// A join, not a race: every source settles (the slowest bounds overall
    /// latency), nothing cancels a sibling, and the flattened order is
    /// registry order then extraction order.
    pub async fn collect(&self, query: &QueryString) -> Vec<Listing> {
        let runs = self.registry.iter().map(|adapter| {
            let adapter = Arc::clone(adapter);
            let fetcher = Arc::clone(&self.fetcher);
            async move {
                match run_one(fetcher.as_ref(), adapter.as_ref(), query).await {
                    Ok(listings) => {
                        debug!(source = adapter.name(), count = listings.len(), "source extracted");
                        listings
                    }
                    Err(e) => {
                        warn!(source = adapter.name(), error = %e, "source failed");
                        vec![Listing::source_error(adapter.name(), &e.to_string())]
                    }
                }
            }
        });

        let settled = futures::future::join_all(runs).await;
        settled.into_iter().flatten().collect()
    }
}

async fn run_one(
    fetcher: &dyn Fetch,
    adapter: &dyn SourceAdapter,
    query: &QueryString,
) -> Result<Vec<Listing>, FetchError> {
    let body = fetcher.fetch(adapter, query).await?;
    // Parse and extract synchronously; the document never crosses an await.
    let listings = {
        let doc = PageDocument::parse(&body);
        adapter.extract(&doc, query)
    };
    Ok(listings)
}
