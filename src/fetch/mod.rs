//! Fetch execution for source adapters.
//!
//! Two strategies, selected by each adapter's [`FetchMode`]: a plain HTTP
//! GET for server-rendered catalogs, and an isolated headless-browser
//! session for catalogs that populate listings client-side. Both return the
//! page HTML; parsing happens above this layer.

pub mod browser;
pub mod http;

use crate::adapters::SourceAdapter;
use crate::query::QueryString;
use async_trait::async_trait;
use thiserror::Error;

/// How a source's search page is retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// One HTTP GET; the body is parsed as served.
    Static,
    /// Headless-browser navigation that executes page scripts before capture.
    Rendered,
}

/// A fetch failure, local to one adapter invocation.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("fetch failed ({0})")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("timed out after {waited_ms}ms waiting for {selector}")]
    MarkerTimeout { selector: String, waited_ms: u64 },
    #[error("chromium not found (set KITSCOUT_CHROMIUM_PATH or install chrome)")]
    BrowserUnavailable,
    #[error("rendered source declares no marker selector")]
    MissingMarker,
}

/// Executes one adapter's fetch strategy.
///
/// A trait so tests can substitute canned pages and failures without
/// touching the network or a browser.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Retrieve the search-page HTML for `adapter` and `query`.
    async fn fetch(
        &self,
        adapter: &dyn SourceAdapter,
        query: &QueryString,
    ) -> Result<String, FetchError>;
}

/// Production fetch executor.
pub struct Fetcher {
    http: http::HttpClient,
    render: browser::RenderBudget,
}

impl Fetcher {
    pub fn new() -> Self {
        Self {
            http: http::HttpClient::new(),
            render: browser::RenderBudget::default(),
        }
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetch for Fetcher {
    async fn fetch(
        &self,
        adapter: &dyn SourceAdapter,
        query: &QueryString,
    ) -> Result<String, FetchError> {
        let url = adapter.search_url(query);
        match adapter.fetch_mode() {
            FetchMode::Static => self.http.get_html(&url).await,
            FetchMode::Rendered => {
                // Without a marker the bounded wait would pass the instant
                // the page parses; refuse rather than capture too early.
                let marker = adapter.marker_selector().ok_or(FetchError::MissingMarker)?;
                browser::render_page(&url, marker, &self.render).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PageDocument;
    use crate::listing::Listing;

    /// Rendered source that forgot to declare a marker selector.
    struct MarkerlessSource;

    impl SourceAdapter for MarkerlessSource {
        fn name(&self) -> &str {
            "Markerless"
        }
        fn origin(&self) -> &str {
            "https://markerless.example"
        }
        fn fetch_mode(&self) -> FetchMode {
            FetchMode::Rendered
        }
        fn search_url(&self, query: &QueryString) -> String {
            format!("https://markerless.example/?q={}", query.as_str())
        }
        fn extract(&self, _doc: &PageDocument, _query: &QueryString) -> Vec<Listing> {
            Vec::new()
        }
    }

    #[tokio::test]
    async fn rendered_fetch_without_a_marker_is_refused() {
        let query = crate::query::SearchQuery::new(Some("MG"), "Sazabi")
            .normalize()
            .unwrap();
        // Fails before any browser session is attempted.
        let err = Fetcher::new()
            .fetch(&MarkerlessSource, &query)
            .await
            .expect_err("markerless rendered fetch must not proceed");
        assert!(matches!(err, FetchError::MissingMarker));
    }

    #[test]
    fn error_messages_surface_in_error_rows() {
        // These strings end up verbatim after the "ERROR: " prefix.
        assert_eq!(FetchError::Status(404).to_string(), "fetch failed (404)");
        let timeout = FetchError::MarkerTimeout {
            selector: "li.ss__result".into(),
            waited_ms: 15_000,
        };
        assert_eq!(
            timeout.to_string(),
            "timed out after 15000ms waiting for li.ss__result"
        );
    }
}
