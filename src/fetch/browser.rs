//! Rendered fetch via an isolated headless Chromium session.
//!
//! One browser process per adapter invocation — never pooled, never shared
//! across adapters or requests — torn down on both exit paths. After
//! navigation settles, the adapter's marker selector is polled under a
//! bounded deadline before the DOM is captured.

use super::FetchError;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::debug;

/// Per-invocation time limits for the rendered strategy.
#[derive(Debug, Clone)]
pub struct RenderBudget {
    /// Cap on the initial navigation.
    pub navigation_ms: u64,
    /// Cap on the wait for the marker selector.
    pub marker_ms: u64,
    /// Interval between marker polls.
    pub poll_ms: u64,
}

impl Default for RenderBudget {
    fn default() -> Self {
        Self {
            navigation_ms: 30_000,
            marker_ms: 15_000,
            poll_ms: 250,
        }
    }
}

/// Find the Chromium binary path.
pub fn find_chromium() -> Option<PathBuf> {
    // 1. KITSCOUT_CHROMIUM_PATH env
    if let Ok(p) = std::env::var("KITSCOUT_CHROMIUM_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. System PATH
    for name in ["google-chrome", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    // 3. Common macOS location
    if cfg!(target_os = "macos") {
        let common =
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// Navigate to `url`, wait for `marker` to appear, and capture the rendered
/// DOM as HTML. The session is torn down unconditionally before returning.
pub async fn render_page(
    url: &str,
    marker: &str,
    budget: &RenderBudget,
) -> Result<String, FetchError> {
    let chrome_path = find_chromium().ok_or(FetchError::BrowserUnavailable)?;

    let config = BrowserConfig::builder()
        .chrome_executable(chrome_path)
        .arg("--headless=new")
        .arg("--disable-gpu")
        .arg("--no-sandbox")
        .arg("--disable-dev-shm-usage")
        .arg("--disable-extensions")
        .arg("--disable-background-networking")
        .build()
        .map_err(FetchError::Navigation)?;

    let (mut browser, mut handler) = Browser::launch(config)
        .await
        .map_err(|e| FetchError::Navigation(format!("failed to launch chromium: {e}")))?;

    let events = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            let _ = event;
        }
    });

    let result = drive(&browser, url, marker, budget).await;

    // Teardown runs on both exit paths; a failed drive must not leak the
    // browser process.
    let _ = browser.close().await;
    let _ = browser.wait().await;
    events.abort();

    result
}

async fn drive(
    browser: &Browser,
    url: &str,
    marker: &str,
    budget: &RenderBudget,
) -> Result<String, FetchError> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| FetchError::Navigation(format!("failed to open page: {e}")))?;

    match tokio::time::timeout(Duration::from_millis(budget.navigation_ms), page.goto(url)).await
    {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => return Err(FetchError::Navigation(e.to_string())),
        Err(_) => {
            return Err(FetchError::Navigation(format!(
                "no response after {}ms",
                budget.navigation_ms
            )))
        }
    }

    // Let in-flight requests settle before watching for the marker.
    let _ = page.wait_for_navigation().await;
    wait_for_marker(&page, marker, budget).await?;

    let html: String = page
        .evaluate("document.documentElement.outerHTML")
        .await
        .map_err(|e| FetchError::Navigation(format!("capture failed: {e}")))?
        .into_value()
        .map_err(|e| FetchError::Navigation(format!("capture failed: {e:?}")))?;

    debug!(url, bytes = html.len(), "rendered page captured");

    let _ = page.close().await;
    Ok(html)
}

async fn wait_for_marker(
    page: &Page,
    marker: &str,
    budget: &RenderBudget,
) -> Result<(), FetchError> {
    let script = format!("document.querySelector({marker:?}) !== null");
    let started = Instant::now();

    loop {
        let found = page
            .evaluate(script.as_str())
            .await
            .ok()
            .and_then(|result| result.into_value::<bool>().ok())
            .unwrap_or(false);
        if found {
            return Ok(());
        }
        if started.elapsed() >= Duration::from_millis(budget.marker_ms) {
            return Err(FetchError::MarkerTimeout {
                selector: marker.to_string(),
                waited_ms: budget.marker_ms,
            });
        }
        tokio::time::sleep(Duration::from_millis(budget.poll_ms)).await;
    }
}
