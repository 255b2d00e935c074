//! Headless-browser fetch for sources that only exist after script
//! execution.
//!
//! The browser and its event handler task are torn down on every exit path;
//! a leaked Chromium process would outlive the whole batch.

use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use futures::StreamExt;
use tokio::time::{Instant, sleep};
use tracing::debug;

use crate::error::ScrapeError;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Loads `url` in a headless browser, waits until `marker` matches an
/// element in the rendered DOM (bounded by `timeout`), and returns the
/// rendered HTML.
///
/// A missing browser binary surfaces as [`ScrapeError::RendererUnavailable`]
/// so callers can degrade to an empty menu instead of failing the batch;
/// a marker that never appears is a transient [`ScrapeError::RenderTimeout`].
pub async fn fetch_rendered(
    url: &str,
    marker: &str,
    timeout: Duration,
) -> Result<String, ScrapeError> {
    let config = BrowserConfig::builder()
        .build()
        .map_err(ScrapeError::RendererUnavailable)?;

    let (mut browser, mut handler) = Browser::launch(config)
        .await
        .map_err(|e| ScrapeError::RendererUnavailable(e.to_string()))?;

    let driver = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    let result = render_page(&browser, url, marker, timeout).await;

    if let Err(e) = browser.close().await {
        debug!("browser close failed: {e}");
    }
    let _ = browser.wait().await;
    driver.abort();

    result
}

async fn render_page(
    browser: &Browser,
    url: &str,
    marker: &str,
    timeout: Duration,
) -> Result<String, ScrapeError> {
    let page = browser.new_page(url).await.map_err(cdp_err)?;
    let deadline = Instant::now() + timeout;

    loop {
        if page.find_element(marker).await.is_ok() {
            break;
        }
        if Instant::now() >= deadline {
            return Err(ScrapeError::RenderTimeout(marker.to_string()));
        }
        sleep(POLL_INTERVAL).await;
    }

    page.content().await.map_err(cdp_err)
}

fn cdp_err(e: CdpError) -> ScrapeError {
    ScrapeError::Renderer(e.to_string())
}
