//! Post-login verification
//!
//! After submission, the rendered document is polled for a configured
//! marker element (e.g. a dashboard container). Absence is a normal
//! negative outcome, never an error: the check returns `bool`.
//!
//! Polling the marker up to a timeout replaces a blind settle sleep; the
//! check succeeds as soon as client-side rendering has produced the marker
//! and fails closed when the window expires.

use crate::config::TimingSettings;
use crate::error::Result;
use chromiumoxide::Page;
use scraper::{Html, Selector};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, instrument};

/// Test whether `selector` matches anywhere in `html`.
///
/// Pure function of the document content: same input, same answer,
/// regardless of how often it is called. An unparseable selector matches
/// nothing (configuration validates selectors up front).
pub fn marker_present(html: &str, selector: &str) -> bool {
    let Ok(selector) = Selector::parse(selector) else {
        return false;
    };
    let document = Html::parse_document(html);
    document.select(&selector).next().is_some()
}

/// Polls the live document for the authenticated-state marker
pub struct Verifier<'a> {
    marker: &'a str,
    timing: &'a TimingSettings,
}

impl<'a> Verifier<'a> {
    /// Create a verifier for the given marker selector and wait windows
    pub fn new(marker: &'a str, timing: &'a TimingSettings) -> Self {
        Self { marker, timing }
    }

    /// Poll the rendered document until the marker appears or the
    /// verification window expires.
    ///
    /// Returns `Ok(true)` as soon as the marker is present, `Ok(false)` on
    /// expiry. Errors surface only when the document cannot be fetched at
    /// all (dead page), not when the marker is merely absent.
    #[instrument(skip(self, page))]
    pub async fn wait_for_marker(&self, page: &Page) -> Result<bool> {
        let deadline = Instant::now() + Duration::from_millis(self.timing.verify_timeout_ms);
        let interval = Duration::from_millis(self.timing.poll_interval_ms);

        debug!("Polling for marker: {}", self.marker);

        loop {
            let html = page
                .content()
                .await
                .map_err(|e| crate::error::Error::cdp(e.to_string()))?;

            if marker_present(&html, self.marker) {
                info!("Marker present: {}", self.marker);
                return Ok(true);
            }

            if Instant::now() >= deadline {
                info!(
                    "Marker absent after {}ms: {}",
                    self.timing.verify_timeout_ms, self.marker
                );
                return Ok(false);
            }

            tokio::time::sleep(interval).await;
        }
    }
}
