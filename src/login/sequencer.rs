//! Login form sequencing
//!
//! Navigates to the sign-in page, waits for the identifier field, secret
//! field, and submit control to become clickable, fills credentials, and
//! submits. Each element lookup gets its own full wait window; on timeout
//! no submission is attempted and already-typed fields are left as-is.

use crate::config::{Credentials, SelectorSet, TimingSettings};
use crate::error::{LoginError, Result};
use chromiumoxide::element::Element;
use chromiumoxide::Page;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Drives a login form on an open page
pub struct LoginSequencer<'a> {
    selectors: &'a SelectorSet,
    timing: &'a TimingSettings,
}

impl<'a> LoginSequencer<'a> {
    /// Create a sequencer over the configured selectors and wait windows
    pub fn new(selectors: &'a SelectorSet, timing: &'a TimingSettings) -> Self {
        Self { selectors, timing }
    }

    /// Navigate to `url`, fill `credentials`, and activate the submit control.
    ///
    /// Fails with [`LoginError::Navigation`] if the page cannot be loaded,
    /// or [`LoginError::Timeout`] if a required element does not become
    /// ready within the configured window. No retries on either path.
    #[instrument(skip(self, page, credentials))]
    pub async fn submit(&self, page: &Page, url: &str, credentials: &Credentials) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(LoginError::InvalidUrl(format!(
                "URL must start with http:// or https://: {}",
                url
            ))
            .into());
        }

        info!("Navigating to sign-in page: {}", url);

        let nav_timeout = Duration::from_millis(self.timing.element_timeout_ms);
        tokio::time::timeout(nav_timeout, page.goto(url))
            .await
            .map_err(|_| LoginError::Navigation(format!("navigation timed out: {}", url)))?
            .map_err(|e| LoginError::Navigation(e.to_string()))?;

        let identifier_field = self
            .wait_for_clickable(page, &self.selectors.identifier_field)
            .await?;
        self.fill_field(
            page,
            &identifier_field,
            &self.selectors.identifier_field,
            &credentials.identifier,
        )
        .await?;

        let secret_field = self
            .wait_for_clickable(page, &self.selectors.secret_field)
            .await?;
        self.fill_field(
            page,
            &secret_field,
            &self.selectors.secret_field,
            credentials.secret(),
        )
        .await?;

        let submit = self
            .wait_for_clickable(page, &self.selectors.submit_control)
            .await?;
        submit.click().await.map_err(|e| {
            LoginError::ElementNotFound(format!(
                "failed to activate '{}': {}",
                self.selectors.submit_control, e
            ))
        })?;

        info!("Credentials submitted");
        Ok(())
    }

    /// Poll for an element until it is present, enabled, and visibly sized.
    ///
    /// Every call gets the full `element_timeout_ms` window; the windows of
    /// successive lookups are independent, not cumulative.
    async fn wait_for_clickable(&self, page: &Page, selector: &str) -> Result<Element> {
        let deadline = Instant::now() + Duration::from_millis(self.timing.element_timeout_ms);
        let interval = Duration::from_millis(self.timing.poll_interval_ms);

        debug!("Waiting for element: {}", selector);

        loop {
            if element_clickable(page, selector).await? {
                match page.find_element(selector).await {
                    Ok(element) => {
                        debug!("Element ready: {}", selector);
                        return Ok(element);
                    }
                    // Predicate raced a re-render; keep polling.
                    Err(e) => debug!("Lookup after predicate failed, retrying: {}", e),
                }
            }

            if Instant::now() >= deadline {
                warn!("Element never became clickable: {}", selector);
                return Err(LoginError::Timeout {
                    selector: selector.to_string(),
                    timeout_ms: self.timing.element_timeout_ms,
                }
                .into());
            }

            tokio::time::sleep(interval).await;
        }
    }

    /// Clear any pre-filled content, then type the value.
    async fn fill_field(
        &self,
        page: &Page,
        element: &Element,
        selector: &str,
        value: &str,
    ) -> Result<()> {
        clear_field(page, selector).await?;

        element
            .click()
            .await
            .map_err(|e| LoginError::ElementNotFound(format!("failed to focus '{selector}': {e}")))?;
        element
            .type_str(value)
            .await
            .map_err(|e| LoginError::ElementNotFound(format!("failed to type into '{selector}': {e}")))?;

        debug!("Filled field: {}", selector);
        Ok(())
    }
}

/// Presence + clickability predicate evaluated in the page
async fn element_clickable(page: &Page, selector: &str) -> Result<bool> {
    let script = format!(
        r#"
            (function() {{
                const el = document.querySelector('{}');
                if (!el || el.disabled) {{
                    return false;
                }}
                const rect = el.getBoundingClientRect();
                return rect.width > 0 && rect.height > 0;
            }})()
        "#,
        escape_selector(selector)
    );

    let ready = page
        .evaluate(script.as_str())
        .await
        .ok()
        .and_then(|v| v.into_value::<bool>().ok())
        .unwrap_or(false);

    Ok(ready)
}

/// Empty a field in-page so pre-filled defaults never leak into the submission
async fn clear_field(page: &Page, selector: &str) -> Result<()> {
    let script = format!(
        r#"
            (function() {{
                const el = document.querySelector('{}');
                if (el) {{
                    el.value = '';
                    el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                }}
            }})()
        "#,
        escape_selector(selector)
    );

    page.evaluate(script.as_str())
        .await
        .map_err(|e| crate::error::Error::cdp(e.to_string()))?;
    Ok(())
}

/// Escape a CSS selector for embedding in a single-quoted JS string
fn escape_selector(selector: &str) -> String {
    selector.replace('\\', "\\\\").replace('\'', "\\'")
}
