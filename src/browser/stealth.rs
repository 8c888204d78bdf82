//! Automation-marker suppression
//!
//! Pages driven over CDP expose `navigator.webdriver = true`, which login
//! pages commonly check. This shim hides that one signal on every new
//! document; broader anti-detection is out of scope.

use crate::error::{Error, Result};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::Page;
use tracing::{debug, instrument};

const HIDE_WEBDRIVER: &str = r#"
    Object.defineProperty(navigator, 'webdriver', {
        get: () => undefined,
        configurable: true
    });
"#;

/// Suppress `navigator.webdriver` on all documents loaded by this page
#[instrument(skip(page))]
pub async fn suppress_automation_markers(page: &Page) -> Result<()> {
    debug!("Suppressing automation markers");

    let params = AddScriptToEvaluateOnNewDocumentParams::builder()
        .source(HIDE_WEBDRIVER)
        .build()
        .map_err(|e| Error::cdp(format!("Failed to build script params: {}", e)))?;

    page.execute(params)
        .await
        .map_err(|e| Error::cdp(format!("Failed to inject script: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shim_targets_webdriver_only() {
        // One flag is sanctioned; the shim must not grow fingerprint mocks.
        assert!(HIDE_WEBDRIVER.contains("navigator, 'webdriver'"));
        assert!(!HIDE_WEBDRIVER.contains("plugins"));
        assert!(!HIDE_WEBDRIVER.contains("WebGL"));
    }
}
