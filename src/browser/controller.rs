//! Browser lifecycle management
//!
//! This module handles browser launch, page creation, and shutdown.

use crate::config::BrowserSettings;
use crate::error::{BrowserError, Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig as CdpBrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Exclusively-owned handle to a live browser process.
///
/// The controller owns the CDP event handler task alongside the process
/// itself. [`BrowserController::close`] consumes the controller, so release
/// happens at most once; dropping it without closing kills the child
/// process through chromiumoxide's own cleanup.
pub struct BrowserController {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserController {
    /// Launch a browser with the given capability flags.
    ///
    /// Spawns an external, possibly visible, Chromium process. Launch
    /// failure (missing executable, driver mismatch) is unrecoverable and
    /// propagates without retry.
    #[instrument(skip(settings))]
    pub async fn launch(settings: &BrowserSettings) -> Result<Self> {
        info!(
            headless = settings.headless,
            maximized = settings.maximize_window,
            "Launching browser"
        );

        let mut builder = CdpBrowserConfig::builder();

        if !settings.headless {
            builder = builder.with_head();
        }

        if settings.maximize_window {
            builder = builder.arg("--start-maximized");
        }

        // The one sanctioned anti-detection measure: drop the Blink-side
        // automation signal. The matching JS shim is injected per page.
        if settings.disable_automation_markers {
            builder = builder.arg("--disable-blink-features=AutomationControlled");
        }

        if !settings.sandbox {
            builder = builder.arg("--no-sandbox");
        }

        if let Some(ref path) = settings.chrome_path {
            builder = builder.chrome_executable(path);
        }

        for arg in &settings.extra_args {
            builder = builder.arg(arg);
        }

        let cdp_config = builder
            .build()
            .map_err(|e| BrowserError::ConfigError(e.to_string()))?;

        let (browser, mut handler) = Browser::launch(cdp_config)
            .await
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    warn!("Browser handler event error");
                    break;
                }
            }
            debug!("Browser handler finished");
        });

        info!("Browser launched successfully");

        Ok(Self {
            browser,
            handler: handler_task,
        })
    }

    /// Create a new page, applying the automation-marker shim when enabled.
    #[instrument(skip(self, settings))]
    pub async fn new_page(&self, settings: &BrowserSettings) -> Result<Page> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::PageCreationFailed(e.to_string()))?;

        if settings.disable_automation_markers {
            super::stealth::suppress_automation_markers(&page).await?;
        }

        debug!("Created new page");
        Ok(page)
    }

    /// Close the browser and join the handler task.
    ///
    /// Consumes the controller so release cannot happen twice.
    #[instrument(skip(self))]
    pub async fn close(mut self) -> Result<()> {
        info!("Closing browser");

        self.browser
            .close()
            .await
            .map_err(|e| Error::Browser(BrowserError::CloseFailed(e.to_string())))?;

        let _ = tokio::time::timeout(Duration::from_secs(5), self.handler).await;

        info!("Browser closed");
        Ok(())
    }
}
