//! Pipeline orchestration
//!
//! Runs the full sequence: launch browser, submit the login form, verify
//! the outcome, bridge cookies into an HTTP session, and tear down. The
//! browser is released exactly once on every exit path, including when a
//! downstream step fails.

use crate::browser::BrowserController;
use crate::config::Settings;
use crate::error::Result;
use crate::login::{LoginSequencer, Verifier};
use crate::session::SessionBridge;
use serde::Serialize;
use tracing::{info, instrument, warn};
use url::Url;

/// Outcome of a completed pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    /// Whether the post-login marker was found
    pub authenticated: bool,
    /// Number of cookies copied into the HTTP session (0 when not authenticated)
    pub bridged_cookies: usize,
}

/// Execute the login pipeline against the configured target.
///
/// Verification failure is a normal `authenticated: false` outcome, not an
/// error. Launch, navigation, and element failures propagate after the
/// browser has been released.
#[instrument(skip(settings))]
pub async fn run(settings: &Settings) -> Result<RunOutcome> {
    let controller = BrowserController::launch(&settings.browser).await?;

    let outcome = drive(&controller, settings).await;

    // Release exactly once on every path. On the failure path a close error
    // must not mask the original error.
    match controller.close().await {
        Ok(()) => {}
        Err(close_err) => {
            if outcome.is_ok() {
                return Err(close_err);
            }
            warn!("Browser close failed after earlier error: {}", close_err);
        }
    }

    outcome
}

/// The fallible middle of the pipeline, bracketed by launch and close
async fn drive(controller: &BrowserController, settings: &Settings) -> Result<RunOutcome> {
    let page = controller.new_page(&settings.browser).await?;

    let sequencer = LoginSequencer::new(&settings.selectors, &settings.timing);
    sequencer
        .submit(&page, &settings.login_url, &settings.credentials)
        .await?;

    let verifier = Verifier::new(&settings.selectors.marker, &settings.timing);
    let authenticated = verifier.wait_for_marker(&page).await?;

    if !authenticated {
        info!("Login verification failed: marker not found");
        return Ok(RunOutcome {
            authenticated: false,
            bridged_cookies: 0,
        });
    }

    info!("Login verified");

    // Settings are validated at load, so the URL parses.
    let base_url = Url::parse(&settings.login_url)
        .map_err(|e| crate::error::ConfigError::InvalidUrl(e.to_string()))?;
    let session = SessionBridge::bridge(&page, &base_url).await?;

    Ok(RunOutcome {
        authenticated: true,
        bridged_cookies: session.cookie_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_outcome_serializes() {
        let outcome = RunOutcome {
            authenticated: true,
            bridged_cookies: 3,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["authenticated"], true);
        assert_eq!(json["bridged_cookies"], 3);
    }

    #[test]
    fn test_failed_verification_outcome_bridges_nothing() {
        let outcome = RunOutcome {
            authenticated: false,
            bridged_cookies: 0,
        };
        assert!(!outcome.authenticated);
        assert_eq!(outcome.bridged_cookies, 0);
    }
}
