//! Runtime configuration
//!
//! All tunable values live in an explicit [`Settings`] struct passed to each
//! component at construction. Values are sourced from `AUTHBRIDGE_*`
//! environment variables; credentials are never hard-coded and only ever
//! come from the environment.

use crate::error::ConfigError;
use scraper::Selector;
use std::env;
use std::fmt;
use url::Url;

/// Environment variable prefix for all settings
pub const ENV_PREFIX: &str = "AUTHBRIDGE_";

/// Login credentials: the account identifier and its secret.
///
/// The `Debug` impl redacts the secret so settings can be logged safely.
#[derive(Clone)]
pub struct Credentials {
    /// Account identifier (username, email, phone number)
    pub identifier: String,
    secret: String,
}

impl Credentials {
    /// Create credentials from an identifier and secret
    pub fn new<I: Into<String>, S: Into<String>>(identifier: I, secret: S) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    /// The secret value
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Browser launch flags
#[derive(Debug, Clone)]
pub struct BrowserSettings {
    /// Run without a visible window (default: false, the login is meant to be watched)
    pub headless: bool,
    /// Open the window maximized (default: true)
    pub maximize_window: bool,
    /// Suppress automation markers such as `navigator.webdriver` (default: true)
    pub disable_automation_markers: bool,
    /// Enable the Chromium sandbox (default: true)
    pub sandbox: bool,
    /// Path to Chrome/Chromium executable (None = auto-detect)
    pub chrome_path: Option<String>,
    /// Additional Chrome arguments
    pub extra_args: Vec<String>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: false,
            maximize_window: true,
            disable_automation_markers: true,
            sandbox: true,
            chrome_path: None,
            extra_args: Vec::new(),
        }
    }
}

/// CSS selectors locating the login form and the post-login marker.
///
/// The real target site's structure is deployment-specific, so every
/// selector is configuration with a conventional default rather than a
/// fixed constant.
#[derive(Debug, Clone)]
pub struct SelectorSet {
    /// Identifier (username) input field
    pub identifier_field: String,
    /// Secret (password) input field
    pub secret_field: String,
    /// Form submit control
    pub submit_control: String,
    /// Element whose presence signals an authenticated page
    pub marker: String,
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            identifier_field: "input[name='username']".to_string(),
            secret_field: "input[name='password']".to_string(),
            submit_control: "button[type='submit']".to_string(),
            marker: ".dashboard".to_string(),
        }
    }
}

impl SelectorSet {
    /// Validate that every selector parses as CSS
    pub fn validate(&self) -> Result<(), ConfigError> {
        for selector in [
            &self.identifier_field,
            &self.secret_field,
            &self.submit_control,
            &self.marker,
        ] {
            if Selector::parse(selector).is_err() {
                return Err(ConfigError::InvalidSelector(selector.clone()));
            }
        }
        Ok(())
    }
}

/// Wait windows and poll cadence
#[derive(Debug, Clone)]
pub struct TimingSettings {
    /// Per-element wait window in milliseconds (default: 15000)
    pub element_timeout_ms: u64,
    /// Poll interval for element/marker readiness in milliseconds (default: 250)
    pub poll_interval_ms: u64,
    /// Verification window for the post-login marker in milliseconds (default: 10000)
    pub verify_timeout_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            element_timeout_ms: 15000,
            poll_interval_ms: 250,
            verify_timeout_ms: 10000,
        }
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone)]
pub struct Settings {
    /// Sign-in page URL
    pub login_url: String,
    /// Account credentials
    pub credentials: Credentials,
    /// Browser launch flags
    pub browser: BrowserSettings,
    /// Form and marker selectors
    pub selectors: SelectorSet,
    /// Wait windows
    pub timing: TimingSettings,
}

impl Settings {
    /// Load settings from `AUTHBRIDGE_*` environment variables.
    ///
    /// `AUTHBRIDGE_LOGIN_URL`, `AUTHBRIDGE_USERNAME`, and
    /// `AUTHBRIDGE_PASSWORD` are required; everything else falls back to
    /// defaults. The result is validated before it is returned.
    pub fn from_env() -> Result<Self, ConfigError> {
        let login_url = required_var("LOGIN_URL")?;
        let credentials = Credentials::new(required_var("USERNAME")?, required_var("PASSWORD")?);

        let defaults = SelectorSet::default();
        let selectors = SelectorSet {
            identifier_field: optional_var("USERNAME_SELECTOR")
                .unwrap_or(defaults.identifier_field),
            secret_field: optional_var("PASSWORD_SELECTOR").unwrap_or(defaults.secret_field),
            submit_control: optional_var("SUBMIT_SELECTOR").unwrap_or(defaults.submit_control),
            marker: optional_var("MARKER_SELECTOR").unwrap_or(defaults.marker),
        };

        let timing_defaults = TimingSettings::default();
        let timing = TimingSettings {
            element_timeout_ms: parsed_var("ELEMENT_TIMEOUT_MS")?
                .unwrap_or(timing_defaults.element_timeout_ms),
            poll_interval_ms: parsed_var("POLL_INTERVAL_MS")?
                .unwrap_or(timing_defaults.poll_interval_ms),
            verify_timeout_ms: parsed_var("VERIFY_TIMEOUT_MS")?
                .unwrap_or(timing_defaults.verify_timeout_ms),
        };

        let browser_defaults = BrowserSettings::default();
        let browser = BrowserSettings {
            headless: bool_var("HEADLESS")?.unwrap_or(browser_defaults.headless),
            maximize_window: bool_var("MAXIMIZE")?.unwrap_or(browser_defaults.maximize_window),
            disable_automation_markers: bool_var("DISABLE_AUTOMATION_MARKERS")?
                .unwrap_or(browser_defaults.disable_automation_markers),
            sandbox: bool_var("SANDBOX")?.unwrap_or(browser_defaults.sandbox),
            chrome_path: optional_var("CHROME_PATH"),
            extra_args: Vec::new(),
        };

        let settings = Self {
            login_url,
            credentials,
            browser,
            selectors,
            timing,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the target URL and every selector
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.login_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", self.login_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }
        self.selectors.validate()?;

        if self.timing.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidVar {
                name: format!("{ENV_PREFIX}POLL_INTERVAL_MS"),
                reason: "poll interval must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    let full = format!("{ENV_PREFIX}{name}");
    match env::var(&full) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(full)),
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}{name}"))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

fn parsed_var(name: &str) -> Result<Option<u64>, ConfigError> {
    match optional_var(name) {
        Some(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidVar {
                name: format!("{ENV_PREFIX}{name}"),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

fn bool_var(name: &str) -> Result<Option<bool>, ConfigError> {
    match optional_var(name) {
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(Some(true)),
            "0" | "false" | "no" => Ok(Some(false)),
            other => Err(ConfigError::InvalidVar {
                name: format!("{ENV_PREFIX}{name}"),
                reason: format!("expected a boolean, got '{other}'"),
            }),
        },
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> Settings {
        Settings {
            login_url: "https://example.com/sign-in".to_string(),
            credentials: Credentials::new("784090148", "hunter2"),
            browser: BrowserSettings::default(),
            selectors: SelectorSet::default(),
            timing: TimingSettings::default(),
        }
    }

    #[test]
    fn test_selector_set_default() {
        let selectors = SelectorSet::default();
        assert_eq!(selectors.identifier_field, "input[name='username']");
        assert_eq!(selectors.secret_field, "input[name='password']");
        assert_eq!(selectors.submit_control, "button[type='submit']");
        assert!(selectors.validate().is_ok());
    }

    #[test]
    fn test_selector_set_rejects_invalid_css() {
        let selectors = SelectorSet {
            marker: "[[not-css".to_string(),
            ..SelectorSet::default()
        };
        let err = selectors.validate().unwrap_err();
        assert!(err.to_string().contains("[[not-css"));
    }

    #[test]
    fn test_timing_defaults() {
        let timing = TimingSettings::default();
        assert_eq!(timing.element_timeout_ms, 15000);
        assert_eq!(timing.poll_interval_ms, 250);
        assert_eq!(timing.verify_timeout_ms, 10000);
    }

    #[test]
    fn test_browser_settings_default() {
        let browser = BrowserSettings::default();
        assert!(!browser.headless);
        assert!(browser.maximize_window);
        assert!(browser.disable_automation_markers);
        assert!(browser.sandbox);
        assert!(browser.chrome_path.is_none());
    }

    #[test]
    fn test_settings_validate_ok() {
        assert!(test_settings().validate().is_ok());
    }

    #[test]
    fn test_settings_rejects_bad_scheme() {
        let mut settings = test_settings();
        settings.login_url = "ftp://example.com".to_string();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_settings_rejects_unparseable_url() {
        let mut settings = test_settings();
        settings.login_url = "not a url".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_rejects_zero_poll_interval() {
        let mut settings = test_settings();
        settings.timing.poll_interval_ms = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("user", "top-secret");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("user"));
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("top-secret"));
    }

    #[test]
    fn test_missing_required_var() {
        // The full environment is not set up in unit tests, so at least one
        // of the required variables must be reported as missing.
        std::env::remove_var("AUTHBRIDGE_LOGIN_URL");
        let err = required_var("LOGIN_URL").unwrap_err();
        assert!(err.to_string().contains("AUTHBRIDGE_LOGIN_URL"));
    }
}
