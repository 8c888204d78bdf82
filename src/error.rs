//! Error types for authbridge
//!
//! This module provides the error type hierarchy using `thiserror`
//! for proper error handling across all components.

use thiserror::Error;

/// The main error type for authbridge operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Browser lifecycle errors
    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    /// Login sequencing errors
    #[error("Login error: {0}")]
    Login(#[from] LoginError),

    /// HTTP client errors (session bridge)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ChromiumOxide errors
    #[error("CDP error: {0}")]
    Cdp(String),
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has an invalid value
    #[error("Invalid value for {name}: {reason}")]
    InvalidVar {
        /// Variable name
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// CSS selector failed to parse
    #[error("Invalid CSS selector '{0}'")]
    InvalidSelector(String),

    /// Target URL failed to parse or uses an unsupported scheme
    #[error("Invalid target URL: {0}")]
    InvalidUrl(String),
}

/// Browser lifecycle and control errors
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Failed to launch browser
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Browser configuration error
    #[error("Invalid browser configuration: {0}")]
    ConfigError(String),

    /// Failed to create new page/tab
    #[error("Failed to create page: {0}")]
    PageCreationFailed(String),

    /// Failed to close the browser process
    #[error("Failed to close browser: {0}")]
    CloseFailed(String),
}

/// Errors raised while driving the login form
#[derive(Error, Debug)]
pub enum LoginError {
    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Navigation to the login page failed
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// Element is structurally absent or the lookup itself failed
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Element did not become ready within the wait window
    #[error("Timed out after {timeout_ms}ms waiting for '{selector}'")]
    Timeout {
        /// Selector that never became ready
        selector: String,
        /// Configured wait window
        timeout_ms: u64,
    },
}

/// Result type alias for authbridge operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a CDP error from a string
    pub fn cdp<S: Into<String>>(msg: S) -> Self {
        Error::Cdp(msg.into())
    }
}

/// Convert chromiumoxide errors
impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Browser(BrowserError::LaunchFailed("no chrome".to_string()));
        assert!(err.to_string().contains("Failed to launch browser"));
        assert!(err.to_string().contains("no chrome"));
    }

    #[test]
    fn test_config_error_missing_var() {
        let err = ConfigError::MissingVar("AUTHBRIDGE_LOGIN_URL".to_string());
        assert!(err.to_string().contains("AUTHBRIDGE_LOGIN_URL"));
    }

    #[test]
    fn test_login_timeout_error() {
        let err = LoginError::Timeout {
            selector: "input[name='username']".to_string(),
            timeout_ms: 15000,
        };
        assert!(err.to_string().contains("15000ms"));
        assert!(err.to_string().contains("input[name='username']"));
    }

    #[test]
    fn test_element_not_found_error() {
        let err = LoginError::ElementNotFound("button[type='submit']".to_string());
        assert!(err.to_string().contains("Element not found"));
    }

    #[test]
    fn test_error_from_config() {
        let err: Error = ConfigError::InvalidSelector("[[".to_string()).into();
        assert!(err.to_string().contains("Invalid CSS selector"));
    }
}
