//! Pipeline component tests
//!
//! These tests verify configuration, marker verification, and the cookie
//! bridge through the public API. Full end-to-end tests require a running
//! Chrome/Chromium instance and a reachable login page.

use authbridge::config::{
    BrowserSettings, Credentials, SelectorSet, Settings, TimingSettings,
};
use authbridge::login::marker_present;
use authbridge::session::{CookieRecord, SessionBridge};
use url::Url;

fn settings_for(url: &str) -> Settings {
    Settings {
        login_url: url.to_string(),
        credentials: Credentials::new("user", "hunter2"),
        browser: BrowserSettings::default(),
        selectors: SelectorSet::default(),
        timing: TimingSettings::default(),
    }
}

#[test]
fn test_settings_accept_https_target() {
    assert!(settings_for("https://dalalii.example/authentication/sign-in")
        .validate()
        .is_ok());
}

#[test]
fn test_settings_reject_non_http_target() {
    assert!(settings_for("file:///etc/passwd").validate().is_err());
    assert!(settings_for("javascript:alert(1)").validate().is_err());
}

#[test]
fn test_settings_reject_broken_selector_override() {
    let mut settings = settings_for("https://example.com/login");
    settings.selectors.submit_control = ":::nope".to_string();
    assert!(settings.validate().is_err());
}

#[test]
fn test_credentials_never_leak_via_debug() {
    let settings = settings_for("https://example.com/login");
    let debug = format!("{:?}", settings);
    assert!(!debug.contains("hunter2"));
    assert!(debug.contains("<redacted>"));
}

#[test]
fn test_marker_detection_tracks_document_content() {
    let before = r#"<form><input name="username"></form>"#;
    let after = r#"<div class="dashboard">Welcome</div>"#;

    assert!(!marker_present(before, ".dashboard"));
    assert!(marker_present(after, ".dashboard"));

    // Same document, same answer, regardless of call order or count.
    assert!(marker_present(after, ".dashboard"));
    assert!(!marker_present(before, ".dashboard"));
}

#[test]
fn test_marker_uses_configured_selector() {
    let html = r#"<main id="home-feed"></main>"#;
    assert!(marker_present(html, "#home-feed"));
    assert!(!marker_present(html, ".dashboard"));
}

#[tokio::test]
async fn test_bridge_empty_set_is_valid_session() {
    let base = Url::parse("https://example.com/").unwrap();
    let session = SessionBridge::build_session(&[], &base).unwrap();
    assert_eq!(session.cookie_count(), 0);
}

#[tokio::test]
async fn test_bridge_preserves_distinct_cookies() {
    let base = Url::parse("https://example.com/").unwrap();
    let records = vec![
        CookieRecord {
            name: "session".to_string(),
            value: "s-1".to_string(),
            domain: "example.com".to_string(),
            path: "/".to_string(),
            secure: true,
            http_only: true,
        },
        CookieRecord {
            name: "remember".to_string(),
            value: "r-2".to_string(),
            domain: ".example.com".to_string(),
            path: "/".to_string(),
            secure: false,
            http_only: false,
        },
    ];

    let session = SessionBridge::build_session(&records, &base).unwrap();
    assert_eq!(session.cookie_count(), 2);

    use reqwest::cookie::CookieStore;
    let header = session.jar().cookies(&base).expect("cookies for origin");
    let header = header.to_str().unwrap().to_string();
    assert!(header.contains("session=s-1"));
    assert!(header.contains("remember=r-2"));
}

#[test]
fn test_timing_defaults_are_bounded_polling_not_sleeps() {
    let timing = TimingSettings::default();
    // Poll cadence must be much finer than the windows it polls within.
    assert!(timing.poll_interval_ms < timing.element_timeout_ms);
    assert!(timing.poll_interval_ms < timing.verify_timeout_ms);
}
