//! Browser automation module
//!
//! This module provides browser lifecycle control through ChromiumOxide:
//! launching a Chromium instance with the configured capability flags,
//! handing out pages, and guaranteeing exactly-once shutdown.

pub mod controller;
pub mod stealth;

pub use controller::BrowserController;
pub use stealth::suppress_automation_markers;
