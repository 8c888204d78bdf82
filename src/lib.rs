//! authbridge - Browser-Driven Login Automation with Cookie Hand-Off
//!
//! This crate drives a real browser to a sign-in page, fills credentials,
//! submits the form, verifies success by inspecting the rendered HTML, and
//! promotes the authenticated browser session into a plain HTTP client
//! session via cookie transfer.
//!
//! # Architecture
//!
//! ```text
//! Settings ──▶ Browser Controller (CDP) ──▶ Login Sequencer
//!                      │                         │
//!                      ▼                         ▼
//!               guaranteed teardown          Verifier (marker poll)
//!                                                │
//!                                                ▼
//!                                         Session Bridge ──▶ reqwest Client
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use authbridge::config::Settings;
//! use authbridge::runner;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_env()?;
//!     let outcome = runner::run(&settings).await?;
//!
//!     println!("authenticated: {}", outcome.authenticated);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod browser;
pub mod config;
pub mod error;
pub mod login;
pub mod runner;
pub mod session;

// Re-exports for convenience
pub use browser::BrowserController;
pub use config::{Credentials, SelectorSet, Settings};
pub use error::{Error, Result};
pub use login::{LoginSequencer, Verifier};
pub use runner::{run, RunOutcome};
pub use session::{CookieRecord, HttpSession, SessionBridge};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
