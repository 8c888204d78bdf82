//! Session bridging module
//!
//! Promotes an authenticated browser session into an independent HTTP
//! client session by copying the browser's cookie jar.

pub mod bridge;

pub use bridge::{CookieRecord, HttpSession, SessionBridge};
