//! Login automation module
//!
//! Drives the sign-in form (navigate, fill, submit) and verifies the
//! outcome by inspecting the rendered document for a marker element.

pub mod sequencer;
pub mod verifier;

pub use sequencer::LoginSequencer;
pub use verifier::{marker_present, Verifier};
