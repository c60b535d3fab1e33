//! CareerPilot client core.
//!
//! The state engine behind the CareerPilot career-assistant client: chat
//! session lifecycle, conversation transcripts, and the skill-test-taking
//! flow. All backend access goes through the [`chat::ChatApi`] and
//! [`assessment::TestApi`] collaborator traits; transport lives in the
//! `careerpilot-client` crate.
//!
//! The engine assumes a single logical thread of interaction (UI events and
//! network completions). Controllers use `tokio::sync::RwLock` internally
//! and never hold a guard across a collaborator call, so every network
//! round-trip is a clean suspension point and mutual exclusion is carried
//! by explicit busy flags and lifecycle phases.

pub mod assessment;
pub mod chat;
pub mod error;

// Re-export common error type
pub use error::{CareerError, Result};
