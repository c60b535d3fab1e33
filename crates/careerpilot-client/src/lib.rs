//! HTTP collaborators for the CareerPilot client engine.
//!
//! Implements the `careerpilot-core` collaborator traits
//! ([`careerpilot_core::chat::ChatApi`] and
//! [`careerpilot_core::assessment::TestApi`]) over the CareerPilot REST
//! backend with `reqwest`.

pub mod config;
mod http;
mod http_chat_api;
mod http_test_api;

pub use config::ClientConfig;
pub use http_chat_api::HttpChatApi;
pub use http_test_api::HttpTestApi;
