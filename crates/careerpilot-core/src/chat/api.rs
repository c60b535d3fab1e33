//! Chat collaborator trait.
//!
//! Defines the interface the session and conversation controllers use to
//! talk to the backend, decoupling the engine from the transport
//! (HTTP in production, in-memory mocks in tests).

use super::message::ConversationMessage;
use super::model::ChatSession;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The backend's reply to one chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentReply {
    /// The assistant's answer text (possibly markdown).
    pub response: String,
    /// Name of the agent that handled the message, when reported.
    #[serde(default)]
    pub agent: Option<String>,
    /// Explanatory reasoning trace, when reported.
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// An abstract chat backend.
///
/// Implementations should not retry internally; the controllers treat every
/// call as a single suspension point that may fail with a recoverable error.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Lists all chat sessions known to the backend.
    async fn list_sessions(&self) -> Result<Vec<ChatSession>>;

    /// Creates a new session and returns it.
    async fn create_session(&self) -> Result<ChatSession>;

    /// Notifies the backend that `session_id` is now the active session.
    async fn activate_session(&self, session_id: &str) -> Result<()>;

    /// Deletes a session.
    async fn delete_session(&self, session_id: &str) -> Result<()>;

    /// Sends one user message in the context of a session.
    ///
    /// `history` is the transcript of the originating session at issue
    /// time, including the message being sent.
    async fn send_message(
        &self,
        session_id: &str,
        text: &str,
        history: &[ConversationMessage],
    ) -> Result<AgentReply>;
}
