//! Conversation message types.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message typed by the user.
    User,
    /// Message produced by the assistant (or a client-side fallback).
    Agent,
}

/// A single message in a session transcript.
///
/// Messages are append-only from the client's perspective; insertion order
/// is display order, and each message belongs to exactly one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message (possibly markdown).
    pub content: String,
    /// Which backend agent produced this message, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    /// An explanatory reasoning trace attached by the backend agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl ConversationMessage {
    /// Creates a user message stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            agent_name: None,
            reasoning: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Creates an agent message stamped with the current time.
    pub fn agent(
        content: impl Into<String>,
        agent_name: Option<String>,
        reasoning: Option<String>,
    ) -> Self {
        Self {
            role: MessageRole::Agent,
            content: content.into(),
            agent_name,
            reasoning,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
