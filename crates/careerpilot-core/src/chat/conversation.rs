//! Conversation transcript management.

use super::api::ChatApi;
use super::message::{ConversationMessage, MessageRole};
use crate::error::{CareerError, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Greeting shown in every fresh transcript before the user has typed.
pub const GREETING: &str = "Hello! I am CareerPilot AI. How can I help you today?";

/// Transcript fallback appended when a send fails after the user message
/// has already been displayed.
pub const SEND_FALLBACK: &str = "Sorry, something went wrong. Please check your API key.";

/// Owns the per-session transcripts and the in-flight send state.
///
/// Each session's transcript is an ordered, append-only message sequence.
/// At most one send may be in flight per session; the originating session id
/// is captured when a send is issued, and the reply is applied to that
/// session's transcript regardless of which session is active when it
/// arrives. If the transcript was dropped mid-flight (session deleted), the
/// reply is discarded rather than misapplied.
pub struct ConversationController {
    api: Arc<dyn ChatApi>,
    state: RwLock<ConversationState>,
}

#[derive(Default)]
struct ConversationState {
    transcripts: HashMap<String, Vec<ConversationMessage>>,
    busy: HashSet<String>,
}

impl ConversationController {
    pub fn new(api: Arc<dyn ChatApi>) -> Self {
        Self {
            api,
            state: RwLock::new(ConversationState::default()),
        }
    }

    /// Seeds an empty transcript with the standard greeting.
    ///
    /// No-op if the session already has messages.
    pub async fn ensure_greeting(&self, session_id: &str) {
        let mut state = self.state.write().await;
        let transcript = state
            .transcripts
            .entry(session_id.to_string())
            .or_default();
        if transcript.is_empty() {
            transcript.push(ConversationMessage::agent(GREETING, None, None));
        }
    }

    /// Returns a copy of the session's transcript, in display order.
    pub async fn transcript(&self, session_id: &str) -> Vec<ConversationMessage> {
        self.state
            .read()
            .await
            .transcripts
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    /// True while a send is in flight for the session.
    pub async fn is_busy(&self, session_id: &str) -> bool {
        self.state.read().await.busy.contains(session_id)
    }

    /// Drops the transcript and busy state for a deleted session.
    ///
    /// A reply still in flight for the session will be discarded when it
    /// arrives.
    pub async fn forget_session(&self, session_id: &str) {
        let mut state = self.state.write().await;
        state.transcripts.remove(session_id);
        state.busy.remove(session_id);
    }

    /// Sends one user message and appends the agent's reply.
    ///
    /// The user message is appended optimistically before the backend call.
    /// On backend failure a single agent-role fallback message is appended
    /// so the failure stays visible in the transcript, and the error is
    /// returned for the caller to surface. The busy flag clears on every
    /// path.
    ///
    /// # Errors
    ///
    /// - `Validation` for empty or whitespace-only text; no side effects.
    /// - `Busy` while a send is already in flight for this session; the
    ///   transcript is unchanged by the rejected call.
    /// - `NotFound` if the session was forgotten while the send was in
    ///   flight; the reply is discarded.
    /// - `Remote` if the backend call failed.
    pub async fn send_message(
        &self,
        session_id: &str,
        text: &str,
    ) -> Result<ConversationMessage> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CareerError::validation("message must not be empty"));
        }

        // Optimistic append + busy flag, then release the lock for the
        // duration of the backend call.
        let history = {
            let mut state = self.state.write().await;
            if state.busy.contains(session_id) {
                return Err(CareerError::busy(session_id));
            }
            let transcript = state
                .transcripts
                .entry(session_id.to_string())
                .or_default();
            transcript.push(ConversationMessage::user(text));
            let history = transcript.clone();
            state.busy.insert(session_id.to_string());
            history
        };

        let reply = self.api.send_message(session_id, text, &history).await;

        let mut state = self.state.write().await;
        state.busy.remove(session_id);

        let Some(transcript) = state.transcripts.get_mut(session_id) else {
            // Session was deleted while the send was in flight; the reply
            // belongs to no live transcript.
            tracing::debug!(
                target: "careerpilot::chat",
                "Dropping in-flight reply for forgotten session '{}'",
                session_id
            );
            return Err(CareerError::not_found("session", session_id));
        };

        match reply {
            Ok(reply) => {
                let message =
                    ConversationMessage::agent(reply.response, reply.agent, reply.reasoning);
                transcript.push(message.clone());
                Ok(message)
            }
            Err(err) => {
                tracing::warn!(
                    target: "careerpilot::chat",
                    "Send failed for session '{}': {}",
                    session_id,
                    err
                );
                transcript.push(ConversationMessage::agent(SEND_FALLBACK, None, None));
                Err(err)
            }
        }
    }

    /// Number of user messages in a transcript (greeting and fallbacks are
    /// agent-role and excluded).
    pub async fn user_message_count(&self, session_id: &str) -> usize {
        self.state
            .read()
            .await
            .transcripts
            .get(session_id)
            .map(|t| {
                t.iter()
                    .filter(|m| m.role == MessageRole::User)
                    .count()
            })
            .unwrap_or(0)
    }
}
