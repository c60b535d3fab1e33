//! Chat domain module.
//!
//! Session lifecycle and conversation state for the CareerPilot assistant.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`ChatSession`)
//! - `message`: Transcript message types (`MessageRole`, `ConversationMessage`)
//! - `api`: Collaborator trait for the chat backend (`ChatApi`, `AgentReply`)
//! - `manager`: Session lifecycle management (`SessionManager`)
//! - `conversation`: Per-session transcripts and sends (`ConversationController`)

mod api;
mod conversation;
mod manager;
mod message;
mod model;

// Re-export public API
pub use api::{AgentReply, ChatApi};
pub use conversation::{ConversationController, GREETING, SEND_FALLBACK};
pub use manager::SessionManager;
pub use message::{ConversationMessage, MessageRole};
pub use model::ChatSession;
