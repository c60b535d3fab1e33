//! Chat session domain model.

use serde::{Deserialize, Serialize};

/// One persisted chat conversation, as reported by the backend.
///
/// The id is opaque and server-assigned. Timestamps are ISO 8601 strings
/// produced by the server clock; within one backend they order
/// lexicographically, which is how the session list is sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique session identifier (server-assigned)
    pub id: String,
    /// Human-readable session title
    pub title: String,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format)
    pub updated_at: String,
}
