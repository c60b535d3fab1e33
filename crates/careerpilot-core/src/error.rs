//! Error types for the CareerPilot client core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the CareerPilot client engine.
///
/// Every variant is recoverable at the component boundary: the presentation
/// layer decides how to display them, and no variant leaves a controller in
/// an inconsistent state (atomic success or full rollback).
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum CareerError {
    /// Malformed local input (e.g. an empty chat message).
    /// Never reaches the network.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// An operation would break a structural invariant
    /// (e.g. deleting the last remaining chat session).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A second send was attempted while one is already in flight
    /// for the same session.
    #[error("Session '{session_id}' is busy with an in-flight send")]
    Busy { session_id: String },

    /// A test was submitted before every question had an answer.
    #[error("Test incomplete: {answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },

    /// A collaborator call failed. Optimistic local state has been
    /// rolled back by the time this is returned.
    #[error("Remote error: {0}")]
    Remote(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CareerError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an InvariantViolation error
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }

    /// Creates a Busy error
    pub fn busy(session_id: impl Into<String>) -> Self {
        Self::Busy {
            session_id: session_id.into(),
        }
    }

    /// Creates a Remote error
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an InvariantViolation error
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }

    /// Check if this is a Busy error
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }

    /// Check if this is an Incomplete error
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Incomplete { .. })
    }

    /// Check if this is a Remote error
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl From<serde_json::Error> for CareerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CareerError>`.
pub type Result<T> = std::result::Result<T, CareerError>;
