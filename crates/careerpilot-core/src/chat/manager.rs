//! Session lifecycle management.

use super::api::ChatApi;
use super::model::ChatSession;
use crate::error::{CareerError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Manages the list of chat sessions and which one is active.
///
/// `SessionManager` is the sole owner and sole mutator of the session list
/// and the active-session pointer. It keeps local state consistent with the
/// backend and enforces two invariants:
///
/// - once initialized, the session list is never empty (the last remaining
///   session cannot be deleted);
/// - the active id always references a session present in the current list,
///   with no intermediate dangling state observable by callers.
pub struct SessionManager {
    api: Arc<dyn ChatApi>,
    state: RwLock<SessionState>,
}

#[derive(Default)]
struct SessionState {
    /// Last-fetched session list, kept sorted by `updated_at` descending.
    sessions: Vec<ChatSession>,
    active_id: Option<String>,
}

impl SessionState {
    fn sort(&mut self) {
        // Stable sort: equal timestamps keep server list order, which is
        // also the documented tie-break for replacement selection.
        self.sessions
            .sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    }

    fn contains(&self, session_id: &str) -> bool {
        self.sessions.iter().any(|s| s.id == session_id)
    }
}

impl SessionManager {
    /// Creates a new manager with no sessions loaded.
    pub fn new(api: Arc<dyn ChatApi>) -> Self {
        Self {
            api,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Fetches the session list and establishes an active session.
    ///
    /// If the backend has no sessions yet, one is created lazily so the
    /// non-empty invariant holds from the start. The most recently updated
    /// session becomes active.
    ///
    /// # Errors
    ///
    /// Returns `Remote` if the backend cannot be reached; local state is
    /// left untouched in that case.
    pub async fn initialize(&self) -> Result<()> {
        let mut fetched = self.api.list_sessions().await?;

        if fetched.is_empty() {
            let created = self.api.create_session().await?;
            fetched.push(created);
        }

        let mut state = self.state.write().await;
        state.sessions = fetched;
        state.sort();
        state.active_id = state.sessions.first().map(|s| s.id.clone());
        Ok(())
    }

    /// Re-fetches the authoritative session list from the backend.
    ///
    /// On success the local list is replaced; the active session is kept if
    /// it still exists, otherwise the most recently updated session takes
    /// over. On failure prior state is left untouched.
    pub async fn refresh(&self) -> Result<()> {
        let fetched = self.api.list_sessions().await?;

        if fetched.is_empty() {
            // The backend lost all sessions out from under us. Re-seed
            // rather than violate the non-empty invariant locally.
            return self.initialize().await;
        }

        let mut state = self.state.write().await;
        state.sessions = fetched;
        state.sort();
        let active_still_present = state
            .active_id
            .as_deref()
            .map(|id| state.contains(id))
            .unwrap_or(false);
        if !active_still_present {
            state.active_id = state.sessions.first().map(|s| s.id.clone());
        }
        Ok(())
    }

    /// Returns the last-fetched session list, most recently updated first.
    ///
    /// Pure projection of local state; call [`refresh`](Self::refresh) to
    /// re-sync with the backend.
    pub async fn sessions(&self) -> Vec<ChatSession> {
        self.state.read().await.sessions.clone()
    }

    /// Returns the id of the currently active session.
    pub async fn active_session_id(&self) -> Option<String> {
        self.state.read().await.active_id.clone()
    }

    /// Creates a new session on the backend, inserts it at the front of the
    /// local list, and makes it active.
    ///
    /// # Errors
    ///
    /// Returns `Remote` if the backend call fails; local state is unchanged
    /// on failure.
    pub async fn create_session(&self) -> Result<ChatSession> {
        let created = self.api.create_session().await?;

        let mut state = self.state.write().await;
        state.active_id = Some(created.id.clone());
        state.sessions.insert(0, created.clone());
        Ok(created)
    }

    /// Switches the active session to `session_id`.
    ///
    /// The backend is notified best-effort: a failed activation call is
    /// logged and does not block the local switch.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `session_id` is not in the current list. The
    /// existence check runs before any backend call.
    pub async fn switch_to(&self, session_id: &str) -> Result<()> {
        {
            let state = self.state.read().await;
            if !state.contains(session_id) {
                return Err(CareerError::not_found("session", session_id));
            }
        }

        if let Err(err) = self.api.activate_session(session_id).await {
            tracing::warn!(
                target: "careerpilot::sessions",
                "Failed to notify backend of session activation for '{}': {}",
                session_id,
                err
            );
        }

        let mut state = self.state.write().await;
        // The session may have been deleted while the notify was in flight.
        if !state.contains(session_id) {
            return Err(CareerError::not_found("session", session_id));
        }
        state.active_id = Some(session_id.to_string());
        Ok(())
    }

    /// Deletes a session, keeping the active pointer valid.
    ///
    /// If the deleted session was active, the most recently updated
    /// remaining session (first remaining in list order on a timestamp tie)
    /// becomes active atomically with the removal. The replacement is chosen
    /// from the local pre-deletion snapshot, not a re-fetched list.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `session_id` is not in the current list.
    /// - `InvariantViolation` if this is the last remaining session.
    /// - `Remote` if the backend deletion fails; local state is unchanged.
    pub async fn delete(&self, session_id: &str) -> Result<()> {
        let replacement = {
            let state = self.state.read().await;
            if !state.contains(session_id) {
                return Err(CareerError::not_found("session", session_id));
            }
            if state.sessions.len() <= 1 {
                return Err(CareerError::invariant(
                    "cannot delete the last remaining session",
                ));
            }
            // The list is sorted by updated_at descending, so the first
            // remaining session is the documented replacement.
            state
                .sessions
                .iter()
                .find(|s| s.id != session_id)
                .map(|s| s.id.clone())
        };

        self.api.delete_session(session_id).await?;

        let mut state = self.state.write().await;
        state.sessions.retain(|s| s.id != session_id);
        if state.active_id.as_deref() == Some(session_id) {
            let next = replacement
                .filter(|id| state.contains(id))
                .or_else(|| state.sessions.first().map(|s| s.id.clone()));
            state.active_id = next;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::api::AgentReply;
    use crate::chat::message::ConversationMessage;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // Mock ChatApi for testing
    struct MockChatApi {
        sessions: Mutex<Vec<ChatSession>>,
        next_id: Mutex<u32>,
        fail_next: Mutex<bool>,
        activations: Mutex<Vec<String>>,
    }

    impl MockChatApi {
        fn new() -> Self {
            Self {
                sessions: Mutex::new(Vec::new()),
                next_id: Mutex::new(0),
                fail_next: Mutex::new(false),
                activations: Mutex::new(Vec::new()),
            }
        }

        fn with_sessions(sessions: Vec<ChatSession>) -> Self {
            let api = Self::new();
            *api.sessions.lock().unwrap() = sessions;
            api
        }

        fn fail_next_call(&self) {
            *self.fail_next.lock().unwrap() = true;
        }

        fn take_failure(&self) -> bool {
            std::mem::take(&mut *self.fail_next.lock().unwrap())
        }
    }

    fn session(id: &str, updated_at: &str) -> ChatSession {
        ChatSession {
            id: id.to_string(),
            title: format!("Session {id}"),
            created_at: "2025-01-01T00:00:00".to_string(),
            updated_at: updated_at.to_string(),
        }
    }

    #[async_trait]
    impl ChatApi for MockChatApi {
        async fn list_sessions(&self) -> Result<Vec<ChatSession>> {
            if self.take_failure() {
                return Err(CareerError::remote("list failed"));
            }
            Ok(self.sessions.lock().unwrap().clone())
        }

        async fn create_session(&self) -> Result<ChatSession> {
            if self.take_failure() {
                return Err(CareerError::remote("create failed"));
            }
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            let created = session(&format!("new-{next_id}"), "2025-06-01T00:00:00");
            self.sessions.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn activate_session(&self, session_id: &str) -> Result<()> {
            if self.take_failure() {
                return Err(CareerError::remote("activate failed"));
            }
            self.activations
                .lock()
                .unwrap()
                .push(session_id.to_string());
            Ok(())
        }

        async fn delete_session(&self, session_id: &str) -> Result<()> {
            if self.take_failure() {
                return Err(CareerError::remote("delete failed"));
            }
            self.sessions
                .lock()
                .unwrap()
                .retain(|s| s.id != session_id);
            Ok(())
        }

        async fn send_message(
            &self,
            _session_id: &str,
            _text: &str,
            _history: &[ConversationMessage],
        ) -> Result<AgentReply> {
            unimplemented!("not used by SessionManager tests")
        }
    }

    #[tokio::test]
    async fn initialize_sorts_by_updated_at_descending() {
        let api = Arc::new(MockChatApi::with_sessions(vec![
            session("old", "2025-01-02T00:00:00"),
            session("new", "2025-03-01T00:00:00"),
            session("mid", "2025-02-01T00:00:00"),
        ]));
        let manager = SessionManager::new(api);

        manager.initialize().await.unwrap();

        let ids: Vec<String> = manager
            .sessions()
            .await
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
        assert_eq!(manager.active_session_id().await, Some("new".to_string()));
    }

    #[tokio::test]
    async fn initialize_creates_session_when_backend_has_none() {
        let api = Arc::new(MockChatApi::new());
        let manager = SessionManager::new(api);

        manager.initialize().await.unwrap();

        let sessions = manager.sessions().await;
        assert_eq!(sessions.len(), 1);
        assert_eq!(
            manager.active_session_id().await,
            Some(sessions[0].id.clone())
        );
    }

    #[tokio::test]
    async fn refresh_failure_leaves_prior_state_untouched() {
        let api = Arc::new(MockChatApi::with_sessions(vec![session(
            "s1",
            "2025-01-01T00:00:00",
        )]));
        let manager = SessionManager::new(api.clone());
        manager.initialize().await.unwrap();

        api.fail_next_call();
        let err = manager.refresh().await.unwrap_err();

        assert!(err.is_remote());
        assert_eq!(manager.sessions().await.len(), 1);
        assert_eq!(manager.active_session_id().await, Some("s1".to_string()));
    }

    #[tokio::test]
    async fn create_session_inserts_at_front_and_activates() {
        let api = Arc::new(MockChatApi::with_sessions(vec![session(
            "s1",
            "2025-01-01T00:00:00",
        )]));
        let manager = SessionManager::new(api);
        manager.initialize().await.unwrap();

        let created = manager.create_session().await.unwrap();

        let sessions = manager.sessions().await;
        assert_eq!(sessions[0].id, created.id);
        assert_eq!(sessions.len(), 2);
        assert_eq!(manager.active_session_id().await, Some(created.id));
    }

    #[tokio::test]
    async fn create_session_failure_leaves_state_unchanged() {
        let api = Arc::new(MockChatApi::with_sessions(vec![session(
            "s1",
            "2025-01-01T00:00:00",
        )]));
        let manager = SessionManager::new(api.clone());
        manager.initialize().await.unwrap();

        api.fail_next_call();
        let err = manager.create_session().await.unwrap_err();

        assert!(err.is_remote());
        assert_eq!(manager.sessions().await.len(), 1);
        assert_eq!(manager.active_session_id().await, Some("s1".to_string()));
    }

    #[tokio::test]
    async fn switch_to_unknown_session_fails_without_backend_call() {
        let api = Arc::new(MockChatApi::with_sessions(vec![session(
            "s1",
            "2025-01-01T00:00:00",
        )]));
        let manager = SessionManager::new(api.clone());
        manager.initialize().await.unwrap();

        let err = manager.switch_to("ghost").await.unwrap_err();

        assert!(err.is_not_found());
        assert!(api.activations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn switch_applies_locally_even_if_notify_fails() {
        let api = Arc::new(MockChatApi::with_sessions(vec![
            session("s1", "2025-02-01T00:00:00"),
            session("s2", "2025-01-01T00:00:00"),
        ]));
        let manager = SessionManager::new(api.clone());
        manager.initialize().await.unwrap();

        api.fail_next_call();
        manager.switch_to("s2").await.unwrap();

        assert_eq!(manager.active_session_id().await, Some("s2".to_string()));
    }

    #[tokio::test]
    async fn delete_last_session_is_rejected() {
        let api = Arc::new(MockChatApi::with_sessions(vec![session(
            "only",
            "2025-01-01T00:00:00",
        )]));
        let manager = SessionManager::new(api.clone());
        manager.initialize().await.unwrap();

        let err = manager.delete("only").await.unwrap_err();

        assert!(err.is_invariant_violation());
        assert_eq!(manager.sessions().await.len(), 1);
        // The backend was never asked to delete.
        assert_eq!(api.sessions.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deleting_active_session_promotes_most_recent_remaining() {
        let api = Arc::new(MockChatApi::with_sessions(vec![
            session("active", "2025-03-01T00:00:00"),
            session("recent", "2025-02-01T00:00:00"),
            session("stale", "2025-01-01T00:00:00"),
        ]));
        let manager = SessionManager::new(api);
        manager.initialize().await.unwrap();
        assert_eq!(
            manager.active_session_id().await,
            Some("active".to_string())
        );

        manager.delete("active").await.unwrap();

        assert_eq!(
            manager.active_session_id().await,
            Some("recent".to_string())
        );
        assert_eq!(manager.sessions().await.len(), 2);
    }

    #[tokio::test]
    async fn deleting_inactive_session_keeps_active_pointer() {
        let api = Arc::new(MockChatApi::with_sessions(vec![
            session("active", "2025-03-01T00:00:00"),
            session("other", "2025-02-01T00:00:00"),
        ]));
        let manager = SessionManager::new(api);
        manager.initialize().await.unwrap();

        manager.delete("other").await.unwrap();

        assert_eq!(
            manager.active_session_id().await,
            Some("active".to_string())
        );
    }

    #[tokio::test]
    async fn delete_timestamp_tie_breaks_by_list_order() {
        let api = Arc::new(MockChatApi::with_sessions(vec![
            session("active", "2025-03-01T00:00:00"),
            session("tie-a", "2025-01-01T00:00:00"),
            session("tie-b", "2025-01-01T00:00:00"),
        ]));
        let manager = SessionManager::new(api);
        manager.initialize().await.unwrap();

        manager.delete("active").await.unwrap();

        assert_eq!(manager.active_session_id().await, Some("tie-a".to_string()));
    }

    #[tokio::test]
    async fn delete_failure_rolls_back_nothing_locally() {
        let api = Arc::new(MockChatApi::with_sessions(vec![
            session("s1", "2025-02-01T00:00:00"),
            session("s2", "2025-01-01T00:00:00"),
        ]));
        let manager = SessionManager::new(api.clone());
        manager.initialize().await.unwrap();

        api.fail_next_call();
        let err = manager.delete("s1").await.unwrap_err();

        assert!(err.is_remote());
        assert_eq!(manager.sessions().await.len(), 2);
        assert_eq!(manager.active_session_id().await, Some("s1".to_string()));
    }
}
