//! Test-taking attempt state machine.

use super::api::TestApi;
use super::model::{Question, SkillTest, TestResult, TestSubmission};
use crate::error::{CareerError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Lifecycle phase of a test-taking attempt.
///
/// Valid transitions: `Loading → InProgress → Submitting → Completed`, with
/// `Failed` reachable from `Loading` or `Submitting`. `Completed` and
/// `Failed` are terminal; a fresh [`AssessmentController::load`] starts a
/// new attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptPhase {
    /// The question set is being fetched (also the initial state).
    Loading,
    /// Questions are loaded and answers may be recorded.
    InProgress,
    /// Answers have been sent for grading.
    Submitting,
    /// A scored result is available; the attempt is immutable.
    Completed,
    /// The fetch or the submission failed.
    Failed,
}

/// Owns one test-taking attempt: question set, per-question answers,
/// current position, elapsed time, and the transition into a scored result.
pub struct AssessmentController {
    api: Arc<dyn TestApi>,
    state: RwLock<AttemptState>,
}

struct AttemptState {
    phase: AttemptPhase,
    test: Option<SkillTest>,
    answers: HashMap<String, String>,
    current_index: usize,
    started_at: Option<DateTime<Utc>>,
    result: Option<TestResult>,
}

impl AttemptState {
    fn fresh() -> Self {
        Self {
            phase: AttemptPhase::Loading,
            test: None,
            answers: HashMap::new(),
            current_index: 0,
            started_at: None,
            result: None,
        }
    }

    fn require_in_progress(&self) -> Result<&SkillTest> {
        if self.phase != AttemptPhase::InProgress {
            return Err(CareerError::invariant(format!(
                "operation requires an attempt in progress (phase is {:?})",
                self.phase
            )));
        }
        self.test
            .as_ref()
            .ok_or_else(|| CareerError::internal("in-progress attempt without a loaded test"))
    }
}

impl AssessmentController {
    pub fn new(api: Arc<dyn TestApi>) -> Self {
        Self {
            api,
            state: RwLock::new(AttemptState::fresh()),
        }
    }

    /// Fetches the question set and starts the attempt.
    ///
    /// On success the attempt enters `InProgress` with empty answers,
    /// position 0, and the start time captured. On fetch failure the
    /// attempt enters `Failed` and the error is returned. Calling `load`
    /// on a completed or failed controller starts a fresh attempt (retake).
    pub async fn load(&self, test_id: &str) -> Result<SkillTest> {
        {
            let mut state = self.state.write().await;
            *state = AttemptState::fresh();
        }

        match self.api.get_test(test_id).await {
            Ok(test) => {
                let mut state = self.state.write().await;
                state.phase = AttemptPhase::InProgress;
                state.test = Some(test.clone());
                state.started_at = Some(Utc::now());
                Ok(test)
            }
            Err(err) => {
                let mut state = self.state.write().await;
                state.phase = AttemptPhase::Failed;
                Err(err)
            }
        }
    }

    /// Records (or replaces) the answer for a question.
    ///
    /// An unknown question id is a no-op, not an error: the question set is
    /// authoritative and stray ids are ignored.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` unless the attempt is `InProgress`.
    pub async fn answer(&self, question_id: &str, option: &str) -> Result<()> {
        let mut state = self.state.write().await;
        let test = state.require_in_progress()?;

        if !test.questions.iter().any(|q| q.id == question_id) {
            tracing::debug!(
                target: "careerpilot::assessment",
                "Ignoring answer for unknown question '{}'",
                question_id
            );
            return Ok(());
        }
        state
            .answers
            .insert(question_id.to_string(), option.to_string());
        Ok(())
    }

    /// Moves the cursor to `index`, clamped into the question range.
    ///
    /// Navigation never requires the current question to be answered.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` unless the attempt is `InProgress`.
    pub async fn go_to(&self, index: usize) -> Result<usize> {
        let mut state = self.state.write().await;
        let last = state.require_in_progress()?.questions.len().saturating_sub(1);
        state.current_index = index.min(last);
        Ok(state.current_index)
    }

    /// Advances to the next question (clamped at the end).
    pub async fn next(&self) -> Result<usize> {
        let index = self.state.read().await.current_index;
        self.go_to(index.saturating_add(1)).await
    }

    /// Steps back to the previous question (clamped at the start).
    pub async fn previous(&self) -> Result<usize> {
        let index = self.state.read().await.current_index;
        self.go_to(index.saturating_sub(1)).await
    }

    /// Submits the attempt for grading.
    ///
    /// Requires every question to be answered. On success the attempt
    /// transitions through `Submitting` into `Completed` carrying the
    /// scored result; on backend failure it transitions to `Failed`.
    ///
    /// # Errors
    ///
    /// - `InvariantViolation` unless the attempt is `InProgress`.
    /// - `Incomplete` if any question is unanswered; checked before any
    ///   backend call.
    /// - `Remote` if grading fails.
    pub async fn submit(&self) -> Result<TestResult> {
        let (test_id, submission) = {
            let mut state = self.state.write().await;
            let test = state.require_in_progress()?;

            let total = test.questions.len();
            let answered = state.answers.len();
            if answered < total {
                return Err(CareerError::Incomplete { answered, total });
            }

            let elapsed = state
                .started_at
                .map(|started| (Utc::now() - started).num_seconds().max(0) as u64)
                .unwrap_or(0);
            let test_id = test.id.clone();
            state.phase = AttemptPhase::Submitting;
            (
                test_id,
                TestSubmission {
                    answers: state.answers.clone(),
                    time_taken: elapsed,
                },
            )
        };

        match self.api.submit_test(&test_id, &submission).await {
            Ok(result) => {
                let mut state = self.state.write().await;
                state.result = Some(result.clone());
                state.phase = AttemptPhase::Completed;
                Ok(result)
            }
            Err(err) => {
                let mut state = self.state.write().await;
                state.phase = AttemptPhase::Failed;
                Err(err)
            }
        }
    }

    // ============================================================================
    // Read-only accessors
    // ============================================================================

    pub async fn phase(&self) -> AttemptPhase {
        self.state.read().await.phase
    }

    /// The loaded question set, if any.
    pub async fn test(&self) -> Option<SkillTest> {
        self.state.read().await.test.clone()
    }

    /// The question at the current cursor position.
    pub async fn current_question(&self) -> Option<Question> {
        let state = self.state.read().await;
        state
            .test
            .as_ref()
            .and_then(|t| t.questions.get(state.current_index))
            .cloned()
    }

    pub async fn current_index(&self) -> usize {
        self.state.read().await.current_index
    }

    pub async fn answered_count(&self) -> usize {
        self.state.read().await.answers.len()
    }

    pub async fn is_answered(&self, question_id: &str) -> bool {
        self.state.read().await.answers.contains_key(question_id)
    }

    pub async fn selected_answer(&self, question_id: &str) -> Option<String> {
        self.state.read().await.answers.get(question_id).cloned()
    }

    /// The scored result, present once the attempt is `Completed`.
    pub async fn result(&self) -> Option<TestResult> {
        self.state.read().await.result.clone()
    }

    /// Whole seconds since the attempt started.
    pub async fn elapsed_seconds(&self) -> u64 {
        self.state
            .read()
            .await
            .started_at
            .map(|started| (Utc::now() - started).num_seconds().max(0) as u64)
            .unwrap_or(0)
    }
}
