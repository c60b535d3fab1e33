//! Skill test domain models.
//!
//! These mirror the backend's wire shapes for tests, submissions, and
//! graded results; field names match the server's JSON exactly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Percentage at or above which an attempt is labeled as passed.
pub const PASS_THRESHOLD: f64 = 60.0;

/// One multiple-choice question in a skill test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question identifier, unique within its test.
    pub id: String,
    /// The question prompt.
    pub question: String,
    /// The selectable option strings.
    pub options: Vec<String>,
}

/// A skill test as fetched from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTest {
    pub id: String,
    pub skill_name: String,
    pub questions: Vec<Question>,
}

/// Answers and timing sent to the backend for grading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSubmission {
    /// Selected option per question id.
    pub answers: HashMap<String, String>,
    /// Whole seconds elapsed since the attempt started.
    pub time_taken: u64,
}

/// Per-question grading detail returned with a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// A graded attempt. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    #[serde(default)]
    pub time_taken_seconds: u64,
    pub feedback: Vec<AnswerFeedback>,
}

impl TestResult {
    /// Pass/fail label, a pure presentation concern on top of the result.
    pub fn passed(&self) -> bool {
        self.percentage >= PASS_THRESHOLD
    }
}

/// One row of the backend's test-result history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResultSummary {
    pub test_id: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: f64,
    /// Timestamp the attempt was graded (ISO 8601 format).
    pub taken_at: String,
}

impl TestResultSummary {
    pub fn passed(&self) -> bool {
        self.percentage >= PASS_THRESHOLD
    }
}

/// Picks the most recent attempt for a test out of a result history.
///
/// Used for "last attempt" badges. Tolerates unsorted input; the latest
/// `taken_at` wins.
pub fn latest_attempt<'a>(
    results: &'a [TestResultSummary],
    test_id: &str,
) -> Option<&'a TestResultSummary> {
    results
        .iter()
        .filter(|r| r.test_id == test_id)
        .max_by(|a, b| a.taken_at.cmp(&b.taken_at))
}
