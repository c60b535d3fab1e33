//! Test collaborator trait.

use super::model::{SkillTest, TestResult, TestResultSummary, TestSubmission};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract skill-test backend.
///
/// Test generation and grading live entirely on the server side; the
/// controller only fetches question sets and submits answers.
#[async_trait]
pub trait TestApi: Send + Sync {
    /// Fetches a test's question set.
    async fn get_test(&self, test_id: &str) -> Result<SkillTest>;

    /// Submits answers for grading and returns the scored result.
    async fn submit_test(&self, test_id: &str, submission: &TestSubmission)
        -> Result<TestResult>;

    /// Lists past attempts across all tests, most recent first.
    async fn list_results(&self) -> Result<Vec<TestResultSummary>>;
}
