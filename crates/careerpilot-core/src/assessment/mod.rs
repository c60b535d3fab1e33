//! Skill assessment domain module.
//!
//! One test-taking attempt at a time: question set, per-question answers,
//! navigation, submission, and the scored result.

mod api;
mod controller;
mod model;

// Re-export public API
pub use api::TestApi;
pub use controller::{AssessmentController, AttemptPhase};
pub use model::{
    latest_attempt, AnswerFeedback, Question, SkillTest, TestResult, TestResultSummary,
    TestSubmission, PASS_THRESHOLD,
};
