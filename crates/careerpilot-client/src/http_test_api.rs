//! HTTP implementation of the skill-test collaborator.
//!
//! Talks to the CareerPilot REST backend: `GET /tests/{id}`,
//! `POST /tests/{id}/submit`, and `GET /tests/results`.

use crate::config::ClientConfig;
use crate::http::{decode_error, status_error, transport_error};
use async_trait::async_trait;
use careerpilot_core::assessment::{
    SkillTest, TestApi, TestResult, TestResultSummary, TestSubmission,
};
use careerpilot_core::Result;
use reqwest::Client;

/// Skill-test backend over HTTP.
#[derive(Clone)]
pub struct HttpTestApi {
    client: Client,
    base_url: String,
}

impl HttpTestApi {
    /// Creates a client from connection settings.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: config.build_http_client()?,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl TestApi for HttpTestApi {
    async fn get_test(&self, test_id: &str) -> Result<SkillTest> {
        let response = self
            .client
            .get(self.url(&format!("/tests/{test_id}")))
            .send()
            .await
            .map_err(|err| transport_error("get test", err))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(status_error("get test", "test", test_id, status, body));
        }

        response
            .json()
            .await
            .map_err(|err| decode_error("get test", err))
    }

    async fn submit_test(
        &self,
        test_id: &str,
        submission: &TestSubmission,
    ) -> Result<TestResult> {
        let response = self
            .client
            .post(self.url(&format!("/tests/{test_id}/submit")))
            .json(submission)
            .send()
            .await
            .map_err(|err| transport_error("submit test", err))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(status_error("submit test", "test", test_id, status, body));
        }

        response
            .json()
            .await
            .map_err(|err| decode_error("submit test", err))
    }

    async fn list_results(&self) -> Result<Vec<TestResultSummary>> {
        let response = self
            .client
            .get(self.url("/tests/results"))
            .send()
            .await
            .map_err(|err| transport_error("list test results", err))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(
                "list test results",
                "test results",
                "*",
                status,
                body,
            ));
        }

        response
            .json()
            .await
            .map_err(|err| decode_error("list test results", err))
    }
}
