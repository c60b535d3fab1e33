//! HTTP implementation of the chat collaborator.
//!
//! Talks to the CareerPilot REST backend:
//! `GET/POST /chat/sessions`, `PUT /chat/sessions/{id}/activate`,
//! `DELETE /chat/sessions/{id}`, and `POST /chat` for message sends.

use crate::config::ClientConfig;
use crate::http::{decode_error, status_error, transport_error};
use async_trait::async_trait;
use careerpilot_core::chat::{AgentReply, ChatApi, ChatSession, ConversationMessage, MessageRole};
use careerpilot_core::Result;
use reqwest::Client;
use serde::Serialize;

/// Chat backend over HTTP.
#[derive(Clone)]
pub struct HttpChatApi {
    client: Client,
    base_url: String,
}

impl HttpChatApi {
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
impl ChatApi for HttpChatApi {
    async fn list_sessions(&self) -> Result<Vec<ChatSession>> {
        let response = self
            .client
            .get(self.url("/chat/sessions"))
            .send()
            .await
            .map_err(|err| transport_error("list sessions", err))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(status_error("list sessions", "session", "*", status, body));
        }

        response
            .json()
            .await
            .map_err(|err| decode_error("list sessions", err))
    }

    async fn create_session(&self) -> Result<ChatSession> {
        let response = self
            .client
            .post(self.url("/chat/sessions"))
            .send()
            .await
            .map_err(|err| transport_error("create session", err))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(status_error("create session", "session", "*", status, body));
        }

        response
            .json()
            .await
            .map_err(|err| decode_error("create session", err))
    }

    async fn activate_session(&self, session_id: &str) -> Result<()> {
        let response = self
            .client
            .put(self.url(&format!("/chat/sessions/{session_id}/activate")))
            .send()
            .await
            .map_err(|err| transport_error("activate session", err))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(
                "activate session",
                "session",
                session_id,
                status,
                body,
            ));
        }
        Ok(())
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/chat/sessions/{session_id}")))
            .send()
            .await
            .map_err(|err| transport_error("delete session", err))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(
                "delete session",
                "session",
                session_id,
                status,
                body,
            ));
        }
        Ok(())
    }

    async fn send_message(
        &self,
        session_id: &str,
        text: &str,
        history: &[ConversationMessage],
    ) -> Result<AgentReply> {
        let request = ChatRequest {
            message: text,
            context: ChatContext {
                session_id,
                history: history
                    .iter()
                    .map(|message| HistoryEntry {
                        role: match message.role {
                            MessageRole::User => "user",
                            MessageRole::Agent => "agent",
                        },
                        content: &message.content,
                    })
                    .collect(),
            },
        };

        let response = self
            .client
            .post(self.url("/chat"))
            .json(&request)
            .send()
            .await
            .map_err(|err| transport_error("send message", err))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(
                "send message",
                "session",
                session_id,
                status,
                body,
            ));
        }

        response
            .json()
            .await
            .map_err(|err| decode_error("send message", err))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    context: ChatContext<'a>,
}

#[derive(Serialize)]
struct ChatContext<'a> {
    session_id: &'a str,
    history: Vec<HistoryEntry<'a>>,
}

#[derive(Serialize)]
struct HistoryEntry<'a> {
    role: &'static str,
    content: &'a str,
}
