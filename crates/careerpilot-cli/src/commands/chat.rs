//! One-shot chat send against the active session.

use anyhow::{Context, Result};
use careerpilot_client::{ClientConfig, HttpChatApi};
use careerpilot_core::chat::{ConversationController, SessionManager};
use colored::Colorize;
use std::sync::Arc;

pub async fn send(config: &ClientConfig, message: &str) -> Result<()> {
    let api = Arc::new(HttpChatApi::new(config)?);
    let manager = SessionManager::new(api.clone());
    manager.initialize().await?;
    let active = manager
        .active_session_id()
        .await
        .context("no active session after initialization")?;

    let conversation = ConversationController::new(api);
    conversation.ensure_greeting(&active).await;

    println!("{} {}", "you:".bold(), message);
    let reply = conversation.send_message(&active, message).await?;

    let speaker = reply.agent_name.as_deref().unwrap_or("agent");
    println!("{} {}", format!("{speaker}:").green().bold(), reply.content);
    if let Some(reasoning) = &reply.reasoning {
        println!("{}", format!("  thought process: {reasoning}").dimmed());
    }
    Ok(())
}
