//! Session management commands.

use anyhow::Result;
use careerpilot_client::{ClientConfig, HttpChatApi};
use careerpilot_core::chat::SessionManager;
use colored::Colorize;
use std::sync::Arc;

async fn manager(config: &ClientConfig) -> Result<SessionManager> {
    let api = Arc::new(HttpChatApi::new(config)?);
    let manager = SessionManager::new(api);
    manager.initialize().await?;
    Ok(manager)
}

pub async fn list(config: &ClientConfig) -> Result<()> {
    let manager = manager(config).await?;
    let active = manager.active_session_id().await;

    for session in manager.sessions().await {
        let marker = if Some(&session.id) == active.as_ref() {
            "*".green().bold().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{} {}  {}  {}",
            marker,
            session.id.cyan(),
            session.title.bold(),
            session.updated_at.dimmed()
        );
    }
    Ok(())
}

pub async fn create(config: &ClientConfig) -> Result<()> {
    let manager = manager(config).await?;
    let created = manager.create_session().await?;
    println!("Created and activated session {}", created.id.cyan());
    Ok(())
}

pub async fn switch(config: &ClientConfig, session_id: &str) -> Result<()> {
    let manager = manager(config).await?;
    manager.switch_to(session_id).await?;
    println!("Active session is now {}", session_id.cyan());
    Ok(())
}

pub async fn delete(config: &ClientConfig, session_id: &str) -> Result<()> {
    let manager = manager(config).await?;
    manager.delete(session_id).await?;
    let active = manager
        .active_session_id()
        .await
        .unwrap_or_else(|| "<none>".to_string());
    println!(
        "Deleted session {}; active session is {}",
        session_id.cyan(),
        active.cyan()
    );
    Ok(())
}
