use anyhow::Result;
use careerpilot_client::ClientConfig;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "careerpilot")]
#[command(about = "CareerPilot CLI - AI career assistant client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage chat sessions
    Sessions {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Send one message to the active chat session
    Chat {
        /// The message to send
        message: String,
    },
    /// Take skill tests and review past results
    Test {
        #[command(subcommand)]
        action: TestAction,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// List sessions, most recently updated first
    List,
    /// Create a new session and make it active
    New,
    /// Make an existing session active
    Switch { session_id: String },
    /// Delete a session
    Delete { session_id: String },
}

#[derive(Subcommand)]
enum TestAction {
    /// Take a skill test interactively
    Take { test_id: String },
    /// Show past test results
    Results,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();

    match cli.command {
        Commands::Sessions { action } => match action {
            SessionAction::List => commands::sessions::list(&config).await?,
            SessionAction::New => commands::sessions::create(&config).await?,
            SessionAction::Switch { session_id } => {
                commands::sessions::switch(&config, &session_id).await?
            }
            SessionAction::Delete { session_id } => {
                commands::sessions::delete(&config, &session_id).await?
            }
        },
        Commands::Chat { message } => commands::chat::send(&config, &message).await?,
        Commands::Test { action } => match action {
            TestAction::Take { test_id } => commands::test::take(&config, &test_id).await?,
            TestAction::Results => commands::test::results(&config).await?,
        },
    }

    Ok(())
}
