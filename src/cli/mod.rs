use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::AppConfig;

pub mod chat;
pub mod doc;
pub mod init;

#[derive(Subcommand)]
enum Command {
    /// Initialize the document store
    Init {
        #[arg(long, action, default_value = "false")]
        db: bool,
    },
    /// Start an interactive chat session
    Chat {},
    /// Show a stored document's chunks with display labels
    Doc {
        /// Name of the document in the store
        #[arg(long)]
        name: String,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Cli::parse();
    let config = AppConfig::default();

    // Handle each sub command
    match args.command {
        Some(Command::Init { db }) => {
            init::run(db, &config).await?;
        }
        Some(Command::Chat {}) => {
            chat::run(&config).await?;
        }
        Some(Command::Doc { name }) => {
            doc::run(&name, &config).await?;
        }
        None => {}
    }

    Ok(())
}
