//! Airlift CLI
//!
//! Command-line interface for deploying a source file to a build repository
//! and triggering its workflow.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "airlift")]
#[command(about = "Push source to a build repository and trigger its workflow", long_about = None)]
struct Cli {
    /// Hosting API base URL
    #[arg(
        long,
        env = "AIRLIFT_API_URL",
        default_value = "https://api.github.com"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "airlift=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
    };

    handle_command(cli.command, &config).await
}
