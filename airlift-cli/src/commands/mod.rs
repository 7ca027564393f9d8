//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod deploy;
mod manifest;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Deploy a source file and trigger the build workflow
    Deploy {
        /// Path to the source file to deploy
        file: String,

        /// Repository owner
        #[arg(long, env = "AIRLIFT_OWNER")]
        owner: String,

        /// Repository name
        #[arg(long, env = "AIRLIFT_REPO")]
        repo: String,

        /// Personal access token
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Print the package manifest uploaded with every deployment
    Manifest,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
///
/// # Returns
/// Result indicating success or failure
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Deploy {
            file,
            owner,
            repo,
            token,
        } => deploy::handle_deploy_command(&file, owner, repo, token, config).await,
        Commands::Manifest => manifest::handle_manifest_command(),
    }
}
