//! Deploy command handler
//!
//! Reads the source file, runs one deployment, and streams status
//! transitions to the terminal as the orchestrator publishes them.

use anyhow::{Context, Result};
use colored::*;
use std::sync::Arc;

use airlift_core::domain::credentials::Credentials;
use airlift_core::domain::deployment::DeploymentStatus;
use airlift_deploy::Deployer;
use airlift_github::GithubClient;

use crate::config::Config;

/// Deploy a source file and trigger the build workflow
pub async fn handle_deploy_command(
    file: &str,
    owner: String,
    repo: String,
    token: String,
    config: &Config,
) -> Result<()> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read source file: {}", file))?;

    let credentials = Credentials::new(owner, repo, token);
    let client = GithubClient::with_base_url(&config.api_url);
    let deployer = Arc::new(Deployer::new(credentials, Arc::new(client)));

    // Print each status transition as it is published
    let mut rx = deployer.subscribe();
    let printer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let status = rx.borrow_and_update().clone();
            match &status {
                DeploymentStatus::Succeeded => {
                    println!("{}", "✓ Deployed successfully!".green().bold());
                }
                DeploymentStatus::Failed { reason } => {
                    println!("{}", format!("✗ Deployment failed: {}", reason).red().bold());
                }
                other => {
                    println!("  {} {}", "▸".cyan(), other.to_string().dimmed());
                }
            }
        }
    });

    let deployment = deployer.deploy(&source).await?;

    // Dropping the deployer closes the status channel and ends the printer
    drop(deployer);
    printer.await?;

    println!(
        "  ID:      {}",
        deployment.id.to_string().cyan()
    );
    println!(
        "  Started: {}",
        deployment
            .started_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!(
        "  Took:    {}",
        format!(
            "{} ms",
            (deployment.completed_at - deployment.started_at).num_milliseconds()
        )
        .dimmed()
    );

    if deployment.succeeded() {
        Ok(())
    } else {
        anyhow::bail!("deployment did not complete")
    }
}
