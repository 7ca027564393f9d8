//! Manifest command handler

use anyhow::Result;
use colored::*;

use airlift_deploy::payload::MANIFEST_TEMPLATE;

/// Print the package manifest that `deploy` uploads
pub fn handle_manifest_command() -> Result<()> {
    println!("{}", "Manifest uploaded with every deployment:".bold());
    println!("{}", "─".repeat(80).dimmed());
    print!("{}", MANIFEST_TEMPLATE);
    println!("{}", "─".repeat(80).dimmed());

    Ok(())
}
