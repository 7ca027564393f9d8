//! Error types for the deployment orchestrator

use thiserror::Error;

/// Errors that prevent a deployment attempt from starting
///
/// Failures of a started attempt are not errors at this level; they surface
/// as the terminal `Failed` status of the attempt.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Another deployment is still in flight
    #[error("a deployment is already in progress")]
    AlreadyRunning,
}
