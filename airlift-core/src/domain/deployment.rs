//! Deployment domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record of one finished deployment attempt
///
/// Returned by the orchestrator once the attempt reaches a terminal status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    pub id: Uuid,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: chrono::DateTime<chrono::Utc>,
    pub status: DeploymentStatus,
}

impl Deployment {
    /// True when the attempt ended in `Succeeded`
    pub fn succeeded(&self) -> bool {
        matches!(self.status, DeploymentStatus::Succeeded)
    }
}

/// Deployment progress status
///
/// Exactly one status is active at a time and transitions are strictly
/// sequential. A terminal status (`Succeeded`/`Failed`) is only left by
/// starting a new deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentStatus {
    /// No deployment has run yet
    Idle,
    /// Looking up the current content hash for a path
    FetchingHash { path: String },
    /// Uploading new content for a path
    Uploading { path: String },
    /// Asking the host to start the build workflow
    TriggeringWorkflow,
    /// All steps completed
    Succeeded,
    /// A step failed; the attempt is over
    Failed { reason: String },
}

impl DeploymentStatus {
    /// True for `Succeeded` and `Failed`
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed { .. })
    }

    /// True while a deployment is in flight
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::FetchingHash { .. } | Self::Uploading { .. } | Self::TriggeringWorkflow
        )
    }
}

impl std::fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::FetchingHash { path } => write!(f, "fetching hash for {}", path),
            Self::Uploading { path } => write!(f, "uploading {}", path),
            Self::TriggeringWorkflow => write!(f, "triggering workflow"),
            Self::Succeeded => write!(f, "deployed successfully"),
            Self::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}
