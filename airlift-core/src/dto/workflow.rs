//! Workflow dispatch bodies

use serde::{Deserialize, Serialize};

/// Request body for a workflow dispatch call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDispatchRequest {
    /// Branch or tag the workflow runs against
    #[serde(rename = "ref")]
    pub git_ref: String,
}
