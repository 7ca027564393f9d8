//! Workflow dispatch endpoints

use crate::GithubClient;
use crate::error::{ClientError, Result};
use airlift_core::domain::credentials::Credentials;
use airlift_core::dto::workflow::WorkflowDispatchRequest;
use tracing::debug;

impl GithubClient {
    // =============================================================================
    // Workflow Dispatches
    // =============================================================================

    /// Dispatch a workflow run on a branch
    ///
    /// The dispatch only enqueues the run; the workflow executes remotely and
    /// its outcome is not observable through this call.
    ///
    /// # Arguments
    /// * `creds` - Target repository credentials
    /// * `workflow_file` - Workflow file name (e.g., "build.yml")
    /// * `git_ref` - Branch or tag to run against
    pub async fn dispatch_workflow(
        &self,
        creds: &Credentials,
        workflow_file: &str,
        git_ref: &str,
    ) -> Result<()> {
        let url = format!(
            "{}/repos/{}/{}/actions/workflows/{}/dispatches",
            self.base_url, creds.owner, creds.repository, workflow_file
        );

        debug!("Dispatching workflow {} on {}", workflow_file, git_ref);

        let response = self
            .authorize(self.client.post(&url), creds)
            .json(&WorkflowDispatchRequest {
                git_ref: git_ref.to_string(),
            })
            .send()
            .await?;

        // The dispatches endpoint answers 204 with no body on success;
        // anything else means the run was not enqueued.
        let status = response.status();
        if status.as_u16() != 204 {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}
