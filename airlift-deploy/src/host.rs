//! Content host abstraction
//!
//! The orchestrator talks to the hosting API through this trait so tests can
//! substitute a recording host for the real client.

use airlift_core::domain::credentials::Credentials;
use airlift_github::{ClientError, GithubClient};
use async_trait::async_trait;

/// The remote operations one deployment needs
#[async_trait]
pub trait ContentHost: Send + Sync {
    /// Look up the stored content hash for a path
    ///
    /// Returns `None` when the file does not exist yet (the create path).
    /// A lookup that fails for any other reason is an error, not an absent
    /// file.
    async fn content_sha(
        &self,
        creds: &Credentials,
        path: &str,
    ) -> Result<Option<String>, ClientError>;

    /// Create or update a file
    async fn upsert_file(
        &self,
        creds: &Credentials,
        path: &str,
        content: &[u8],
        sha: Option<String>,
        message: &str,
    ) -> Result<(), ClientError>;

    /// Dispatch a workflow run on a branch
    async fn dispatch_workflow(
        &self,
        creds: &Credentials,
        workflow_file: &str,
        git_ref: &str,
    ) -> Result<(), ClientError>;
}

#[async_trait]
impl ContentHost for GithubClient {
    async fn content_sha(
        &self,
        creds: &Credentials,
        path: &str,
    ) -> Result<Option<String>, ClientError> {
        GithubClient::content_sha(self, creds, path).await
    }

    async fn upsert_file(
        &self,
        creds: &Credentials,
        path: &str,
        content: &[u8],
        sha: Option<String>,
        message: &str,
    ) -> Result<(), ClientError> {
        GithubClient::upsert_file(self, creds, path, content, sha, message).await
    }

    async fn dispatch_workflow(
        &self,
        creds: &Credentials,
        workflow_file: &str,
        git_ref: &str,
    ) -> Result<(), ClientError> {
        GithubClient::dispatch_workflow(self, creds, workflow_file, git_ref).await
    }
}
