//! Repository contents endpoints

use crate::GithubClient;
use crate::error::{ClientError, Result};
use airlift_core::domain::credentials::Credentials;
use airlift_core::dto::contents::{ContentMetadata, UpsertFileRequest};
use base64::{Engine as _, engine::general_purpose};
use tracing::debug;

impl GithubClient {
    // =============================================================================
    // Repository Contents
    // =============================================================================

    /// Look up the stored content hash for a path
    ///
    /// # Arguments
    /// * `creds` - Target repository credentials
    /// * `path` - File path relative to the repository root
    ///
    /// # Returns
    /// `Some(sha)` when the file exists, `None` when the API reports 404
    /// (the file has never been created). Any other failure is an error;
    /// callers must not treat an unreachable API as an absent file.
    pub async fn content_sha(&self, creds: &Credentials, path: &str) -> Result<Option<String>> {
        let url = self.contents_url(creds, path);
        let response = self.authorize(self.client.get(&url), creds).send().await?;

        let status = response.status();

        if status.as_u16() == 404 {
            debug!("No existing content at {}, will create", path);
            return Ok(None);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        let metadata: ContentMetadata = response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))?;

        Ok(Some(metadata.sha))
    }

    /// Create or update a file
    ///
    /// # Arguments
    /// * `creds` - Target repository credentials
    /// * `path` - File path relative to the repository root
    /// * `content` - New file bytes; encoded as base64 on the wire
    /// * `sha` - Hash of the stored content being overwritten; `None` creates
    ///   the file
    /// * `message` - Commit message for the write
    pub async fn upsert_file(
        &self,
        creds: &Credentials,
        path: &str,
        content: &[u8],
        sha: Option<String>,
        message: &str,
    ) -> Result<()> {
        let url = self.contents_url(creds, path);

        let req = UpsertFileRequest {
            message: message.to_string(),
            content: general_purpose::STANDARD.encode(content),
            sha,
        };

        debug!("Upserting {} ({} bytes)", path, content.len());

        let response = self
            .authorize(self.client.put(&url), creds)
            .json(&req)
            .send()
            .await?;

        self.handle_empty_response(response).await
    }
}
