//! Airlift GitHub Client
//!
//! A simple, type-safe HTTP client for the slice of the GitHub REST API that
//! Airlift deployments use: the repository contents endpoint and workflow
//! dispatches.
//!
//! # Example
//!
//! ```no_run
//! use airlift_core::domain::credentials::Credentials;
//! use airlift_github::GithubClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = GithubClient::new();
//!     let creds = Credentials::new("owner", "repo", "token");
//!
//!     // Look up the stored hash of a file, if it exists
//!     let sha = client.content_sha(&creds, "main.swift").await?;
//!
//!     println!("current sha: {:?}", sha);
//!     Ok(())
//! }
//! ```

pub mod error;
mod actions;
mod contents;

// Re-export commonly used types
pub use error::{ClientError, Result};

use airlift_core::domain::credentials::Credentials;
use reqwest::Client;

/// Production API base URL
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// User agent sent with every request; the API rejects anonymous clients
const USER_AGENT: &str = concat!("airlift/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the GitHub REST API
///
/// The client is stateless with respect to repositories: credentials are
/// passed per call, so one client instance serves any number of targets.
/// Endpoint methods are organized by API resource:
/// - Repository contents (hash lookup, create-or-update)
/// - Workflow dispatches
#[derive(Debug, Clone)]
pub struct GithubClient {
    /// Base URL of the API (e.g., "https://api.github.com")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl Default for GithubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GithubClient {
    /// Create a client against the production API
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL
    ///
    /// Used by tests and by deployments behind an API proxy.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use airlift_github::GithubClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = GithubClient::with_client("https://api.github.com", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request Building
    // =============================================================================

    /// Decorate a request with the headers every API call needs
    fn authorize(
        &self,
        request: reqwest::RequestBuilder,
        creds: &Credentials,
    ) -> reqwest::RequestBuilder {
        request
            .bearer_auth(&creds.access_token)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header(reqwest::header::USER_AGENT, USER_AGENT)
    }

    /// URL of the contents endpoint for a path in the target repository
    fn contents_url(&self, creds: &Credentials, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url, creds.owner, creds.repository, path
        )
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response where any 2xx counts as success
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}
