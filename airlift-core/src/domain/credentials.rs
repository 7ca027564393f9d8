//! Repository credentials

use serde::{Deserialize, Serialize};

/// Credentials for one target repository
///
/// Supplied by the caller and held for the duration of a single deployment.
/// The orchestrator never persists these; storage, if any, is the caller's
/// concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Account or organization that owns the repository
    pub owner: String,
    /// Repository name
    pub repository: String,
    /// Personal access token used as a bearer token
    pub access_token: String,
}

impl Credentials {
    /// Creates credentials from owner, repository, and token
    pub fn new(
        owner: impl Into<String>,
        repository: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repository: repository.into(),
            access_token: access_token.into(),
        }
    }

    /// Validates the credentials
    ///
    /// A deployment is only attempted when all three fields are non-empty.
    pub fn validate(&self) -> Result<(), MissingCredentials> {
        if self.owner.is_empty() || self.repository.is_empty() || self.access_token.is_empty() {
            return Err(MissingCredentials);
        }
        Ok(())
    }
}

/// At least one credential field is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingCredentials;

impl std::fmt::Display for MissingCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "missing repo info or token")
    }
}

impl std::error::Error for MissingCredentials {}
