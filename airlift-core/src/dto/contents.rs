//! Contents endpoint bodies

use serde::{Deserialize, Serialize};

/// Request body for a create-or-update file call
///
/// `content` is the base64 encoding of the file bytes. `sha` identifies the
/// stored content being overwritten; it is omitted entirely on the create
/// path, where no prior version exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertFileRequest {
    pub message: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

/// The slice of the contents response Airlift reads back
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentMetadata {
    pub sha: String,
}
