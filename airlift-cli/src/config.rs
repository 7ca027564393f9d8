//! Configuration module
//!
//! Handles CLI configuration including the hosting API URL.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosting API
    pub api_url: String,
}
