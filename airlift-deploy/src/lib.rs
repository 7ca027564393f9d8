//! Airlift Deploy
//!
//! The deployment orchestrator: given repository credentials and a source
//! blob, pushes the fixed package manifest and the source file to the target
//! repository, then dispatches the build workflow.
//!
//! Architecture:
//! - Payload: the fixed paths, manifest template, and workflow identifiers
//! - Host: trait over the remote operations, implemented for the GitHub client
//! - Service: the `Deployer`, which runs the strictly sequential three-step
//!   deployment and publishes status transitions to subscribers
//!
//! The deployment only enqueues the remote build; its outcome happens outside
//! this crate's visibility.

pub mod error;
pub mod host;
pub mod payload;
pub mod service;

// Re-export the main entry points
pub use error::DeployError;
pub use host::ContentHost;
pub use service::Deployer;
