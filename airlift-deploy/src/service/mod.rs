//! Service layer
//!
//! The deployment service is trait-based at the host seam to enable testing
//! and dependency injection.

mod deploy;

pub use deploy::Deployer;
