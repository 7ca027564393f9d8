//! Wire bodies for the hosting API
//!
//! This module contains the request and response shapes exchanged with the
//! hosting API's contents and workflow endpoints. Only the fields Airlift
//! actually reads or writes are modeled.

pub mod contents;
pub mod workflow;
