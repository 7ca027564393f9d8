//! Airlift Core
//!
//! Core types and abstractions for the Airlift deployment tool.
//!
//! This crate contains:
//! - Domain types: Core business entities (Credentials, Deployment, etc.)
//! - DTOs: Wire bodies for the hosting API

pub mod domain;
pub mod dto;
