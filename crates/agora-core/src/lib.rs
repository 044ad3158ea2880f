//! agora-core - Core library for agora
//!
//! This crate provides the core business logic for the agora discussion
//! forum backend: vote reconciliation, comment threading, post feeds, and
//! the storage traits the backends implement.

pub mod comment;
pub mod config;
pub mod error;
pub mod post;
pub mod types;
pub mod vote;

pub use error::{AgoraError, Result};
pub use types::*;
