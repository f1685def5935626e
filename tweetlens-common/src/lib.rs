//! Common types and utilities shared across tweetlens crates.
//!
//! This crate holds the shared error type, the output format enum, and the
//! observability helpers. It stays small so that every other crate in the
//! workspace can depend on it without pulling in heavy transitive costs.
//!
//! # Overview
//!
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`TweetlensError`] and [`Result`]: Shared error handling
//! - [`OutputFormat`]: How extraction results are rendered
//!
//! # Examples
//!
//! ```rust
//! use tweetlens_common::TweetlensError;
//!
//! let err = TweetlensError::InvalidArgument("tweet list must not be null".into());
//! assert_eq!(err.to_string(), "Invalid argument: tweet list must not be null");
//! ```
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub mod observability;

/// Preferred output format for rendered results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Error types used across the tweetlens workspace.
#[derive(thiserror::Error, Debug)]
pub enum TweetlensError {
    /// The caller passed input that violates a function's contract.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A tweet fixture was not valid JSON or did not match the tweet schema.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A tweet fixture could not be read from disk.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenient alias for results that use [`TweetlensError`].
pub type Result<T> = std::result::Result<T, TweetlensError>;
