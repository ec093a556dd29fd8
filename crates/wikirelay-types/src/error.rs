//! Error types for the wikirelay feed.
//!
//! Payload construction itself is total and cannot fail; [`FeedError`]
//! covers the configuration and I/O layer around it. The enum is
//! non-exhaustive to allow future extension without breaking downstream.

use thiserror::Error;

/// Top-level error type for the feed.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FeedError {
    /// Configuration is malformed or semantically invalid.
    #[error("invalid config: {reason}")]
    ConfigInvalid {
        /// What is wrong with the configuration.
        reason: String,
    },

    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenience alias used throughout the crates.
pub type Result<T> = std::result::Result<T, FeedError>;
