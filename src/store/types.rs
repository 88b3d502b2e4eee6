//! Store error definitions.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the remote store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Configured project URL cannot be used.
    #[error("Invalid store URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// API key contains characters not allowed in a header.
    #[error("Invalid store key: {0}")]
    InvalidKey(#[from] reqwest::header::InvalidHeaderValue),

    /// Connection, timeout or protocol failure.
    #[error("Store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Store answered with a non-success status.
    #[error("Store returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    /// Response body was not the expected JSON.
    #[error("Failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
