//! Error types for TinyKV
//!
//! Provides a unified error type for all client operations.

use thiserror::Error;

use crate::protocol::CommandType;

/// Result type alias using KvError
pub type Result<T> = std::result::Result<T, KvError>;

/// Unified error type for TinyKV client operations
#[derive(Debug, Error)]
pub enum KvError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Connection is closed")]
    Closed,

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Decode error: {0}")]
    Decode(String),

    /// The server answered with a non-empty `error` field
    #[error("{op} failed: {message}")]
    Operation { op: CommandType, message: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl KvError {
    pub(crate) fn decode(msg: impl Into<String>) -> Self {
        KvError::Decode(msg.into())
    }

    /// True when the connection can no longer be used after this error
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            KvError::Connect { .. } | KvError::Closed | KvError::Io(_)
        )
    }
}
