//! Error types for rivals-plugin.

use thiserror::Error;

/// Main error type for plugin operations.
///
/// Most failures never reach this type: protocol and handler problems are
/// converted into failure [`Response`](crate::Response) envelopes at the
/// dispatch boundary so the loop keeps running. `PluginError` covers the
/// plumbing that can genuinely fail (I/O on the pipe handles,
/// serialization).
#[derive(Debug, Error)]
pub enum PluginError {
    /// I/O error on the pipe handles.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Protocol error (malformed envelope, bad frame).
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// No handler registered for the given command name.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

/// Result type alias using PluginError.
pub type Result<T> = std::result::Result<T, PluginError>;
