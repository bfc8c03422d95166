//! Fetch error types.

use thiserror::Error;

/// Errors that can occur while fetching and decoding an image.
///
/// Carried as data through the load lifecycle; a fetch failure is an expected
/// operational event, never a panic.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Network-level failure (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {reason}")]
    HttpStatus {
        /// Status code returned by the server.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
    },

    /// The response body could not be decoded as an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// Local filesystem read failed.
    #[error("io error: {0}")]
    Io(String),
}

impl FetchError {
    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Creates an IO error.
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Creates an HTTP status error.
    #[must_use]
    pub fn http_status(status: u16, reason: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            reason: reason.into(),
        }
    }
}
