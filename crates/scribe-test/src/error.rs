//! Test error types.

use thiserror::Error;

/// Errors raised while building a test request or reading a response.
#[derive(Debug, Error)]
pub enum TestError {
    /// The request URI did not parse.
    #[error("invalid URI {uri}: {reason}")]
    InvalidUri {
        /// The rejected URI.
        uri: String,
        /// Parser message.
        reason: String,
    },

    /// A header name or value was rejected.
    #[error("invalid header {name}")]
    InvalidHeader {
        /// The header name as given.
        name: String,
    },

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The body is not UTF-8.
    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
