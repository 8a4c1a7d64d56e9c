//! Error types for the Navidrome client.

use thiserror::Error;

/// Errors that can occur when talking to a Navidrome server.
#[derive(Error, Debug)]
pub enum NavidromeError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Server returned a non-2xx HTTP response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Subsonic API reported a failure
    #[error("Navidrome API error (code {code}): {message}")]
    Api { code: i64, message: String },

    /// Authentication failed (wrong username or password)
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// The requested object id no longer exists on the server
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Result type for Navidrome client operations.
pub type Result<T> = std::result::Result<T, NavidromeError>;
