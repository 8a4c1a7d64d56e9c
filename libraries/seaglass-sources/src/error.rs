//! Error types for external playlist sources.

use thiserror::Error;

/// Errors that can occur while fetching an external playlist.
#[derive(Error, Debug)]
pub enum SourceError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Source service is offline or unreachable
    #[error("Source unreachable: {0}")]
    Unreachable(String),

    /// Playlist does not exist, is private, or came back empty
    #[error("Playlist unavailable: {0}")]
    Playlist(String),

    /// Failed to parse the source response
    #[error("Failed to parse source response: {0}")]
    Parse(String),

    /// The input matched none of the recognized share-link shapes
    #[error("Unrecognized playlist link: {0}")]
    UnrecognizedLink(String),
}

/// Result type for playlist source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
