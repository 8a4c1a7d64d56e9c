//! Error types for the import pipeline.

use seaglass_navidrome::NavidromeError;
use seaglass_sources::SourceError;
use thiserror::Error;

/// Errors that can abort a playlist import.
///
/// Per-track resolution failures never surface here; they only shrink
/// the result.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The external source could not deliver the playlist
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The local catalog was unreachable or rejected us
    #[error(transparent)]
    Navidrome(#[from] NavidromeError),

    /// The input matched none of the recognized share-link shapes
    #[error("Unrecognized playlist link: {0}")]
    UnrecognizedLink(String),
}

/// Result type for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;
