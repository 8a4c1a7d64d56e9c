//! Playlist import pipeline.
//!
//! Ties the pieces together: share-link recognition and playlist
//! fetching from [`seaglass_sources`], tiered matching from
//! [`seaglass_core`], and catalog search plus playlist sync against a
//! [`seaglass_navidrome`] server.

#![forbid(unsafe_code)]

mod error;
mod importer;
mod pipeline;
mod search;
mod sync;

pub use error::{ImportError, Result};
pub use importer::{ImportOutcome, PlaylistImporter};
pub use pipeline::{import_tracks, ImportOptions};
pub use search::CatalogSearch;
pub use sync::sync_playlist;
