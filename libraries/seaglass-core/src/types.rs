//! Domain types shared across the Seaglass crates.

use serde::{Deserialize, Serialize};

/// A track described by an external streaming catalog.
///
/// Produced by parsing a third-party playlist response. Immutable once
/// produced; it is only ever an input to matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalTrack {
    pub title: String,
    pub artist: String,
    /// Track length in seconds, when the source reports one.
    pub duration_secs: Option<u64>,
    /// Identifier within the external catalog (never a local id).
    pub source_id: String,
    /// Artwork URL from the external catalog, usually higher quality
    /// than the local server's generic cover.
    pub artwork: Option<String>,
}

/// A track in the local media catalog, as returned by a search call.
///
/// Instances are ephemeral per search; they are not cached across calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTrack {
    /// Opaque id, stable within the catalog.
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration_secs: Option<u64>,
    /// File format suffix, e.g. "flac".
    pub suffix: Option<String>,
}

/// Provenance tag for a matched track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOrigin {
    /// Matched against a QQ Music playlist entry.
    MergedFromQq,
    /// Matched against a Netease Cloud Music playlist entry.
    MergedFromNetease,
}

/// The outcome of reconciling one external track: local catalog fields
/// with the external track's artwork carried over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedTrack {
    /// Always a real catalog id at resolution time.
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub duration_secs: Option<u64>,
    pub suffix: Option<String>,
    /// Inherited from the external track.
    pub artwork: Option<String>,
    pub origin: MatchOrigin,
}

impl MatchedTrack {
    /// Build a matched track from a resolved catalog candidate,
    /// inheriting the external track's artwork.
    pub fn merged(catalog: &CatalogTrack, artwork: Option<String>, origin: MatchOrigin) -> Self {
        Self {
            id: catalog.id.clone(),
            title: catalog.title.clone(),
            artist: catalog.artist.clone(),
            album: catalog.album.clone(),
            duration_secs: catalog.duration_secs,
            suffix: catalog.suffix.clone(),
            artwork,
            origin,
        }
    }
}

/// One page of a paginated catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage<T> {
    /// True when no further pages exist.
    pub is_end: bool,
    pub data: Vec<T>,
}

impl<T> SearchPage<T> {
    /// An empty, final page.
    pub fn empty() -> Self {
        Self {
            is_end: true,
            data: Vec::new(),
        }
    }
}
