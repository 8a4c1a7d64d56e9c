//! Shared types for external playlist sources.

use crate::error::Result;
use async_trait::async_trait;
use seaglass_core::ExternalTrack;

/// A playlist fetched from a third-party streaming service.
#[derive(Debug, Clone)]
pub struct ExternalPlaylist {
    /// Display name of the playlist on the source service.
    pub name: String,
    /// Cover image URL, when the source provides one.
    pub artwork: Option<String>,
    /// Tracks in source order.
    pub tracks: Vec<ExternalTrack>,
}

/// A service that can resolve a playlist id into its track list.
///
/// Implementations also carry the per-service tuning knobs the import
/// pipeline needs: how many tracks to resolve against the catalog at
/// once, and how many search candidates to consider per track.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    /// Short identifier used in logs and [`ExternalTrack::source_id`].
    fn name(&self) -> &'static str;

    /// Fetch the playlist with the given source-native id.
    async fn fetch_playlist(&self, playlist_id: &str) -> Result<ExternalPlaylist>;

    /// How many tracks the importer may resolve concurrently.
    fn concurrency(&self) -> usize;

    /// How many catalog candidates to fetch per track.
    fn match_result_count(&self) -> u32 {
        80
    }
}
