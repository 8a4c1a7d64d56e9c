//! Playlist operations: listing, content retrieval, and the mutating
//! calls used by playlist sync.

use crate::client::NavidromeClient;
use crate::error::Result;
use crate::types::{
    CreatePlaylistPayload, EmptyPayload, GetPlaylistsPayload, NativePlaylistTrack, PlaylistInfo,
};
use seaglass_core::CatalogTrack;
use tracing::{error, warn};

/// Playlist contents are fetched in one request; Navidrome caps
/// playlists well below this.
const PLAYLIST_TRACKS_FETCH_LIMIT: u64 = 10_000;

impl NavidromeClient {
    /// Metadata for one playlist.
    pub async fn playlist_info(&self, id: &str) -> Result<PlaylistInfo> {
        let (info, _) = self
            .native_get::<PlaylistInfo>(&format!("playlist/{id}"), &[])
            .await?;
        Ok(info)
    }

    /// All tracks of a playlist, in playlist order.
    pub async fn playlist_tracks(&self, id: &str) -> Result<Vec<CatalogTrack>> {
        let params = [
            ("_start", "0".to_string()),
            ("_end", PLAYLIST_TRACKS_FETCH_LIMIT.to_string()),
        ];
        let (tracks, _): (Vec<NativePlaylistTrack>, u64) = self
            .native_get(&format!("playlist/{id}/tracks"), &params)
            .await?;
        Ok(tracks
            .into_iter()
            .map(NativePlaylistTrack::into_catalog_track)
            .collect())
    }

    /// All playlists visible to the user, via the Subsonic API.
    pub async fn list_playlists(&self) -> Result<Vec<PlaylistInfo>> {
        let payload: GetPlaylistsPayload = self.subsonic_get("getPlaylists", &[]).await?;
        Ok(payload.playlists.map(|p| p.playlist).unwrap_or_default())
    }

    /// Find a playlist by exact name.
    pub async fn find_playlist_by_name(&self, name: &str) -> Result<Option<PlaylistInfo>> {
        let playlists = self.list_playlists().await?;
        Ok(playlists
            .into_iter()
            .find(|p| p.name.as_deref() == Some(name)))
    }

    /// Create a playlist, returning its id.
    ///
    /// Some server versions answer `createPlaylist` with a bare ok
    /// status and no playlist body; in that case the id is recovered
    /// by listing playlists and matching on name. `None` means the
    /// playlist could not be created or located.
    pub async fn create_playlist(&self, name: &str) -> Option<String> {
        let result: Result<CreatePlaylistPayload> = self
            .subsonic_get("createPlaylist", &[("name", name.to_string())])
            .await;

        match result {
            Ok(payload) => {
                if let Some(playlist) = payload.playlist {
                    return Some(playlist.id);
                }
                match self.find_playlist_by_name(name).await {
                    Ok(Some(found)) => Some(found.id),
                    Ok(None) => {
                        warn!(name = %name, "Playlist created but not found when listing");
                        None
                    }
                    Err(e) => {
                        error!(name = %name, error = %e, "Failed to locate created playlist");
                        None
                    }
                }
            }
            Err(e) => {
                error!(name = %name, error = %e, "Failed to create playlist");
                None
            }
        }
    }

    /// Append songs to a playlist. Returns false when the input is
    /// empty or the server rejected the update.
    pub async fn add_tracks(&self, playlist_id: &str, song_ids: &[String]) -> bool {
        if playlist_id.is_empty() || song_ids.is_empty() {
            return false;
        }

        let mut params = vec![("playlistId", playlist_id.to_string())];
        for id in song_ids {
            params.push(("songIdToAdd", id.clone()));
        }

        match self
            .subsonic_get::<EmptyPayload>("updatePlaylist", &params)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                error!(playlist_id = %playlist_id, error = %e, "Failed to add songs to playlist");
                false
            }
        }
    }

    /// Delete a playlist by id.
    pub async fn delete_playlist(&self, id: &str) -> Result<()> {
        self.subsonic_get::<EmptyPayload>("deletePlaylist", &[("id", id.to_string())])
            .await?;
        Ok(())
    }
}
