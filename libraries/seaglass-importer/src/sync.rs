//! Server-side playlist sync.
//!
//! An import can optionally be materialized as a server playlist. The
//! server has no replace operation, so an existing playlist with the
//! same name is deleted and recreated. Sync failures are logged and
//! reported, never fatal; the caller still has the matched tracks.

use seaglass_navidrome::NavidromeClient;
use tracing::{info, warn};

/// Replace (or create) the named server playlist with the given tracks.
///
/// Returns the new playlist id, or `None` when any step failed.
pub async fn sync_playlist(
    client: &NavidromeClient,
    name: &str,
    track_ids: &[String],
) -> Option<String> {
    if name.is_empty() || track_ids.is_empty() {
        return None;
    }

    match client.find_playlist_by_name(name).await {
        Ok(Some(existing)) => {
            if let Err(e) = client.delete_playlist(&existing.id).await {
                warn!(playlist = %name, error = %e, "Could not delete existing playlist");
                return None;
            }
        }
        Ok(None) => {}
        Err(e) => {
            warn!(playlist = %name, error = %e, "Could not look up existing playlist");
            return None;
        }
    }

    let Some(playlist_id) = client.create_playlist(name).await else {
        warn!(playlist = %name, "Could not create playlist");
        return None;
    };

    if !client.add_tracks(&playlist_id, track_ids).await {
        warn!(playlist = %name, "Could not add tracks to playlist");
        return None;
    }

    info!(
        playlist = %name,
        tracks = track_ids.len(),
        "Synced playlist to server"
    );
    Some(playlist_id)
}
