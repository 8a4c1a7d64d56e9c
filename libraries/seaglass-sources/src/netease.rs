//! Netease Cloud Music playlist fetcher.
//!
//! The playlist detail endpoint only returns full metadata for the
//! first handful of tracks; the rest arrive as bare ids. Fetching is
//! therefore two-step: playlist detail for the id list, then song
//! detail in batches.

use crate::error::{Result, SourceError};
use crate::types::{ExternalPlaylist, PlaylistSource};
use async_trait::async_trait;
use seaglass_core::ExternalTrack;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://music.163.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// The song detail endpoint rejects overly long id lists.
const SONG_DETAIL_BATCH: usize = 200;

#[derive(Debug, Deserialize)]
struct PlaylistDetailResponse {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    playlist: Option<PlaylistDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistDetail {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    cover_img_url: Option<String>,
    #[serde(default)]
    track_ids: Vec<TrackIdEntry>,
}

#[derive(Debug, Deserialize)]
struct TrackIdEntry {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct SongDetailResponse {
    #[serde(default)]
    songs: Vec<NeteaseSong>,
}

#[derive(Debug, Deserialize)]
struct NeteaseSong {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "ar")]
    artists: Vec<NeteaseArtist>,
    #[serde(default, alias = "al")]
    album: Option<NeteaseAlbum>,
    /// Duration in milliseconds.
    #[serde(default, alias = "dt")]
    duration: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct NeteaseArtist {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NeteaseAlbum {
    #[serde(default)]
    pic_url: Option<String>,
}

impl NeteaseSong {
    fn into_external_track(self) -> Option<ExternalTrack> {
        let title = self.name.filter(|t| !t.is_empty())?;
        let artist = self
            .artists
            .iter()
            .filter_map(|a| a.name.as_deref())
            .collect::<Vec<_>>()
            .join("/");
        if artist.is_empty() {
            return None;
        }

        Some(ExternalTrack {
            title,
            artist,
            duration_secs: self.duration.map(|ms| (ms + 500) / 1000),
            source_id: self.id.map(|id| id.to_string()).unwrap_or_default(),
            artwork: self.album.and_then(|a| a.pic_url).filter(|u| !u.is_empty()),
        })
    }
}

/// Client for the Netease Cloud Music public API.
pub struct NeteaseClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for NeteaseClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NeteaseClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host. Used by tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .get(format!("{}{path}", self.base_url))
            .header("Referer", "https://music.163.com/")
            .header("Origin", "https://music.163.com/")
            .timeout(REQUEST_TIMEOUT)
    }

    async fn song_details(&self, ids: &[u64]) -> Result<Vec<NeteaseSong>> {
        let mut songs = Vec::with_capacity(ids.len());
        for batch in ids.chunks(SONG_DETAIL_BATCH) {
            let id_list = format!(
                "[{}]",
                batch
                    .iter()
                    .map(u64::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            );
            let response = self
                .request("/api/song/detail/")
                .query(&[("ids", id_list.as_str())])
                .send()
                .await
                .map_err(connection_error)?;

            if !response.status().is_success() {
                return Err(SourceError::Playlist(format!(
                    "Netease song detail answered with status {}",
                    response.status()
                )));
            }

            let parsed: SongDetailResponse = response
                .json()
                .await
                .map_err(|e| SourceError::Parse(format!("Netease song detail: {e}")))?;
            songs.extend(parsed.songs);
        }
        Ok(songs)
    }
}

#[async_trait]
impl PlaylistSource for NeteaseClient {
    fn name(&self) -> &'static str {
        "netease"
    }

    async fn fetch_playlist(&self, playlist_id: &str) -> Result<ExternalPlaylist> {
        debug!(playlist_id = %playlist_id, "Fetching Netease playlist");

        let response = self
            .request("/api/v3/playlist/detail")
            .query(&[("id", playlist_id), ("n", "100000")])
            .send()
            .await
            .map_err(connection_error)?;

        if !response.status().is_success() {
            return Err(SourceError::Playlist(format!(
                "Netease answered with status {}",
                response.status()
            )));
        }

        let detail: PlaylistDetailResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("Netease playlist detail: {e}")))?;

        let playlist = match detail.playlist {
            Some(p) if detail.code == 200 => p,
            _ => {
                return Err(SourceError::Playlist(format!(
                    "Netease playlist {playlist_id} not found or private (code {})",
                    detail.code
                )))
            }
        };

        // An existing but empty playlist is not an error; the import
        // simply produces an empty matched list.
        let ids: Vec<u64> = playlist.track_ids.iter().map(|t| t.id).collect();
        let tracks: Vec<ExternalTrack> = self
            .song_details(&ids)
            .await?
            .into_iter()
            .filter_map(NeteaseSong::into_external_track)
            .collect();

        Ok(ExternalPlaylist {
            name: playlist
                .name
                .unwrap_or_else(|| "Netease Playlist".to_string()),
            artwork: playlist.cover_img_url.filter(|u| !u.is_empty()),
            tracks,
        })
    }

    fn concurrency(&self) -> usize {
        10
    }
}

fn connection_error(e: reqwest::Error) -> SourceError {
    if e.is_connect() || e.is_timeout() {
        SourceError::Unreachable(e.to_string())
    } else {
        SourceError::Request(e)
    }
}
