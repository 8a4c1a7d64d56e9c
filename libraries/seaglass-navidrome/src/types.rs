//! Types for Navidrome API requests and responses.

use seaglass_core::CatalogTrack;
use serde::{Deserialize, Serialize};

/// Configuration for connecting to a Navidrome server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the server (scheme optional, defaults to http)
    pub url: String,
    pub username: String,
    pub password: String,
    /// Fallback lyrics API for tracks without embedded lyrics.
    pub lyrics_api_url: String,
}

/// Default fallback lyrics service.
pub const DEFAULT_LYRICS_API_URL: &str = "https://lrc.xms.mx";

impl ServerConfig {
    /// Create a new server config.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            lyrics_api_url: DEFAULT_LYRICS_API_URL.to_string(),
        }
    }

    /// Override the fallback lyrics API base URL.
    pub fn with_lyrics_api(mut self, url: impl Into<String>) -> Self {
        self.lyrics_api_url = url.into();
        self
    }
}

// =============================================================================
// Native API Types
// =============================================================================

/// Request body for the native login endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response from a successful native login.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: Option<String>,
}

/// A song row from the native `/api/song` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeSong {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub has_cover_art: bool,
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default)]
    pub album_id: Option<String>,
}

impl NativeSong {
    /// Cover-art id: the song's own art when embedded, the album's otherwise.
    pub fn cover_art_id(&self) -> Option<String> {
        if self.has_cover_art {
            Some(self.id.clone())
        } else {
            self.album_id.clone()
        }
    }

    pub fn into_catalog_track(self) -> CatalogTrack {
        CatalogTrack {
            id: self.id,
            title: self.title.unwrap_or_else(|| "Unknown Song".to_string()),
            artist: self.artist.unwrap_or_else(|| "Unknown Artist".to_string()),
            album: self.album.unwrap_or_else(|| "Unknown Album".to_string()),
            duration_secs: self.duration.map(|d| d.round() as u64),
            suffix: self.suffix,
        }
    }
}

/// A track row from the native `/api/playlist/{id}/tracks` endpoint.
///
/// Same shape as [`NativeSong`] except the catalog id lives in
/// `mediaFileId`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativePlaylistTrack {
    pub media_file_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub suffix: Option<String>,
}

impl NativePlaylistTrack {
    pub fn into_catalog_track(self) -> CatalogTrack {
        CatalogTrack {
            id: self.media_file_id,
            title: self.title.unwrap_or_else(|| "Unknown Song".to_string()),
            artist: self.artist.unwrap_or_else(|| "Unknown Artist".to_string()),
            album: self.album.unwrap_or_else(|| "Unknown Album".to_string()),
            duration_secs: self.duration.map(|d| d.round() as u64),
            suffix: self.suffix,
        }
    }
}

/// An album row from the native `/api/album` endpoint or the Subsonic
/// `getAlbum` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumEntry {
    pub id: String,
    #[serde(default, alias = "title")]
    pub name: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default)]
    pub song_count: Option<u32>,
    #[serde(default)]
    pub year: Option<i32>,
}

/// An artist row from the native `/api/artist` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistEntry {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A playlist as reported by either API surface.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistInfo {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "owner")]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub song_count: Option<u32>,
    /// Total playlist length in seconds.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// An internet radio station from the native `/api/radio` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadioStation {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub stream_url: Option<String>,
    #[serde(default)]
    pub home_page_url: Option<String>,
}

// =============================================================================
// Subsonic Types
// =============================================================================

/// A song from a Subsonic REST response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsonicSong {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub album_id: Option<String>,
}

impl SubsonicSong {
    pub fn into_catalog_track(self) -> CatalogTrack {
        CatalogTrack {
            id: self.id,
            title: self.title.unwrap_or_else(|| "Unknown Song".to_string()),
            artist: self.artist.unwrap_or_else(|| "Unknown Artist".to_string()),
            album: self.album.unwrap_or_else(|| "Unknown Album".to_string()),
            duration_secs: self.duration.map(|d| d.round() as u64),
            suffix: self.suffix,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AlbumWithSongs {
    #[serde(flatten)]
    pub album: AlbumEntry,
    #[serde(default)]
    pub song: Vec<SubsonicSong>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArtistWithAlbums {
    #[serde(default)]
    pub album: Vec<AlbumEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetAlbumPayload {
    pub album: Option<AlbumWithSongs>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetArtistPayload {
    pub artist: Option<ArtistWithAlbums>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StarredPayload {
    #[serde(default)]
    pub starred: Option<SongList>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RandomSongsPayload {
    #[serde(default)]
    pub random_songs: Option<SongList>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SongList {
    #[serde(default)]
    pub song: Vec<SubsonicSong>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatePlaylistPayload {
    pub playlist: Option<PlaylistInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetPlaylistsPayload {
    #[serde(default)]
    pub playlists: Option<PlaylistsWrap>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlaylistsWrap {
    #[serde(default)]
    pub playlist: Vec<PlaylistInfo>,
}

/// Payload for operations that return only the envelope status.
#[derive(Debug, Deserialize)]
pub(crate) struct EmptyPayload {}
