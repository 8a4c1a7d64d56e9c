//! Seaglass Navidrome Client
//!
//! HTTP client for a Navidrome server, covering both of its API
//! surfaces:
//!
//! - the **Subsonic-compatible REST API** (`/rest/...`) with salted
//!   per-request token auth, used for playlists, albums, starred
//!   songs, lyrics, scrobbling and media URLs;
//! - the **native API** (`/api/...`) with a cached bearer token, used
//!   for fast column-filtered, paginated search and browse.
//!
//! # Example
//!
//! ```ignore
//! use seaglass_navidrome::{NavidromeClient, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::new("https://music.example.com", "alice", "secret");
//!     let client = NavidromeClient::new(config)?;
//!
//!     let page = client.search_songs("yesterday", 1, 50).await?;
//!     for track in &page.data {
//!         println!("{} - {}", track.artist, track.title);
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

mod auth;
mod browse;
mod client;
mod error;
mod lyrics;
mod playlist;
mod search;
mod types;

pub use browse::TopList;
pub use client::NavidromeClient;
pub use error::{NavidromeError, Result};
pub use lyrics::{to_lrc, LyricLine, StructuredLyrics};
pub use search::PAGE_SIZE;
pub use types::{
    AlbumEntry, ArtistEntry, NativeSong, PlaylistInfo, RadioStation, ServerConfig, SubsonicSong,
    DEFAULT_LYRICS_API_URL,
};
