//! Catalog browsing: albums, starred and top lists, internet radio.

use crate::client::NavidromeClient;
use crate::error::Result;
use crate::types::{
    AlbumEntry, GetAlbumPayload, GetArtistPayload, NativeSong, RadioStation, RandomSongsPayload,
    StarredPayload, SubsonicSong,
};
use seaglass_core::{CatalogTrack, SearchPage};

use crate::search::PAGE_SIZE;

/// Server-side orderings backing the top lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopList {
    /// Most recently added to the library.
    Newest,
    /// Highest play count.
    Frequent,
    /// Most recently played.
    Recent,
}

impl TopList {
    fn sort_field(self) -> &'static str {
        match self {
            TopList::Newest => "createdAt",
            TopList::Frequent => "play_count",
            TopList::Recent => "play_date",
        }
    }
}

impl NavidromeClient {
    /// An album with its songs.
    pub async fn album(&self, id: &str) -> Result<Option<(AlbumEntry, Vec<CatalogTrack>)>> {
        let payload: GetAlbumPayload = self.subsonic_get("getAlbum", &[("id", id.to_string())]).await?;
        Ok(payload.album.map(|album| {
            let tracks = album
                .song
                .into_iter()
                .map(SubsonicSong::into_catalog_track)
                .collect();
            (album.album, tracks)
        }))
    }

    /// Albums by one artist.
    pub async fn artist_albums(&self, artist_id: &str) -> Result<Vec<AlbumEntry>> {
        let payload: GetArtistPayload = self
            .subsonic_get("getArtist", &[("id", artist_id.to_string())])
            .await?;
        Ok(payload.artist.map(|a| a.album).unwrap_or_default())
    }

    /// The user's starred songs.
    pub async fn starred_songs(&self) -> Result<Vec<CatalogTrack>> {
        let payload: StarredPayload = self.subsonic_get("getStarred", &[]).await?;
        Ok(payload
            .starred
            .map(|list| {
                list.song
                    .into_iter()
                    .map(SubsonicSong::into_catalog_track)
                    .collect()
            })
            .unwrap_or_default())
    }

    /// A random selection of songs.
    pub async fn random_songs(&self, size: u32) -> Result<Vec<CatalogTrack>> {
        let payload: RandomSongsPayload = self
            .subsonic_get("getRandomSongs", &[("size", size.to_string())])
            .await?;
        Ok(payload
            .random_songs
            .map(|list| {
                list.song
                    .into_iter()
                    .map(SubsonicSong::into_catalog_track)
                    .collect()
            })
            .unwrap_or_default())
    }

    /// One page of a server-side top list, most relevant first.
    pub async fn top_songs(&self, list: TopList, page: u32) -> Result<SearchPage<CatalogTrack>> {
        let start = u64::from(page.saturating_sub(1)) * u64::from(PAGE_SIZE);
        let end = start + u64::from(PAGE_SIZE);
        let params = [
            ("_sort", list.sort_field().to_string()),
            ("_order", "DESC".to_string()),
            ("_start", start.to_string()),
            ("_end", end.to_string()),
        ];

        let (songs, total): (Vec<NativeSong>, u64) = self.native_get("song", &params).await?;
        let is_end = start + songs.len() as u64 >= total;
        Ok(SearchPage {
            is_end,
            data: songs.into_iter().map(NativeSong::into_catalog_track).collect(),
        })
    }

    /// All internet radio stations configured on the server.
    pub async fn radio_stations(&self) -> Result<Vec<RadioStation>> {
        let params = [
            ("_sort", "name".to_string()),
            ("_order", "ASC".to_string()),
            ("_start", "0".to_string()),
            ("_end", "200".to_string()),
        ];
        let (stations, _): (Vec<RadioStation>, u64) = self.native_get("radio", &params).await?;
        Ok(stations)
    }
}
