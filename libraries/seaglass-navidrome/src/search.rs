//! Catalog search over the native API.
//!
//! Navidrome's native endpoints filter by column and paginate with
//! `_start`/`_end`, reporting the total row count in the
//! `x-total-count` header.

use crate::client::NavidromeClient;
use crate::error::Result;
use crate::types::{AlbumEntry, ArtistEntry, NativeSong, PlaylistInfo};
use seaglass_core::{CatalogTrack, SearchPage, DURATION_TOLERANCE_SECS};
use tracing::info;

/// Default page size for search and browse calls.
pub const PAGE_SIZE: u32 = 50;

fn page_bounds(page: u32, count: u32) -> (u64, u64) {
    let start = u64::from(page.saturating_sub(1)) * u64::from(count);
    (start, start + u64::from(count))
}

fn range_params(start: u64, end: u64) -> [(&'static str, String); 2] {
    [("_start", start.to_string()), ("_end", end.to_string())]
}

impl NavidromeClient {
    /// Search songs by free-text title.
    ///
    /// Returns one page of candidates; an empty page (never an error)
    /// when nothing matches. Safe to call at the import pipeline's
    /// concurrency budget.
    pub async fn search_songs(
        &self,
        query: &str,
        page: u32,
        count: u32,
    ) -> Result<SearchPage<CatalogTrack>> {
        let (start, end) = page_bounds(page, count);
        let mut params = vec![("title", query.to_string())];
        params.extend(range_params(start, end));

        let (songs, total): (Vec<NativeSong>, u64) = self.native_get("song", &params).await?;
        let is_end = start + songs.len() as u64 >= total;
        Ok(SearchPage {
            is_end,
            data: songs.into_iter().map(NativeSong::into_catalog_track).collect(),
        })
    }

    /// Search albums by name.
    pub async fn search_albums(&self, query: &str, page: u32) -> Result<SearchPage<AlbumEntry>> {
        let (start, end) = page_bounds(page, PAGE_SIZE);
        let mut params = vec![("name", query.to_string())];
        params.extend(range_params(start, end));

        let (albums, total): (Vec<AlbumEntry>, u64) = self.native_get("album", &params).await?;
        let is_end = start + albums.len() as u64 >= total;
        Ok(SearchPage { is_end, data: albums })
    }

    /// Search artists by name.
    pub async fn search_artists(&self, query: &str, page: u32) -> Result<SearchPage<ArtistEntry>> {
        let (start, end) = page_bounds(page, PAGE_SIZE);
        let mut params = vec![("name", query.to_string())];
        params.extend(range_params(start, end));

        let (artists, total): (Vec<ArtistEntry>, u64) = self.native_get("artist", &params).await?;
        let is_end = start + artists.len() as u64 >= total;
        Ok(SearchPage { is_end, data: artists })
    }

    /// Search playlists by name; an empty query lists all of them.
    pub async fn search_playlists(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchPage<PlaylistInfo>> {
        let (start, end) = page_bounds(page, PAGE_SIZE);
        let mut params = vec![
            ("_sort", "name".to_string()),
            ("_order", "ASC".to_string()),
        ];
        params.extend(range_params(start, end));
        let trimmed = query.trim();
        if !trimmed.is_empty() {
            params.push(("name", trimmed.to_string()));
        }

        let (playlists, total): (Vec<PlaylistInfo>, u64) =
            self.native_get("playlist", &params).await?;
        let is_end = start + playlists.len() as u64 >= total;
        Ok(SearchPage { is_end, data: playlists })
    }

    /// Browse the whole catalog ordered by title.
    pub async fn all_songs(&self, page: u32) -> Result<SearchPage<CatalogTrack>> {
        let (start, end) = page_bounds(page, PAGE_SIZE);
        let mut params = vec![
            ("_sort", "title".to_string()),
            ("_order", "ASC".to_string()),
        ];
        params.extend(range_params(start, end));

        let (songs, total): (Vec<NativeSong>, u64) = self.native_get("song", &params).await?;
        let is_end = start + songs.len() as u64 >= total;
        Ok(SearchPage {
            is_end,
            data: songs.into_iter().map(NativeSong::into_catalog_track).collect(),
        })
    }

    /// All songs by one artist.
    pub async fn artist_songs(
        &self,
        artist_id: &str,
        page: u32,
    ) -> Result<SearchPage<CatalogTrack>> {
        let (start, end) = page_bounds(page, PAGE_SIZE);
        let mut params = vec![("artist_id", artist_id.to_string())];
        params.extend(range_params(start, end));

        let (songs, total): (Vec<NativeSong>, u64) = self.native_get("song", &params).await?;
        let is_end = start + songs.len() as u64 >= total;
        Ok(SearchPage {
            is_end,
            data: songs.into_iter().map(NativeSong::into_catalog_track).collect(),
        })
    }

    /// Recover a track whose stored id went stale (e.g. after a
    /// rescan changed file ids) by re-searching on title and artist.
    ///
    /// Exact title+artist with tolerant duration is preferred; a
    /// title-only candidate is accepted only within half the usual
    /// duration tolerance.
    pub async fn refresh_stale_id(
        &self,
        title: &str,
        artist: &str,
        duration_secs: Option<u64>,
    ) -> Result<Option<String>> {
        if title.is_empty() || artist.is_empty() {
            return Ok(None);
        }

        let query = format!("{title} {artist}");
        let page = self.search_songs(&query, 1, 5).await?;

        let exact = page.data.iter().find(|item| {
            item.title == title
                && item.artist == artist
                && match (item.duration_secs, duration_secs) {
                    (Some(local), Some(remote)) => {
                        local.abs_diff(remote) < DURATION_TOLERANCE_SECS
                    }
                    _ => true,
                }
        });
        if let Some(found) = exact {
            return Ok(Some(found.id.clone()));
        }

        let Some(remote) = duration_secs else {
            return Ok(None);
        };
        let strict = page.data.iter().find(|item| {
            item.title == title
                && item
                    .duration_secs
                    .is_some_and(|local| local.abs_diff(remote) * 2 < DURATION_TOLERANCE_SECS)
        });
        if let Some(found) = strict {
            info!(title = %title, new_id = %found.id, "Recovered stale track id by strict duration match");
            return Ok(Some(found.id.clone()));
        }

        Ok(None)
    }
}
