//! Lyrics retrieval: embedded structured lyrics converted to LRC,
//! with a community lyrics API as fallback.

use crate::client::NavidromeClient;
use crate::error::{NavidromeError, Result};
use serde::Deserialize;
use std::fmt::Write as _;
use std::time::Duration;
use tracing::debug;

const FALLBACK_LYRICS_TIMEOUT: Duration = Duration::from_secs(10);

/// Artist tags that carry no information for a lyrics lookup.
const PLACEHOLDER_ARTISTS: [&str; 2] = ["unknown artist", "various artists"];
const PLACEHOLDER_ALBUMS: [&str; 1] = ["unknown album"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LyricsPayload {
    #[serde(default)]
    pub lyrics_list: Option<LyricsList>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LyricsList {
    #[serde(default)]
    pub structured_lyrics: Vec<StructuredLyrics>,
}

/// One lyrics variant as stored by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct StructuredLyrics {
    #[serde(default)]
    pub synced: bool,
    #[serde(default)]
    pub line: Vec<LyricLine>,
}

/// A single timed lyrics line.
#[derive(Debug, Clone, Deserialize)]
pub struct LyricLine {
    /// Offset from track start in milliseconds.
    #[serde(default)]
    pub start: Option<u64>,
    #[serde(default)]
    pub value: Option<String>,
}

/// Convert the first synced lyrics variant to LRC text.
///
/// Lines without a timestamp or text are skipped; returns `None` when
/// no synced variant with lines exists or nothing could be rendered.
pub fn to_lrc(variants: &[StructuredLyrics]) -> Option<String> {
    let synced = variants.iter().find(|v| v.synced && !v.line.is_empty())?;

    let mut lrc = String::new();
    for line in &synced.line {
        let (Some(start), Some(value)) = (line.start, line.value.as_ref()) else {
            continue;
        };
        let total_secs = start / 1000;
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        let centis = (start % 1000) / 10;
        let _ = writeln!(lrc, "[{minutes:02}:{seconds:02}.{centis:02}]{value}");
    }

    let trimmed = lrc.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl NavidromeClient {
    /// Lyrics embedded in the server's library for one song, as LRC.
    pub async fn song_lyrics(&self, song_id: &str) -> Result<Option<String>> {
        let payload: LyricsPayload = self
            .subsonic_get("getLyricsBySongId", &[("id", song_id.to_string())])
            .await?;
        Ok(payload
            .lyrics_list
            .and_then(|list| to_lrc(&list.structured_lyrics)))
    }

    /// Look up lyrics on the fallback community API by metadata.
    ///
    /// Placeholder artist/album tags are omitted from the query. A
    /// "not found" or implausibly short body yields `None`.
    pub async fn fallback_lyrics(
        &self,
        title: &str,
        artist: Option<&str>,
        album: Option<&str>,
    ) -> Result<Option<String>> {
        if title.is_empty() {
            return Ok(None);
        }

        let mut params = vec![("title", title.to_string())];
        if let Some(artist) = artist {
            if !PLACEHOLDER_ARTISTS.contains(&artist.to_lowercase().as_str()) {
                params.push(("artist", artist.to_string()));
            }
        }
        if let Some(album) = album {
            if !PLACEHOLDER_ALBUMS.contains(&album.to_lowercase().as_str()) {
                params.push(("album", album.to_string()));
            }
        }

        let url = format!("{}/lyrics", self.config.lyrics_api_url);
        debug!(url = %url, title = %title, "Fallback lyrics lookup");

        let response = self
            .http
            .get(&url)
            .query(&params)
            .timeout(FALLBACK_LYRICS_TIMEOUT)
            .send()
            .await
            .map_err(NavidromeError::Request)?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let body = response.text().await.map_err(NavidromeError::Request)?;
        let trimmed = body.trim();
        if trimmed.len() > 10 && !trimmed.to_lowercase().contains("not found") {
            Ok(Some(trimmed.to_string()))
        } else {
            Ok(None)
        }
    }
}
