//! QQ Music playlist fetcher.
//!
//! The public playlist endpoint answers with a JSONP body even when
//! asked politely for JSON, so the payload is unwrapped from its
//! callback before parsing.

use crate::error::{Result, SourceError};
use crate::types::{ExternalPlaylist, PlaylistSource};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use seaglass_core::ExternalTrack;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "http://i.y.qq.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Known callback wrappers observed on this endpoint.
static JSONP_WRAPPER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^\s*(?:getplaysongid|callback|MusicJsonCallback|jsonCallback)\s*\()|(?:\)\s*;?\s*$)")
        .expect("valid regex")
});

#[derive(Debug, Deserialize)]
struct CdInfoResponse {
    #[serde(default)]
    cdlist: Vec<CdList>,
}

#[derive(Debug, Deserialize)]
struct CdList {
    #[serde(default)]
    dissname: Option<String>,
    #[serde(default)]
    logo: Option<String>,
    #[serde(default)]
    songlist: Vec<QqSong>,
}

#[derive(Debug, Deserialize)]
struct QqSong {
    /// Numeric QQ song id; some payloads name it `songid`.
    #[serde(default)]
    id: Option<u64>,
    #[serde(default)]
    songid: Option<u64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    songname: Option<String>,
    #[serde(default)]
    singer: Vec<QqSinger>,
    #[serde(default)]
    album: Option<QqAlbum>,
    #[serde(default)]
    albummid: Option<String>,
    /// Duration in whole seconds.
    #[serde(default)]
    interval: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct QqSinger {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QqAlbum {
    #[serde(default)]
    mid: Option<String>,
}

impl QqSong {
    fn into_external_track(self) -> Option<ExternalTrack> {
        let title = self.title.or(self.songname).filter(|t| !t.is_empty())?;
        let artist = self
            .singer
            .iter()
            .filter_map(|s| s.name.as_deref())
            .collect::<Vec<_>>()
            .join("/");

        let album_mid = self.album.and_then(|a| a.mid).or(self.albummid);
        let artwork = album_mid.filter(|mid| !mid.is_empty()).map(|mid| {
            format!("https://y.gtimg.cn/music/photo_new/T002R800x800M000{mid}.jpg")
        });

        Some(ExternalTrack {
            title,
            artist,
            duration_secs: self.interval,
            source_id: self
                .id
                .or(self.songid)
                .map(|id| id.to_string())
                .unwrap_or_default(),
            artwork,
        })
    }
}

/// Strip the JSONP callback wrapper, leaving the JSON object.
fn unwrap_jsonp(body: &str) -> &str {
    let mut inner = body;
    // Both ends must go; two passes because the pattern anchors each.
    for _ in 0..2 {
        inner = match JSONP_WRAPPER.find(inner) {
            Some(m) if m.start() == 0 => &inner[m.end()..],
            Some(m) => &inner[..m.start()],
            None => break,
        };
    }
    inner.trim()
}

/// Client for the QQ Music public playlist endpoint.
pub struct QqClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for QqClient {
    fn default() -> Self {
        Self::new()
    }
}

impl QqClient {
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
}

#[async_trait]
impl PlaylistSource for QqClient {
    fn name(&self) -> &'static str {
        "qq"
    }

    async fn fetch_playlist(&self, playlist_id: &str) -> Result<ExternalPlaylist> {
        let url = format!(
            "{}/qzone/fcg-bin/fcg_ucc_getcdinfo_byids_cp.fcg",
            self.base_url
        );
        debug!(playlist_id = %playlist_id, "Fetching QQ Music playlist");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("type", "1"),
                ("utf8", "1"),
                ("disstid", playlist_id),
                ("loginUin", "0"),
            ])
            .header("Referer", "https://y.qq.com/n/yqq/playlist")
            .header("User-Agent", USER_AGENT)
            .header("Cookie", "uin=")
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(connection_error)?;

        if !response.status().is_success() {
            return Err(SourceError::Playlist(format!(
                "QQ Music answered with status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let json = unwrap_jsonp(&body);
        let parsed: CdInfoResponse = serde_json::from_str(json)
            .map_err(|e| SourceError::Parse(format!("QQ playlist payload: {e}")))?;

        let Some(cd) = parsed.cdlist.into_iter().next() else {
            return Err(SourceError::Playlist(format!(
                "QQ playlist {playlist_id} not found or private"
            )));
        };

        // An existing but empty playlist is not an error; the import
        // simply produces an empty matched list.
        let tracks: Vec<ExternalTrack> = cd
            .songlist
            .into_iter()
            .filter_map(QqSong::into_external_track)
            .collect();

        Ok(ExternalPlaylist {
            name: cd.dissname.unwrap_or_else(|| "QQ Music Playlist".to_string()),
            artwork: cd.logo.filter(|l| !l.is_empty()),
            tracks,
        })
    }

    fn concurrency(&self) -> usize {
        5
    }
}

fn connection_error(e: reqwest::Error) -> SourceError {
    if e.is_connect() || e.is_timeout() {
        SourceError::Unreachable(e.to_string())
    } else {
        SourceError::Request(e)
    }
}
