//! The top-level import orchestrator.

use crate::error::{ImportError, Result};
use crate::pipeline::{import_tracks, ImportOptions};
use crate::sync::sync_playlist;
use seaglass_core::{dedupe_by_id, MatchOrigin, MatchedTrack};
use seaglass_navidrome::NavidromeClient;
use seaglass_sources::{
    candidates, NeteaseClient, PlaylistSource, QqClient, SourceError, SourceLink,
};
use std::sync::Arc;
use tracing::{debug, info};

/// What a completed import produced.
#[derive(Debug)]
pub struct ImportOutcome {
    /// Playlist name as the source service displays it.
    pub name: String,
    /// Source cover image, when available.
    pub artwork: Option<String>,
    /// Matched tracks in playlist order, deduplicated by catalog id.
    pub tracks: Vec<MatchedTrack>,
    /// Id of the synced server playlist, when sync was requested and
    /// succeeded.
    pub playlist_id: Option<String>,
}

/// Imports external playlists into the local catalog.
pub struct PlaylistImporter {
    catalog: Arc<NavidromeClient>,
    qq: QqClient,
    netease: NeteaseClient,
}

impl PlaylistImporter {
    pub fn new(catalog: Arc<NavidromeClient>) -> Self {
        Self {
            catalog,
            qq: QqClient::new(),
            netease: NeteaseClient::new(),
        }
    }

    /// Replace the source clients. Used by tests.
    pub fn with_sources(mut self, qq: QqClient, netease: NeteaseClient) -> Self {
        self.qq = qq;
        self.netease = netease;
        self
    }

    /// Import the playlist referenced by `input`, which may be a share
    /// link, a bare URL, or a numeric playlist id.
    ///
    /// Ambiguous input yields several candidates; they are tried in
    /// order and the first fetchable playlist wins. With `sync` set,
    /// the result is also written back as a server playlist named
    /// after the source playlist.
    pub async fn import(&self, input: &str, sync: bool) -> Result<ImportOutcome> {
        let links = candidates(input);
        if links.is_empty() {
            return Err(ImportError::UnrecognizedLink(input.to_string()));
        }

        let mut last_error: Option<SourceError> = None;
        for link in links {
            let (source, origin): (&dyn PlaylistSource, MatchOrigin) = match &link {
                SourceLink::Qq(_) => (&self.qq, MatchOrigin::MergedFromQq),
                SourceLink::Netease(_) => (&self.netease, MatchOrigin::MergedFromNetease),
            };
            let (SourceLink::Qq(id) | SourceLink::Netease(id)) = &link;

            let playlist = match source.fetch_playlist(id).await {
                Ok(playlist) => playlist,
                Err(e) => {
                    debug!(source = source.name(), id = %id, error = %e, "Candidate fetch failed");
                    last_error = Some(e);
                    continue;
                }
            };

            info!(
                source = source.name(),
                playlist = %playlist.name,
                tracks = playlist.tracks.len(),
                "Fetched external playlist"
            );

            let options = ImportOptions {
                concurrency: source.concurrency(),
                match_count: source.match_result_count(),
            };
            let matched =
                import_tracks(self.catalog.as_ref(), &playlist.tracks, options, origin).await;
            let tracks = dedupe_by_id(matched);

            let playlist_id = if sync {
                let ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();
                sync_playlist(&self.catalog, &playlist.name, &ids).await
            } else {
                None
            };

            return Ok(ImportOutcome {
                name: playlist.name,
                artwork: playlist.artwork,
                tracks,
                playlist_id,
            });
        }

        // All candidates failed to fetch; surface the last failure.
        Err(last_error
            .map(ImportError::Source)
            .unwrap_or_else(|| ImportError::UnrecognizedLink(input.to_string())))
    }
}
