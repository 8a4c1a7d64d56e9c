//! The per-track resolution pipeline.
//!
//! Each external track becomes one catalog search (two when the
//! artist-qualified query comes back empty), then a tiered match
//! against the candidates. Tracks are resolved in fixed-size
//! concurrent windows so a long playlist cannot flood the server.

use crate::search::CatalogSearch;
use futures::future::join_all;
use seaglass_core::{resolve_match, strip_trailing_annotation, ExternalTrack, MatchOrigin, MatchedTrack};
use tracing::{debug, info};

/// Tuning for one import run, taken from the source service.
#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    /// Tracks resolved per concurrent window.
    pub concurrency: usize,
    /// Catalog candidates fetched per track.
    pub match_count: u32,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            concurrency: 5,
            match_count: 80,
        }
    }
}

/// Resolve every external track against the catalog.
///
/// Returns matched tracks in playlist order, skipping tracks with no
/// acceptable catalog candidate. A failed search counts as "no match"
/// for that track and never aborts the run.
pub async fn import_tracks<S: CatalogSearch + ?Sized>(
    catalog: &S,
    tracks: &[ExternalTrack],
    options: ImportOptions,
    origin: MatchOrigin,
) -> Vec<MatchedTrack> {
    let window = options.concurrency.max(1);
    let mut matched = Vec::with_capacity(tracks.len());

    for chunk in tracks.chunks(window) {
        let resolved = join_all(
            chunk
                .iter()
                .map(|track| resolve_track(catalog, track, options.match_count, origin)),
        )
        .await;
        matched.extend(resolved.into_iter().flatten());
    }

    info!(
        total = tracks.len(),
        matched = matched.len(),
        "Resolved external playlist against catalog"
    );
    matched
}

async fn resolve_track<S: CatalogSearch + ?Sized>(
    catalog: &S,
    track: &ExternalTrack,
    match_count: u32,
    origin: MatchOrigin,
) -> Option<MatchedTrack> {
    let cleaned_title = strip_trailing_annotation(&track.title);
    let query = format!("{cleaned_title} {}", track.artist);
    let query = query.trim();

    let mut candidates = match catalog.search(query, 1, match_count).await {
        Ok(page) => page.data,
        Err(e) => {
            debug!(title = %track.title, error = %e, "Catalog search failed");
            return None;
        }
    };

    // Artist names rarely survive into file tags verbatim; fall back
    // to the bare title before giving up.
    if candidates.is_empty() && query != cleaned_title && !cleaned_title.is_empty() {
        candidates = match catalog.search(cleaned_title, 1, match_count).await {
            Ok(page) => page.data,
            Err(e) => {
                debug!(title = %track.title, error = %e, "Fallback catalog search failed");
                return None;
            }
        };
    }

    resolve_match(track, &candidates)
        .map(|catalog_track| MatchedTrack::merged(catalog_track, track.artwork.clone(), origin))
}
