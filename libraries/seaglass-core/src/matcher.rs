//! Tiered best-match selection over catalog search candidates.

use crate::normalize::{normalize, strip_trailing_annotation};
use crate::types::{CatalogTrack, ExternalTrack};

/// Allowed deviation between external and local track lengths.
pub const DURATION_TOLERANCE_SECS: u64 = 3;

/// Select the best local candidate for an external track.
///
/// Title equality under [`normalize`] is a hard filter. Among
/// title-matching candidates, tier 1 (artist also matches) beats
/// tier 2 (only the duration is within [`DURATION_TOLERANCE_SECS`]).
/// A tier-1 candidate whose duration also matches ends the scan
/// immediately. A single forward pass keeps at most one candidate per
/// tier; unknown durations on either side count as a duration match.
///
/// Returns `None` when no candidate clears either tier. Callers treat
/// that as "skip this track", never as an error.
pub fn resolve_match<'a>(
    external: &ExternalTrack,
    candidates: &'a [CatalogTrack],
) -> Option<&'a CatalogTrack> {
    let wanted_title = normalize(strip_trailing_annotation(&external.title));
    let wanted_artist = normalize(&external.artist);

    let mut tier1: Option<&CatalogTrack> = None;
    let mut tier2: Option<&CatalogTrack> = None;

    for candidate in candidates {
        if normalize(&candidate.title) != wanted_title {
            continue;
        }

        let artist_match = normalize(&candidate.artist) == wanted_artist;
        let duration_match = match (candidate.duration_secs, external.duration_secs) {
            (Some(local), Some(remote)) => local.abs_diff(remote) <= DURATION_TOLERANCE_SECS,
            _ => true,
        };

        if artist_match {
            if duration_match {
                return Some(candidate);
            }
            if tier1.is_none() {
                tier1 = Some(candidate);
            }
        } else if duration_match && tier1.is_none() && tier2.is_none() {
            tier2 = Some(candidate);
        }
    }

    tier1.or(tier2)
}
