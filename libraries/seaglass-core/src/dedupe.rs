//! Id-keyed deduplication of matched tracks.

use crate::types::MatchedTrack;
use std::collections::HashSet;

/// Remove repeated tracks by id, keeping the first occurrence.
///
/// Tracks with an empty id are invalid rows and are dropped
/// unconditionally. Run once, immediately before any playlist-mutating
/// operation, so the remote playlist receives no duplicate membership.
pub fn dedupe_by_id(tracks: Vec<MatchedTrack>) -> Vec<MatchedTrack> {
    let mut seen = HashSet::new();
    tracks
        .into_iter()
        .filter(|track| !track.id.is_empty() && seen.insert(track.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MatchOrigin;

    fn matched(id: &str, title: &str) -> MatchedTrack {
        MatchedTrack {
            id: id.to_string(),
            title: title.to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            duration_secs: Some(180),
            suffix: None,
            artwork: None,
            origin: MatchOrigin::MergedFromQq,
        }
    }

    #[test]
    fn test_first_occurrence_wins() {
        let tracks = vec![matched("a", "first"), matched("b", "second"), matched("a", "dup")];
        let deduped = dedupe_by_id(tracks);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].id, "a");
        assert_eq!(deduped[0].title, "first");
        assert_eq!(deduped[1].id, "b");
    }

    #[test]
    fn test_empty_id_dropped() {
        let tracks = vec![matched("", "invalid"), matched("a", "valid")];
        let deduped = dedupe_by_id(tracks);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].id, "a");
    }

    #[test]
    fn test_order_preserved() {
        let tracks = vec![matched("c", "c"), matched("a", "a"), matched("b", "b")];
        let ids: Vec<_> = dedupe_by_id(tracks).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedupe_by_id(Vec::new()).is_empty());
    }
}
