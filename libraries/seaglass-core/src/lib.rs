//! Seaglass Core
//!
//! Platform-agnostic domain types and the track reconciliation engine
//! used to match tracks from external streaming catalogs against a
//! self-hosted media server.
//!
//! The core crate defines:
//! - **Domain Types**: `ExternalTrack`, `CatalogTrack`, `MatchedTrack`
//! - **Normalizer**: canonical form for title/artist comparison
//! - **Match Resolver**: tiered best-match selection over candidates
//! - **Deduplicator**: stable id-keyed dedup before playlist mutation
//!
//! # Example
//!
//! ```rust
//! use seaglass_core::{normalize, resolve_match, CatalogTrack, ExternalTrack};
//!
//! let external = ExternalTrack {
//!     title: "Yesterday (Remastered)".into(),
//!     artist: "The Beatles".into(),
//!     duration_secs: Some(125),
//!     source_id: "qq-123".into(),
//!     artwork: None,
//! };
//!
//! let candidates = vec![CatalogTrack {
//!     id: "1".into(),
//!     title: "Yesterday".into(),
//!     artist: "The Beatles".into(),
//!     album: "Help!".into(),
//!     duration_secs: Some(127),
//!     suffix: Some("flac".into()),
//! }];
//!
//! let best = resolve_match(&external, &candidates);
//! assert_eq!(best.map(|t| t.id.as_str()), Some("1"));
//! assert_eq!(normalize("Song Title (Live)"), normalize("song title"));
//! ```

#![forbid(unsafe_code)]

mod dedupe;
mod matcher;
mod normalize;
mod types;

pub use dedupe::dedupe_by_id;
pub use matcher::{resolve_match, DURATION_TOLERANCE_SECS};
pub use normalize::{normalize, strip_trailing_annotation};
pub use types::{CatalogTrack, ExternalTrack, MatchOrigin, MatchedTrack, SearchPage};
