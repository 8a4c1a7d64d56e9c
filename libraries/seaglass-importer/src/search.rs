//! Catalog search seam.
//!
//! The pipeline only needs one operation from the local catalog. The
//! trait keeps the matching logic testable without a server.

use async_trait::async_trait;
use seaglass_core::{CatalogTrack, SearchPage};
use seaglass_navidrome::NavidromeClient;

/// A searchable local catalog.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// One page of song candidates for a free-text query.
    async fn search(
        &self,
        query: &str,
        page: u32,
        count: u32,
    ) -> seaglass_navidrome::Result<SearchPage<CatalogTrack>>;
}

#[async_trait]
impl CatalogSearch for NavidromeClient {
    async fn search(
        &self,
        query: &str,
        page: u32,
        count: u32,
    ) -> seaglass_navidrome::Result<SearchPage<CatalogTrack>> {
        self.search_songs(query, page, count).await
    }
}
