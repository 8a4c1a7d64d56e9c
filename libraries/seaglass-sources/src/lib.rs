//! External playlist sources.
//!
//! Fetchers for QQ Music and Netease Cloud Music playlists, plus
//! recognition of the many share-link shapes users paste. Each source
//! implements [`PlaylistSource`], the seam the import pipeline builds
//! on.

#![forbid(unsafe_code)]

mod error;
mod link;
mod netease;
mod qq;
mod types;

pub use error::{Result, SourceError};
pub use link::{candidates, SourceLink};
pub use netease::NeteaseClient;
pub use qq::QqClient;
pub use types::{ExternalPlaylist, PlaylistSource};
