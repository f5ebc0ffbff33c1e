use std::fmt;

use async_trait::async_trait;

use crate::types::{Album, ReleaseTrack};

/// One page of playlist membership: the stored track ids in playlist order
/// plus the token of the following page, if any.
#[derive(Debug, Clone)]
pub struct PlaylistPage {
    pub items: Vec<String>,
    pub next: Option<String>,
}

/// Error surfaced by a catalog provider operation.
#[derive(Debug)]
pub enum ProviderError {
    Http(reqwest::Error),
    Api(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Http(err) => write!(f, "http error: {}", err),
            ProviderError::Api(msg) => write!(f, "api error: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProviderError::Http(err) => Some(err),
            ProviderError::Api(_) => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Http(err)
    }
}

/// The catalog capability the synchronization engine runs against.
///
/// The engine only ever talks to the streaming service through this trait:
/// release listings and track expansion feed the fetcher, the playlist
/// operations carry the diff, and the duration lookup serves the run
/// summary. The production implementation is
/// [`SpotifyCatalog`](crate::spotify::SpotifyCatalog); tests substitute a
/// mock.
#[async_trait]
pub trait CatalogProvider {
    /// Lists all albums and singles by an artist, restricted to one market.
    async fn artist_releases(
        &self,
        artist_id: &str,
        market: &str,
    ) -> Result<Vec<Album>, ProviderError>;

    /// Lists the tracks of one release.
    async fn release_tracks(&self, release_id: &str) -> Result<Vec<ReleaseTrack>, ProviderError>;

    /// Fetches one page of a playlist's stored tracks. `page` is the token
    /// returned by the previous page, or `None` for the first page.
    async fn playlist_tracks_page(
        &self,
        playlist_id: &str,
        page: Option<String>,
    ) -> Result<PlaylistPage, ProviderError>;

    /// Inserts tracks into a playlist at the given position.
    async fn add_playlist_items(
        &self,
        playlist_id: &str,
        track_ids: &[String],
        insert_position: u32,
    ) -> Result<(), ProviderError>;

    /// Removes every occurrence of the given tracks from a playlist.
    async fn remove_playlist_items(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), ProviderError>;

    /// Returns the duration of a track in milliseconds.
    async fn track_duration_ms(&self, track_id: &str) -> Result<u64, ProviderError>;
}
