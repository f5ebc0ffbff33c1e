use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    management::TokenManager,
    spotify::{playlist, releases, tracks},
    sync::provider::{CatalogProvider, PlaylistPage, ProviderError},
    types::{Album, ReleaseTrack},
};

/// The production [`CatalogProvider`]: the Spotify Web API driven through a
/// shared cached token.
///
/// Holds the [`TokenManager`] behind a mutex so every request picks up a
/// freshly refreshed access token when the cached one nears expiry.
pub struct SpotifyCatalog {
    token_mgr: Mutex<TokenManager>,
}

impl SpotifyCatalog {
    pub fn new(token_mgr: TokenManager) -> Self {
        Self {
            token_mgr: Mutex::new(token_mgr),
        }
    }

    async fn token(&self) -> String {
        self.token_mgr.lock().await.get_valid_token().await
    }
}

#[async_trait]
impl CatalogProvider for SpotifyCatalog {
    async fn artist_releases(
        &self,
        artist_id: &str,
        market: &str,
    ) -> Result<Vec<Album>, ProviderError> {
        let token = self.token().await;
        let albums = releases::get_artist_releases(artist_id, &token, market, 50).await?;
        Ok(albums)
    }

    async fn release_tracks(&self, release_id: &str) -> Result<Vec<ReleaseTrack>, ProviderError> {
        let token = self.token().await;
        let items = releases::get_release_tracks(release_id, &token).await?;
        Ok(items)
    }

    async fn playlist_tracks_page(
        &self,
        playlist_id: &str,
        page: Option<String>,
    ) -> Result<PlaylistPage, ProviderError> {
        let token = self.token().await;
        let response = playlist::get_playlist_tracks_page(playlist_id, &token, page).await?;

        // items without a track or id are unavailable entries; membership
        // testing only cares about resolvable ids
        let items: Vec<String> = response
            .items
            .into_iter()
            .filter_map(|item| item.track.and_then(|t| t.id))
            .filter(|id| !id.is_empty())
            .collect();

        Ok(PlaylistPage {
            items,
            next: response.next,
        })
    }

    async fn add_playlist_items(
        &self,
        playlist_id: &str,
        track_ids: &[String],
        insert_position: u32,
    ) -> Result<(), ProviderError> {
        let token = self.token().await;
        playlist::add_tracks(playlist_id, &token, track_ids, insert_position).await?;
        Ok(())
    }

    async fn remove_playlist_items(
        &self,
        playlist_id: &str,
        track_ids: &[String],
    ) -> Result<(), ProviderError> {
        let token = self.token().await;
        playlist::remove_tracks(playlist_id, &token, track_ids).await?;
        Ok(())
    }

    async fn track_duration_ms(&self, track_id: &str) -> Result<u64, ProviderError> {
        let token = self.token().await;
        let detail = tracks::get_track(track_id, &token).await?;
        Ok(detail.duration_ms)
    }
}
