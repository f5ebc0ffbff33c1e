use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    spotify::wait_for_retry_after,
    types::{
        AddPlaylistItemsRequest, PlaylistItemUri, PlaylistTracksResponse,
        RemovePlaylistItemsRequest, SnapshotResponse,
    },
};

fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{}", track_id)
}

/// Fetches one page of a playlist's stored tracks.
///
/// The first page is addressed through the `/playlists/{id}/tracks`
/// endpoint; subsequent pages reuse the full `next` URL the previous page
/// returned, so the caller can drain membership by following `next` until
/// it is absent. Applies the read-path 429/502 retry handling.
pub async fn get_playlist_tracks_page(
    playlist_id: &str,
    token: &str,
    page_url: Option<String>,
) -> Result<PlaylistTracksResponse, reqwest::Error> {
    let api_url = match page_url {
        Some(url) => url,
        None => format!(
            "{uri}/playlists/{id}/tracks?limit=100",
            uri = &config::spotify_apiurl(),
            id = playlist_id
        ),
    };

    loop {
        let client = Client::new();
        let response = client.get(&api_url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => {
                if resp.status() == StatusCode::TOO_MANY_REQUESTS
                    && wait_for_retry_after(&resp).await
                {
                    continue; // retry
                }

                match resp.error_for_status() {
                    Ok(valid_response) => valid_response,
                    Err(err) => {
                        if let Some(status) = err.status() {
                            if status == StatusCode::BAD_GATEWAY {
                                sleep(Duration::from_secs(10)).await;
                                continue; // retry
                            }
                        }
                        return Err(err); // propagate other errors
                    }
                }
            }
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        let json = response.json::<PlaylistTracksResponse>().await?;
        return Ok(json);
    }
}

/// Inserts tracks into a playlist at the given position.
///
/// Mutation calls are not retried; any HTTP or API error propagates so the
/// caller can abort the run.
pub async fn add_tracks(
    playlist_id: &str,
    token: &str,
    track_ids: &[String],
    position: u32,
) -> Result<SnapshotResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let body = AddPlaylistItemsRequest {
        uris: track_ids.iter().map(|id| track_uri(id)).collect(),
        position,
    };

    let client = Client::new();
    let response = client
        .post(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<SnapshotResponse>().await?;
    Ok(json)
}

/// Removes every occurrence of the given tracks from a playlist.
///
/// Like [`add_tracks`], mutation errors propagate without retry.
pub async fn remove_tracks(
    playlist_id: &str,
    token: &str,
    track_ids: &[String],
) -> Result<SnapshotResponse, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}/tracks",
        uri = &config::spotify_apiurl(),
        id = playlist_id
    );

    let body = RemovePlaylistItemsRequest {
        tracks: track_ids
            .iter()
            .map(|id| PlaylistItemUri { uri: track_uri(id) })
            .collect(),
    };

    let client = Client::new();
    let response = client
        .delete(&api_url)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?
        .error_for_status()?;

    let json = response.json::<SnapshotResponse>().await?;
    Ok(json)
}
