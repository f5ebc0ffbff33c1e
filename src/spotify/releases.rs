use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    spotify::wait_for_retry_after,
    types::{Album, AlbumResponse, AlbumTracksResponse, ReleaseTrack},
};

/// Retrieves albums and singles for a specific artist from the Spotify Web
/// API.
///
/// Fetches the artist's discography restricted to one market, covering the
/// `album` and `single` release groups. The function handles rate limiting
/// gracefully by respecting the `Retry-After` header when encountering 429
/// Too Many Requests responses, and retries 502 Bad Gateway responses after
/// a 10-second delay.
///
/// # Arguments
///
/// * `artist_id` - Spotify ID of the artist to fetch releases for
/// * `token` - Valid access token for Spotify API authentication
/// * `market` - ISO 3166-1 alpha-2 country code restricting availability
/// * `limit` - Maximum number of albums to return (1-50)
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<Album>)` - List of albums in the provider's enumeration order
/// - `Err(reqwest::Error)` - Network error, API error, or HTTP error
///
/// # API Endpoint
///
/// Uses Spotify's `/artists/{id}/albums` endpoint with `include_groups`,
/// `market` and `limit` parameters.
///
/// # Error Handling
///
/// - Rate limit responses are handled automatically with retry logic
/// - Network errors are propagated to the caller
/// - Invalid artist IDs result in API errors that are propagated
/// - Malformed responses are handled by reqwest's JSON parsing
pub async fn get_artist_releases(
    artist_id: &str,
    token: &str,
    market: &str,
    limit: u32,
) -> Result<Vec<Album>, reqwest::Error> {
    let api_url = format!(
        "{uri}/artists/{id}/albums?include_groups=album,single&market={market}&limit={limit}",
        uri = &config::spotify_apiurl(),
        id = artist_id,
        market = market,
        limit = limit
    );

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

        let json = response.json::<AlbumResponse>().await?;
        return Ok(json.items);
    }
}

/// Retrieves the track listing of a single release.
///
/// Track items can carry a null id when the track is unavailable in the
/// requesting market; callers are expected to drop those. Applies the same
/// 429/502 retry handling as [`get_artist_releases`].
pub async fn get_release_tracks(
    release_id: &str,
    token: &str,
) -> Result<Vec<ReleaseTrack>, reqwest::Error> {
    let api_url = format!(
        "{uri}/albums/{id}/tracks?limit=50",
        uri = &config::spotify_apiurl(),
        id = release_id
    );

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
                        return Err(err);
                    }
                }
            }
            Err(err) => {
                return Err(err);
            }
        };

        let json = response.json::<AlbumTracksResponse>().await?;
        return Ok(json.items);
    }
}
