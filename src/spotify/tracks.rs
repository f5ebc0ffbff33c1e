use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{config, spotify::wait_for_retry_after, types::TrackDetail};

/// Retrieves the detail record of a single track, including its duration in
/// milliseconds. Used for the run summary statistics.
pub async fn get_track(track_id: &str, token: &str) -> Result<TrackDetail, reqwest::Error> {
    let api_url = format!(
        "{uri}/tracks/{id}",
        uri = &config::spotify_apiurl(),
        id = track_id
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

        let json = response.json::<TrackDetail>().await?;
        return Ok(json);
    }
}
