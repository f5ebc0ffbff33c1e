//! # Spotify Integration Module
//!
//! This module implements the concrete Spotify Web API client behind the
//! engine's [`CatalogProvider`](crate::sync::CatalogProvider) abstraction.
//! It owns all HTTP communication with the service: release and track
//! retrieval, playlist membership paging, playlist mutation, and the track
//! detail lookup used by the run summary.
//!
//! ## Submodules
//!
//! - [`catalog`] - [`SpotifyCatalog`], the `CatalogProvider` implementation
//!   that wires a shared token cache into the endpoint functions below.
//! - [`releases`] - Artist discography and album track listings.
//! - [`playlist`] - Playlist membership pages, head-insertion of tracks, and
//!   bulk removal.
//! - [`tracks`] - Single-track detail retrieval.
//!
//! ## Transport Behavior
//!
//! Read endpoints handle two classes of transient failure themselves:
//!
//! - **429 Too Many Requests** - the `Retry-After` header is honored with a
//!   sleep-and-retry for delays up to 120 seconds; longer delays produce a
//!   warning and the error propagates.
//! - **502 Bad Gateway** - retried after a fixed 10 second delay.
//!
//! Mutating playlist endpoints never retry: their errors propagate to the
//! caller so a run fails loudly rather than mutating twice. Re-running the
//! whole pipeline afterwards is safe because updates are computed as a
//! membership diff.
//!
//! ## Authentication
//!
//! All requests use a bearer token from the cached OAuth token managed by
//! [`TokenManager`](crate::management::TokenManager). Acquiring the initial
//! token is outside this tool; the cache is refreshed automatically when it
//! nears expiry.

pub mod catalog;
pub mod playlist;
pub mod releases;
pub mod tracks;

pub use catalog::SpotifyCatalog;

use std::time::Duration;

use reqwest::Response;
use tokio::time::sleep;

use crate::warning;

/// Honors a 429 response's `Retry-After` header. Sleeps and returns `true`
/// when the request should be retried; delays above 120 seconds only warn
/// and leave the response to normal error handling.
pub(crate) async fn wait_for_retry_after(response: &Response) -> bool {
    if let Some(retry_after) = response.headers().get("retry-after") {
        let retry_after = retry_after
            .to_str()
            .unwrap_or("0")
            .parse::<u64>()
            .unwrap_or(0);
        if retry_after <= 120 {
            sleep(Duration::from_secs(retry_after)).await;
            return true;
        }

        warning!(
            "Retry after has reached an abnormal high of {} seconds. Try again tomorrow.",
            retry_after
        );
    }

    false
}
