//! Configuration management for the playlist sync tool.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! manage application configuration including Spotify API endpoints, the two
//! target playlist ids, and collection parameters such as the lookback window.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `radarsync/.env`. This allows users to store
/// configuration securely without hardcoding sensitive values.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/radarsync/.env`
/// - macOS: `~/Library/Application Support/radarsync/.env`
/// - Windows: `%LOCALAPPDATA%/radarsync/.env`
///
/// # Returns
///
/// Returns `Ok(())` if the environment file is successfully loaded, or an
/// error string if directory creation or file loading fails.
///
/// # Example
///
/// ```
/// use radarsync::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("radarsync/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(path).map_err(|e| e.to_string())?;
    Ok(())
}

/// Returns the Spotify Web API base URL.
///
/// Retrieves the `SPOTIFY_API_URL` environment variable which contains the
/// base URL for Spotify's Web API endpoints, e.g. `https://api.spotify.com/v1`.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Retrieves the `SPOTIFY_API_TOKEN_URL` environment variable which contains
/// the URL used to refresh the cached access token, e.g.
/// `https://accounts.spotify.com/api/token`.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_TOKEN_URL` environment variable is not set.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}

/// Returns the Spotify API client ID used for token refresh.
///
/// Retrieves the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable which
/// contains the client ID obtained when registering the application with
/// Spotify's developer platform.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the id of the rolling recent-releases playlist.
///
/// This playlist is maintained in windowed-replace mode: tracks that age out
/// of the lookback window are removed on every run.
///
/// # Panics
///
/// Panics if the `SPOTIFY_RECENT_PLAYLIST_ID` environment variable is not set.
pub fn recent_playlist_id() -> String {
    env::var("SPOTIFY_RECENT_PLAYLIST_ID").expect("SPOTIFY_RECENT_PLAYLIST_ID must be set")
}

/// Returns the id of the all-releases-this-year playlist.
///
/// This playlist is maintained additively: tracks are only ever added.
///
/// # Panics
///
/// Panics if the `SPOTIFY_YEAR_PLAYLIST_ID` environment variable is not set.
pub fn year_playlist_id() -> String {
    env::var("SPOTIFY_YEAR_PLAYLIST_ID").expect("SPOTIFY_YEAR_PLAYLIST_ID must be set")
}

/// Returns the configured lookback window in days.
///
/// Reads the `DAYS_LOOKBACK` environment variable; releases within this many
/// days before today count as recent. Defaults to 13 when unset or not a
/// number.
pub fn lookback_days() -> i64 {
    env::var("DAYS_LOOKBACK")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(13)
}

/// Returns the market used to restrict release queries.
///
/// Reads the `SPOTIFY_MARKET` environment variable, an ISO 3166-1 alpha-2
/// country code. Defaults to `US`.
pub fn market() -> String {
    env::var("SPOTIFY_MARKET").unwrap_or_else(|_| "US".to_string())
}

/// Returns the path of the artist roster file.
///
/// Reads the `ROSTER_FILE` environment variable. Defaults to `roster.json`
/// in the application's local data directory.
pub fn roster_file() -> PathBuf {
    match env::var("ROSTER_FILE") {
        Ok(path) => PathBuf::from(path),
        Err(_) => {
            let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
            path.push("radarsync/roster.json");
            path
        }
    }
}

/// Returns whether roster artists marked as heavy AI users are excluded.
///
/// Reads the `EXCLUDE_AI` environment variable; any value other than
/// `false`, `0` or `no` enables the exclusion. Defaults to enabled.
pub fn exclude_ai() -> bool {
    match env::var("EXCLUDE_AI") {
        Ok(v) => !matches!(v.to_lowercase().as_str(), "false" | "0" | "no"),
        Err(_) => true,
    }
}
