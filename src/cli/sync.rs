use std::time::Duration;

use chrono::{Local, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config, error, info,
    management::{RosterManager, TokenManager},
    spotify::SpotifyCatalog,
    success,
    sync::{
        CatalogProvider, PlaylistDiff, SyncMode, TimeWindow, collect_tracks, deduplicate,
        sync_playlist,
    },
    types::{TrackRecord, TrackTableRow},
    utils, warning,
};

/// Runs one synchronization pass over both target playlists.
///
/// Collects every roster artist's releases inside the current year, builds
/// the canonical recent and year-to-date track lists, and converges the
/// recent playlist (windowed replace) and the year playlist (additive).
/// With `dry_run` set, all pending additions and removals are computed and
/// reported but nothing is mutated.
pub async fn sync(dry_run: bool, lookback_days: Option<i64>) {
    let lookback_days = lookback_days.unwrap_or_else(config::lookback_days);
    let recent_playlist_id = config::recent_playlist_id();
    let year_playlist_id = config::year_playlist_id();
    let market = config::market();

    let roster_mgr = match RosterManager::load(&config::roster_file()).await {
        Ok(mgr) => mgr,
        Err(e) => {
            error!("Cannot load artist roster: {}", e);
        }
    };

    let roster_total = roster_mgr.count();
    info!("Loaded {} artists from the roster", roster_total);

    let roster = if config::exclude_ai() {
        roster_mgr.without_heavy_ai().into_artists()
    } else {
        roster_mgr.into_artists()
    };

    if roster.len() < roster_total {
        info!(
            "Excluded {} heavy-AI artists from the roster",
            roster_total - roster.len()
        );
    }

    let token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token cache: {}\nProvision it with a valid refresh token before running.",
                e
            );
        }
    };

    let catalog = SpotifyCatalog::new(token_mgr);
    let window = TimeWindow::new(Utc::now().date_naive(), lookback_days);

    let pb = spinner(format!("Collecting tracks from {} artists...", roster.len()));
    let collection = collect_tracks(&catalog, &roster, &window, &market).await;
    pb.finish_and_clear();

    // canonical lists; dedup output is oldest-first, and the recent list
    // goes back to newest-first because additions land at the playlist head
    let year_canonical = deduplicate(&collection.year_tracks);
    let mut recent_canonical = deduplicate(&collection.recent_tracks);
    utils::sort_tracks_newest_first(&mut recent_canonical);

    info!(
        "Found {} tracks released in the last {} days",
        recent_canonical.len(),
        lookback_days
    );
    info!("Found {} tracks released this year", year_canonical.len());

    if dry_run {
        info!("DRY RUN: no changes will be made to playlists");
    }

    let recent_diff = match sync_playlist(
        &catalog,
        &recent_playlist_id,
        &recent_canonical,
        SyncMode::WindowedReplace,
        dry_run,
    )
    .await
    {
        Ok(diff) => diff,
        Err(e) => {
            error!("Failed to update recent releases playlist: {}", e);
        }
    };

    report_diff("recent releases", &recent_diff, dry_run);

    let year_diff = match sync_playlist(
        &catalog,
        &year_playlist_id,
        &year_canonical,
        SyncMode::MissingOnly,
        dry_run,
    )
    .await
    {
        Ok(diff) => diff,
        Err(e) => {
            error!("Failed to update all tracks playlist: {}", e);
        }
    };

    report_diff("all tracks", &year_diff, dry_run);

    if !recent_diff.to_add.is_empty() {
        let mut rows: Vec<TrackTableRow> = recent_diff
            .to_add
            .iter()
            .map(|track| TrackTableRow {
                date: track.release_date.to_string(),
                title: track.title.clone(),
                artist: track.artist_name.clone().unwrap_or_default(),
            })
            .collect();
        utils::sort_track_table_rows(&mut rows);
        println!("{}", Table::new(rows));
    }

    summarize(
        &catalog,
        &recent_canonical,
        &recent_diff.to_add,
        lookback_days,
        &recent_playlist_id,
    )
    .await;
}

fn report_diff(playlist_name: &str, diff: &PlaylistDiff, dry_run: bool) {
    if !diff.to_remove.is_empty() {
        info!(
            "{} tracks {} removed from the {} playlist",
            diff.to_remove.len(),
            if dry_run { "would be" } else { "were" },
            playlist_name
        );
    }

    if diff.to_add.is_empty() {
        info!("No new tracks for the {} playlist", playlist_name);
    } else {
        info!(
            "{} tracks {} added to the {} playlist",
            diff.to_add.len(),
            if dry_run { "would be" } else { "were" },
            playlist_name
        );
    }

    if !dry_run && !diff.is_empty() {
        success!("The {} playlist was updated successfully!", playlist_name);
    }
}

/// Prints the run summary block: track count and total duration of the
/// recent playlist, the handles behind any new additions, and the playlist
/// URL. A failed duration lookup degrades to a warning and counts zero.
async fn summarize(
    catalog: &SpotifyCatalog,
    recent_tracks: &[TrackRecord],
    new_recent: &[TrackRecord],
    lookback_days: i64,
    playlist_id: &str,
) {
    let mut total_duration_ms: u64 = 0;
    for track in recent_tracks {
        match catalog.track_duration_ms(&track.id).await {
            Ok(ms) => total_duration_ms += ms,
            Err(e) => warning!("Cannot fetch duration for track {}: {}", track.title, e),
        }
    }

    let updated_at = Local::now().format("%m/%d/%y %H:%M:%S");

    println!();
    println!("{}", "=".repeat(50));
    println!("Release radar updated at {}", updated_at);
    println!(
        "Playlist duration: {} tracks, {}",
        recent_tracks.len(),
        utils::format_duration_ms(total_duration_ms)
    );

    if new_recent.is_empty() {
        println!("No new tracks added today!");
    } else {
        let handles: Vec<String> = new_recent
            .iter()
            .map(|track| format!("@{}", track.artist_handle.clone().unwrap_or_default()))
            .collect();
        println!("New tracks added from: {}", handles.join(", "));
    }

    println!();
    println!(
        "The radar features new music released by roster artists in the last {} days",
        lookback_days
    );
    println!();
    println!("https://open.spotify.com/playlist/{}", playlist_id);
    println!("{}", "=".repeat(50));
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
