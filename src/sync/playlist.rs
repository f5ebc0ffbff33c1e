use std::collections::HashSet;

use crate::{
    sync::provider::{CatalogProvider, ProviderError},
    types::TrackRecord,
};

/// Maximum number of track ids the provider accepts in a single addition
/// call; longer addition lists are split into consecutive chunks.
pub const MAX_TRACKS_PER_ADD: usize = 50;

/// How a playlist converges towards the desired track list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Additive: desired tracks missing from the playlist are added, nothing
    /// is ever removed. Used for the year-to-date playlist.
    MissingOnly,
    /// Rolling window: missing desired tracks are added and stored tracks
    /// absent from the desired set are removed. Used for the recent-releases
    /// playlist.
    WindowedReplace,
}

/// The operations that converge a playlist to the desired state.
#[derive(Debug, Clone, Default)]
pub struct PlaylistDiff {
    pub to_add: Vec<TrackRecord>,
    pub to_remove: Vec<String>,
}

impl PlaylistDiff {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Diffs the desired track list against current playlist membership.
///
/// `to_add` keeps the relative order of `desired`. In `WindowedReplace`
/// mode, `to_remove` keeps the playlist order of `current`.
pub fn diff_playlist(desired: &[TrackRecord], current: &[String], mode: SyncMode) -> PlaylistDiff {
    let current_ids: HashSet<&str> = current.iter().map(String::as_str).collect();
    let to_add: Vec<TrackRecord> = desired
        .iter()
        .filter(|track| !current_ids.contains(track.id.as_str()))
        .cloned()
        .collect();

    let to_remove: Vec<String> = match mode {
        SyncMode::MissingOnly => Vec::new(),
        SyncMode::WindowedReplace => {
            let desired_ids: HashSet<&str> =
                desired.iter().map(|track| track.id.as_str()).collect();
            current
                .iter()
                .filter(|id| !desired_ids.contains(id.as_str()))
                .cloned()
                .collect()
        }
    };

    PlaylistDiff { to_add, to_remove }
}

/// Drains every page of a playlist's stored track ids.
///
/// The full membership must be known before diffing; diffing against a
/// partial page would re-add tracks that live on later pages.
pub async fn fetch_playlist_state<P: CatalogProvider>(
    provider: &P,
    playlist_id: &str,
) -> Result<Vec<String>, ProviderError> {
    let mut ids: Vec<String> = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let page = provider.playlist_tracks_page(playlist_id, page_token).await?;
        ids.extend(page.items);

        match page.next {
            Some(next) => page_token = Some(next),
            None => break,
        }
    }

    Ok(ids)
}

/// Executes a diff against the live playlist: one bulk removal first, then
/// additions inserted at the head in chunks of at most
/// [`MAX_TRACKS_PER_ADD`].
///
/// Chunks are inserted at position 0 one after another, so the final order
/// equals repeated head-insertion of the chunks: the last chunk ends up
/// closest to the head. Provider errors propagate; nothing is retried or
/// rolled back here.
pub async fn apply_diff<P: CatalogProvider>(
    provider: &P,
    playlist_id: &str,
    diff: &PlaylistDiff,
) -> Result<(), ProviderError> {
    if !diff.to_remove.is_empty() {
        provider
            .remove_playlist_items(playlist_id, &diff.to_remove)
            .await?;
    }

    for chunk in diff.to_add.chunks(MAX_TRACKS_PER_ADD) {
        let ids: Vec<String> = chunk.iter().map(|track| track.id.clone()).collect();
        provider.add_playlist_items(playlist_id, &ids, 0).await?;
    }

    Ok(())
}

/// Full synchronization of one playlist: drain the current membership, diff
/// against `desired`, and apply the diff unless `dry_run` is set.
///
/// Returns the computed diff in both modes so the caller can report pending
/// or performed operations. Running twice in a row with the same desired
/// list yields an empty diff on the second run.
pub async fn sync_playlist<P: CatalogProvider>(
    provider: &P,
    playlist_id: &str,
    desired: &[TrackRecord],
    mode: SyncMode,
    dry_run: bool,
) -> Result<PlaylistDiff, ProviderError> {
    let current = fetch_playlist_state(provider, playlist_id).await?;
    let diff = diff_playlist(desired, &current, mode);

    if !dry_run {
        apply_diff(provider, playlist_id, &diff).await?;
    }

    Ok(diff)
}
