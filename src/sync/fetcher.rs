use crate::{
    sync::provider::CatalogProvider,
    sync::window::{TimeWindow, WindowBucket},
    types::{ArtistRef, TrackRecord},
    utils, warning,
};

/// The roster-wide result of one collection pass: every track released this
/// year plus the one latest recent track per artist, both sorted newest
/// first.
#[derive(Debug, Clone)]
pub struct TrackCollection {
    pub year_tracks: Vec<TrackRecord>,
    pub recent_tracks: Vec<TrackRecord>,
}

/// Expands one artist's catalog into track records, bucketed by the window.
///
/// Returns every track from releases dated this year (newest release first)
/// and, separately, the artist's latest recent track: the first track
/// encountered across the releases inside the lookback window, in the
/// provider's enumeration order. Releases outside the year are never
/// expanded, so no track listing is fetched for them.
///
/// Callers must only pass artists that carry a provider id; `artist_id` is
/// that id. Failures degrade instead of propagating: an unparseable release
/// date or a failed track listing skips that release, and a failed release
/// listing makes the whole artist contribute nothing.
pub async fn fetch_artist_tracks<P: CatalogProvider>(
    provider: &P,
    artist_id: &str,
    artist: &ArtistRef,
    window: &TimeWindow,
    market: &str,
) -> (Vec<TrackRecord>, Option<TrackRecord>) {
    let releases = match provider.artist_releases(artist_id, market).await {
        Ok(releases) => releases,
        Err(e) => {
            warning!("Error fetching releases for artist {}: {}", artist.name, e);
            return (Vec::new(), None);
        }
    };

    let mut year_tracks: Vec<TrackRecord> = Vec::new();
    let mut latest_recent: Option<TrackRecord> = None;

    for release in releases {
        let release_date = match utils::parse_release_date(&release.release_date) {
            Some(date) => date,
            None => {
                warning!(
                    "Cannot parse release date for {}: {:?}",
                    release.name,
                    release.release_date
                );
                continue;
            }
        };

        let bucket = window.classify(release_date);
        if bucket == WindowBucket::Ignored {
            continue;
        }

        let tracks = match provider.release_tracks(&release.id).await {
            Ok(tracks) => tracks,
            Err(e) => {
                warning!("Error fetching tracks for release {}: {}", release.name, e);
                continue;
            }
        };

        for track in tracks {
            let Some(id) = track.id.filter(|id| !id.is_empty()) else {
                continue;
            };

            let record = TrackRecord {
                id,
                title: track.name,
                release_date,
                artist_handle: artist.handle.clone(),
                artist_name: Some(artist.name.clone()),
            };

            // first track of the first recent release in catalog order,
            // not the date maximum
            if bucket == WindowBucket::Recent && latest_recent.is_none() {
                latest_recent = Some(record.clone());
            }

            year_tracks.push(record);
        }
    }

    utils::sort_tracks_newest_first(&mut year_tracks);

    (year_tracks, latest_recent)
}

/// Runs the fetch over a whole roster, one artist after another.
///
/// Roster entries without a provider id are skipped with a warning. Each
/// artist's year tracks are folded into one collection and each non-empty
/// latest recent track into another; both come back sorted newest first.
pub async fn collect_tracks<P: CatalogProvider>(
    provider: &P,
    roster: &[ArtistRef],
    window: &TimeWindow,
    market: &str,
) -> TrackCollection {
    let mut year_tracks: Vec<TrackRecord> = Vec::new();
    let mut recent_tracks: Vec<TrackRecord> = Vec::new();

    for artist in roster {
        let Some(artist_id) = artist.spotify_id.as_deref().filter(|id| !id.is_empty()) else {
            warning!("Skipping artist without Spotify ID: {}", artist.name);
            continue;
        };

        let (tracks, latest_recent) =
            fetch_artist_tracks(provider, artist_id, artist, window, market).await;

        year_tracks.extend(tracks);
        recent_tracks.extend(latest_recent);
    }

    utils::sort_tracks_newest_first(&mut year_tracks);
    utils::sort_tracks_newest_first(&mut recent_tracks);

    TrackCollection {
        year_tracks,
        recent_tracks,
    }
}
