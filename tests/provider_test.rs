use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::{Sequence, mock};

use radarsync::sync::{
    CatalogProvider, MAX_TRACKS_PER_ADD, PlaylistDiff, PlaylistPage, ProviderError, SyncMode,
    TimeWindow, apply_diff, collect_tracks, fetch_artist_tracks, fetch_playlist_state,
    sync_playlist,
};
use radarsync::types::{Album, ArtistRef, ReleaseTrack, TrackRecord};

mock! {
    pub Catalog {}

    #[async_trait]
    impl CatalogProvider for Catalog {
        async fn artist_releases(
            &self,
            artist_id: &str,
            market: &str,
        ) -> Result<Vec<Album>, ProviderError>;

        async fn release_tracks(
            &self,
            release_id: &str,
        ) -> Result<Vec<ReleaseTrack>, ProviderError>;

        async fn playlist_tracks_page(
            &self,
            playlist_id: &str,
            page: Option<String>,
        ) -> Result<PlaylistPage, ProviderError>;

        async fn add_playlist_items(
            &self,
            playlist_id: &str,
            track_ids: &[String],
            insert_position: u32,
        ) -> Result<(), ProviderError>;

        async fn remove_playlist_items(
            &self,
            playlist_id: &str,
            track_ids: &[String],
        ) -> Result<(), ProviderError>;

        async fn track_duration_ms(&self, track_id: &str) -> Result<u64, ProviderError>;
    }
}

// Helper function to create a date
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

// Helper function to create a test album
fn album(id: &str, name: &str, release_date: &str) -> Album {
    Album {
        id: id.to_string(),
        name: name.to_string(),
        release_date: release_date.to_string(),
        release_date_precision: "day".to_string(),
        album_type: "single".to_string(),
        artists: Vec::new(),
    }
}

// Helper function to create an album track item
fn release_track(id: &str, name: &str) -> ReleaseTrack {
    ReleaseTrack {
        id: Some(id.to_string()),
        name: name.to_string(),
    }
}

// Helper function to create a roster entry
fn roster_artist(spotify_id: Option<&str>, name: &str, handle: Option<&str>) -> ArtistRef {
    ArtistRef {
        spotify_id: spotify_id.map(str::to_string),
        name: name.to_string(),
        handle: handle.map(str::to_string),
        ai_usage: None,
    }
}

// Helper function to create a desired track record
fn track(id: &str, title: &str, release_date: NaiveDate) -> TrackRecord {
    TrackRecord {
        id: id.to_string(),
        title: title.to_string(),
        release_date,
        artist_handle: None,
        artist_name: None,
    }
}

fn test_window() -> TimeWindow {
    TimeWindow::new(date(2024, 6, 20), 13)
}

#[tokio::test]
async fn test_fetcher_buckets_releases_and_picks_enumeration_order_latest() {
    let mut catalog = MockCatalog::new();
    let artist = roster_artist(Some("a1"), "Artist One", Some("one"));

    // enumeration order: an older recent release first, a newer one second,
    // then a year-to-date release and one from last year
    catalog
        .expect_artist_releases()
        .withf(|artist_id, market| artist_id == "a1" && market == "US")
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                album("alb1", "Early Recent", "2024-06-10"),
                album("alb2", "Late Recent", "2024-06-18"),
                album("alb3", "Spring", "2024-03-01"),
                album("alb4", "Last Year", "2023-11-01"),
            ])
        });

    catalog
        .expect_release_tracks()
        .withf(|release_id| release_id == "alb1")
        .times(1)
        .returning(|_| {
            Ok(vec![
                release_track("r1", "Opener"),
                release_track("r2", "Closer"),
            ])
        });
    catalog
        .expect_release_tracks()
        .withf(|release_id| release_id == "alb2")
        .times(1)
        .returning(|_| Ok(vec![release_track("r3", "Newest Cut")]));
    catalog
        .expect_release_tracks()
        .withf(|release_id| release_id == "alb3")
        .times(1)
        .returning(|_| Ok(vec![release_track("y1", "Spring Song")]));
    // no expectation for alb4: releases outside the year must not be expanded

    let (year_tracks, latest_recent) =
        fetch_artist_tracks(&catalog, "a1", &artist, &test_window(), "US").await;

    // the latest recent track follows catalog enumeration order, not the
    // release-date maximum
    let latest = latest_recent.unwrap();
    assert_eq!(latest.id, "r1");
    assert_eq!(latest.artist_handle.as_deref(), Some("one"));
    assert_eq!(latest.artist_name.as_deref(), Some("Artist One"));

    // all in-year tracks, newest release first
    let ids: Vec<&str> = year_tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["r3", "r1", "r2", "y1"]);
}

#[tokio::test]
async fn test_fetcher_degrades_to_empty_when_release_listing_fails() {
    let mut catalog = MockCatalog::new();
    let artist = roster_artist(Some("a1"), "Artist One", None);

    catalog
        .expect_artist_releases()
        .times(1)
        .returning(|_, _| Err(ProviderError::Api("listing failed".to_string())));

    let (year_tracks, latest_recent) =
        fetch_artist_tracks(&catalog, "a1", &artist, &test_window(), "US").await;

    assert!(year_tracks.is_empty());
    assert!(latest_recent.is_none());
}

#[tokio::test]
async fn test_fetcher_skips_bad_dates_failed_listings_and_idless_tracks() {
    let mut catalog = MockCatalog::new();
    let artist = roster_artist(Some("a1"), "Artist One", None);

    catalog
        .expect_artist_releases()
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                album("alb_bad", "No Date", "not-a-date"),
                album("alb_fail", "Broken Listing", "2024-06-15"),
                album("alb_good", "Working", "2024-06-12"),
            ])
        });

    // the unparseable release is never expanded
    catalog
        .expect_release_tracks()
        .withf(|release_id| release_id == "alb_fail")
        .times(1)
        .returning(|_| Err(ProviderError::Api("tracks failed".to_string())));
    catalog
        .expect_release_tracks()
        .withf(|release_id| release_id == "alb_good")
        .times(1)
        .returning(|_| {
            Ok(vec![
                ReleaseTrack {
                    id: None,
                    name: "Unavailable".to_string(),
                },
                release_track("g1", "Good Track"),
            ])
        });

    let (year_tracks, latest_recent) =
        fetch_artist_tracks(&catalog, "a1", &artist, &test_window(), "US").await;

    let ids: Vec<&str> = year_tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["g1"]);
    assert_eq!(latest_recent.unwrap().id, "g1");
}

#[tokio::test]
async fn test_collect_tracks_skips_artists_without_id_and_aggregates() {
    let mut catalog = MockCatalog::new();
    let roster = vec![
        roster_artist(None, "No Id", None),
        roster_artist(Some(""), "Empty Id", None),
        roster_artist(Some("a1"), "Artist One", Some("one")),
        roster_artist(Some("a2"), "Artist Two", Some("two")),
    ];

    // only the two artists with a usable id reach the provider
    catalog
        .expect_artist_releases()
        .withf(|artist_id, _| artist_id == "a1")
        .times(1)
        .returning(|_, _| Ok(vec![album("alb1", "One Single", "2024-06-10")]));
    catalog
        .expect_artist_releases()
        .withf(|artist_id, _| artist_id == "a2")
        .times(1)
        .returning(|_, _| Ok(vec![album("alb2", "Two Single", "2024-06-18")]));

    catalog
        .expect_release_tracks()
        .withf(|release_id| release_id == "alb1")
        .times(1)
        .returning(|_| Ok(vec![release_track("t1", "Track One")]));
    catalog
        .expect_release_tracks()
        .withf(|release_id| release_id == "alb2")
        .times(1)
        .returning(|_| Ok(vec![release_track("t2", "Track Two")]));

    let collection = collect_tracks(&catalog, &roster, &test_window(), "US").await;

    // both aggregates come back newest first
    let year_ids: Vec<&str> = collection.year_tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(year_ids, vec!["t2", "t1"]);

    let recent_ids: Vec<&str> = collection
        .recent_tracks
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(recent_ids, vec!["t2", "t1"]);
    assert_eq!(
        collection.recent_tracks[0].artist_handle.as_deref(),
        Some("two")
    );
}

#[tokio::test]
async fn test_playlist_state_drains_every_page() {
    let mut catalog = MockCatalog::new();

    catalog
        .expect_playlist_tracks_page()
        .withf(|playlist_id, page| playlist_id == "pl1" && page.is_none())
        .times(1)
        .returning(|_, _| {
            Ok(PlaylistPage {
                items: vec!["t1".to_string()],
                next: Some("page2".to_string()),
            })
        });
    catalog
        .expect_playlist_tracks_page()
        .withf(|_, page| page.as_deref() == Some("page2"))
        .times(1)
        .returning(|_, _| {
            Ok(PlaylistPage {
                items: vec!["t2".to_string()],
                next: Some("page3".to_string()),
            })
        });
    catalog
        .expect_playlist_tracks_page()
        .withf(|_, page| page.as_deref() == Some("page3"))
        .times(1)
        .returning(|_, _| {
            Ok(PlaylistPage {
                items: vec!["t3".to_string()],
                next: None,
            })
        });

    let state = fetch_playlist_state(&catalog, "pl1").await.unwrap();
    assert_eq!(
        state,
        vec!["t1".to_string(), "t2".to_string(), "t3".to_string()]
    );
}

#[tokio::test]
async fn test_apply_diff_removes_before_adding() {
    let mut catalog = MockCatalog::new();
    let mut seq = Sequence::new();

    catalog
        .expect_remove_playlist_items()
        .withf(|playlist_id, ids| playlist_id == "pl1" && *ids == ["old1", "old2"])
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));
    catalog
        .expect_add_playlist_items()
        .withf(|playlist_id, ids, position| {
            playlist_id == "pl1" && *ids == ["new1"] && *position == 0
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(()));

    let diff = PlaylistDiff {
        to_add: vec![track("new1", "New", date(2024, 6, 18))],
        to_remove: vec!["old1".to_string(), "old2".to_string()],
    };

    apply_diff(&catalog, "pl1", &diff).await.unwrap();
}

#[tokio::test]
async fn test_additions_are_chunked_and_head_inserted() {
    let mut catalog = MockCatalog::new();
    let mut seq = Sequence::new();

    let desired: Vec<TrackRecord> = (0..120)
        .map(|i| track(&format!("id{:03}", i), &format!("Track {}", i), date(2024, 6, 10)))
        .collect();

    catalog
        .expect_playlist_tracks_page()
        .times(1)
        .returning(|_, _| {
            Ok(PlaylistPage {
                items: Vec::new(),
                next: None,
            })
        });

    // three consecutive chunks, every one inserted at the head
    catalog
        .expect_add_playlist_items()
        .withf(|_, ids, position| {
            ids.len() == MAX_TRACKS_PER_ADD
                && ids[0] == "id000"
                && ids[49] == "id049"
                && *position == 0
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(()));
    catalog
        .expect_add_playlist_items()
        .withf(|_, ids, position| {
            ids.len() == MAX_TRACKS_PER_ADD
                && ids[0] == "id050"
                && ids[49] == "id099"
                && *position == 0
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(()));
    catalog
        .expect_add_playlist_items()
        .withf(|_, ids, position| {
            ids.len() == 20 && ids[0] == "id100" && ids[19] == "id119" && *position == 0
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _, _| Ok(()));

    let diff = sync_playlist(&catalog, "pl1", &desired, SyncMode::MissingOnly, false)
        .await
        .unwrap();

    assert_eq!(diff.to_add.len(), 120);
    assert!(diff.to_remove.is_empty());
}

#[tokio::test]
async fn test_dry_run_computes_diff_without_mutating() {
    let mut catalog = MockCatalog::new();

    catalog
        .expect_playlist_tracks_page()
        .times(1)
        .returning(|_, _| {
            Ok(PlaylistPage {
                items: vec!["t1".to_string(), "t2".to_string()],
                next: None,
            })
        });
    // no add/remove expectations: any mutation call fails the test

    let desired = vec![
        track("t2", "Kept", date(2024, 6, 10)),
        track("t4", "New", date(2024, 6, 18)),
    ];

    let diff = sync_playlist(&catalog, "pl1", &desired, SyncMode::WindowedReplace, true)
        .await
        .unwrap();

    let add_ids: Vec<&str> = diff.to_add.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(add_ids, vec!["t4"]);
    assert_eq!(diff.to_remove, vec!["t1".to_string()]);
}

#[tokio::test]
async fn test_second_sync_run_is_idempotent() {
    let desired = vec![
        track("t2", "Kept", date(2024, 6, 10)),
        track("t4", "New", date(2024, 6, 18)),
    ];

    // first run against the stale playlist performs both mutations
    let mut first = MockCatalog::new();
    first
        .expect_playlist_tracks_page()
        .times(1)
        .returning(|_, _| {
            Ok(PlaylistPage {
                items: vec!["t1".to_string(), "t2".to_string(), "t3".to_string()],
                next: None,
            })
        });
    first
        .expect_remove_playlist_items()
        .withf(|_, ids| *ids == ["t1", "t3"])
        .times(1)
        .returning(|_, _| Ok(()));
    first
        .expect_add_playlist_items()
        .withf(|_, ids, position| *ids == ["t4"] && *position == 0)
        .times(1)
        .returning(|_, _, _| Ok(()));

    let first_diff = sync_playlist(&first, "pl1", &desired, SyncMode::WindowedReplace, false)
        .await
        .unwrap();
    assert!(!first_diff.is_empty());

    // second run sees the converged membership and has nothing to do
    let mut second = MockCatalog::new();
    second
        .expect_playlist_tracks_page()
        .times(1)
        .returning(|_, _| {
            Ok(PlaylistPage {
                items: vec!["t4".to_string(), "t2".to_string()],
                next: None,
            })
        });

    let second_diff = sync_playlist(&second, "pl1", &desired, SyncMode::WindowedReplace, false)
        .await
        .unwrap();
    assert!(second_diff.is_empty());
}

#[tokio::test]
async fn test_mutation_errors_propagate() {
    let mut catalog = MockCatalog::new();

    catalog
        .expect_playlist_tracks_page()
        .times(1)
        .returning(|_, _| {
            Ok(PlaylistPage {
                items: vec!["t1".to_string()],
                next: None,
            })
        });
    catalog
        .expect_remove_playlist_items()
        .times(1)
        .returning(|_, _| Err(ProviderError::Api("remove failed".to_string())));

    let desired = vec![track("t2", "New", date(2024, 6, 18))];

    let result = sync_playlist(&catalog, "pl1", &desired, SyncMode::WindowedReplace, false).await;
    assert!(result.is_err());
}
