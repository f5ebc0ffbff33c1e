//! # Playlist Synchronization Engine
//!
//! This module implements the core pipeline that turns a curated artist
//! roster into two converged playlists: collection, deduplication and
//! playlist diffing. It is deliberately independent of the concrete Spotify
//! client; everything that touches the network goes through the
//! [`provider::CatalogProvider`] trait so the pipeline can be exercised
//! against a mock catalog.
//!
//! ## Components
//!
//! - [`window`] - The time window that classifies a release date as recent,
//!   year-to-date or out of scope.
//! - [`fetcher`] - Per-artist release expansion into track records, plus the
//!   roster-wide aggregation fold.
//! - [`dedup`] - Collapses same-titled track versions into the most recent
//!   release, behind a pluggable identity key.
//! - [`playlist`] - Membership diffing and batched, order-preserving playlist
//!   updates.
//! - [`provider`] - The abstract catalog capability and its error type.
//!
//! ## Data Flow
//!
//! ```text
//! roster ──▶ fetcher ──▶ dedup ──▶ playlist diff ──▶ provider mutations
//!                │                      ▲
//!                └── recent bucket ─────┘   (once per target playlist)
//! ```
//!
//! Artists are processed strictly one after another; failures are isolated
//! per artist and per release, so one bad catalog entry never aborts a run.
//! Playlist mutation failures, in contrast, propagate to the caller.

pub mod dedup;
pub mod fetcher;
pub mod playlist;
pub mod provider;
pub mod window;

pub use dedup::{deduplicate, deduplicate_by};
pub use fetcher::{TrackCollection, collect_tracks, fetch_artist_tracks};
pub use playlist::{
    MAX_TRACKS_PER_ADD, PlaylistDiff, SyncMode, apply_diff, diff_playlist, fetch_playlist_state,
    sync_playlist,
};
pub use provider::{CatalogProvider, PlaylistPage, ProviderError};
pub use window::{TimeWindow, WindowBucket};
