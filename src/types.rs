use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// One entry of the curated artist roster. Only `spotify_id` is needed to
/// query the catalog; `handle` and `name` travel along for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub spotify_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub ai_usage: Option<String>,
}

impl ArtistRef {
    pub fn is_heavy_ai(&self) -> bool {
        self.ai_usage.as_deref() == Some("heavy")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumResponse {
    pub items: Vec<Album>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub release_date: String,
    pub release_date_precision: String,
    pub album_type: String,
    pub artists: Vec<AlbumArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumTracksResponse {
    pub items: Vec<ReleaseTrack>,
}

/// Track item as returned inside an album listing. Spotify occasionally
/// reports relinked or unavailable tracks with a null id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseTrack {
    pub id: Option<String>,
    pub name: String,
}

/// The canonical unit flowing through the collection pipeline.
///
/// Identity for deduplication purposes is the `title`, not the `id`:
/// distinct provider ids can represent the same song across re-releases.
/// `release_date` is always a fully resolved calendar date and `id` is
/// non-empty when constructed from a provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    pub id: String,
    pub title: String,
    pub release_date: NaiveDate,
    pub artist_handle: Option<String>,
    pub artist_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPlaylistItemsRequest {
    pub uris: Vec<String>,
    pub position: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemovePlaylistItemsRequest {
    pub tracks: Vec<PlaylistItemUri>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemUri {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackDetail {
    pub id: String,
    pub name: String,
    pub duration_ms: u64,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub date: String,
    pub title: String,
    pub artist: String,
}

#[derive(Tabled)]
pub struct RosterTableRow {
    pub name: String,
    pub handle: String,
    pub status: String,
}
