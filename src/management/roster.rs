use std::path::Path;

use crate::types::ArtistRef;

pub struct RosterManager {
    artists: Vec<ArtistRef>,
}

impl RosterManager {
    pub async fn load(path: &Path) -> Result<Self, String> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| format!("cannot read roster file {}: {}", path.display(), e))?;
        let artists: Vec<ArtistRef> = serde_json::from_str(&content)
            .map_err(|e| format!("invalid JSON in roster file {}: {}", path.display(), e))?;

        Ok(Self { artists })
    }

    pub fn without_heavy_ai(mut self) -> Self {
        self.artists.retain(|artist| !artist.is_heavy_ai());
        self
    }

    pub fn artists(&self) -> &[ArtistRef] {
        &self.artists
    }

    pub fn count(&self) -> usize {
        self.artists.len()
    }

    pub fn into_artists(self) -> Vec<ArtistRef> {
        self.artists
    }
}
