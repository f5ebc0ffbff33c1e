use tabled::Table;

use crate::{config, error, management::RosterManager, types::RosterTableRow, warning};

pub async fn roster(search: Option<String>) {
    let roster_mgr = match RosterManager::load(&config::roster_file()).await {
        Ok(mgr) => mgr,
        Err(e) => {
            error!("Cannot load artist roster: {}", e);
        }
    };

    let exclude_ai = config::exclude_ai();
    let mut artists = roster_mgr.into_artists();

    // sort artists by name
    artists.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    if let Some(artist_search) = search {
        let search_term = artist_search.to_lowercase();
        artists.retain(|a| a.name.to_lowercase().contains(&search_term));
    }

    if artists.is_empty() {
        warning!("No roster artists match.");
        return;
    }

    let table_rows: Vec<RosterTableRow> = artists
        .into_iter()
        .map(|artist| {
            let status = if artist
                .spotify_id
                .as_deref()
                .is_none_or(|id| id.is_empty())
            {
                "skipped: no spotify id"
            } else if exclude_ai && artist.is_heavy_ai() {
                "skipped: heavy ai usage"
            } else {
                "active"
            };

            RosterTableRow {
                name: artist.name,
                handle: artist.handle.unwrap_or_default(),
                status: status.to_string(),
            }
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);
}
