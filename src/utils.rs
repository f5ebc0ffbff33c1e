use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::types::{TrackRecord, TrackTableRow};

/// Parses a provider-supplied release date string into a calendar date.
///
/// Spotify reports release dates with `year`, `month` or `day` precision;
/// the string is shaped accordingly (`2024`, `2024-06` or `2024-06-20`).
/// Missing month and day components resolve to the 1st. Returns `None` for
/// strings that don't form a valid date, such as placeholder zero months.
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.splitn(3, '-');
    let year: i32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = match parts.next() {
        Some(m) => m.trim().parse().ok()?,
        None => 1,
    };
    let day: u32 = match parts.next() {
        Some(d) => d.trim().parse().ok()?,
        None => 1,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn sort_tracks_newest_first(tracks: &mut Vec<TrackRecord>) {
    tracks.sort_by(|a, b| b.release_date.cmp(&a.release_date));
}

pub fn sort_track_table_rows(rows: &mut Vec<TrackTableRow>) {
    rows.sort_by(|a, b| {
        match b.date.cmp(&a.date) {
            Ordering::Equal => a.artist.cmp(&b.artist), // secondary sort: artist ascending
            other => other,
        }
    });
}

/// Formats a millisecond duration as `h:mm:ss` for the run summary.
pub fn format_duration_ms(ms: u64) -> String {
    let total_secs = ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}
