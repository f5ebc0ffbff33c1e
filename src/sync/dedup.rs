use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use crate::types::TrackRecord;

/// Collapses multiple versions of a same-titled track into the most recent
/// release.
///
/// Keys records by their literal title; no case folding or whitespace
/// normalization is applied. Two genuinely different songs sharing a title
/// will collapse, which is accepted; swap the key via [`deduplicate_by`] to
/// change the policy.
///
/// Output is sorted by release date ascending (oldest first), the reverse of
/// the fetcher's ordering. Callers that need newest-first must re-sort.
pub fn deduplicate(tracks: &[TrackRecord]) -> Vec<TrackRecord> {
    deduplicate_by(tracks, |t| t.title.clone())
}

/// [`deduplicate`] with a caller-supplied identity key.
///
/// For each input record, in input order: the first record for a key claims
/// its slot, and a later record takes the slot over only if its release date
/// is strictly later, so first-seen wins date ties. Records with an empty id
/// are malformed and skipped silently.
pub fn deduplicate_by<K, F>(tracks: &[TrackRecord], key: F) -> Vec<TrackRecord>
where
    K: Eq + Hash,
    F: Fn(&TrackRecord) -> K,
{
    let mut canonical: Vec<TrackRecord> = Vec::new();
    let mut slots: HashMap<K, usize> = HashMap::new();

    for track in tracks {
        if track.id.is_empty() {
            continue;
        }

        match slots.entry(key(track)) {
            Entry::Occupied(slot) => {
                let held = &mut canonical[*slot.get()];
                if track.release_date > held.release_date {
                    *held = track.clone();
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(canonical.len());
                canonical.push(track.clone());
            }
        }
    }

    // stable sort keeps first-seen order among equal dates
    canonical.sort_by(|a, b| a.release_date.cmp(&b.release_date));
    canonical
}
