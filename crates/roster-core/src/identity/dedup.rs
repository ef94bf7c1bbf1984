//! Final roster cleanup.

use std::collections::HashSet;

use tracing::debug;

use crate::models::contact::{ContactRecord, Roster};

/// Drop empty records, collapse repeated `(email, phone)` pairs to their
/// first occurrence and sort by name.
///
/// The sort is stable, so records sharing a name keep their input order.
/// Applying this to an existing roster's records returns the same roster.
pub fn dedup_roster<I>(records: I) -> Roster
where
    I: IntoIterator<Item = ContactRecord>,
{
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut kept = Vec::new();
    let mut dropped = 0usize;

    for record in records {
        if record.is_empty() {
            dropped += 1;
            continue;
        }

        if let Some((email, phone)) = record.contact_key() {
            if !seen.insert((email.to_string(), phone.to_string())) {
                dropped += 1;
                continue;
            }
        }

        kept.push(record);
    }

    kept.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("Roster has {} records ({} dropped)", kept.len(), dropped);

    Roster::from_sorted(kept)
}
