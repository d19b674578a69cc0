//! Merge catalog detail records back into collection entries.
//!
//! Records are matched to entries by IGDB id, never by position: a batch may
//! come back in any order and may be missing ids IGDB didn't recognize.

use chrono::{DateTime, Utc};
use clz_core::{CollectionEntry, Cover, UNRESOLVED_ID};

use crate::types::DetailRecord;

/// What happened to one batch of records.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Records written into an entry.
    pub applied: usize,
    /// Ids of records no entry carries.
    pub orphaned: Vec<u64>,
}

/// Write each record's enrichment fields into the first entry with its id.
///
/// Entries without a record are left untouched. Records without an entry are
/// logged and dropped.
pub fn apply(entries: &mut [CollectionEntry], records: &[DetailRecord]) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome::default();

    for record in records {
        let target = if record.id == UNRESOLVED_ID {
            None
        } else {
            entries.iter_mut().find(|entry| entry.igdb_id == record.id)
        };

        match target {
            Some(entry) => {
                log::debug!("Pairing '{}' with IGDB '{}'", entry.title, record.name);
                enrich_entry(entry, record);
                outcome.applied += 1;
            }
            None => {
                log::warn!(
                    "No collection entry for IGDB id {} ('{}'); skipping",
                    record.id,
                    record.name
                );
                outcome.orphaned.push(record.id);
            }
        }
    }

    outcome
}

fn enrich_entry(entry: &mut CollectionEntry, record: &DetailRecord) {
    entry.first_release_date = release_timestamp(record.first_release_date);
    entry.storyline = record.storyline.clone();
    entry.summary = record.summary.clone();
    entry.cover = record
        .cover
        .as_ref()
        .map(|cover| Cover {
            id: cover.id,
            width: cover.width,
            url: cover.url.clone(),
        })
        .unwrap_or_default();
}

/// IGDB uses 0 for "unknown release date".
fn release_timestamp(secs: i64) -> Option<DateTime<Utc>> {
    if secs == 0 {
        None
    } else {
        DateTime::from_timestamp(secs, 0)
    }
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
