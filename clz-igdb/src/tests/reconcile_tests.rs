use super::*;
use crate::types::CoverRef;

fn entry(title: &str, id: u64) -> CollectionEntry {
    let mut entry = CollectionEntry::new(title, "NES");
    entry.igdb_id = id;
    entry
}

fn record(id: u64, cover_id: u64) -> DetailRecord {
    DetailRecord {
        id,
        name: format!("IGDB {id}"),
        first_release_date: 593568000,
        storyline: format!("Storyline for {id}"),
        summary: format!("Summary for {id}"),
        cover: Some(CoverRef {
            id: cover_id,
            width: 1000,
            url: format!("//images.igdb.com/igdb/image/upload/t_cover_big/{cover_id}.jpg"),
        }),
        ..Default::default()
    }
}

#[test]
fn test_out_of_order_partial_batch() {
    let mut entries = vec![entry("Ten", 10), entry("Twenty", 20), entry("Thirty", 30)];
    let records = vec![record(30, 3000), record(10, 1000)];

    let outcome = apply(&mut entries, &records);
    assert_eq!(outcome.applied, 2);
    assert!(outcome.orphaned.is_empty());

    assert_eq!(entries[0].cover.id, 1000);
    assert_eq!(entries[0].summary, "Summary for 10");
    assert_eq!(entries[2].cover.id, 3000);
    assert_eq!(entries[2].storyline, "Storyline for 30");
    assert_eq!(
        entries[2].first_release_date,
        DateTime::from_timestamp(593568000, 0)
    );

    assert!(!entries[1].has_enrichment());
    assert_eq!(entries[1], entry("Twenty", 20));
}

#[test]
fn test_orphan_record_is_skipped() {
    let mut entries = vec![entry("Ten", 10), entry("Twenty", 20)];
    let before = entries.clone();

    let outcome = apply(&mut entries, &[record(99, 9900)]);
    assert_eq!(outcome.applied, 0);
    assert_eq!(outcome.orphaned, vec![99]);
    assert_eq!(entries, before);
}

#[test]
fn test_zero_id_record_never_matches_unresolved_entry() {
    let mut entries = vec![entry("Unresolved", UNRESOLVED_ID)];
    let outcome = apply(&mut entries, &[record(0, 1)]);
    assert_eq!(outcome.orphaned, vec![0]);
    assert!(!entries[0].has_enrichment());
}

#[test]
fn test_first_matching_entry_wins() {
    let mut entries = vec![entry("Copy A", 7), entry("Copy B", 7)];
    apply(&mut entries, &[record(7, 700)]);
    assert_eq!(entries[0].cover.id, 700);
    assert!(!entries[1].has_enrichment());
}

#[test]
fn test_missing_fields_overwrite_with_defaults() {
    let mut entries = vec![entry("Ten", 10)];
    entries[0].summary = "stale".to_string();

    let bare = DetailRecord {
        id: 10,
        ..Default::default()
    };
    apply(&mut entries, &[bare]);
    assert_eq!(entries[0].summary, "");
    assert_eq!(entries[0].first_release_date, None);
    assert_eq!(entries[0].cover, Cover::default());
}

#[test]
fn test_empty_batch_is_noop() {
    let mut entries = vec![entry("Ten", 10)];
    let outcome = apply(&mut entries, &[]);
    assert_eq!(outcome, ReconcileOutcome::default());
}
