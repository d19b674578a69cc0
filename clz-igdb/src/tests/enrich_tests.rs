use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use super::*;
use crate::error::IgdbError;
use crate::types::{CoverRef, DetailRecord, SearchCandidate};

/// In-memory catalog that records every call.
#[derive(Default)]
struct FakeCatalog {
    search: HashMap<String, Vec<SearchCandidate>>,
    details: HashMap<u64, DetailRecord>,
    failing_terms: HashSet<String>,
    failing_ids: HashSet<u64>,
    searches: RefCell<Vec<String>>,
    fetches: RefCell<Vec<Vec<u64>>>,
}

impl FakeCatalog {
    fn with_game(mut self, term: &str, id: u64, platforms: &[u64]) -> Self {
        self.search.entry(term.to_string()).or_default().push(SearchCandidate {
            id,
            name: term.to_string(),
            platforms: platforms.to_vec(),
        });
        self.details.insert(
            id,
            DetailRecord {
                id,
                name: term.to_string(),
                summary: format!("summary {id}"),
                cover: Some(CoverRef {
                    id: id * 10,
                    width: 264,
                    url: String::new(),
                }),
                ..Default::default()
            },
        );
        self
    }
}

impl CatalogApi for FakeCatalog {
    fn fetch_by_ids(&self, ids: &[u64]) -> Result<Vec<DetailRecord>, IgdbError> {
        self.fetches.borrow_mut().push(ids.to_vec());
        if ids.iter().any(|id| self.failing_ids.contains(id)) {
            return Err(IgdbError::status(500, "internal error"));
        }
        // Reverse to make sure nothing depends on response order.
        Ok(ids
            .iter()
            .rev()
            .filter_map(|id| self.details.get(id).cloned())
            .collect())
    }

    fn search_by_term(&self, term: &str) -> Result<Vec<SearchCandidate>, IgdbError> {
        self.searches.borrow_mut().push(term.to_string());
        if self.failing_terms.contains(term) {
            return Err(IgdbError::status(401, "Unauthorized"));
        }
        Ok(self.search.get(term).cloned().unwrap_or_default())
    }
}

fn entries(titles: &[&str]) -> Vec<CollectionEntry> {
    titles
        .iter()
        .map(|title| CollectionEntry::new(*title, "NES"))
        .collect()
}

fn no_wait() -> EnrichOptions {
    EnrichOptions::default().rate_limit(Duration::ZERO)
}

#[test]
fn test_resolve_collection_continues_past_failures() {
    let mut catalog = FakeCatalog::default()
        .with_game("alpha", 1, &[18])
        .with_game("gamma", 3, &[18]);
    catalog.failing_terms.insert("beta".to_string());

    let mut games = entries(&["Alpha", "Beta", "Gamma", "Delta"]);
    let mut pacer = Pacer::new(Duration::ZERO);
    let stats = resolve::resolve_collection(&catalog, &mut games, &mut pacer, &mut |_| {});

    assert_eq!(
        stats,
        ResolveStats {
            resolved: 2,
            missed: 1,
            failed: 1,
            skipped: 0
        }
    );
    let ids: Vec<u64> = games.iter().map(|g| g.igdb_id).collect();
    assert_eq!(ids, vec![1, 0, 3, 0]);
    assert_eq!(
        *catalog.searches.borrow(),
        vec!["alpha", "beta", "gamma", "delta"]
    );
    assert_eq!(pacer.calls(), 4);
    assert_eq!(pacer.waits(), 3);
}

#[test]
fn test_resolve_collection_skips_known_ids() {
    let catalog = FakeCatalog::default().with_game("alpha", 1, &[18]);
    let mut games = entries(&["Alpha", "Known"]);
    games[1].igdb_id = 77;

    let mut pacer = Pacer::new(Duration::ZERO);
    let stats = resolve::resolve_collection(&catalog, &mut games, &mut pacer, &mut |_| {});

    assert_eq!(stats.skipped, 1);
    assert_eq!(games[1].igdb_id, 77);
    assert_eq!(catalog.searches.borrow().len(), 1);
    assert_eq!(pacer.calls(), 1);
}

#[test]
fn test_enrich_collection_batches_and_paces() {
    let catalog = FakeCatalog::default()
        .with_game("a", 1, &[18])
        .with_game("b", 2, &[18])
        .with_game("c", 3, &[18])
        .with_game("d", 4, &[18]);

    let mut games = entries(&["A", "B", "Missing", "C", "D"]);
    let stats = enrich_collection(&catalog, &mut games, &no_wait(), &mut |_| {});

    assert_eq!(*catalog.fetches.borrow(), vec![vec![1, 2, 3], vec![4]]);
    assert_eq!(stats.entries, 5);
    assert_eq!(stats.resolve.resolved, 4);
    assert_eq!(stats.fetch.batches, 2);
    assert_eq!(stats.entries_enriched(), 4);
    assert_eq!(stats.entries_unenriched(), 1);

    assert_eq!(games.len(), 5);
    assert_eq!(games[3].title, "C");
    assert_eq!(games[3].cover.id, 30);
    assert!(!games[2].has_enrichment());
}

#[test]
fn test_enrich_collection_survives_failed_batch() {
    let mut catalog = FakeCatalog::default()
        .with_game("a", 1, &[18])
        .with_game("b", 2, &[18])
        .with_game("c", 3, &[18])
        .with_game("d", 4, &[18]);
    catalog.failing_ids.insert(2);

    let mut games = entries(&["A", "B", "C", "D"]);
    let stats = enrich_collection(
        &catalog,
        &mut games,
        &no_wait().batch_size(2),
        &mut |_| {},
    );

    assert_eq!(stats.fetch.batches, 2);
    assert_eq!(stats.fetch.batches_failed, 1);
    assert_eq!(stats.entries_enriched(), 2);
    assert!(!games[0].has_enrichment());
    assert!(!games[1].has_enrichment());
    assert_eq!(games[2].summary, "summary 3");
    assert_eq!(games[3].summary, "summary 4");
}

#[test]
fn test_enrich_collection_with_nothing_resolved() {
    let catalog = FakeCatalog::default();
    let mut games = entries(&["Nothing", "Here"]);
    let stats = enrich_collection(&catalog, &mut games, &no_wait(), &mut |_| {});

    assert_eq!(stats.resolve.missed, 2);
    assert_eq!(stats.fetch.batches, 0);
    assert!(catalog.fetches.borrow().is_empty());
    assert_eq!(games, entries(&["Nothing", "Here"]));
}

#[test]
fn test_enrich_collection_events() {
    let catalog = FakeCatalog::default().with_game("a", 1, &[18]);
    let mut games = entries(&["A", "B"]);

    let mut events = Vec::new();
    enrich_collection(&catalog, &mut games, &no_wait(), &mut |e| events.push(e));

    assert!(matches!(events[0], EnrichEvent::ResolveStarted { total: 2 }));
    assert!(matches!(
        events[1],
        EnrichEvent::EntryResolved {
            index: 0,
            igdb_id: 1,
            method: MatchMethod::SingleCandidate,
            ..
        }
    ));
    assert!(matches!(events[2], EnrichEvent::EntryUnresolved { index: 1, .. }));
    assert!(matches!(events[3], EnrichEvent::FetchStarted { batches: 1 }));
    assert!(matches!(
        events[4],
        EnrichEvent::BatchFetched {
            requested: 1,
            returned: 1,
            ..
        }
    ));
    assert!(matches!(events[5], EnrichEvent::Done { .. }));
    assert_eq!(events.len(), 6);
}

#[test]
fn test_options_from_config() {
    let config = IgdbConfig {
        auth_base_url: String::new(),
        auth_path: String::new(),
        client_id: "id".to_string(),
        client_secret: "secret".to_string(),
        base_url: String::new(),
        rate_limit: Duration::from_millis(250),
    };
    let options = EnrichOptions::from_config(&config);
    assert_eq!(options.rate_limit, Duration::from_millis(250));
    assert_eq!(options.batch_size, BATCH_SIZE);
}
