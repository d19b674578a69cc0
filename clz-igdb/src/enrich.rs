use std::time::Duration;

use clz_core::CollectionEntry;

use crate::batch::{self, BATCH_SIZE};
use crate::client::CatalogApi;
use crate::config::{DEFAULT_RATE_LIMIT, IgdbConfig};
use crate::fetch::{self, FetchStats};
use crate::pacer::Pacer;
use crate::resolve::{self, MatchMethod, ResolveStats};

/// Options for an enrichment run.
#[derive(Debug, Clone)]
pub struct EnrichOptions {
    /// Ids per detail request.
    pub batch_size: usize,
    /// Delay between successive catalog requests.
    pub rate_limit: Duration,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            batch_size: BATCH_SIZE,
            rate_limit: DEFAULT_RATE_LIMIT,
        }
    }
}

impl EnrichOptions {
    pub fn from_config(config: &IgdbConfig) -> Self {
        Self {
            rate_limit: config.rate_limit,
            ..Default::default()
        }
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn rate_limit(mut self, rate_limit: Duration) -> Self {
        self.rate_limit = rate_limit;
        self
    }
}

/// Progress events emitted during enrichment, consumed by the CLI.
#[derive(Debug, Clone)]
pub enum EnrichEvent {
    /// Title resolution is starting.
    ResolveStarted { total: usize },
    /// An entry already had an id and was not searched.
    EntrySkipped { index: usize },
    /// An entry was matched to an IGDB id.
    EntryResolved {
        index: usize,
        title: String,
        igdb_id: u64,
        method: MatchMethod,
    },
    /// An entry could not be matched (no result, or the search failed).
    EntryUnresolved {
        index: usize,
        title: String,
        reason: String,
    },
    /// Detail fetching is starting.
    FetchStarted { batches: usize },
    /// A batch came back and was reconciled.
    BatchFetched {
        index: usize,
        total: usize,
        requested: usize,
        returned: usize,
    },
    /// A batch request failed (non-fatal).
    BatchFailed {
        index: usize,
        total: usize,
        error: String,
    },
    /// Enrichment finished.
    Done { stats: EnrichStats },
}

/// Statistics from an enrichment run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnrichStats {
    pub entries: usize,
    pub resolve: ResolveStats,
    pub fetch: FetchStats,
}

impl EnrichStats {
    pub fn entries_enriched(&self) -> usize {
        self.fetch.entries_enriched
    }

    /// Entries left without enrichment.
    pub fn entries_unenriched(&self) -> usize {
        self.entries.saturating_sub(self.fetch.entries_enriched)
    }
}

/// Resolve, plan, fetch and reconcile a collection in place.
///
/// Never fails: lookup problems are logged and counted, and the collection
/// keeps its length and order whatever IGDB returns.
pub fn enrich_collection<A: CatalogApi + ?Sized>(
    api: &A,
    entries: &mut [CollectionEntry],
    options: &EnrichOptions,
    on_event: &mut dyn FnMut(EnrichEvent),
) -> EnrichStats {
    let mut pacer = Pacer::new(options.rate_limit);

    let resolve = resolve::resolve_collection(api, entries, &mut pacer, on_event);
    log::info!(
        "Resolved {} of {} games ({} not found, {} failed, {} already had ids)",
        resolve.resolved,
        entries.len(),
        resolve.missed,
        resolve.failed,
        resolve.skipped
    );

    let batches = batch::plan(entries, options.batch_size);
    let fetch = fetch::fetch_and_reconcile(api, entries, &batches, &mut pacer, on_event);

    let stats = EnrichStats {
        entries: entries.len(),
        resolve,
        fetch,
    };
    on_event(EnrichEvent::Done {
        stats: stats.clone(),
    });
    stats
}

#[cfg(test)]
#[path = "tests/enrich_tests.rs"]
mod tests;
