use clz_core::CollectionEntry;

use crate::client::CatalogApi;
use crate::enrich::EnrichEvent;
use crate::pacer::Pacer;
use crate::reconcile;

/// Counts from the detail-fetch phase.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchStats {
    pub batches: usize,
    pub batches_failed: usize,
    pub records_received: usize,
    pub entries_enriched: usize,
    pub orphaned: usize,
}

/// Fetch each planned batch in order and reconcile it before requesting the next.
///
/// Every request except the first waits on `pacer`. A failed batch is logged
/// and counted; the remaining batches are still fetched.
pub fn fetch_and_reconcile<A: CatalogApi + ?Sized>(
    api: &A,
    entries: &mut [CollectionEntry],
    batches: &[Vec<u64>],
    pacer: &mut Pacer,
    on_event: &mut dyn FnMut(EnrichEvent),
) -> FetchStats {
    let total = batches.len();
    let mut stats = FetchStats {
        batches: total,
        ..Default::default()
    };
    on_event(EnrichEvent::FetchStarted { batches: total });

    for (index, batch) in batches.iter().enumerate() {
        pacer.wait();
        log::info!(
            "Processing batch {}/{} with {} games",
            index + 1,
            total,
            batch.len()
        );

        match api.fetch_by_ids(batch) {
            Ok(records) => {
                log::debug!(
                    "Retrieved {} IGDB records for batch {}",
                    records.len(),
                    index + 1
                );
                let outcome = reconcile::apply(entries, &records);
                stats.records_received += records.len();
                stats.entries_enriched += outcome.applied;
                stats.orphaned += outcome.orphaned.len();
                on_event(EnrichEvent::BatchFetched {
                    index,
                    total,
                    requested: batch.len(),
                    returned: records.len(),
                });
            }
            Err(e) => {
                log::warn!("IGDB detail fetch for batch {}/{} failed: {}", index + 1, total, e);
                stats.batches_failed += 1;
                on_event(EnrichEvent::BatchFailed {
                    index,
                    total,
                    error: e.to_string(),
                });
            }
        }
    }

    stats
}
