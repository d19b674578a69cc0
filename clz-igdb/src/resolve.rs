use clz_core::{CollectionEntry, PlatformNameMap, UNRESOLVED_ID};

use crate::client::CatalogApi;
use crate::enrich::EnrichEvent;
use crate::error::IgdbError;
use crate::normalize::normalize_title;
use crate::pacer::Pacer;
use crate::types::SearchCandidate;

/// How a title was matched to an IGDB id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMethod {
    /// The search returned exactly one candidate.
    SingleCandidate,
    /// The first candidate listing the entry's platform.
    PlatformMatch,
    /// No candidate listed the platform; IGDB's top result was taken.
    FirstCandidate,
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMethod::SingleCandidate => write!(f, "single candidate"),
            MatchMethod::PlatformMatch => write!(f, "platform match"),
            MatchMethod::FirstCandidate => write!(f, "first candidate"),
        }
    }
}

/// Outcome of resolving one title.
#[derive(Debug)]
pub enum Resolution {
    Resolved { id: u64, method: MatchMethod },
    /// The search succeeded but returned nothing.
    Miss,
    /// The search could not be performed.
    Failed(IgdbError),
}

impl Resolution {
    /// The resolved id, or `UNRESOLVED_ID`.
    pub fn id(&self) -> u64 {
        match self {
            Resolution::Resolved { id, .. } => *id,
            _ => UNRESOLVED_ID,
        }
    }
}

/// Counts from resolving a whole collection.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolveStats {
    pub resolved: usize,
    pub missed: usize,
    pub failed: usize,
    /// Entries that already carried an id and were not searched.
    pub skipped: usize,
}

/// Resolve a title on a CLZ platform to an IGDB id.
pub fn resolve<A: CatalogApi + ?Sized>(api: &A, title: &str, platform: &str) -> Resolution {
    let term = normalize_title(title);
    if term.is_empty() {
        return Resolution::Miss;
    }

    let candidates = match api.search_by_term(&term) {
        Ok(candidates) => candidates,
        Err(e) => return Resolution::Failed(e),
    };

    pick_candidate(&candidates, PlatformNameMap::standard().igdb_id(platform))
}

/// Choose among search candidates.
///
/// A lone candidate wins outright. Otherwise the first candidate (in response
/// order) whose platforms include `platform_id` wins, falling back to the
/// first candidate overall.
pub fn pick_candidate(candidates: &[SearchCandidate], platform_id: Option<u64>) -> Resolution {
    match candidates {
        [] => Resolution::Miss,
        [only] => Resolution::Resolved {
            id: only.id,
            method: MatchMethod::SingleCandidate,
        },
        [first, ..] => {
            let matched = platform_id.and_then(|pid| {
                candidates
                    .iter()
                    .find(|candidate| candidate.platforms.contains(&pid))
            });
            match matched {
                Some(candidate) => Resolution::Resolved {
                    id: candidate.id,
                    method: MatchMethod::PlatformMatch,
                },
                None => Resolution::Resolved {
                    id: first.id,
                    method: MatchMethod::FirstCandidate,
                },
            }
        }
    }
}

/// Resolve every unresolved entry in place, one search per entry, paced.
///
/// A miss or failure leaves the entry at `UNRESOLVED_ID` and moves on.
pub fn resolve_collection<A: CatalogApi + ?Sized>(
    api: &A,
    entries: &mut [CollectionEntry],
    pacer: &mut Pacer,
    on_event: &mut dyn FnMut(EnrichEvent),
) -> ResolveStats {
    let mut stats = ResolveStats::default();
    on_event(EnrichEvent::ResolveStarted {
        total: entries.len(),
    });

    for (index, entry) in entries.iter_mut().enumerate() {
        if entry.is_resolved() {
            stats.skipped += 1;
            on_event(EnrichEvent::EntrySkipped { index });
            continue;
        }

        pacer.wait();
        match resolve(api, &entry.title, &entry.platform) {
            Resolution::Resolved { id, method } => {
                log::debug!(
                    "Resolved '{}' ({}) to IGDB id {} by {}",
                    entry.title,
                    entry.platform,
                    id,
                    method
                );
                entry.igdb_id = id;
                stats.resolved += 1;
                on_event(EnrichEvent::EntryResolved {
                    index,
                    title: entry.title.clone(),
                    igdb_id: id,
                    method,
                });
            }
            Resolution::Miss => {
                log::info!("No IGDB match for '{}' ({})", entry.title, entry.platform);
                stats.missed += 1;
                on_event(EnrichEvent::EntryUnresolved {
                    index,
                    title: entry.title.clone(),
                    reason: "no match".to_string(),
                });
            }
            Resolution::Failed(e) => {
                log::warn!("IGDB search failed for '{}': {}", entry.title, e);
                stats.failed += 1;
                on_event(EnrichEvent::EntryUnresolved {
                    index,
                    title: entry.title.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: u64, platforms: &[u64]) -> SearchCandidate {
        SearchCandidate {
            id,
            name: format!("Game {id}"),
            platforms: platforms.to_vec(),
        }
    }

    #[test]
    fn test_pick_none() {
        assert!(matches!(pick_candidate(&[], Some(18)), Resolution::Miss));
    }

    #[test]
    fn test_pick_single_ignores_platform() {
        let resolution = pick_candidate(&[candidate(42, &[6])], Some(18));
        assert!(matches!(
            resolution,
            Resolution::Resolved {
                id: 42,
                method: MatchMethod::SingleCandidate
            }
        ));
    }

    #[test]
    fn test_pick_platform_tie_break() {
        let candidates = [candidate(1, &[6]), candidate(2, &[18])];
        let resolution = pick_candidate(&candidates, Some(18));
        assert!(matches!(
            resolution,
            Resolution::Resolved {
                id: 2,
                method: MatchMethod::PlatformMatch
            }
        ));
    }

    #[test]
    fn test_pick_first_platform_match_wins() {
        let candidates = [candidate(1, &[6]), candidate(2, &[7, 18]), candidate(3, &[18])];
        assert_eq!(pick_candidate(&candidates, Some(18)).id(), 2);
    }

    #[test]
    fn test_pick_falls_back_to_first() {
        let candidates = [candidate(5, &[6]), candidate(9, &[8])];
        let resolution = pick_candidate(&candidates, Some(18));
        assert!(matches!(
            resolution,
            Resolution::Resolved {
                id: 5,
                method: MatchMethod::FirstCandidate
            }
        ));
    }

    #[test]
    fn test_pick_unmapped_platform_falls_back_to_first() {
        let candidates = [candidate(5, &[6]), candidate(9, &[18])];
        assert_eq!(pick_candidate(&candidates, None).id(), 5);
    }

    #[test]
    fn test_resolution_id_sentinel() {
        assert_eq!(Resolution::Miss.id(), UNRESOLVED_ID);
        assert_eq!(
            Resolution::Failed(IgdbError::config("offline")).id(),
            UNRESOLVED_ID
        );
    }
}
