use clz_core::CollectionEntry;

/// Ids per detail request. Kept small to stay under IGDB's per-query limits.
pub const BATCH_SIZE: usize = 3;

/// Split ids into order-preserving groups of `size` (the last may be shorter).
/// A `size` of 0 is treated as 1.
pub fn plan_batches(ids: &[u64], size: usize) -> Vec<Vec<u64>> {
    ids.chunks(size.max(1)).map(<[u64]>::to_vec).collect()
}

/// Plan detail requests for a collection.
///
/// Unresolved entries are left out so no batch slot is spent on an id IGDB
/// cannot return.
pub fn plan(entries: &[CollectionEntry], size: usize) -> Vec<Vec<u64>> {
    let ids: Vec<u64> = entries
        .iter()
        .filter(|entry| entry.is_resolved())
        .map(|entry| entry.igdb_id)
        .collect();
    plan_batches(&ids, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64) -> CollectionEntry {
        let mut entry = CollectionEntry::new(format!("Game {id}"), "NES");
        entry.igdb_id = id;
        entry
    }

    #[test]
    fn test_flatten_reproduces_input() {
        for n in 0..=10u64 {
            let ids: Vec<u64> = (1..=n).collect();
            let batches = plan_batches(&ids, BATCH_SIZE);

            let flat: Vec<u64> = batches.iter().flatten().copied().collect();
            assert_eq!(flat, ids);
            assert_eq!(batches.len(), (n as usize).div_ceil(BATCH_SIZE));

            if let Some((last, full)) = batches.split_last() {
                assert!(full.iter().all(|b| b.len() == BATCH_SIZE));
                assert!(!last.is_empty() && last.len() <= BATCH_SIZE);
            }
        }
    }

    #[test]
    fn test_seven_ids() {
        let batches = plan_batches(&[7, 6, 5, 4, 3, 2, 1], 3);
        assert_eq!(batches, vec![vec![7, 6, 5], vec![4, 3, 2], vec![1]]);
    }

    #[test]
    fn test_zero_size_is_one() {
        assert_eq!(plan_batches(&[1, 2], 0), vec![vec![1], vec![2]]);
    }

    #[test]
    fn test_plan_skips_unresolved() {
        let entries = vec![entry(10), entry(0), entry(20), entry(30), entry(0), entry(40)];
        let batches = plan(&entries, 3);
        assert_eq!(batches, vec![vec![10, 20, 30], vec![40]]);
    }

    #[test]
    fn test_plan_all_unresolved() {
        let entries = vec![entry(0), entry(0)];
        assert!(plan(&entries, 3).is_empty());
    }
}
