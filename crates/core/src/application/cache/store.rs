// Sorted job store - the cache's ordered multiset

use crate::domain::Metajob;

/// Ordered multiset of metajobs, ascending by sort key
///
/// Equal keys keep arrival order, so eviction from the tail drops the newest
/// of two equal rows first.
#[derive(Debug, Default)]
pub(crate) struct SortedStore {
    jobs: Vec<Metajob>,
}

impl SortedStore {
    pub(crate) fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// Insert one job at its sorted position
    pub(crate) fn insert(&mut self, job: Metajob) {
        let at = self
            .jobs
            .partition_point(|held| held.sort_key() <= job.sort_key());
        self.jobs.insert(at, job);
    }

    pub(crate) fn extend(&mut self, jobs: impl IntoIterator<Item = Metajob>) {
        for job in jobs {
            self.insert(job);
        }
    }

    /// Most important job, if any
    pub(crate) fn first(&self) -> Option<&Metajob> {
        self.jobs.first()
    }

    /// Detach the most important job
    pub(crate) fn pop_first(&mut self) -> Option<Metajob> {
        if self.is_empty() {
            None
        } else {
            Some(self.jobs.remove(0))
        }
    }

    /// Detach the least important job
    pub(crate) fn pop_last(&mut self) -> Option<Metajob> {
        self.jobs.pop()
    }

    pub(crate) fn len(&self) -> usize {
        self.jobs.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Metajob> {
        self.jobs.iter()
    }

    /// Freshly allocated ascending snapshot
    pub(crate) fn snapshot(&self) -> Vec<Metajob> {
        self.jobs.clone()
    }

    /// Detach everything, ascending
    pub(crate) fn drain_all(&mut self) -> Vec<Metajob> {
        std::mem::take(&mut self.jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{JobPayload, JobRecord, JobType};

    fn meta(priority: i32, run_at: i64, id: i64) -> Metajob {
        Metajob::new(JobRecord::new(
            id,
            "",
            priority,
            run_at,
            JobType::new("TEST"),
            JobPayload::new(serde_json::json!({})),
        ))
    }

    fn ids(store: &SortedStore) -> Vec<i64> {
        store.iter().map(|job| job.id()).collect()
    }

    #[test]
    fn test_insert_keeps_ascending_order() {
        let mut store = SortedStore::new();
        store.extend([
            meta(2, 200, 7),
            meta(1, 100, 1),
            meta(1, 200, 3),
            meta(1, 100, 2),
            meta(2, 100, 5),
        ]);

        assert_eq!(ids(&store), vec![1, 2, 3, 5, 7]);
    }

    #[test]
    fn test_pop_first_and_last_take_the_extremes() {
        let mut store = SortedStore::new();
        store.extend([meta(2, 100, 5), meta(1, 100, 1), meta(3, 100, 9)]);

        assert_eq!(store.pop_first().unwrap().id(), 1);
        assert_eq!(store.pop_last().unwrap().id(), 9);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_keys_are_kept() {
        let mut store = SortedStore::new();
        store.insert(meta(1, 100, 4));
        store.insert(meta(1, 100, 4));

        assert_eq!(store.len(), 2, "equal rows form a multiset");
    }

    #[test]
    fn test_drain_all_empties_the_store() {
        let mut store = SortedStore::new();
        store.extend([meta(2, 100, 5), meta(1, 100, 1)]);

        let drained = store.drain_all();

        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].id(), 1);
        assert!(store.is_empty());
        assert!(store.pop_first().is_none());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut store = SortedStore::new();
        store.insert(meta(1, 100, 1));

        let snapshot = store.snapshot();
        store.pop_first();

        assert_eq!(snapshot.len(), 1);
        assert!(store.is_empty());
    }
}
