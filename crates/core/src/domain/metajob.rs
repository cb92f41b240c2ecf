// Metajob - ordered handle over a job row

use crate::domain::job::{JobId, JobRecord, Priority};
use std::cmp::Ordering;
use std::sync::Arc;

/// Sort key for the global job order
///
/// Lexicographic ascending on `(priority, run_at, id)`; lower is more
/// important. `id` is globally unique, which keeps the order total even when
/// the first two fields collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey {
    pub priority: Priority,
    pub run_at: i64,
    pub id: JobId,
}

/// Cheap ordered handle over a shared job row
///
/// Cloning clones the handle, not the row. Equality and ordering delegate to
/// the sort key.
#[derive(Debug, Clone)]
pub struct Metajob {
    record: Arc<JobRecord>,
}

impl Metajob {
    pub fn new(record: JobRecord) -> Self {
        Self {
            record: Arc::new(record),
        }
    }

    pub fn record(&self) -> &JobRecord {
        &self.record
    }

    pub fn id(&self) -> JobId {
        self.record.id
    }

    pub fn priority(&self) -> Priority {
        self.record.priority
    }

    pub fn run_at(&self) -> i64 {
        self.record.run_at
    }

    pub fn sort_key(&self) -> SortKey {
        SortKey {
            priority: self.record.priority,
            run_at: self.record.run_at,
            id: self.record.id,
        }
    }
}

impl From<JobRecord> for Metajob {
    fn from(record: JobRecord) -> Self {
        Self::new(record)
    }
}

impl PartialEq for Metajob {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Metajob {}

impl PartialOrd for Metajob {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Metajob {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::{JobPayload, JobType};

    fn meta(priority: Priority, run_at: i64, id: JobId) -> Metajob {
        Metajob::new(JobRecord::new(
            id,
            "",
            priority,
            run_at,
            JobType::new("TEST"),
            JobPayload::new(serde_json::json!({})),
        ))
    }

    #[test]
    fn test_order_is_lexicographic_on_priority_run_at_id() {
        let a = meta(1, 100, 7);
        let b = meta(1, 100, 8);
        let c = meta(1, 200, 1);
        let d = meta(2, 50, 1);

        assert!(a < b, "id breaks the tie");
        assert!(b < c, "run_at dominates id");
        assert!(c < d, "priority dominates run_at");
    }

    #[test]
    fn test_equality_requires_all_three_fields() {
        assert_eq!(meta(1, 100, 7), meta(1, 100, 7));
        assert_ne!(meta(1, 100, 7), meta(1, 100, 8));
        assert_ne!(meta(1, 100, 7), meta(1, 101, 7));
        assert_ne!(meta(1, 100, 7), meta(2, 100, 7));
    }

    #[test]
    fn test_clone_shares_the_record() {
        let original = meta(1, 100, 7);
        let handle = original.clone();

        assert_eq!(original, handle);
        assert_eq!(handle.record().id, 7);
    }
}
