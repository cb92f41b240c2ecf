// Job Source Port (Interface to the durable job store)

use crate::domain::{JobId, Metajob};
use thiserror::Error;

/// Errors surfaced by the durable job store
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Lock lost for job {0}")]
    LockLost(JobId),
}

/// Producer-side interface to the durable job store
///
/// The cache never touches the store. The feeder drives this port, using the
/// cache's admission preview to avoid locking rows it would only evict again:
/// `poll` is cheap and lock-free, `lock` is the expensive step, `release`
/// gives locks back so another process may claim the row.
pub trait JobSource: Send + Sync {
    /// Cheap scan of ready jobs; takes no locks
    fn poll(&self, limit: usize) -> Result<Vec<Metajob>, SourceError>;

    /// Take durable locks for the given jobs; returns the jobs actually won
    fn lock(&self, jobs: &[Metajob]) -> Result<Vec<Metajob>, SourceError>;

    /// Release durable locks for evicted or no-longer-wanted jobs
    fn release(&self, jobs: &[Metajob]) -> Result<(), SourceError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// In-memory job source for tests
    ///
    /// `poll` returns jobs in seeding order; `lock` removes them from the
    /// ready set; `release` puts them back, as the real store would once the
    /// row lock drops.
    pub struct MockJobSource {
        ready: Mutex<Vec<Metajob>>,
        locked: Mutex<HashSet<JobId>>,
        lock_history: Mutex<Vec<JobId>>,
        released: Mutex<Vec<JobId>>,
    }

    impl MockJobSource {
        pub fn new(jobs: Vec<Metajob>) -> Self {
            Self {
                ready: Mutex::new(jobs),
                locked: Mutex::new(HashSet::new()),
                lock_history: Mutex::new(Vec::new()),
                released: Mutex::new(Vec::new()),
            }
        }

        /// Make more jobs visible to `poll`
        pub fn seed(&self, jobs: Vec<Metajob>) {
            self.ready.lock().unwrap().extend(jobs);
        }

        pub fn remaining(&self) -> usize {
            self.ready.lock().unwrap().len()
        }

        /// Ids currently holding a lock, sorted
        pub fn locked_ids(&self) -> Vec<JobId> {
            let mut ids: Vec<JobId> = self.locked.lock().unwrap().iter().copied().collect();
            ids.sort_unstable();
            ids
        }

        /// Every lock ever won, in the order it was taken
        pub fn lock_history(&self) -> Vec<JobId> {
            self.lock_history.lock().unwrap().clone()
        }

        /// Ids in the order their locks were given back
        pub fn released_ids(&self) -> Vec<JobId> {
            self.released.lock().unwrap().clone()
        }
    }

    impl JobSource for MockJobSource {
        fn poll(&self, limit: usize) -> Result<Vec<Metajob>, SourceError> {
            let ready = self.ready.lock().unwrap();
            Ok(ready.iter().take(limit).cloned().collect())
        }

        fn lock(&self, jobs: &[Metajob]) -> Result<Vec<Metajob>, SourceError> {
            let mut ready = self.ready.lock().unwrap();
            let mut locked = self.locked.lock().unwrap();

            let mut won = Vec::new();
            for job in jobs {
                if let Some(at) = ready.iter().position(|held| held.id() == job.id()) {
                    ready.remove(at);
                    locked.insert(job.id());
                    self.lock_history.lock().unwrap().push(job.id());
                    won.push(job.clone());
                }
            }
            Ok(won)
        }

        fn release(&self, jobs: &[Metajob]) -> Result<(), SourceError> {
            let mut ready = self.ready.lock().unwrap();
            let mut locked = self.locked.lock().unwrap();
            let mut released = self.released.lock().unwrap();

            for job in jobs {
                locked.remove(&job.id());
                released.push(job.id());
                ready.push(job.clone());
            }
            Ok(())
        }
    }
}
