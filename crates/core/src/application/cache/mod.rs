// Job Cache - bounded priority buffer between the feeder and the workers

mod store;
mod waiters;

use crate::domain::{CacheConfig, DomainError, Metajob, Threshold};
use std::sync::Mutex;
use tracing::{debug, info};

use self::store::SortedStore;
use self::waiters::WaiterRegistry;

/// Bounded priority job cache
///
/// Buffers ready-to-run jobs between the producer and the worker threads.
/// One mutex guards the store, the parked waiters, and the stop flag. Each
/// parked consumer blocks on its own handoff slot, so a push wakes exactly
/// the consumer it serves.
///
/// Total order over jobs is ascending `(priority, run_at, id)`; the head of
/// that order is always dequeued first and the tail is evicted first.
#[derive(Debug)]
pub struct JobCache {
    maximum_size: usize,
    minimum_size: usize,
    priorities: Vec<Threshold>,
    state: Mutex<CacheState>,
}

#[derive(Debug)]
struct CacheState {
    store: SortedStore,
    waiters: WaiterRegistry,
    stopping: bool,
}

impl JobCache {
    /// Build a cache from validated configuration
    pub fn new(config: CacheConfig) -> Result<Self, DomainError> {
        config.validate()?;
        Ok(Self {
            maximum_size: config.maximum_size as usize,
            minimum_size: config.minimum_size as usize,
            priorities: config.priorities,
            state: Mutex::new(CacheState {
                store: SortedStore::new(),
                waiters: WaiterRegistry::new(),
                stopping: false,
            }),
        })
    }

    /// Merge jobs into the cache
    ///
    /// Returns the jobs that did not stay, sorted ascending: everything when
    /// the cache is stopping, otherwise the overflow evicted from the tail
    /// of the order. The producer is expected to release the durable locks
    /// of whatever comes back.
    pub fn push(&self, jobs: Vec<Metajob>) -> Vec<Metajob> {
        let mut state = self.state.lock().unwrap();
        if state.stopping {
            let mut rejected = jobs;
            rejected.sort();
            debug!(count = rejected.len(), "cache is stopping, rejecting push");
            return rejected;
        }

        let pushed = jobs.len();
        state.store.extend(jobs);

        let mut evicted = Vec::new();
        while state.store.len() > self.maximum_size {
            if let Some(job) = state.store.pop_last() {
                evicted.push(job);
            }
        }

        let mut handed = 0usize;
        loop {
            let Some(priority) = state.store.first().map(|job| job.priority()) else {
                break;
            };
            let Some(waiter) = state.waiters.select_for(priority) else {
                break;
            };
            if let Some(job) = state.store.pop_first() {
                debug!(
                    job_id = job.id(),
                    threshold = %waiter.threshold(),
                    "handing job to parked worker"
                );
                waiter.deliver(job);
                handed += 1;
            }
        }

        evicted.sort();
        debug!(
            pushed,
            handed,
            evicted = evicted.len(),
            size = state.store.len(),
            "push settled"
        );
        evicted
    }

    /// Preview which candidates would survive a push right now
    ///
    /// Does not mutate. While stopping, reports the full input as admissible
    /// so the producer keeps treating the cache as full rather than locking
    /// rows nobody will run.
    pub fn accept(&self, candidates: &[Metajob]) -> Vec<Metajob> {
        let state = self.state.lock().unwrap();

        let mut sorted: Vec<&Metajob> = candidates.iter().collect();
        sorted.sort();

        if state.stopping || state.store.len() + candidates.len() <= self.maximum_size {
            return sorted.into_iter().cloned().collect();
        }

        // Merge against current contents; a tie keeps the held row, matching
        // the eviction order of push.
        let mut admitted = Vec::new();
        let mut held = state.store.iter().peekable();
        let mut taken = 0usize;
        for candidate in sorted {
            while let Some(job) = held.peek() {
                if job.sort_key() <= candidate.sort_key() {
                    held.next();
                    taken += 1;
                } else {
                    break;
                }
            }
            if taken >= self.maximum_size {
                break;
            }
            admitted.push(candidate.clone());
            taken += 1;
        }
        admitted
    }

    /// Block until a job satisfying the threshold is available
    ///
    /// Returns `None` once the cache is stopping; workers treat that as the
    /// signal to exit their loop. A job handed over before the stop raced in
    /// is still returned, never dropped.
    pub fn shift(&self, threshold: Threshold) -> Option<Metajob> {
        let waiter = {
            let mut state = self.state.lock().unwrap();
            if state.stopping {
                return None;
            }
            // The head is the most admissible row; if it fails the
            // threshold, everything behind it does too.
            let eligible = state
                .store
                .first()
                .is_some_and(|job| threshold.admits(job.priority()));
            if eligible {
                return state.store.pop_first();
            }
            state.waiters.register(threshold)
        };
        waiter.wait_for_handoff()
    }

    /// Latch the stop flag and wake every parked consumer
    ///
    /// Idempotent. Once this returns, every parked and future `shift`
    /// observes the shutdown sentinel.
    pub fn stop(&self) {
        let parked = {
            let mut state = self.state.lock().unwrap();
            state.stopping = true;
            state.waiters.drain_all()
        };
        if !parked.is_empty() {
            info!(released = parked.len(), "cache stopping, releasing parked workers");
        }
        for waiter in parked {
            waiter.interrupt();
        }
    }

    /// Number of buffered jobs
    pub fn size(&self) -> usize {
        self.state.lock().unwrap().store.len()
    }

    /// How many more jobs the producer should fetch
    ///
    /// Free capacity plus one slot per parked take-anything worker, so an
    /// idle pool shows up as demand.
    pub fn space(&self) -> usize {
        let state = self.state.lock().unwrap();
        self.maximum_size.saturating_sub(state.store.len()) + state.waiters.any_count()
    }

    /// Whether the buffer has drained below its configured floor
    pub fn jobs_needed(&self) -> bool {
        self.state.lock().unwrap().store.len() < self.minimum_size
    }

    /// Whether stop has been called
    pub fn stopping(&self) -> bool {
        self.state.lock().unwrap().stopping
    }

    /// Number of parked consumers
    pub fn waiting_count(&self) -> usize {
        self.state.lock().unwrap().waiters.len()
    }

    /// Freshly allocated ascending snapshot of the buffered jobs
    pub fn to_vec(&self) -> Vec<Metajob> {
        self.state.lock().unwrap().store.snapshot()
    }

    /// Detach and return every buffered job, ascending; works while stopping
    pub fn clear(&self) -> Vec<Metajob> {
        self.state.lock().unwrap().store.drain_all()
    }

    /// Threshold labels configured for the worker slots
    pub fn priorities(&self) -> &[Threshold] {
        &self.priorities
    }

    /// Hard capacity
    pub fn maximum_size(&self) -> usize {
        self.maximum_size
    }

    /// Producer top-up floor
    pub fn minimum_size(&self) -> usize {
        self.minimum_size
    }
}
