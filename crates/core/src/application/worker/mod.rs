// Worker - blocking job execution loop

pub mod constants;
mod panic_guard;
mod pool;

pub use panic_guard::{run_guarded, GuardedResult};
pub use pool::WorkerPool;

use crate::application::cache::JobCache;
use crate::domain::{Metajob, Threshold};
use crate::port::{ExecutionStatus, TaskExecutor, TimeProvider};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Worker drains one cache with a fixed priority threshold
///
/// The loop blocks in `shift` until a job inside the threshold is handed
/// over, runs it through the executor with panic isolation, and exits when
/// the cache delivers the shutdown sentinel.
pub struct Worker {
    threshold: Threshold,
    cache: Arc<JobCache>,
    executor: Arc<dyn TaskExecutor>,
    time_provider: Arc<dyn TimeProvider>,
}

impl Worker {
    pub fn new(
        threshold: Threshold,
        cache: Arc<JobCache>,
        executor: Arc<dyn TaskExecutor>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            threshold,
            cache,
            executor,
            time_provider,
        }
    }

    /// Run until the cache stops; returns the number of jobs executed
    pub fn run(&self) -> u64 {
        info!(threshold = %self.threshold, "worker started");
        let mut processed = 0u64;
        while let Some(job) = self.cache.shift(self.threshold) {
            self.process(job);
            processed += 1;
        }
        info!(threshold = %self.threshold, processed, "worker stopped");
        processed
    }

    fn process(&self, job: Metajob) {
        let wait_ms = self.time_provider.now_millis() - job.run_at();
        debug!(
            job_id = job.id(),
            priority = job.priority(),
            wait_ms,
            "dequeued job"
        );

        match run_guarded(|| self.executor.execute(job.record())) {
            GuardedResult::Completed(Ok(result)) => {
                if result.status == ExecutionStatus::Success {
                    debug!(
                        job_id = job.id(),
                        duration_ms = result.duration_ms,
                        "job finished"
                    );
                } else {
                    warn!(job_id = job.id(), status = ?result.status, "job finished unsuccessfully");
                }
            }
            GuardedResult::Completed(Err(e)) => {
                warn!(job_id = job.id(), error = %e, "job execution failed");
            }
            GuardedResult::Panicked(message) => {
                error!(job_id = job.id(), message = %message, "job handler panicked");
            }
        }
    }
}
