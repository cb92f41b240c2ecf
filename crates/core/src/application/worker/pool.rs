// Worker pool - one thread per configured threshold

use super::Worker;
use crate::application::cache::JobCache;
use crate::error::Result;
use crate::port::{TaskExecutor, TimeProvider};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{info, warn};

/// Pool of worker threads draining one cache
///
/// The cache's configured `priorities` label the slots: one named OS thread
/// per threshold.
pub struct WorkerPool {
    cache: Arc<JobCache>,
    handles: Vec<JoinHandle<u64>>,
}

impl WorkerPool {
    /// Spawn one worker thread per configured threshold
    pub fn start(
        cache: Arc<JobCache>,
        executor: Arc<dyn TaskExecutor>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Result<Self> {
        let thresholds = cache.priorities().to_vec();
        let mut handles = Vec::with_capacity(thresholds.len());
        for (slot, threshold) in thresholds.into_iter().enumerate() {
            let worker = Worker::new(
                threshold,
                Arc::clone(&cache),
                Arc::clone(&executor),
                Arc::clone(&time_provider),
            );
            let handle = std::thread::Builder::new()
                .name(format!("granary-worker-{slot}"))
                .spawn(move || worker.run())?;
            handles.push(handle);
        }
        info!(workers = handles.len(), "worker pool started");
        Ok(Self { cache, handles })
    }

    pub fn worker_count(&self) -> usize {
        self.handles.len()
    }

    /// Stop the cache and join every worker
    ///
    /// Returns the total number of jobs the pool executed.
    pub fn stop(self) -> u64 {
        self.cache.stop();
        let mut processed = 0u64;
        for handle in self.handles {
            match handle.join() {
                Ok(count) => processed += count,
                Err(_) => warn!("worker thread terminated abnormally"),
            }
        }
        info!(processed, "worker pool stopped");
        processed
    }
}
