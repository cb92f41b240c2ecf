// Feeder - producer loop between the durable store and the cache

use crate::application::cache::JobCache;
use crate::application::worker::constants::{ERROR_RECOVERY_SLEEP_DURATION, IDLE_POLL_INTERVAL};
use crate::error::Result;
use crate::port::JobSource;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Feeder keeps the cache topped up from the durable job store
///
/// One cycle: size the fetch from `space`, preview admission with `accept`
/// so only rows worth locking get locked, push the locked rows, and release
/// the durable locks of whatever the push sent back.
pub struct Feeder {
    cache: Arc<JobCache>,
    source: Arc<dyn JobSource>,
    poll_interval: Duration,
}

impl Feeder {
    pub fn new(cache: Arc<JobCache>, source: Arc<dyn JobSource>) -> Self {
        Self {
            cache,
            source,
            poll_interval: IDLE_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Run until the cache stops
    pub fn run(&self) -> Result<()> {
        info!("feeder started");
        while !self.cache.stopping() {
            match self.run_once() {
                Ok(true) => {} // fed the cache; go straight back for more
                Ok(false) => {
                    // A drained buffer polls harder than a merely open one.
                    let tick = if self.cache.jobs_needed() {
                        self.poll_interval / 4
                    } else {
                        self.poll_interval
                    };
                    std::thread::sleep(tick);
                }
                Err(e) => {
                    warn!(error = %e, "feed cycle failed");
                    std::thread::sleep(ERROR_RECOVERY_SLEEP_DURATION);
                }
            }
        }
        info!("feeder stopped");
        Ok(())
    }

    /// One feed cycle; `Ok(true)` when the cache gained jobs
    pub fn run_once(&self) -> Result<bool> {
        let wanted = self.cache.space();
        if wanted == 0 {
            return Ok(false);
        }

        let candidates = self.source.poll(wanted)?;
        if candidates.is_empty() {
            return Ok(false);
        }

        let admissible = self.cache.accept(&candidates);
        if admissible.is_empty() {
            debug!(
                offered = candidates.len(),
                "no candidate beats the buffered jobs"
            );
            return Ok(false);
        }

        let locked = self.source.lock(&admissible)?;
        if locked.is_empty() {
            // Lost every row to a faster locker; the next poll sees fresh ones.
            return Ok(false);
        }

        let locked_count = locked.len();
        let evicted = self.cache.push(locked);
        if !evicted.is_empty() {
            self.source.release(&evicted)?;
        }
        debug!(
            locked = locked_count,
            evicted = evicted.len(),
            size = self.cache.size(),
            "feed cycle settled"
        );
        Ok(locked_count > evicted.len())
    }
}
