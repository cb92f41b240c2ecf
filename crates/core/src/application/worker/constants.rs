// Worker and feeder constants
use std::time::Duration;

/// Feeder idle tick when the store has nothing new for us (100ms)
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Sleep after a job source error before the feeder retries (1s)
pub const ERROR_RECOVERY_SLEEP_DURATION: Duration = Duration::from_secs(1);
