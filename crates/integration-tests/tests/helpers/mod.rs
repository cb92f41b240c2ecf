// Shared helpers for the integration suite
#![allow(dead_code)]

use granary_core::domain::{JobPayload, JobRecord, JobType, Metajob};
use std::time::{Duration, Instant};

/// Fixed "now" for deterministic sort keys (epoch ms)
pub const NOW_MS: i64 = 1_767_225_600_000;

/// Fifty seconds before [`NOW_MS`]
pub const OLD_MS: i64 = NOW_MS - 50_000;

/// A metajob with the given sort key and an empty queue name
pub fn meta(priority: i32, run_at: i64, id: i64) -> Metajob {
    Metajob::new(JobRecord::new(
        id,
        "",
        priority,
        run_at,
        JobType::new("TEST"),
        JobPayload::new(serde_json::json!({})),
    ))
}

pub fn ids(jobs: &[Metajob]) -> Vec<i64> {
    jobs.iter().map(|job| job.id()).collect()
}

/// Poll until the condition holds or the deadline passes
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    condition()
}
