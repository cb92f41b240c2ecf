// Job Domain Model

use serde::{Deserialize, Serialize};

/// Job row id, assigned by the durable store
pub type JobId = i64;

/// Queue identifier
pub type QueueId = String;

/// Priority (lower number = more important)
pub type Priority = i32;

/// Job Type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobType(String);

impl JobType {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Job Payload (JSON serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPayload(serde_json::Value);

impl JobPayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Job row as handed over by the durable store
///
/// Identity and ordering fields (`id`, `priority`, `run_at`) are fixed when
/// the producer locks the row; the engine never rewrites them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub queue: QueueId,
    pub priority: Priority,
    pub run_at: i64, // epoch ms
    pub job_type: JobType,
    pub payload: JobPayload,
    pub error_count: i32,
}

impl JobRecord {
    /// Create a new job record
    ///
    /// # Arguments
    ///
    /// * `id` - Row id from the durable store (injected, not generated)
    /// * `queue` - Queue name
    /// * `priority` - Lower value runs first
    /// * `run_at` - Earliest run time in epoch ms (injected, not system time)
    /// * `job_type` - Job type
    /// * `payload` - Job payload
    pub fn new(
        id: JobId,
        queue: impl Into<String>,
        priority: Priority,
        run_at: i64,
        job_type: JobType,
        payload: JobPayload,
    ) -> Self {
        Self {
            id,
            queue: queue.into(),
            priority,
            run_at,
            job_type,
            payload,
            error_count: 0,
        }
    }
}
