// Task Executor Port
// Abstraction for running the user-visible work a job row describes

use crate::domain::JobRecord;
use thiserror::Error;

/// Result of task execution
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    pub duration_ms: i64,
}

/// Execution status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStatus {
    Success,
    Failed,
}

/// Execution errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("No handler registered for job type: {0}")]
    HandlerMissing(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Execution failed: {0}")]
    Failed(String),
}

/// Task Executor trait
///
/// Called from worker threads: implementations must be `Send + Sync` and may
/// block for the duration of the job.
pub trait TaskExecutor: Send + Sync {
    /// Execute a job and return the result
    ///
    /// # Errors
    /// - `ExecutionError::HandlerMissing` if the job type is unknown
    /// - `ExecutionError::InvalidPayload` if the payload is malformed
    /// - `ExecutionError::Failed` for handler-reported failures
    fn execute(&self, job: &JobRecord) -> Result<ExecutionResult, ExecutionError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Mock executor behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Always succeed
        Success,
        /// Always fail with message
        Fail(String),
        /// Panic with message (for panic isolation testing)
        Panic(String),
    }

    /// Mock Task Executor for testing
    pub struct MockTaskExecutor {
        behavior: Mutex<MockBehavior>,
        executed: Mutex<Vec<i64>>,
    }

    impl MockTaskExecutor {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Mutex::new(behavior),
                executed: Mutex::new(Vec::new()),
            }
        }

        pub fn new_success() -> Self {
            Self::new(MockBehavior::Success)
        }

        pub fn new_fail(message: impl Into<String>) -> Self {
            Self::new(MockBehavior::Fail(message.into()))
        }

        pub fn new_panic_inducing(message: impl Into<String>) -> Self {
            Self::new(MockBehavior::Panic(message.into()))
        }

        pub fn call_count(&self) -> usize {
            self.executed.lock().unwrap().len()
        }

        /// Job ids in execution order
        pub fn executed_ids(&self) -> Vec<i64> {
            self.executed.lock().unwrap().clone()
        }
    }

    impl TaskExecutor for MockTaskExecutor {
        fn execute(&self, job: &JobRecord) -> Result<ExecutionResult, ExecutionError> {
            self.executed.lock().unwrap().push(job.id);

            let behavior = self.behavior.lock().unwrap().clone();
            match behavior {
                MockBehavior::Success => Ok(ExecutionResult {
                    status: ExecutionStatus::Success,
                    duration_ms: 1,
                }),
                MockBehavior::Fail(message) => Err(ExecutionError::Failed(message)),
                MockBehavior::Panic(message) => {
                    panic!("{}", message); // Actually panic for panic isolation testing
                }
            }
        }
    }
}
