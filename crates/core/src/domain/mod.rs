// Domain Layer - Pure entities and value objects

pub mod config;
pub mod error;
pub mod job;
pub mod metajob;
pub mod threshold;

// Re-exports
pub use config::CacheConfig;
pub use error::DomainError;
pub use job::{JobId, JobPayload, JobRecord, JobType, Priority, QueueId};
pub use metajob::{Metajob, SortKey};
pub use threshold::Threshold;
