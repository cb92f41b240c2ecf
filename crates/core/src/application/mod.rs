// Application Layer - Engine services

pub mod cache;
pub mod feeder;
pub mod worker;

// Re-exports
pub use cache::JobCache;
pub use feeder::Feeder;
pub use worker::{Worker, WorkerPool};
