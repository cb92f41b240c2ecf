// Granary Core - Job cache, workers, and ports
// No I/O in this crate; the durable store sits behind the JobSource port

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
