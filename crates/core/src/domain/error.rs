// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("maximum_size for a JobCache must be greater than zero!")]
    MaximumSizeTooSmall,

    #[error("minimum_size for a JobCache must be at least zero!")]
    MinimumSizeNegative,

    #[error("minimum queue size ({minimum}) is greater than the maximum queue size ({maximum})!")]
    MinimumAboveMaximum { minimum: i64, maximum: i64 },
}

pub type Result<T> = std::result::Result<T, DomainError>;
