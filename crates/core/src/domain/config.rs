// Cache Configuration

use crate::domain::error::{DomainError, Result};
use crate::domain::threshold::Threshold;

/// Bounds and worker threshold labels for one queue's job cache
///
/// `priorities` only labels the worker slots a pool will spawn; `shift`
/// itself accepts any threshold. Immutable once the cache is built.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub maximum_size: i64,
    pub minimum_size: i64,
    pub priorities: Vec<Threshold>,
}

impl CacheConfig {
    pub fn new(maximum_size: i64, minimum_size: i64, priorities: Vec<Threshold>) -> Self {
        Self {
            maximum_size,
            minimum_size,
            priorities,
        }
    }

    /// Check the size bounds
    pub fn validate(&self) -> Result<()> {
        if self.maximum_size <= 0 {
            return Err(DomainError::MaximumSizeTooSmall);
        }
        if self.minimum_size < 0 {
            return Err(DomainError::MinimumSizeNegative);
        }
        if self.minimum_size > self.maximum_size {
            return Err(DomainError::MinimumAboveMaximum {
                minimum: self.minimum_size,
                maximum: self.maximum_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bounds_pass() {
        assert!(CacheConfig::new(8, 0, vec![]).validate().is_ok());
        assert!(CacheConfig::new(1, 1, vec![Threshold::Any]).validate().is_ok());
    }

    #[test]
    fn test_zero_or_negative_maximum_rejected() {
        let err = CacheConfig::new(0, 0, vec![]).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "maximum_size for a JobCache must be greater than zero!"
        );

        assert!(CacheConfig::new(-4, 0, vec![]).validate().is_err());
    }

    #[test]
    fn test_negative_minimum_rejected() {
        let err = CacheConfig::new(8, -1, vec![]).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "minimum_size for a JobCache must be at least zero!"
        );
    }

    #[test]
    fn test_minimum_above_maximum_rejected() {
        let err = CacheConfig::new(5, 7, vec![]).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "minimum queue size (7) is greater than the maximum queue size (5)!"
        );
    }
}
