// Priority threshold for consumers

use crate::domain::job::Priority;
use std::cmp::Ordering;
use std::fmt;

/// Upper bound (exclusive) on the job priority a consumer will take
///
/// `Any` accepts every priority and sorts above every bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Threshold {
    Bounded(Priority),
    Any,
}

impl Threshold {
    /// Whether a job with this priority satisfies the threshold
    pub fn admits(&self, priority: Priority) -> bool {
        match self {
            Threshold::Bounded(bound) => priority < *bound,
            Threshold::Any => true,
        }
    }
}

impl PartialOrd for Threshold {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Threshold {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Threshold::Bounded(a), Threshold::Bounded(b)) => a.cmp(b),
            (Threshold::Bounded(_), Threshold::Any) => Ordering::Less,
            (Threshold::Any, Threshold::Bounded(_)) => Ordering::Greater,
            (Threshold::Any, Threshold::Any) => Ordering::Equal,
        }
    }
}

impl From<Priority> for Threshold {
    fn from(bound: Priority) -> Self {
        Threshold::Bounded(bound)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Bounded(bound) => write!(f, "{}", bound),
            Threshold::Any => write!(f, "any"),
        }
    }
}
