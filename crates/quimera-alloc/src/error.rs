//! Allocator error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during pool operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// Every slot is occupied; the pool must be reallocated first.
    Exhausted {
        /// Number of slots in the pool.
        capacity: usize,
    },
    /// A pool geometry that cannot describe any slot layout.
    InvalidConfig {
        /// Why the configuration was rejected.
        reason: String,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { capacity } => {
                write!(f, "pool exhausted: all {capacity} slots are occupied")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid pool configuration: {reason}"),
        }
    }
}

impl Error for AllocError {}
