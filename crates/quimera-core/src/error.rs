//! Errors surfaced as values by container operations.
//!
//! Most misuse is reported through the contract macros. The variants here
//! cover the operations that hand the failure back to the caller instead:
//! the `try_*` accessors and child insertion under a fan-out limit.

use std::error::Error;
use std::fmt;

use crate::id::ContainerId;

/// Errors returned by fallible container operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerError {
    /// A tree node already has its maximum number of children.
    ChildLimitReached {
        /// The tree's per-node child limit.
        max_children: usize,
    },
    /// An ordinal index past the element count.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of live elements.
        count: usize,
    },
    /// The cursor is at an end sentinel and has no element.
    EndPosition,
    /// The cursor was produced by a different container.
    ForeignCursor {
        /// The container the cursor was used with.
        expected: ContainerId,
        /// The container that produced the cursor.
        found: ContainerId,
    },
    /// The cursor's slot holds no element (removed, or never allocated).
    VacantSlot {
        /// The slot index.
        slot: usize,
    },
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChildLimitReached { max_children } => {
                write!(f, "node already has the maximum of {max_children} children")
            }
            Self::IndexOutOfBounds { index, count } => {
                write!(f, "index {index} out of bounds for {count} elements")
            }
            Self::EndPosition => write!(f, "cursor is at an end position"),
            Self::ForeignCursor { expected, found } => {
                write!(
                    f,
                    "cursor belongs to container {found}, not container {expected}"
                )
            }
            Self::VacantSlot { slot } => write!(f, "slot {slot} holds no element"),
        }
    }
}

impl Error for ContainerError {}
