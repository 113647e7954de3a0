//! Core types and traits for the Quimera container family.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the allocator and the containers: the
//! two-severity contract mechanism, container identities, cursor
//! positions with their end sentinels, and the comparator capability.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod comparator;
pub mod contract;
pub mod error;
pub mod id;
pub mod position;

pub use comparator::{Comparator, DefaultComparator};
pub use contract::Severity;
pub use error::ContainerError;
pub use id::ContainerId;
pub use position::{Cursor, IterationDirection, Position, TraversalOrder};
