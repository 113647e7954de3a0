//! Pool-backed containers whose topology is stored as slot indices.
//!
//! Every container keeps its elements in a [`SlotAllocator`], a
//! [`PoolAllocator`] by default. The list and the tree pair it with a table
//! of topology records of the same length: record `i` describes the
//! element in slot `i`. Links between elements are slot indices, never
//! references, so growing the allocator moves nothing a container depends
//! on.
//!
//! # Architecture
//!
//! ```text
//! FixedArray<T, C, A>   A: SlotAllocator<T>           slots 0..n, fixed
//! List<T, C, A>         SlotArena<T, Link, A>         prev/next chain
//! NTree<T, C, A>        SlotArena<T, Node, A>         parent/sibling/child
//! ```
//!
//! Positions are handed out as detached [`Cursor`] tokens. A container
//! interprets its own cursors and rejects those minted by another
//! instance with a contract error.
//!
//! [`SlotAllocator`]: quimera_alloc::SlotAllocator
//! [`PoolAllocator`]: quimera_alloc::PoolAllocator
//! [`Cursor`]: quimera_core::Cursor

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod arena;
mod cursor;
pub mod fixed_array;
pub mod list;
pub mod tree;

pub use fixed_array::FixedArray;
pub use list::List;
pub use tree::NTree;
