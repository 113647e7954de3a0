//! Pooled slot allocation for the Quimera containers.
//!
//! A [`PoolAllocator`] owns one contiguous run of fixed-stride slots and
//! hands them out by index. Containers store their topology as slot
//! indices, so growth through [`PoolAllocator::reallocate`] never
//! invalidates anything a container keeps: slot `i` stays slot `i`.
//!
//! # Architecture
//!
//! ```text
//! PoolConfig ──► PoolAllocator<T>
//!                  ├── slots: Vec<Slot<T>>   (occupied value | vacant link)
//!                  └── free chain            (head pops, tail grows)
//! ```
//!
//! Containers are written against the [`SlotAllocator`] trait and use
//! [`PoolAllocator`] unless told otherwise.
//!
//! Vacant slots thread an intrusive free chain through the slot array.
//! A fresh or cleared pool hands out slots in ascending order; a released
//! slot is reused first; slots added by growth are handed out last.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod alignment;
pub mod config;
pub mod error;
pub mod pool;
pub mod traits;

pub use alignment::Alignment;
pub use config::PoolConfig;
pub use error::AllocError;
pub use pool::PoolAllocator;
pub use traits::SlotAllocator;
