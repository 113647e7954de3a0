//! Quimera: pool-backed containers with stable slot indices.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Quimera sub-crates. For most users, adding `quimera` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use quimera::prelude::*;
//!
//! // A list that starts with room for two elements and grows on demand.
//! let mut list = List::with_capacity(2);
//! for v in [1, 2, 3] {
//!     list.add(v);
//! }
//! assert_eq!(list.count(), 3);
//! assert_eq!(*list.get(2), 3);
//!
//! // A tree where every node holds at most two children.
//! let mut tree = NTree::new(2);
//! let root = tree.set_root_value("root");
//! let left = tree.add_child(root, "left").unwrap();
//! tree.add_child(left, "leaf").unwrap();
//! tree.add_child(root, "right").unwrap();
//! assert_eq!(tree.children_count(root), tree.max_children());
//!
//! let order: Vec<_> = tree.iter(TraversalOrder::DepthFirstPreOrder).copied().collect();
//! assert_eq!(order, ["root", "left", "leaf", "right"]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `quimera-core` | Cursors, positions, comparators, contracts, errors |
//! | [`alloc`] | `quimera-alloc` | Slot allocator trait, pool allocator and its geometry |
//! | [`containers`] | `quimera-containers` | Fixed array, list and tree |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core vocabulary (`quimera-core`).
///
/// Contains [`types::Cursor`] and its [`types::Position`], the
/// [`types::Comparator`] trait, the contract macros and
/// [`types::ContainerError`].
pub use quimera_core as types;

/// Pooled slot allocation (`quimera-alloc`).
///
/// [`alloc::PoolAllocator`] hands out fixed-stride slots by index and
/// grows without moving them. Containers accept any
/// [`alloc::SlotAllocator`] in its place.
pub use quimera_alloc as alloc;

/// Containers (`quimera-containers`).
///
/// [`containers::FixedArray`], [`containers::List`] and
/// [`containers::NTree`].
pub use quimera_containers as containers;

/// Common imports for typical Quimera usage.
///
/// ```rust
/// use quimera::prelude::*;
/// ```
pub mod prelude {
    // Containers
    pub use quimera_containers::tree::NO_MAXIMUM_CHILDREN;
    pub use quimera_containers::{FixedArray, List, NTree};

    // Cursors and ordering
    pub use quimera_core::{
        Comparator, Cursor, DefaultComparator, IterationDirection, Position, TraversalOrder,
    };

    // Errors
    pub use quimera_alloc::AllocError;
    pub use quimera_core::ContainerError;

    // Allocation
    pub use quimera_alloc::{PoolAllocator, PoolConfig, SlotAllocator};
}
