//! Benchmark workloads for the Quimera containers.
//!
//! Provides deterministic container builders for benchmarks:
//!
//! - [`filled_list`]: a list of `n` integers grown from capacity 1
//! - [`balanced_tree`]: a complete tree of the given fan-out and depth
//! - [`churned_list`]: a list whose free chain has been scrambled by removals

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use quimera_containers::{List, NTree};
use quimera_core::Cursor;

/// A list holding `0..n`, grown one element at a time from capacity 1.
pub fn filled_list(n: usize) -> List<u64> {
    let mut list = List::with_capacity(1);
    for v in 0..n as u64 {
        list.add(v);
    }
    list
}

/// A list of `n` elements after removing every third one and refilling,
/// so that chain order and slot order no longer agree.
pub fn churned_list(n: usize) -> List<u64> {
    let mut list = filled_list(n);
    let mut index = 0;
    while index < list.count() {
        list.remove_at(index);
        index += 2;
    }
    while list.count() < n {
        list.add(list.count() as u64);
    }
    list
}

/// A complete tree where every inner node has `fan_out` children and
/// leaves sit at `depth` (the root alone is depth 0). Values are
/// pre-order ranks.
pub fn balanced_tree(fan_out: usize, depth: usize) -> NTree<u64> {
    let mut tree = NTree::new(fan_out.max(1));
    let mut next = 0u64;
    let root = tree.set_root_value(next);
    let mut frontier: Vec<Cursor> = vec![root];
    for _ in 0..depth {
        let mut children = Vec::with_capacity(frontier.len() * fan_out);
        for parent in frontier {
            for _ in 0..fan_out {
                next += 1;
                let child = tree
                    .add_child(parent, next)
                    .expect("fan-out never exceeds the child limit");
                children.push(child);
            }
        }
        frontier = children;
    }
    tree
}

/// Number of nodes in [`balanced_tree`]`(fan_out, depth)`.
pub fn balanced_tree_size(fan_out: usize, depth: usize) -> usize {
    (0..=depth).map(|level| fan_out.pow(level as u32)).sum()
}
