//! Reference container shapes and structural checks.
//!
//! - [`sample_tree`]: `1 -> (2 -> (3, 4), 5)`, pre-order `1, 2, 3, 4, 5`.
//! - [`chain_tree`]: a single path of the given depth.
//! - [`assert_list_chain`]: forward and backward walks agree with `count`.

use quimera_alloc::SlotAllocator;
use quimera_containers::tree::NO_MAXIMUM_CHILDREN;
use quimera_containers::{List, NTree};
use quimera_core::{Cursor, IterationDirection, TraversalOrder};

/// Cursors into [`sample_tree`], named by the value they hold.
#[derive(Clone, Copy, Debug)]
pub struct SampleNodes {
    pub n1: Cursor,
    pub n2: Cursor,
    pub n3: Cursor,
    pub n4: Cursor,
    pub n5: Cursor,
}

/// Build `1 -> (2 -> (3, 4), 5)` with no child limit.
pub fn sample_tree() -> (NTree<i32>, SampleNodes) {
    let mut tree = NTree::new(NO_MAXIMUM_CHILDREN);
    let n1 = tree.set_root_value(1);
    let n2 = tree.add_child(n1, 2).expect("no child limit");
    let n3 = tree.add_child(n2, 3).expect("no child limit");
    let n4 = tree.add_child(n2, 4).expect("no child limit");
    let n5 = tree.add_child(n1, 5).expect("no child limit");
    (tree, SampleNodes { n1, n2, n3, n4, n5 })
}

/// Build a path `0 -> 1 -> ... -> depth - 1`, each node the only child of
/// the one before.
pub fn chain_tree(depth: usize) -> NTree<usize> {
    let mut tree = NTree::with_capacity(1, depth.max(1));
    if depth == 0 {
        return tree;
    }
    let mut node = tree.set_root_value(0);
    for value in 1..depth {
        node = tree.add_child(node, value).expect("one child per node");
    }
    tree
}

/// Pre-order values of `tree`.
pub fn pre_order<T: Clone, C, A: SlotAllocator<T>>(tree: &NTree<T, C, A>) -> Vec<T> {
    tree.iter(TraversalOrder::DepthFirstPreOrder)
        .cloned()
        .collect()
}

/// Walk `tree` backward with cursors from its pre-order last node.
pub fn pre_order_by_retreat<T: Clone, C, A: SlotAllocator<T>>(tree: &NTree<T, C, A>) -> Vec<T> {
    let mut out = Vec::new();
    let mut cursor = tree.last(TraversalOrder::DepthFirstPreOrder);
    while !cursor.is_end() {
        out.push(tree.get_at(cursor).clone());
        cursor = tree.retreat(cursor);
    }
    out
}

/// Check that walking `list` forward and backward with cursors visits
/// `count` elements in mirrored order, and return them in forward order.
pub fn assert_list_chain<T, C, A>(list: &List<T, C, A>) -> Vec<T>
where
    T: Clone + PartialEq + std::fmt::Debug,
    A: SlotAllocator<T>,
{
    let mut forward = Vec::new();
    let mut cursor = list.first();
    while !cursor.is_end() {
        forward.push(list.get_at(cursor).clone());
        cursor = list.advance(cursor);
    }
    assert!(cursor.is_end_in(IterationDirection::Forward));

    let mut backward = Vec::new();
    let mut cursor = list.last();
    while !cursor.is_end() {
        backward.push(list.get_at(cursor).clone());
        cursor = list.retreat(cursor);
    }
    if !list.is_empty() {
        assert!(cursor.is_end_in(IterationDirection::Backward));
    }

    assert_eq!(forward.len(), list.count());
    backward.reverse();
    assert_eq!(forward, backward);
    forward
}
