//! Integration test: the reference list and tree scenarios.
//!
//! Each test drives a container through the public API only, the way a
//! caller would, and checks ordinal contents and cursor results.

use quimera_alloc::SlotAllocator;
use quimera_containers::tree::NO_MAXIMUM_CHILDREN;
use quimera_containers::{FixedArray, List, NTree};
use quimera_core::{ContainerError, DefaultComparator, TraversalOrder};
use quimera_test_utils::fixtures::{
    assert_list_chain, chain_tree, pre_order, pre_order_by_retreat, sample_tree,
};
use quimera_test_utils::{
    CaseInsensitive, CountingAllocator, CountingComparator, DropCounter, Modulo,
};

// ── List ─────────────────────────────────────────────────────────────

#[test]
fn list_grows_past_initial_capacity() {
    let mut list = List::with_capacity(2);
    list.add(1);
    list.add(2);
    assert_eq!(list.capacity(), 2);
    list.add(3);

    assert_eq!(list.count(), 3);
    assert!(list.capacity() >= 3);
    assert_eq!(*list.get(0), 1);
    assert_eq!(*list.get(1), 2);
    assert_eq!(*list.get(2), 3);
}

#[test]
fn list_remove_middle_returns_follower() {
    let mut list = List::from_slice(&[1, 2, 3]);
    let next = list.remove(list.cursor_at(1));

    assert_eq!(assert_list_chain(&list), vec![1, 3]);
    assert_eq!(*list.get_at(next), 3);
}

#[test]
fn list_slots_are_reused_after_removal() {
    let mut list = List::with_capacity(4);
    for v in 0..4 {
        list.add(v);
    }
    list.remove_at(1);
    list.remove_at(1);
    list.add(10);
    list.add(11);

    assert_eq!(list.capacity(), 4);
    assert_eq!(assert_list_chain(&list), vec![0, 3, 10, 11]);
}

#[test]
fn list_with_custom_comparator() {
    let mut list = List::with_comparator(4, CaseInsensitive);
    list.add(String::from("Alpha"));
    list.add(String::from("beta"));

    assert!(list.contains(&String::from("BETA")));
    assert_eq!(list.index_of(&String::from("alpha")), Some(0));
    assert_eq!(list.index_of(&String::from("gamma")), None);
}

#[test]
fn list_with_modulo_comparator() {
    let mut list = List::with_comparator(2, Modulo { modulus: 5 });
    list.extend([3i64, 11, -2]);

    assert_eq!(list.index_of(&8), Some(0));
    assert_eq!(list.index_of_from(&8, 1), Some(2));
    assert_eq!(list.index_of(&6), Some(1));
    assert!(!list.contains(&10));
}

#[test]
fn list_equality_skips_comparisons_on_count_mismatch() {
    let comparator = CountingComparator::new();
    let mut short = List::with_comparator(2, comparator.clone());
    let mut long = List::with_comparator(2, comparator.clone());
    short.extend([1, 2]);
    long.extend([1, 2, 3]);

    assert!(short != long);
    assert_eq!(comparator.calls(), 0);

    long.remove(long.last());
    assert!(short == long);
    assert_eq!(comparator.calls(), 2);
}

#[test]
fn list_over_a_counting_allocator() {
    let allocator = CountingAllocator::with_slots(2);
    let mut list = List::with_allocator(allocator, DefaultComparator);
    for v in 0..5 {
        list.add(v);
    }
    list.remove_at(0);

    assert_eq!(assert_list_chain(&list), vec![1, 2, 3, 4]);
    assert_eq!(list.allocator().allocations(), 5);
    assert_eq!(list.allocator().releases(), 1);
    // 2 -> 4 -> 7 slots.
    assert_eq!(list.allocator().growths(), 2);
    assert_eq!(list.capacity(), 7);
}

#[test]
fn list_drops_every_element_once() {
    let counter = DropCounter::new();
    let mut list = List::with_capacity(1);
    for v in 0..8 {
        list.add(counter.track(v));
    }
    list.remove_range_at(2, 4);
    assert_eq!(counter.dropped(), 3);
    drop(list);
    assert_eq!(counter.dropped(), 8);
}

// ── Fixed array ──────────────────────────────────────────────────────

#[test]
fn fixed_array_walks_both_ways() {
    let array = FixedArray::from_slice(&[1, 2, 3]);
    let forward: Vec<i32> = array.iter().copied().collect();
    let backward: Vec<i32> = array.iter().rev().copied().collect();
    assert_eq!(forward, vec![1, 2, 3]);
    assert_eq!(backward, vec![3, 2, 1]);
    assert!(array.advance(array.last()).is_end());
}

#[test]
fn fixed_array_with_modulo_comparator() {
    let array = FixedArray::with_comparator(3, 1i64, Modulo { modulus: 3 });
    let same = FixedArray::with_comparator(3, 4i64, Modulo { modulus: 3 });

    assert_eq!(array.index_of(&7), Some(0));
    assert_eq!(array.index_of(&8), None);
    assert!(array == same);
}

#[test]
fn fixed_array_over_a_counting_allocator() {
    let allocator = CountingAllocator::with_slots(3);
    let array = FixedArray::with_allocator(3, 'x', allocator, DefaultComparator);

    assert_eq!(array.count(), 3);
    assert_eq!(array.allocator().allocations(), 3);
    assert_eq!(array.allocator().growths(), 0);
}

// ── Tree ─────────────────────────────────────────────────────────────

#[cfg(not(feature = "strict-contracts"))]
#[test]
fn tree_rejects_child_past_limit() {
    let mut tree = NTree::new(2);
    let root = tree.set_root_value(1);
    tree.add_child(root, 2).unwrap();
    tree.add_child(root, 3).unwrap();
    let rejected = tree.add_child(root, 4);

    assert_eq!(
        rejected,
        Err(ContainerError::ChildLimitReached { max_children: 2 })
    );
    assert_eq!(tree.children_count(root), 2);
    assert_eq!(tree.count(), 3);
}

#[test]
fn tree_pre_order_forward_and_backward() {
    let (tree, _) = sample_tree();
    assert_eq!(pre_order(&tree), vec![1, 2, 3, 4, 5]);
    assert_eq!(pre_order_by_retreat(&tree), vec![5, 4, 3, 2, 1]);
}

#[test]
fn tree_remove_drops_subtree() {
    let (mut tree, nodes) = sample_tree();
    assert_eq!(tree.remove(nodes.n2), 3);

    assert_eq!(pre_order(&tree), vec![1, 5]);
    assert_eq!(tree.count(), 2);
    assert!(!tree.is_valid(nodes.n2));
    assert!(!tree.is_valid(nodes.n3));
    assert!(!tree.is_valid(nodes.n4));
    assert!(tree.is_valid(nodes.n5));
}

#[test]
fn tree_with_modulo_comparator() {
    let modulo = Modulo { modulus: 3 };
    let mut a = NTree::with_comparator(2, 1, modulo);
    let root = a.set_root_value(1i64);
    a.add_child(root, 2).unwrap();
    let mut b = NTree::with_comparator(2, 1, modulo);
    let root = b.set_root_value(4i64);
    b.add_child(root, 5).unwrap();

    assert!(a == b);
    assert!(a.contains(&8));
    assert_eq!(*a.get_at(a.position_of(&-2)), 1);
    assert!(a.position_of(&3).is_end());
}

#[test]
fn deep_chain_walks_back_and_removes_below_root() {
    const DEPTH: usize = 100_000;
    let mut tree = chain_tree(DEPTH);

    let back = pre_order_by_retreat(&tree);
    assert_eq!(back.len(), DEPTH);
    assert_eq!(back.first(), Some(&(DEPTH - 1)));
    assert_eq!(back.last(), Some(&0));

    let below_root = tree.first_child(tree.root());
    assert_eq!(tree.remove(below_root), DEPTH - 1);
    assert_eq!(tree.count(), 1);
    assert_eq!(pre_order(&tree), vec![0]);
}

#[test]
fn tree_over_a_counting_allocator() {
    let allocator = CountingAllocator::with_slots(8);
    let mut tree = NTree::with_allocator(NO_MAXIMUM_CHILDREN, allocator, DefaultComparator);
    let root = tree.set_root_value(1);
    let a = tree.add_child(root, 2).unwrap();
    tree.add_child(a, 3).unwrap();
    tree.add_child(root, 4).unwrap();
    tree.remove(a);

    assert_eq!(pre_order(&tree), vec![1, 4]);
    assert_eq!(tree.allocator().allocations(), 4);
    assert_eq!(tree.allocator().releases(), 2);
    assert_eq!(tree.allocator().growths(), 0);
}

#[test]
fn tree_slots_are_reused_after_subtree_removal() {
    let (mut tree, nodes) = sample_tree();
    let capacity = tree.capacity();
    tree.remove(nodes.n2);
    let n6 = tree.add_child(nodes.n5, 6).unwrap();
    tree.add_child(n6, 7).unwrap();
    tree.add_child(n6, 8).unwrap();

    assert_eq!(tree.capacity(), capacity);
    assert_eq!(pre_order(&tree), vec![1, 5, 6, 7, 8]);
}

#[test]
fn tree_removal_drops_each_node_once() {
    let counter = DropCounter::new();
    let mut tree = NTree::new(NO_MAXIMUM_CHILDREN);
    let root = tree.set_root_value(counter.track(0));
    let a = tree.add_child(root, counter.track(1)).unwrap();
    tree.add_child(a, counter.track(2)).unwrap();
    tree.add_child(a, counter.track(3)).unwrap();
    tree.add_child(root, counter.track(4)).unwrap();

    tree.remove(a);
    assert_eq!(counter.dropped(), 3);
    let left: Vec<i32> = tree
        .iter(TraversalOrder::DepthFirstPreOrder)
        .map(|t| t.value)
        .collect();
    assert_eq!(left, vec![0, 4]);
    drop(tree);
    assert_eq!(counter.dropped(), 5);
}
