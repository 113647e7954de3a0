//! Criterion micro-benchmarks for list and tree operations.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use quimera_bench::{balanced_tree, churned_list, filled_list};
use quimera_core::TraversalOrder;

/// Benchmark: append 10K elements from capacity 1, through every growth step.
fn bench_list_add_10k(c: &mut Criterion) {
    c.bench_function("list_add_10k", |b| {
        b.iter(|| {
            let list = filled_list(10_000);
            black_box(list.count());
        });
    });
}

/// Benchmark: iterate 10K elements whose slots are out of chain order.
fn bench_list_iter_churned(c: &mut Criterion) {
    let list = churned_list(10_000);
    c.bench_function("list_iter_churned_10k", |b| {
        b.iter(|| {
            let total: u64 = list.iter().sum();
            black_box(total);
        });
    });
}

/// Benchmark: insert at the front then remove it, on a 1K list.
fn bench_list_insert_remove_front(c: &mut Criterion) {
    let mut list = filled_list(1_000);
    c.bench_function("list_insert_remove_front", |b| {
        b.iter(|| {
            let cursor = list.insert(7, list.first());
            let next = list.remove(cursor);
            black_box(next);
        });
    });
}

/// Benchmark: pre-order walk of a 4-ary tree of depth 6 (5461 nodes).
fn bench_tree_pre_order(c: &mut Criterion) {
    let tree = balanced_tree(4, 6);
    c.bench_function("tree_pre_order_5461", |b| {
        b.iter(|| {
            let total: u64 = tree.iter(TraversalOrder::DepthFirstPreOrder).sum();
            black_box(total);
        });
    });
}

/// Benchmark: reverse pre-order walk with cursors.
fn bench_tree_retreat(c: &mut Criterion) {
    let tree = balanced_tree(4, 6);
    c.bench_function("tree_retreat_5461", |b| {
        b.iter(|| {
            let mut cursor = tree.last(TraversalOrder::DepthFirstPreOrder);
            let mut visited = 0usize;
            while !cursor.is_end() {
                visited += 1;
                cursor = tree.retreat(cursor);
            }
            black_box(visited);
        });
    });
}

/// Benchmark: build then drop a whole subtree under the root.
fn bench_tree_remove_subtree(c: &mut Criterion) {
    c.bench_function("tree_remove_subtree", |b| {
        b.iter(|| {
            let mut tree = balanced_tree(4, 5);
            let first = tree.first_child(tree.root());
            black_box(tree.remove(first));
        });
    });
}

criterion_group!(
    benches,
    bench_list_add_10k,
    bench_list_iter_churned,
    bench_list_insert_remove_front,
    bench_tree_pre_order,
    bench_tree_retreat,
    bench_tree_remove_subtree
);
criterion_main!(benches);
