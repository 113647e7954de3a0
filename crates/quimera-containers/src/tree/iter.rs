//! Depth-first pre-order traversal.
//!
//! Forward: first child, else next sibling, else the next sibling of the
//! nearest ancestor that has one, else done. Backward: the deepest last
//! descendant of the previous sibling, else the parent, else done.
//! Both directions walk the parent and sibling links, with no stack.

use std::iter::FusedIterator;

use quimera_alloc::{PoolAllocator, SlotAllocator};

use super::node::Node;
use crate::arena::SlotArena;

/// Slots of the children of `slot`, first to last.
pub(super) fn children<T, A: SlotAllocator<T>>(
    arena: &SlotArena<T, Node, A>,
    slot: usize,
) -> impl Iterator<Item = usize> + '_ {
    std::iter::successors(arena.record(slot).first_child, move |&child| {
        arena.record(child).next
    })
}

/// The last node of `slot`'s subtree in pre-order.
pub(super) fn deepest_last<T, A: SlotAllocator<T>>(
    arena: &SlotArena<T, Node, A>,
    mut slot: usize,
) -> usize {
    while let Some(last) = children(arena, slot).last() {
        slot = last;
    }
    slot
}

pub(super) fn pre_order_next<T, A: SlotAllocator<T>>(
    arena: &SlotArena<T, Node, A>,
    slot: usize,
) -> Option<usize> {
    let node = arena.record(slot);
    if node.first_child.is_some() {
        return node.first_child;
    }
    let mut current = node;
    loop {
        if current.next.is_some() {
            return current.next;
        }
        current = arena.record(current.parent?);
    }
}

pub(super) fn pre_order_prev<T, A: SlotAllocator<T>>(
    arena: &SlotArena<T, Node, A>,
    slot: usize,
) -> Option<usize> {
    let node = arena.record(slot);
    match node.prev {
        Some(prev) => Some(deepest_last(arena, prev)),
        None => node.parent,
    }
}

/// Iterator over `&T` in depth-first pre-order.
pub struct Iter<'a, T, A = PoolAllocator<T>> {
    arena: &'a SlotArena<T, Node, A>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T, A: SlotAllocator<T>> Iter<'a, T, A> {
    pub(super) fn new(arena: &'a SlotArena<T, Node, A>, root: Option<usize>) -> Self {
        Self {
            arena,
            front: root,
            back: root.map(|r| deepest_last(arena, r)),
            remaining: arena.count(),
        }
    }
}

impl<'a, T, A: SlotAllocator<T>> Iterator for Iter<'a, T, A> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.front?;
        self.remaining -= 1;
        self.front = pre_order_next(self.arena, slot);
        Some(self.arena.value(slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, A: SlotAllocator<T>> DoubleEndedIterator for Iter<'_, T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let slot = self.back?;
        self.remaining -= 1;
        self.back = pre_order_prev(self.arena, slot);
        Some(self.arena.value(slot))
    }
}

impl<T, A: SlotAllocator<T>> ExactSizeIterator for Iter<'_, T, A> {}
impl<T, A: SlotAllocator<T>> FusedIterator for Iter<'_, T, A> {}

/// Iterator over `&mut T` in depth-first pre-order.
pub struct IterMut<'a, T> {
    inner: std::vec::IntoIter<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(values: Vec<&'a mut T>) -> Self {
        Self {
            inner: values.into_iter(),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
