//! Borrowing and owning iterators over a [`List`](super::List).

use std::iter::FusedIterator;

use quimera_alloc::{PoolAllocator, SlotAllocator};

use super::link::Link;
use super::List;
use crate::arena::SlotArena;

/// Iterator over `&T` in chain order.
pub struct Iter<'a, T, A = PoolAllocator<T>> {
    arena: &'a SlotArena<T, Link, A>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T, A: SlotAllocator<T>> Iter<'a, T, A> {
    pub(super) fn new(
        arena: &'a SlotArena<T, Link, A>,
        front: Option<usize>,
        back: Option<usize>,
        remaining: usize,
    ) -> Self {
        Self {
            arena,
            front,
            back,
            remaining,
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
        self.front = self.arena.record(slot).next;
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
        self.back = self.arena.record(slot).prev;
        Some(self.arena.value(slot))
    }
}

impl<T, A: SlotAllocator<T>> ExactSizeIterator for Iter<'_, T, A> {}
impl<T, A: SlotAllocator<T>> FusedIterator for Iter<'_, T, A> {}

impl<T, A> Clone for Iter<'_, T, A> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// Iterator over `&mut T` in chain order.
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
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator, yielding the elements in chain order.
pub struct IntoIter<T> {
    inner: std::vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<'a, T, C, A: SlotAllocator<T>> IntoIterator for &'a List<T, C, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Iter<'a, T, A> {
        self.iter()
    }
}

impl<'a, T, C, A: SlotAllocator<T>> IntoIterator for &'a mut List<T, C, A> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T, C, A: SlotAllocator<T>> IntoIterator for List<T, C, A> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let mut values = Vec::with_capacity(self.count());
        let mut next = self.first;
        while let Some(slot) = next {
            next = self.arena.record(slot).next;
            values.push(self.arena.release(slot));
        }
        IntoIter {
            inner: values.into_iter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_is_exact_and_double_ended() {
        let list: List<i32> = (1..=5).collect();
        let mut it = list.iter();
        assert_eq!(it.len(), 5);
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&5));
        assert_eq!(it.len(), 3);
        let middle: Vec<_> = it.collect();
        assert_eq!(middle, vec![&2, &3, &4]);
    }

    #[test]
    fn front_and_back_meet_once() {
        let list: List<i32> = (1..=2).collect();
        let mut it = list.iter();
        assert_eq!(it.next_back(), Some(&2));
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn for_loop_over_references() {
        let mut list: List<i32> = (1..=3).collect();
        for v in &mut list {
            *v *= 2;
        }
        let total: i32 = (&list).into_iter().sum();
        assert_eq!(total, 12);
    }
}
