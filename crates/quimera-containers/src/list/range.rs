//! Inclusive range operations on [`List`].
//!
//! Every range is `[first, last]`, both ends included, and is decomposed
//! into single-element operations.

use std::cmp::Ordering;

use quimera_alloc::SlotAllocator;
use quimera_core::{contract_error, contract_warning, Cursor, Position};

use super::List;
use crate::cursor::check_owner;

impl<T, C, A: SlotAllocator<T>> List<T, C, A> {
    /// Slots from `first` to `last` inclusive, in chain order.
    fn span(&self, first: Cursor, last: Cursor) -> Vec<usize> {
        let first_slot = self.live_slot(first);
        let last_slot = self.live_slot(last);
        contract_error!(
            self.compare_cursors(first, last) != Ordering::Greater,
            "the first element must be prior to the last element in the range"
        );
        let mut slots = Vec::new();
        for slot in self.slots_from(first_slot) {
            slots.push(slot);
            if slot == last_slot {
                break;
            }
        }
        slots
    }

    /// Slots at ordinals `first..=last`.
    fn span_at(&self, first: usize, last: usize) -> Vec<usize> {
        contract_error!(
            first <= last,
            "the first element must be prior to the last element in the range"
        );
        contract_error!(
            last < self.count(),
            "the last position ({last}) is out of bounds for {} elements",
            self.count()
        );
        self.slots().skip(first).take(last - first + 1).collect()
    }

    /// Remove `[first, last]` and return a cursor to the element that
    /// followed `last`, or the forward end.
    pub fn remove_range(&mut self, first: Cursor, last: Cursor) -> Cursor {
        let slots = self.span(first, last);
        self.remove_slots(&slots)
    }

    /// Remove the elements at ordinals `first..=last`.
    pub fn remove_range_at(&mut self, first: usize, last: usize) {
        let slots = self.span_at(first, last);
        self.remove_slots(&slots);
    }

    fn remove_slots(&mut self, slots: &[usize]) -> Cursor {
        let mut next = None;
        for &slot in slots {
            next = self.unlink(slot);
            self.arena.release(slot);
        }
        self.cursor(Position::from_slot(next, Position::ForwardEnd))
    }
}

impl<T: Clone, C, A: SlotAllocator<T>> List<T, C, A> {
    /// A new list holding copies of `[first, last]`.
    pub fn range(&self, first: Cursor, last: Cursor) -> List<T, C, A>
    where
        C: Clone,
    {
        let slots = self.span(first, last);
        self.copy_slots(&slots)
    }

    /// A new list holding copies of the elements at ordinals `first..=last`.
    pub fn range_at(&self, first: usize, last: usize) -> List<T, C, A>
    where
        C: Clone,
    {
        let slots = self.span_at(first, last);
        self.copy_slots(&slots)
    }

    fn copy_slots(&self, slots: &[usize]) -> List<T, C, A>
    where
        C: Clone,
    {
        let allocator = A::with_slots(slots.len().max(1));
        let mut out = List::with_allocator(allocator, self.comparator.clone());
        for &slot in slots {
            out.add(self.arena.value(slot).clone());
        }
        out
    }

    /// Append copies of `source`'s `[first, last]`.
    ///
    /// To copy a range of this same list, take it with
    /// [`range`](Self::range) first.
    pub fn add_range<C2, A2: SlotAllocator<T>>(
        &mut self,
        source: &List<T, C2, A2>,
        first: Cursor,
        last: Cursor,
    ) {
        for slot in source.span(first, last) {
            self.add(source.arena.value(slot).clone());
        }
    }

    /// Insert copies of `source`'s `[first, last]` so that the first copy
    /// lands at ordinal `index`. An index past the last element is a
    /// contract warning and appends.
    pub fn insert_range<C2, A2: SlotAllocator<T>>(
        &mut self,
        source: &List<T, C2, A2>,
        first: Cursor,
        last: Cursor,
        index: usize,
    ) {
        contract_warning!(
            index < self.count(),
            "index {index} is out of bounds for {} elements, appending",
            self.count()
        );
        let before = self.slots().nth(index);
        for slot in source.span(first, last) {
            self.link_before(source.arena.value(slot).clone(), before);
        }
    }

    /// Insert copies of `source`'s `[first, last]` before the element at
    /// `position`, with the same end handling as [`insert`](Self::insert).
    pub fn insert_range_before<C2, A2: SlotAllocator<T>>(
        &mut self,
        source: &List<T, C2, A2>,
        first: Cursor,
        last: Cursor,
        position: Cursor,
    ) {
        check_owner(self.id, position);
        contract_warning!(
            !position.is_end(),
            "the cursor is out of bounds, inserting at {}",
            position.position()
        );
        let before = match position.position() {
            Position::Index(slot) => {
                self.check_live(slot);
                Some(slot)
            }
            Position::ForwardEnd => None,
            Position::BackwardEnd => self.first,
        };
        for slot in source.span(first, last) {
            self.link_before(source.arena.value(slot).clone(), before);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(list: &List<i32>) -> Vec<i32> {
        list.iter().copied().collect()
    }

    #[test]
    fn range_copies_inclusive() {
        let l = List::from_slice(&[1, 2, 3, 4, 5]);
        let r = l.range(l.cursor_at(1), l.cursor_at(3));
        assert_eq!(values(&r), vec![2, 3, 4]);
        assert_ne!(r.id(), l.id());
        let single = l.range_at(4, 4);
        assert_eq!(values(&single), vec![5]);
    }

    #[test]
    #[should_panic(expected = "must be prior to the last element")]
    fn reversed_range_is_an_error() {
        let l = List::from_slice(&[1, 2, 3]);
        let _ = l.range(l.cursor_at(2), l.cursor_at(0));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn range_at_past_end_is_an_error() {
        let l = List::from_slice(&[1, 2, 3]);
        let _ = l.range_at(1, 3);
    }

    #[test]
    fn add_range_appends_copies() {
        let source = List::from_slice(&[7, 8, 9]);
        let mut l = List::from_slice(&[1]);
        l.add_range(&source, source.cursor_at(1), source.last());
        assert_eq!(values(&l), vec![1, 8, 9]);
        assert_eq!(values(&source), vec![7, 8, 9]);
    }

    #[test]
    fn insert_range_keeps_order() {
        let source = List::from_slice(&[7, 8, 9]);
        let mut l = List::from_slice(&[1, 2]);
        l.insert_range(&source, source.first(), source.last(), 1);
        assert_eq!(values(&l), vec![1, 7, 8, 9, 2]);
        l.insert_range_before(&source, source.first(), source.first(), l.first());
        assert_eq!(values(&l), vec![7, 1, 7, 8, 9, 2]);
    }

    #[cfg(not(feature = "strict-contracts"))]
    #[test]
    fn insert_range_past_end_appends() {
        let source = List::from_slice(&[7, 8]);
        let mut l = List::from_slice(&[1]);
        l.insert_range(&source, source.first(), source.last(), 5);
        assert_eq!(values(&l), vec![1, 7, 8]);
        let end = l.advance(l.last());
        l.insert_range_before(&source, source.last(), source.last(), end);
        assert_eq!(values(&l), vec![1, 7, 8, 8]);
    }

    #[test]
    fn remove_range_returns_follower() {
        let mut l = List::from_slice(&[1, 2, 3, 4, 5]);
        let next = l.remove_range(l.cursor_at(1), l.cursor_at(2));
        assert_eq!(values(&l), vec![1, 4, 5]);
        assert_eq!(*l.get_at(next), 4);
        let next = l.remove_range(l.cursor_at(1), l.last());
        assert!(next.is_end());
        assert_eq!(values(&l), vec![1]);
    }

    #[test]
    fn remove_range_at_whole_list() {
        let mut l = List::from_slice(&[1, 2, 3]);
        l.remove_range_at(0, 2);
        assert!(l.is_empty());
        assert_eq!(l.count(), 0);
    }
}
