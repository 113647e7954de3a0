//! Doubly linked list over an index-addressed arena.
//!
//! Elements live in an allocator and their [`Link`] records in a table
//! of equal length; link `i` describes element `i`. The physical slot of
//! an element says nothing about its ordinal position, so ordinal access
//! walks the chain from the first element and is O(n).

mod iter;
mod link;
mod range;

use std::cmp::Ordering;
use std::fmt;
use std::iter::successors;
use std::ops::{Index, IndexMut};

use quimera_alloc::{PoolAllocator, PoolConfig, SlotAllocator};
use quimera_core::{
    contract_error, contract_warning, Comparator, ContainerError, ContainerId, Cursor,
    DefaultComparator, IterationDirection, Position,
};

use crate::arena::SlotArena;
use crate::cursor::{check_owner, element_slot, try_element_slot};
pub use iter::{IntoIter, Iter, IterMut};
use link::Link;

/// A doubly linked list whose nodes are slots of a pooled arena.
///
/// Positions are handed out as detached [`Cursor`]s; pass them back to the
/// list that produced them. A removed element's slot is reused by the next
/// insertion, so a cursor kept across a removal may come to designate a
/// different element. [`is_valid`](Self::is_valid) only tells whether the
/// slot is live.
///
/// Growth happens by [`PoolConfig::REALLOCATION_FACTOR`] when an insertion
/// finds every slot taken, and never changes the slot of a live element.
///
/// Elements are stored in an `A` allocator, a [`PoolAllocator`] unless
/// the list is built with [`with_allocator`](Self::with_allocator).
pub struct List<T, C = DefaultComparator, A = PoolAllocator<T>> {
    arena: SlotArena<T, Link, A>,
    first: Option<usize>,
    last: Option<usize>,
    id: ContainerId,
    comparator: C,
}

impl<T> List<T> {
    /// An empty list with [`PoolConfig::DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(PoolConfig::DEFAULT_CAPACITY)
    }

    /// An empty list with room for `capacity` elements.
    ///
    /// # Panics
    ///
    /// Contract error if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_comparator(capacity, DefaultComparator)
    }

    /// A list holding a copy of each value, in order.
    pub fn from_slice(values: &[T]) -> Self
    where
        T: Clone,
    {
        let mut list = Self::with_capacity(values.len().max(1));
        for value in values {
            list.add(value.clone());
        }
        list
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> List<T, C> {
    /// An empty list with room for `capacity` elements, ordering them with
    /// `comparator`.
    ///
    /// # Panics
    ///
    /// Contract error if `capacity` is zero.
    pub fn with_comparator(capacity: usize, comparator: C) -> Self {
        contract_error!(capacity > 0, "initial capacity must be greater than zero");
        Self::with_allocator(PoolAllocator::with_capacity(capacity), comparator)
    }
}

impl<T, C, A: SlotAllocator<T>> List<T, C, A> {
    /// An empty list storing its elements in `allocator`, ordering them
    /// with `comparator`. The list starts with the allocator's capacity.
    ///
    /// # Panics
    ///
    /// Contract error if `allocator` already holds values.
    pub fn with_allocator(allocator: A, comparator: C) -> Self {
        Self {
            arena: SlotArena::from_allocator(allocator),
            first: None,
            last: None,
            id: ContainerId::next(),
            comparator,
        }
    }

    /// This list's identity, recorded in every cursor it hands out.
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// The comparator used by equality and search.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Number of elements.
    pub fn count(&self) -> usize {
        self.arena.count()
    }

    /// Number of elements the list can hold before it grows.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Whether the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// The element allocator.
    pub fn allocator(&self) -> &A {
        self.arena.elements()
    }

    /// Grow to hold at least `capacity` elements. Never shrinks.
    pub fn reserve(&mut self, capacity: usize) {
        self.arena.reserve(capacity);
    }

    // ── Ordinal access ────────────────────────────────────────────────

    /// The element at ordinal `index`.
    ///
    /// # Panics
    ///
    /// Contract error if `index >= count()`.
    pub fn get(&self, index: usize) -> &T {
        self.arena.value(self.ordinal_slot(index))
    }

    /// Mutable access to the element at ordinal `index`.
    ///
    /// # Panics
    ///
    /// Contract error if `index >= count()`.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        let slot = self.ordinal_slot(index);
        self.arena.value_mut(slot)
    }

    /// Overwrite the element at ordinal `index`.
    pub fn set(&mut self, index: usize, value: T) {
        *self.get_mut(index) = value;
    }

    /// The element at ordinal `index`, or an error if there is none.
    pub fn try_get(&self, index: usize) -> Result<&T, ContainerError> {
        self.slots()
            .nth(index)
            .map(|slot| self.arena.value(slot))
            .ok_or(ContainerError::IndexOutOfBounds {
                index,
                count: self.count(),
            })
    }

    // ── Cursors ───────────────────────────────────────────────────────

    /// Cursor at the first element, or the forward end if empty.
    pub fn first(&self) -> Cursor {
        self.cursor(Position::from_slot(self.first, Position::ForwardEnd))
    }

    /// Cursor at the last element, or the forward end if empty.
    pub fn last(&self) -> Cursor {
        self.cursor(Position::from_slot(self.last, Position::ForwardEnd))
    }

    /// Cursor at ordinal `index`, or the forward end if `index >= count()`.
    /// Walks the chain.
    pub fn cursor_at(&self, index: usize) -> Cursor {
        self.cursor(Position::from_slot(
            self.slots().nth(index),
            Position::ForwardEnd,
        ))
    }

    /// The cursor one step forward.
    ///
    /// The last element steps to the forward end, and the backward end
    /// steps to the first element. Advancing the forward end is a contract
    /// warning and returns it unchanged.
    pub fn advance(&self, cursor: Cursor) -> Cursor {
        check_owner(self.id, cursor);
        if !contract_warning!(
            !cursor.is_end_in(IterationDirection::Forward),
            "the cursor points to the forward end, it cannot be advanced"
        ) {
            return cursor;
        }
        let next = match cursor.position() {
            Position::Index(slot) => {
                self.check_live(slot);
                self.arena.record(slot).next
            }
            Position::BackwardEnd => self.first,
            Position::ForwardEnd => None,
        };
        cursor.with_position(Position::from_slot(next, Position::ForwardEnd))
    }

    /// The cursor one step backward; the mirror of [`advance`](Self::advance).
    pub fn retreat(&self, cursor: Cursor) -> Cursor {
        check_owner(self.id, cursor);
        if !contract_warning!(
            !cursor.is_end_in(IterationDirection::Backward),
            "the cursor points to the backward end, it cannot be retreated"
        ) {
            return cursor;
        }
        let prev = match cursor.position() {
            Position::Index(slot) => {
                self.check_live(slot);
                self.arena.record(slot).prev
            }
            Position::ForwardEnd => self.last,
            Position::BackwardEnd => None,
        };
        cursor.with_position(Position::from_slot(prev, Position::BackwardEnd))
    }

    /// Move `cursor` to the first element (the forward end if empty).
    pub fn move_first(&self, cursor: Cursor) -> Cursor {
        check_owner(self.id, cursor);
        self.first()
    }

    /// Move `cursor` to the last element (the forward end if empty).
    pub fn move_last(&self, cursor: Cursor) -> Cursor {
        check_owner(self.id, cursor);
        self.last()
    }

    /// Whether `cursor` belongs to this list and is either an end or a
    /// live slot. A best-effort check: a live slot may have been reused by
    /// another element since the cursor was taken.
    pub fn is_valid(&self, cursor: Cursor) -> bool {
        cursor.owner() == self.id
            && match cursor.position() {
                Position::Index(slot) => self.arena.is_live(slot),
                Position::ForwardEnd | Position::BackwardEnd => true,
            }
    }

    /// Order two cursors by their position in the chain. The backward end
    /// precedes every element and the forward end follows every element.
    /// Walks forward from `a`.
    pub fn compare_cursors(&self, a: Cursor, b: Cursor) -> Ordering {
        check_owner(self.id, a);
        check_owner(self.id, b);
        match (a.position(), b.position()) {
            (x, y) if x == y => Ordering::Equal,
            (Position::BackwardEnd, _) | (_, Position::ForwardEnd) => Ordering::Less,
            (Position::ForwardEnd, _) | (_, Position::BackwardEnd) => Ordering::Greater,
            (Position::Index(x), Position::Index(y)) => {
                self.check_live(x);
                self.check_live(y);
                if self.slots_from(x).any(|slot| slot == y) {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
        }
    }

    /// The element at `cursor`.
    ///
    /// # Panics
    ///
    /// Contract error if the cursor is foreign, at an end, or at a vacant
    /// slot.
    pub fn get_at(&self, cursor: Cursor) -> &T {
        self.arena.value(self.live_slot(cursor))
    }

    /// Mutable access to the element at `cursor`.
    pub fn get_at_mut(&mut self, cursor: Cursor) -> &mut T {
        let slot = self.live_slot(cursor);
        self.arena.value_mut(slot)
    }

    /// The element at `cursor`, or why there is none.
    pub fn try_get_at(&self, cursor: Cursor) -> Result<&T, ContainerError> {
        let slot = try_element_slot(self.id, cursor)?;
        self.arena
            .elements()
            .get(slot)
            .ok_or(ContainerError::VacantSlot { slot })
    }

    // ── Mutation ──────────────────────────────────────────────────────

    /// Append `value` after the last element and return its cursor.
    pub fn add(&mut self, value: T) -> Cursor {
        let slot = self.link_before(value, None);
        self.cursor(Position::Index(slot))
    }

    /// Insert `value` before the element at `position` and return a cursor
    /// to it.
    ///
    /// Inserting into an empty list or at an end is a contract warning:
    /// the forward end appends and the backward end prepends.
    pub fn insert(&mut self, value: T, position: Cursor) -> Cursor {
        check_owner(self.id, position);
        contract_warning!(
            !self.is_empty() && !position.is_end(),
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
        let slot = self.link_before(value, before);
        self.cursor(Position::Index(slot))
    }

    /// Insert `value` at ordinal `index`, shifting later elements back.
    ///
    /// An index past the last element is a contract warning and appends.
    pub fn insert_at(&mut self, value: T, index: usize) -> Cursor {
        contract_warning!(
            index < self.count(),
            "index {index} is out of bounds for {} elements, appending",
            self.count()
        );
        let before = self.slots().nth(index);
        let slot = self.link_before(value, before);
        self.cursor(Position::Index(slot))
    }

    /// Remove the element at `position` and return a cursor to the element
    /// that followed it (the forward end if it was the last).
    ///
    /// Removing from an empty list or at an end is a contract warning and
    /// removes nothing.
    pub fn remove(&mut self, position: Cursor) -> Cursor {
        check_owner(self.id, position);
        if !contract_warning!(!self.is_empty(), "the list is empty, there is nothing to remove")
            || !contract_warning!(
                !position.is_end(),
                "the cursor points to the {}, there is nothing to remove",
                position.position()
            )
        {
            return self.cursor(Position::ForwardEnd);
        }
        let slot = self.live_slot(position);
        let next = self.unlink(slot);
        self.arena.release(slot);
        self.cursor(Position::from_slot(next, Position::ForwardEnd))
    }

    /// Remove and return the element at ordinal `index`.
    ///
    /// An index past the last element is a contract warning and returns
    /// `None`.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if !contract_warning!(
            index < self.count(),
            "index {index} is out of bounds for {} elements, there is nothing to remove",
            self.count()
        ) {
            return None;
        }
        let slot = self.slots().nth(index)?;
        self.unlink(slot);
        Some(self.arena.release(slot))
    }

    /// Drop every element. Capacity is kept.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.first = None;
        self.last = None;
    }

    /// Exchange the elements at ordinals `a` and `b`. The chain is not
    /// touched; the two values trade slots.
    ///
    /// # Panics
    ///
    /// Contract error if either index is out of bounds.
    pub fn swap(&mut self, a: usize, b: usize) {
        let slot_a = self.ordinal_slot(a);
        let slot_b = self.ordinal_slot(b);
        if contract_warning!(a != b, "both elements are the same, nothing to swap") {
            self.arena.swap_values(slot_a, slot_b);
        }
    }

    /// Exchange the elements at two cursors.
    pub fn swap_at(&mut self, a: Cursor, b: Cursor) {
        let slot_a = self.live_slot(a);
        let slot_b = self.live_slot(b);
        if contract_warning!(slot_a != slot_b, "both elements are the same, nothing to swap") {
            self.arena.swap_values(slot_a, slot_b);
        }
    }

    // ── Iteration ─────────────────────────────────────────────────────

    /// Elements in chain order.
    pub fn iter(&self) -> Iter<'_, T, A> {
        Iter::new(&self.arena, self.first, self.last, self.count())
    }

    /// Mutable references to the elements in chain order.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let order: Vec<usize> = self.slots().collect();
        IterMut::new(self.arena.values_mut_in(&order))
    }

    // ── Internals ─────────────────────────────────────────────────────

    fn cursor(&self, position: Position) -> Cursor {
        Cursor::new(self.id, position)
    }

    /// Slots in chain order, starting at the first element.
    fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        successors(self.first, move |&slot| self.arena.record(slot).next)
    }

    /// Slots in chain order, starting at `slot`.
    fn slots_from(&self, slot: usize) -> impl Iterator<Item = usize> + '_ {
        successors(Some(slot), move |&slot| self.arena.record(slot).next)
    }

    fn ordinal_slot(&self, index: usize) -> usize {
        contract_error!(
            index < self.count(),
            "index {index} must be less than the list's size ({})",
            self.count()
        );
        self.slots()
            .nth(index)
            .expect("every index below the count lies on the chain")
    }

    fn check_live(&self, slot: usize) {
        contract_error!(
            self.arena.is_live(slot),
            "the cursor at slot {slot} does not point to a live element"
        );
    }

    fn live_slot(&self, cursor: Cursor) -> usize {
        let slot = element_slot(self.id, cursor);
        self.check_live(slot);
        slot
    }

    /// Store `value` and splice it in before `before` (`None` appends).
    fn link_before(&mut self, value: T, before: Option<usize>) -> usize {
        let prev = match before {
            Some(next) => self.arena.record(next).prev,
            None => self.last,
        };
        let slot = self.arena.allocate(value, Link::new(prev, before));
        match prev {
            Some(p) => self.arena.record_mut(p).next = Some(slot),
            None => self.first = Some(slot),
        }
        match before {
            Some(n) => self.arena.record_mut(n).prev = Some(slot),
            None => self.last = Some(slot),
        }
        slot
    }

    /// Detach `slot` from the chain, returning the slot that followed it.
    /// The slot itself stays allocated.
    fn unlink(&mut self, slot: usize) -> Option<usize> {
        let Link { prev, next } = self.arena.record(slot);
        match prev {
            Some(p) => self.arena.record_mut(p).next = next,
            None => self.first = next,
        }
        match next {
            Some(n) => self.arena.record_mut(n).prev = prev,
            None => self.last = prev,
        }
        next
    }
}

impl<T, C: Comparator<T>, A: SlotAllocator<T>> List<T, C, A> {
    /// Whether some element compares equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Ordinal of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter().position(|item| self.comparator.equals(item, value))
    }

    /// Ordinal of the first element equal to `value` at or after ordinal
    /// `start`. A start past the last element is a contract warning.
    pub fn index_of_from(&self, value: &T, start: usize) -> Option<usize> {
        contract_warning!(
            start < self.count(),
            "start index {start} must be lower than the number of elements ({})",
            self.count()
        );
        self.iter()
            .skip(start)
            .position(|item| self.comparator.equals(item, value))
            .map(|offset| start + offset)
    }

    /// Cursor at the first element equal to `value`, or the forward end.
    pub fn position_of(&self, value: &T) -> Cursor {
        let found = self
            .slots()
            .find(|&slot| self.comparator.equals(self.arena.value(slot), value));
        self.cursor(Position::from_slot(found, Position::ForwardEnd))
    }

    /// Cursor at the first element equal to `value` at or after `start`,
    /// or the forward end. Starting at an end is a contract warning; the
    /// backward end searches the whole list.
    pub fn position_of_from(&self, value: &T, start: Cursor) -> Cursor {
        check_owner(self.id, start);
        contract_warning!(
            !start.is_end(),
            "the start position must not point to an end position"
        );
        let from = match start.position() {
            Position::Index(slot) => {
                self.check_live(slot);
                Some(slot)
            }
            Position::BackwardEnd => self.first,
            Position::ForwardEnd => None,
        };
        let found = successors(from, |&slot| self.arena.record(slot).next)
            .find(|&slot| self.comparator.equals(self.arena.value(slot), value));
        self.cursor(Position::from_slot(found, Position::ForwardEnd))
    }
}

impl<T: Clone, C, A: SlotAllocator<T>> List<T, C, A> {
    /// Make this list an element-wise copy of `source`.
    ///
    /// Uses the fewest constructions: overlapping elements are assigned in
    /// place, a longer tail here is dropped, and a longer tail in `source`
    /// is appended. Slots of the overlapping elements are kept, so cursors
    /// to them stay usable.
    pub fn assign_from<C2, A2: SlotAllocator<T>>(&mut self, source: &List<T, C2, A2>) {
        if source.count() > self.capacity() {
            self.reserve(source.capacity());
        }
        let mut dest = self.first;
        let mut src = source.first;
        while let (Some(d), Some(s)) = (dest, src) {
            self.arena.value_mut(d).clone_from(source.arena.value(s));
            dest = self.arena.record(d).next;
            src = source.arena.record(s).next;
        }
        if let Some(tail) = dest {
            self.last = self.arena.record(tail).prev;
            match self.last {
                Some(last) => self.arena.record_mut(last).next = None,
                None => self.first = None,
            }
            let mut next = Some(tail);
            while let Some(slot) = next {
                next = self.arena.record(slot).next;
                self.arena.release(slot);
            }
        }
        while let Some(s) = src {
            self.add(source.arena.value(s).clone());
            src = source.arena.record(s).next;
        }
    }

    /// Bulk-copy this list's pools into `dest`, which ends up with the same
    /// elements in the same slots. `dest` grows first if it is smaller.
    pub fn clone_to(&self, dest: &mut List<T, C, A>) {
        self.arena.copy_to(&mut dest.arena);
        dest.first = self.first;
        dest.last = self.last;
    }
}

impl<T: Clone, C: Clone, A: SlotAllocator<T> + Clone> Clone for List<T, C, A> {
    /// A deep copy with a fresh identity.
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            first: self.first,
            last: self.last,
            id: ContainerId::next(),
            comparator: self.comparator.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from(source);
    }
}

impl<T, C: Comparator<T>, A: SlotAllocator<T>> PartialEq for List<T, C, A> {
    /// Ordinal comparison through this list's comparator.
    fn eq(&self, other: &Self) -> bool {
        self.count() == other.count()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| self.comparator.equals(a, b))
    }
}

impl<T: fmt::Debug, C, A: SlotAllocator<T>> fmt::Debug for List<T, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C, A: SlotAllocator<T>> Index<usize> for List<T, C, A> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index)
    }
}

impl<T, C, A: SlotAllocator<T>> IndexMut<usize> for List<T, C, A> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index)
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut list = Self::with_capacity(iter.size_hint().0.max(1));
        list.extend(iter);
        list
    }
}

impl<T, C, A: SlotAllocator<T>> Extend<T> for List<T, C, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}
