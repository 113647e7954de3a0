//! Fixed-size array stored in one pool.
//!
//! Slots `0..count` are filled at construction and stay filled, so the
//! slot index of an element is its ordinal position and cursor steps are
//! plain index arithmetic.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Index, IndexMut};

use quimera_alloc::{PoolAllocator, SlotAllocator};
use quimera_core::{
    contract_error, contract_warning, Comparator, ContainerError, ContainerId, Cursor,
    DefaultComparator, IterationDirection, Position,
};

use crate::cursor::{check_owner, element_slot, try_element_slot};

/// An array whose length is fixed at construction.
///
/// Elements are stored in an `A` allocator, a [`PoolAllocator`] unless
/// the array is built with [`with_allocator`](Self::with_allocator).
pub struct FixedArray<T, C = DefaultComparator, A = PoolAllocator<T>> {
    elements: A,
    id: ContainerId,
    comparator: C,
    _values: std::marker::PhantomData<fn() -> T>,
}

impl<T: Clone> FixedArray<T> {
    /// `count` copies of `initial`.
    ///
    /// # Panics
    ///
    /// Contract error if `count` is zero.
    pub fn new(count: usize, initial: T) -> Self {
        Self::with_comparator(count, initial, DefaultComparator)
    }

    /// A copy of `values`.
    ///
    /// # Panics
    ///
    /// Contract error if `values` is empty.
    pub fn from_slice(values: &[T]) -> Self {
        contract_error!(!values.is_empty(), "the number of elements must be greater than zero");
        let mut elements = PoolAllocator::with_capacity(values.len());
        for value in values {
            elements
                .allocate(value.clone())
                .expect("pool sized to the slice");
        }
        Self {
            elements,
            id: ContainerId::next(),
            comparator: DefaultComparator,
            _values: std::marker::PhantomData,
        }
    }
}

impl<T: Clone, C> FixedArray<T, C> {
    /// `count` copies of `initial`, compared with `comparator`.
    ///
    /// # Panics
    ///
    /// Contract error if `count` is zero.
    pub fn with_comparator(count: usize, initial: T, comparator: C) -> Self {
        let allocator = PoolAllocator::with_capacity(count.max(1));
        Self::with_allocator(count, initial, allocator, comparator)
    }
}

impl<T: Clone, C, A: SlotAllocator<T>> FixedArray<T, C, A> {
    /// `count` copies of `initial` stored in `allocator`, which grows to
    /// `count` slots if it is smaller.
    ///
    /// # Panics
    ///
    /// Contract error if `count` is zero, if `allocator` already holds
    /// values, or if it does not hand out slots `0..count` in order.
    pub fn with_allocator(count: usize, initial: T, mut allocator: A, comparator: C) -> Self {
        contract_error!(count > 0, "the number of elements must be greater than zero");
        contract_error!(
            allocator.allocated_count() == 0,
            "an array must start from an empty allocator, this one holds {} values",
            allocator.allocated_count()
        );
        allocator.reserve_slots(count);
        for index in 0..count {
            let slot = allocator
                .allocate(initial.clone())
                .expect("allocator reserved for the element count");
            contract_error!(
                slot == index,
                "element {index} landed in slot {slot}, an array needs ascending slots"
            );
        }
        Self {
            elements: allocator,
            id: ContainerId::next(),
            comparator,
            _values: std::marker::PhantomData,
        }
    }

    /// Copy the overlapping prefix of `other` into this array. Elements
    /// past the shorter of the two are left alone.
    pub fn assign_from<C2, A2: SlotAllocator<T>>(&mut self, other: &FixedArray<T, C2, A2>) {
        let overlap = self.count().min(other.count());
        for i in 0..overlap {
            self[i].clone_from(&other[i]);
        }
    }

    /// Bulk-copy every element into `dest`.
    ///
    /// # Panics
    ///
    /// Contract error if `dest` has a different capacity.
    pub fn clone_to(&self, dest: &mut FixedArray<T, C, A>) {
        contract_error!(
            dest.capacity() == self.capacity(),
            "the destination array has capacity {}, expected {}",
            dest.capacity(),
            self.capacity()
        );
        self.elements.copy_to(&mut dest.elements);
    }
}

impl<T, C, A: SlotAllocator<T>> FixedArray<T, C, A> {
    /// This array's identity, recorded in every cursor it hands out.
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Number of elements.
    pub fn count(&self) -> usize {
        self.elements.allocated_count()
    }

    /// Number of slots; equal to [`count`](Self::count) unless the array
    /// was given a larger allocator.
    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    /// Always `false`: an array holds at least one element.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// The element allocator.
    pub fn allocator(&self) -> &A {
        &self.elements
    }

    /// The element at `index`.
    ///
    /// # Panics
    ///
    /// Contract error if `index >= count()`.
    pub fn get(&self, index: usize) -> &T {
        self.check_index(index);
        self.elements.get(index).expect("slots below count are filled")
    }

    /// Mutable access to the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        self.check_index(index);
        self.elements
            .get_mut(index)
            .expect("slots below count are filled")
    }

    /// Overwrite the element at `index`.
    pub fn set(&mut self, index: usize, value: T) {
        *self.get_mut(index) = value;
    }

    /// The element at `index`, or an error if out of bounds.
    pub fn try_get(&self, index: usize) -> Result<&T, ContainerError> {
        self.elements.get(index).ok_or(ContainerError::IndexOutOfBounds {
            index,
            count: self.count(),
        })
    }

    /// Cursor at `index`; `count()` gives the forward end. An index past
    /// that is a contract warning and also gives the forward end.
    pub fn cursor_at(&self, index: usize) -> Cursor {
        contract_warning!(
            index <= self.count(),
            "index {index} is out of bounds for {} elements, using the forward end",
            self.count()
        );
        let position = if index < self.count() {
            Position::Index(index)
        } else {
            Position::ForwardEnd
        };
        self.cursor(position)
    }

    /// Cursor at the first element.
    pub fn first(&self) -> Cursor {
        self.cursor_at(0)
    }

    /// Cursor at the last element.
    pub fn last(&self) -> Cursor {
        self.cursor_at(self.count() - 1)
    }

    /// One step forward: the last element steps to the forward end and the
    /// backward end to the first element. Advancing the forward end is a
    /// contract warning and returns it unchanged.
    pub fn advance(&self, cursor: Cursor) -> Cursor {
        check_owner(self.id, cursor);
        if !contract_warning!(
            !cursor.is_end_in(IterationDirection::Forward),
            "the cursor points to the forward end, it cannot be advanced"
        ) {
            return cursor;
        }
        let position = match cursor.position() {
            Position::BackwardEnd => Position::Index(0),
            Position::Index(i) if i + 1 < self.count() => Position::Index(i + 1),
            Position::Index(_) | Position::ForwardEnd => Position::ForwardEnd,
        };
        cursor.with_position(position)
    }

    /// One step backward; the mirror of [`advance`](Self::advance).
    pub fn retreat(&self, cursor: Cursor) -> Cursor {
        check_owner(self.id, cursor);
        if !contract_warning!(
            !cursor.is_end_in(IterationDirection::Backward),
            "the cursor points to the backward end, it cannot be retreated"
        ) {
            return cursor;
        }
        let position = match cursor.position() {
            Position::ForwardEnd => Position::Index(self.count() - 1),
            Position::Index(i) if i > 0 => Position::Index(i - 1),
            Position::Index(_) | Position::BackwardEnd => Position::BackwardEnd,
        };
        cursor.with_position(position)
    }

    /// Move `cursor` to the first element.
    pub fn move_first(&self, cursor: Cursor) -> Cursor {
        check_owner(self.id, cursor);
        self.first()
    }

    /// Move `cursor` to the last element.
    pub fn move_last(&self, cursor: Cursor) -> Cursor {
        check_owner(self.id, cursor);
        self.last()
    }

    /// Whether `cursor` belongs to this array and is an end or in bounds.
    pub fn is_valid(&self, cursor: Cursor) -> bool {
        cursor.owner() == self.id
            && cursor.index().map_or(true, |i| i < self.count())
    }

    /// Order two cursors: backward end, then indices ascending, then the
    /// forward end.
    pub fn compare_cursors(&self, a: Cursor, b: Cursor) -> Ordering {
        check_owner(self.id, a);
        check_owner(self.id, b);
        let rank = |c: Cursor| match c.position() {
            Position::BackwardEnd => 0,
            Position::Index(i) => i + 1,
            Position::ForwardEnd => usize::MAX,
        };
        rank(a).cmp(&rank(b))
    }

    /// The element at `cursor`.
    ///
    /// # Panics
    ///
    /// Contract error if the cursor is foreign or at an end.
    pub fn get_at(&self, cursor: Cursor) -> &T {
        self.get(element_slot(self.id, cursor))
    }

    /// Mutable access to the element at `cursor`.
    pub fn get_at_mut(&mut self, cursor: Cursor) -> &mut T {
        let index = element_slot(self.id, cursor);
        self.get_mut(index)
    }

    /// The element at `cursor`, or why there is none.
    pub fn try_get_at(&self, cursor: Cursor) -> Result<&T, ContainerError> {
        let index = try_element_slot(self.id, cursor)?;
        self.try_get(index)
    }

    /// Exchange the elements at `a` and `b`.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.check_index(a);
        self.check_index(b);
        if contract_warning!(a != b, "both elements are the same, nothing to swap") {
            self.elements.swap(a, b);
        }
    }

    /// Elements in index order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        (0..self.count()).map(move |i| self.get(i))
    }

    /// Mutable references to the elements in index order.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut T> + '_ {
        self.elements.occupied_mut().map(|(_, value)| value)
    }

    fn cursor(&self, position: Position) -> Cursor {
        Cursor::new(self.id, position)
    }

    fn check_index(&self, index: usize) {
        contract_error!(
            index < self.count(),
            "index {index} must be less than the array's size ({})",
            self.count()
        );
    }
}

impl<T, C: Comparator<T>, A: SlotAllocator<T>> FixedArray<T, C, A> {
    /// Whether some element compares equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Index of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter().position(|item| self.comparator.equals(item, value))
    }
}

impl<T: Clone, C: Clone, A: SlotAllocator<T> + Clone> Clone for FixedArray<T, C, A> {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
            id: ContainerId::next(),
            comparator: self.comparator.clone(),
            _values: std::marker::PhantomData,
        }
    }
}

impl<T, C: Comparator<T>, A: SlotAllocator<T>> PartialEq for FixedArray<T, C, A> {
    fn eq(&self, other: &Self) -> bool {
        self.count() == other.count()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| self.comparator.equals(a, b))
    }
}

impl<T: fmt::Debug, C, A: SlotAllocator<T>> fmt::Debug for FixedArray<T, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C, A: SlotAllocator<T>> Index<usize> for FixedArray<T, C, A> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index)
    }
}

impl<T, C, A: SlotAllocator<T>> IndexMut<usize> for FixedArray<T, C, A> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_with_initial_value() {
        let a = FixedArray::new(3, 7u8);
        assert_eq!(a.count(), 3);
        assert_eq!(a.capacity(), 3);
        assert!(a.iter().all(|&v| v == 7));
        assert!(!a.is_empty());
    }

    #[test]
    #[should_panic(expected = "greater than zero")]
    fn zero_length_is_an_error() {
        let _ = FixedArray::new(0, 1);
    }

    #[test]
    fn get_set_and_index() {
        let mut a = FixedArray::new(2, 0);
        a.set(1, 5);
        a[0] = 4;
        assert_eq!((a[0], *a.get(1)), (4, 5));
        assert_eq!(a.try_get(2), Err(ContainerError::IndexOutOfBounds { index: 2, count: 2 }));
    }

    #[test]
    #[should_panic(expected = "must be less than the array's size")]
    fn out_of_bounds_is_an_error() {
        let a = FixedArray::new(2, 0);
        let _ = a.get(2);
    }

    #[test]
    fn cursor_state_machine() {
        let a = FixedArray::from_slice(&[1, 2, 3]);
        assert_eq!(a.cursor_at(3).position(), Position::ForwardEnd);
        let last = a.last();
        let end = a.advance(last);
        assert!(end.is_end_in(IterationDirection::Forward));
        assert_eq!(a.retreat(end), last);
        let begin = a.retreat(a.first());
        assert!(begin.is_end_in(IterationDirection::Backward));
        assert_eq!(*a.get_at(a.advance(begin)), 1);
        assert_eq!(a.move_last(begin), last);
        assert_eq!(a.move_first(end), a.first());
    }

    #[cfg(not(feature = "strict-contracts"))]
    #[test]
    fn stepping_past_ends_stays() {
        let a = FixedArray::from_slice(&[1]);
        let end = a.advance(a.first());
        assert_eq!(a.advance(end), end);
        let begin = a.retreat(a.first());
        assert_eq!(a.retreat(begin), begin);
    }

    #[cfg(not(feature = "strict-contracts"))]
    #[test]
    fn cursor_past_forward_end_is_a_warning() {
        let a = FixedArray::from_slice(&[1, 2]);
        assert_eq!(a.cursor_at(7).position(), Position::ForwardEnd);
        assert_eq!(a.cursor_at(7), a.cursor_at(2));
    }

    #[cfg(feature = "strict-contracts")]
    #[test]
    #[should_panic(expected = "contract warning: index 7 is out of bounds")]
    fn cursor_past_forward_end_halts_when_strict() {
        let a = FixedArray::from_slice(&[1, 2]);
        let _ = a.cursor_at(7);
    }

    #[test]
    fn cursor_ordering_accounts_for_ends() {
        let a = FixedArray::from_slice(&[1, 2]);
        let begin = a.retreat(a.first());
        let end = a.advance(a.last());
        assert_eq!(a.compare_cursors(begin, a.first()), Ordering::Less);
        assert_eq!(a.compare_cursors(a.first(), a.last()), Ordering::Less);
        assert_eq!(a.compare_cursors(end, a.last()), Ordering::Greater);
        assert_eq!(a.compare_cursors(end, end), Ordering::Equal);
    }

    #[test]
    #[should_panic(expected = "there is no element there")]
    fn dereferencing_end_is_an_error() {
        let a = FixedArray::from_slice(&[1]);
        let _ = a.get_at(a.advance(a.first()));
    }

    #[test]
    fn validity_checks_owner_and_bounds() {
        let a = FixedArray::from_slice(&[1, 2]);
        let b = FixedArray::from_slice(&[1, 2]);
        assert!(a.is_valid(a.first()));
        assert!(a.is_valid(a.cursor_at(2)));
        assert!(!a.is_valid(b.first()));
        assert!(!a.is_valid(Cursor::new(a.id(), Position::Index(2))));
    }

    #[test]
    fn assign_copies_overlap() {
        let mut short = FixedArray::from_slice(&[0, 0]);
        let long = FixedArray::from_slice(&[1, 2, 3]);
        short.assign_from(&long);
        assert_eq!(short.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        let mut long2 = FixedArray::from_slice(&[9, 9, 9]);
        long2.assign_from(&FixedArray::from_slice(&[5]));
        assert_eq!(long2.iter().copied().collect::<Vec<_>>(), vec![5, 9, 9]);
    }

    #[test]
    fn clone_to_requires_equal_capacity() {
        let a = FixedArray::from_slice(&[1, 2]);
        let mut b = FixedArray::new(2, 0);
        a.clone_to(&mut b);
        assert!(a == b);
    }

    #[test]
    #[should_panic(expected = "destination array has capacity 3")]
    fn clone_to_wrong_capacity_is_an_error() {
        let a = FixedArray::from_slice(&[1, 2]);
        let mut b = FixedArray::new(3, 0);
        a.clone_to(&mut b);
    }

    #[test]
    fn search_and_swap() {
        let mut a = FixedArray::from_slice(&["x", "y", "z"]);
        assert_eq!(a.index_of(&"z"), Some(2));
        assert!(!a.contains(&"w"));
        a.swap(0, 2);
        assert_eq!(format!("{a:?}"), r#"["z", "y", "x"]"#);
    }

    #[test]
    fn iter_mut_and_reverse() {
        let mut a = FixedArray::from_slice(&[1, 2, 3]);
        for v in a.iter_mut() {
            *v *= 10;
        }
        let rev: Vec<i32> = a.iter().rev().copied().collect();
        assert_eq!(rev, vec![30, 20, 10]);
    }

    #[test]
    fn injected_comparator_drives_search_and_equality() {
        let by_parity = |a: &i32, b: &i32| a.rem_euclid(2).cmp(&b.rem_euclid(2));
        let odd = FixedArray::with_comparator(2, 7, by_parity);
        let mut other = FixedArray::with_comparator(2, 1, by_parity);
        assert!(odd == other);
        assert_eq!(odd.index_of(&3), Some(0));
        assert!(!odd.contains(&4));
        other[1] = 4;
        assert!(odd != other);
    }

    #[test]
    fn with_allocator_grows_a_small_pool() {
        let a = FixedArray::with_allocator(
            3,
            'q',
            PoolAllocator::with_capacity(1),
            DefaultComparator,
        );
        assert_eq!(a.count(), 3);
        assert_eq!(a.allocator().capacity(), 3);
        assert_eq!(a.iter().collect::<String>(), "qqq");
    }

    #[test]
    #[should_panic(expected = "must start from an empty allocator")]
    fn with_allocator_rejects_a_used_pool() {
        let mut pool = PoolAllocator::with_capacity(2);
        pool.allocate(0u8).unwrap();
        let _ = FixedArray::with_allocator(2, 1u8, pool, DefaultComparator);
    }

    #[test]
    fn clone_is_independent() {
        let a = FixedArray::from_slice(&[1, 2]);
        let mut b = a.clone();
        b[0] = 5;
        assert_eq!(a[0], 1);
        assert_ne!(a.id(), b.id());
    }
}
