//! Element allocator paired with slot-indexed topology records.

use quimera_alloc::{PoolAllocator, PoolConfig, SlotAllocator};
use quimera_core::contract_error;

/// An element allocator and a record table of the same length: record `i`
/// describes the element in slot `i`. The allocator picks the slots, the
/// records follow them, and both grow together.
///
/// Records of vacant slots hold stale values and are never read.
#[derive(Clone, Debug)]
pub(crate) struct SlotArena<T, R, A = PoolAllocator<T>> {
    elements: A,
    records: Vec<R>,
    _values: std::marker::PhantomData<fn() -> T>,
}

impl<T, R: Copy + Default, A: SlotAllocator<T>> SlotArena<T, R, A> {
    /// Wrap an empty allocator.
    ///
    /// # Panics
    ///
    /// Contract error if the allocator already holds values.
    pub(crate) fn from_allocator(elements: A) -> Self {
        contract_error!(
            elements.allocated_count() == 0,
            "a container must start from an empty allocator, this one holds {} values",
            elements.allocated_count()
        );
        Self {
            records: vec![R::default(); elements.capacity()],
            elements,
            _values: std::marker::PhantomData,
        }
    }

    /// Store a value and its record in the same slot, growing by the
    /// reallocation factor first if every slot is taken.
    pub(crate) fn allocate(&mut self, value: T, record: R) -> usize {
        if !self.elements.can_allocate() {
            self.reserve(PoolConfig::grown_capacity(self.capacity() + 1));
        }
        let slot = self
            .elements
            .allocate(value)
            .expect("allocator has a free slot after growth");
        self.records[slot] = record;
        slot
    }

    /// Free a slot and return its value.
    pub(crate) fn release(&mut self, slot: usize) -> T {
        self.elements.deallocate(slot)
    }

    pub(crate) fn reserve(&mut self, capacity: usize) {
        if capacity > self.capacity() {
            log::debug!("growing arena from {} to {capacity} slots", self.capacity());
            self.elements.reserve_slots(capacity);
            self.records.resize(self.elements.capacity(), R::default());
        }
    }

    pub(crate) fn clear(&mut self) {
        self.elements.clear();
    }

    pub(crate) fn is_live(&self, slot: usize) -> bool {
        self.elements.is_occupied(slot)
    }

    /// The record of a live slot. Callers only pass slots reached through
    /// the topology or checked with [`is_live`](Self::is_live).
    pub(crate) fn record(&self, slot: usize) -> R {
        debug_assert!(self.is_live(slot), "topology only references live slots");
        self.records[slot]
    }

    pub(crate) fn record_mut(&mut self, slot: usize) -> &mut R {
        debug_assert!(self.is_live(slot), "topology only references live slots");
        &mut self.records[slot]
    }

    pub(crate) fn value(&self, slot: usize) -> &T {
        self.elements
            .get(slot)
            .expect("topology only references live slots")
    }

    pub(crate) fn value_mut(&mut self, slot: usize) -> &mut T {
        self.elements
            .get_mut(slot)
            .expect("topology only references live slots")
    }

    /// Exchange the values of two live slots, leaving the records alone.
    pub(crate) fn swap_values(&mut self, a: usize, b: usize) {
        self.elements.swap(a, b);
    }

    /// Mutable references to the values at `order`, in that order.
    pub(crate) fn values_mut_in(&mut self, order: &[usize]) -> Vec<&mut T> {
        let mut by_slot: Vec<Option<&mut T>> =
            (0..self.elements.capacity()).map(|_| None).collect();
        for (slot, value) in self.elements.occupied_mut() {
            by_slot[slot] = Some(value);
        }
        order
            .iter()
            .filter_map(|&slot| by_slot[slot].take())
            .collect()
    }

    pub(crate) fn count(&self) -> usize {
        self.elements.allocated_count()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    pub(crate) fn elements(&self) -> &A {
        &self.elements
    }
}

impl<T: Clone, R: Copy + Default, A: SlotAllocator<T>> SlotArena<T, R, A> {
    /// Bulk-copy the allocator and the records into `dest`, growing it
    /// first if needed.
    pub(crate) fn copy_to(&self, dest: &mut Self) {
        dest.reserve(self.capacity());
        self.elements.copy_to(&mut dest.elements);
        dest.records[..self.records.len()].copy_from_slice(&self.records);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pooled<T, R: Copy + Default>(capacity: usize) -> SlotArena<T, R> {
        SlotArena::from_allocator(PoolAllocator::with_capacity(capacity))
    }

    #[test]
    fn grows_by_factor_when_full() {
        let mut arena = pooled::<u8, ()>(2);
        arena.allocate(1, ());
        arena.allocate(2, ());
        assert_eq!(arena.capacity(), 2);
        arena.allocate(3, ());
        assert_eq!(arena.capacity(), 4);
        assert_eq!(arena.count(), 3);
    }

    #[test]
    fn release_returns_value_and_frees_slot() {
        let mut arena = pooled::<&str, u32>(2);
        let a = arena.allocate("a", 10);
        let b = arena.allocate("b", 20);
        assert_eq!(arena.release(a), "a");
        assert!(!arena.is_live(a));
        assert_eq!(arena.record(b), 20);
        assert_eq!(arena.allocate("c", 30), a);
        assert_eq!(arena.record(a), 30);
    }

    #[test]
    fn records_follow_growth() {
        let mut arena = pooled::<u8, u16>(1);
        for v in 0..5u8 {
            let slot = arena.allocate(v, u16::from(v) * 100);
            assert_eq!(arena.record(slot), u16::from(v) * 100);
        }
        assert!(arena.capacity() >= 5);
        assert_eq!(arena.records.len(), arena.capacity());
    }

    #[test]
    fn copy_to_larger_arena_keeps_records() {
        let mut source = pooled::<char, u8>(2);
        source.allocate('a', 1);
        source.allocate('b', 2);
        let mut dest = pooled::<char, u8>(4);
        source.copy_to(&mut dest);
        assert_eq!(dest.capacity(), 4);
        assert_eq!(dest.record(1), 2);
        assert_eq!(*dest.value(0), 'a');
    }

    #[test]
    #[should_panic(expected = "must start from an empty allocator")]
    fn occupied_allocator_is_rejected() {
        let mut pool = PoolAllocator::with_capacity(2);
        pool.allocate(1u8).unwrap();
        let _ = SlotArena::<u8, ()>::from_allocator(pool);
    }

    #[test]
    fn values_mut_in_follows_order() {
        let mut arena = pooled::<i32, ()>(3);
        for v in [10, 20, 30] {
            arena.allocate(v, ());
        }
        let refs = arena.values_mut_in(&[2, 0, 1]);
        let seen: Vec<i32> = refs.into_iter().map(|v| *v).collect();
        assert_eq!(seen, vec![30, 10, 20]);
    }
}
