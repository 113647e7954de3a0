//! Test fixtures and mock comparators for Quimera development.
//!
//! Provides drop-tracked values for checking that containers destroy each
//! element exactly once, comparators with non-default equality, an
//! allocator that counts the calls a container makes, and builders for the
//! reference shapes used across the test suites.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::Cell;
use std::cmp::Ordering;
use std::rc::Rc;

use quimera_alloc::{AllocError, PoolAllocator, PoolConfig, SlotAllocator};
use quimera_core::Comparator;

/// Shared counter of dropped [`Tracked`] values.
///
/// Clone it freely; every clone observes the same count.
#[derive(Clone, Debug, Default)]
pub struct DropCounter {
    dropped: Rc<Cell<usize>>,
}

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `value` so that dropping it bumps this counter.
    pub fn track<T>(&self, value: T) -> Tracked<T> {
        Tracked {
            value,
            counter: self.clone(),
        }
    }

    /// Number of tracked values dropped so far.
    pub fn dropped(&self) -> usize {
        self.dropped.get()
    }
}

/// A value that reports its own drop to a [`DropCounter`].
///
/// Cloning a tracked value produces a second tracked value, so both
/// drops are counted.
#[derive(Clone, Debug)]
pub struct Tracked<T> {
    pub value: T,
    counter: DropCounter,
}

impl<T: PartialEq> PartialEq for Tracked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: PartialOrd> PartialOrd for Tracked<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        let dropped = &self.counter.dropped;
        dropped.set(dropped.get() + 1);
    }
}

/// Orders strings ignoring ASCII case.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaseInsensitive;

impl Comparator<String> for CaseInsensitive {
    fn compare(&self, a: &String, b: &String) -> Ordering {
        a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase())
    }
}

/// Treats integers as equal when they share a remainder modulo `modulus`.
#[derive(Clone, Copy, Debug)]
pub struct Modulo {
    pub modulus: i64,
}

impl Comparator<i64> for Modulo {
    fn compare(&self, a: &i64, b: &i64) -> Ordering {
        a.rem_euclid(self.modulus).cmp(&b.rem_euclid(self.modulus))
    }
}

/// Counts how often it was asked to compare.
#[derive(Clone, Debug, Default)]
pub struct CountingComparator {
    calls: Rc<Cell<usize>>,
}

impl CountingComparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<T: Ord> Comparator<T> for CountingComparator {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.calls.set(self.calls.get() + 1);
        a.cmp(b)
    }
}

/// A [`PoolAllocator`] that counts the allocations, releases and growth
/// steps a container asks of it.
#[derive(Clone, Debug)]
pub struct CountingAllocator<T> {
    pool: PoolAllocator<T>,
    allocations: usize,
    releases: usize,
    growths: usize,
}

impl<T> CountingAllocator<T> {
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    pub fn releases(&self) -> usize {
        self.releases
    }

    pub fn growths(&self) -> usize {
        self.growths
    }
}

impl<T> SlotAllocator<T> for CountingAllocator<T> {
    fn from_config(config: PoolConfig) -> Self {
        Self {
            pool: PoolAllocator::new(config),
            allocations: 0,
            releases: 0,
            growths: 0,
        }
    }

    fn allocate(&mut self, value: T) -> Result<usize, AllocError> {
        let slot = self.pool.allocate(value)?;
        self.allocations += 1;
        Ok(slot)
    }

    fn deallocate(&mut self, index: usize) -> T {
        self.releases += 1;
        self.pool.deallocate(index)
    }

    fn reallocate(&mut self, new_pool_size: usize) {
        self.growths += 1;
        self.pool.reallocate(new_pool_size);
    }

    fn clear(&mut self) {
        self.pool.clear();
    }

    fn can_allocate(&self) -> bool {
        self.pool.can_allocate()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.pool.get(index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.pool.get_mut(index)
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.pool.swap(a, b);
    }

    fn occupied_mut(&mut self) -> Box<dyn DoubleEndedIterator<Item = (usize, &mut T)> + '_> {
        Box::new(self.pool.occupied_mut())
    }

    fn allocated_count(&self) -> usize {
        self.pool.allocated_count()
    }

    fn config(&self) -> &PoolConfig {
        self.pool.config()
    }

    fn copy_to(&self, dest: &mut Self)
    where
        T: Clone,
    {
        self.pool.copy_to(&mut dest.pool);
    }
}
