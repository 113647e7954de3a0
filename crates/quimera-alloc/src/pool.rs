//! Fixed-stride slot pool with an intrusive free chain.

use std::fmt;
use std::mem;

use quimera_core::{contract_error, contract_warning};

use crate::alignment::Alignment;
use crate::config::PoolConfig;
use crate::error::AllocError;
use crate::traits::SlotAllocator;

/// One slot of the pool.
#[derive(Clone)]
enum Slot<T> {
    /// Free; `next` continues the free chain.
    Vacant { next: Option<usize> },
    Occupied(T),
}

/// A pool of equally sized slots addressed by index.
///
/// The allocator decides which slot a value lands in (the head of its free
/// chain); the caller decides what the slot means. Slot indices are stable
/// for the life of the pool, including across [`reallocate`](Self::reallocate).
///
/// Byte accounting follows the configured stride:
/// `allocated_bytes() == allocated_count() * stride()` at all times.
#[derive(Clone)]
pub struct PoolAllocator<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    free_tail: Option<usize>,
    allocated: usize,
    config: PoolConfig,
}

/// Vacant slots `start..end`, each linked to the next, the last to `None`.
fn vacant_run<T>(start: usize, end: usize) -> impl Iterator<Item = Slot<T>> {
    (start..end).map(move |i| Slot::Vacant {
        next: (i + 1 < end).then_some(i + 1),
    })
}

impl<T> PoolAllocator<T> {
    /// Create an empty pool with the given geometry.
    ///
    /// # Panics
    ///
    /// Contract error if the geometry's stride differs from
    /// [`PoolConfig::stride_of`] or its alignment is weaker than `T`'s.
    pub fn new(config: PoolConfig) -> Self {
        contract_error!(
            config.stride() == PoolConfig::stride_of::<T>(),
            "stride {} does not match the slot type ({} bytes)",
            config.stride(),
            PoolConfig::stride_of::<T>()
        );
        contract_error!(
            config.alignment() >= Alignment::of::<T>(),
            "alignment {} is weaker than the slot type's {}",
            config.alignment(),
            Alignment::of::<T>()
        );
        let capacity = config.slots();
        Self {
            slots: vacant_run(0, capacity).collect(),
            free_head: Some(0),
            free_tail: Some(capacity - 1),
            allocated: 0,
            config,
        }
    }

    /// An empty pool of `slots` slots sized for `T`.
    pub fn with_capacity(slots: usize) -> Self {
        Self::new(PoolConfig::for_slots::<T>(slots))
    }

    /// Move `value` into the slot at the head of the free chain and return
    /// that slot's index.
    ///
    /// On [`AllocError::Exhausted`] the value is dropped; callers check
    /// [`can_allocate`](Self::can_allocate) or grow the pool first.
    pub fn allocate(&mut self, value: T) -> Result<usize, AllocError> {
        let Some(index) = self.free_head else {
            return Err(AllocError::Exhausted {
                capacity: self.capacity(),
            });
        };
        let next = match self.slots[index] {
            Slot::Vacant { next } => next,
            Slot::Occupied(_) => unreachable!("free chain points at occupied slot {index}"),
        };
        self.slots[index] = Slot::Occupied(value);
        self.free_head = next;
        if next.is_none() {
            self.free_tail = None;
        }
        self.allocated += 1;
        Ok(index)
    }

    /// Release the slot at `index`, handing its value back to the caller.
    ///
    /// The slot goes to the head of the free chain, so it is the next one
    /// [`allocate`](Self::allocate) returns.
    ///
    /// # Panics
    ///
    /// Contract error if `index` is out of range or the slot is vacant.
    pub fn deallocate(&mut self, index: usize) -> T {
        contract_error!(
            self.is_occupied(index),
            "slot {index} was not provided by this pool or is already free"
        );
        let old = mem::replace(
            &mut self.slots[index],
            Slot::Vacant {
                next: self.free_head,
            },
        );
        if self.free_head.is_none() {
            self.free_tail = Some(index);
        }
        self.free_head = Some(index);
        self.allocated -= 1;
        match old {
            Slot::Occupied(value) => value,
            Slot::Vacant { .. } => unreachable!("slot {index} checked occupied"),
        }
    }

    /// Grow the pool to `new_pool_size` bytes.
    ///
    /// Existing slots keep their index and contents; the new slots are
    /// appended to the tail of the free chain. A size that does not grow
    /// the pool is a contract warning and leaves it untouched.
    pub fn reallocate(&mut self, new_pool_size: usize) {
        let old_capacity = self.capacity();
        let new_capacity = new_pool_size / self.stride();
        if !contract_warning!(
            new_capacity > old_capacity,
            "the new size ({new_pool_size} bytes) must be greater than the current pool size ({} bytes)",
            self.pool_size()
        ) {
            return;
        }
        self.slots.extend(vacant_run(old_capacity, new_capacity));
        self.link_to_free_tail(old_capacity);
        self.free_tail = Some(new_capacity - 1);
        self.config = self.config.resized(new_capacity);
        log::trace!("pool grew from {old_capacity} to {new_capacity} slots");
    }

    /// Grow to hold at least `slots` slots, if it does not already.
    pub fn reserve_slots(&mut self, slots: usize) {
        if slots > self.capacity() {
            self.reallocate(slots * self.stride());
        }
    }

    /// Drop every value and return all slots to the free chain in
    /// ascending order.
    pub fn clear(&mut self) {
        let capacity = self.capacity();
        self.slots.clear();
        self.slots.extend(vacant_run(0, capacity));
        self.free_head = Some(0);
        self.free_tail = Some(capacity - 1);
        self.allocated = 0;
    }

    /// Whether a slot is free.
    pub fn can_allocate(&self) -> bool {
        self.free_head.is_some()
    }

    /// Whether `index` holds a value.
    pub fn is_occupied(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Slot::Occupied(_)))
    }

    /// The value at `index`, if occupied.
    pub fn get(&self, index: usize) -> Option<&T> {
        match self.slots.get(index)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// Mutable access to the value at `index`, if occupied.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        match self.slots.get_mut(index)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// Exchange the values stored in two occupied slots.
    ///
    /// # Panics
    ///
    /// Contract error if either slot is vacant.
    pub fn swap(&mut self, a: usize, b: usize) {
        contract_error!(
            self.is_occupied(a) && self.is_occupied(b),
            "cannot swap slots {a} and {b}: both must be occupied"
        );
        self.slots.swap(a, b);
    }

    /// Occupied slots in ascending slot order, with their index.
    pub fn occupied(&self) -> impl DoubleEndedIterator<Item = (usize, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| match slot {
            Slot::Occupied(value) => Some((i, value)),
            Slot::Vacant { .. } => None,
        })
    }

    /// Mutable variant of [`occupied`](Self::occupied).
    pub fn occupied_mut(&mut self) -> impl DoubleEndedIterator<Item = (usize, &mut T)> + '_ {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| match slot {
                Slot::Occupied(value) => Some((i, value)),
                Slot::Vacant { .. } => None,
            })
    }

    /// Bytes held by occupied slots.
    pub fn allocated_bytes(&self) -> usize {
        self.allocated * self.stride()
    }

    /// Number of occupied slots.
    pub fn allocated_count(&self) -> usize {
        self.allocated
    }

    /// Bytes available to slots.
    pub fn pool_size(&self) -> usize {
        self.config.pool_size()
    }

    /// Bytes of backing storage, free chain bookkeeping included.
    pub fn total_size(&self) -> usize {
        self.slots.len() * mem::size_of::<Slot<T>>()
    }

    /// Bytes per slot.
    pub fn stride(&self) -> usize {
        self.config.stride()
    }

    /// Slot alignment.
    pub fn alignment(&self) -> Alignment {
        self.config.alignment()
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Current geometry.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Attach the run starting at `start` after the current free tail.
    fn link_to_free_tail(&mut self, start: usize) {
        match self.free_tail {
            Some(tail) => {
                self.slots[tail] = Slot::Vacant { next: Some(start) };
            }
            None => self.free_head = Some(start),
        }
    }
}

impl<T: Clone> PoolAllocator<T> {
    /// Copy this pool's slots, free chain and byte count into `dest`.
    ///
    /// `dest` keeps its own capacity; slots it has beyond this pool's
    /// capacity become vacant and join the end of the copied free chain.
    /// Values previously held by `dest` are dropped.
    ///
    /// # Panics
    ///
    /// Contract error if `dest` has fewer slots than this pool, or a
    /// different stride.
    pub fn copy_to(&self, dest: &mut PoolAllocator<T>) {
        contract_error!(
            dest.capacity() >= self.capacity(),
            "destination pool has {} slots, source has {}",
            dest.capacity(),
            self.capacity()
        );
        contract_error!(
            dest.stride() == self.stride(),
            "strides of source ({}) and destination ({}) pools must be equal",
            self.stride(),
            dest.stride()
        );
        let capacity = self.capacity();
        let dest_capacity = dest.capacity();
        dest.slots.clear();
        dest.slots.extend(self.slots.iter().cloned());
        dest.free_head = self.free_head;
        dest.free_tail = self.free_tail;
        if dest_capacity > capacity {
            dest.slots.extend(vacant_run(capacity, dest_capacity));
            dest.link_to_free_tail(capacity);
            dest.free_tail = Some(dest_capacity - 1);
        }
        dest.allocated = self.allocated;
        log::trace!("copied {capacity} slots into a pool of {dest_capacity}");
    }
}

impl<T> SlotAllocator<T> for PoolAllocator<T> {
    fn from_config(config: PoolConfig) -> Self {
        Self::new(config)
    }

    fn allocate(&mut self, value: T) -> Result<usize, AllocError> {
        PoolAllocator::allocate(self, value)
    }

    fn deallocate(&mut self, index: usize) -> T {
        PoolAllocator::deallocate(self, index)
    }

    fn reallocate(&mut self, new_pool_size: usize) {
        PoolAllocator::reallocate(self, new_pool_size);
    }

    fn reserve_slots(&mut self, slots: usize) {
        PoolAllocator::reserve_slots(self, slots);
    }

    fn clear(&mut self) {
        PoolAllocator::clear(self);
    }

    fn can_allocate(&self) -> bool {
        PoolAllocator::can_allocate(self)
    }

    fn is_occupied(&self, index: usize) -> bool {
        PoolAllocator::is_occupied(self, index)
    }

    fn get(&self, index: usize) -> Option<&T> {
        PoolAllocator::get(self, index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        PoolAllocator::get_mut(self, index)
    }

    fn swap(&mut self, a: usize, b: usize) {
        PoolAllocator::swap(self, a, b);
    }

    fn occupied_mut(&mut self) -> Box<dyn DoubleEndedIterator<Item = (usize, &mut T)> + '_> {
        Box::new(PoolAllocator::occupied_mut(self))
    }

    fn allocated_count(&self) -> usize {
        self.allocated
    }

    fn config(&self) -> &PoolConfig {
        &self.config
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn copy_to(&self, dest: &mut Self)
    where
        T: Clone,
    {
        PoolAllocator::copy_to(self, dest);
    }
}

impl<T: fmt::Debug> fmt::Debug for PoolAllocator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolAllocator")
            .field("capacity", &self.capacity())
            .field("allocated", &self.allocated)
            .field("stride", &self.stride())
            .field("occupied", &self.occupied().collect::<Vec<_>>())
            .finish()
    }
}
