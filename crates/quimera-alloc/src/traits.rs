//! The slot allocation capability the containers are written against.

use crate::alignment::Alignment;
use crate::config::PoolConfig;
use crate::error::AllocError;

/// Index-addressed slot allocation.
///
/// An allocator owns a run of equally sized slots, built from a
/// [`PoolConfig`], and decides which slot each value lands in. Containers
/// keep their topology as slot indices, so implementations must keep slot
/// `i` at index `i` for as long as it is occupied, growth included.
///
/// A fresh or cleared allocator hands out slots `0, 1, 2, ...` in order.
/// Containers that use the slot index as the element's ordinal rely on it.
///
/// [`PoolAllocator`](crate::PoolAllocator) is the implementation every
/// container uses by default.
pub trait SlotAllocator<T> {
    /// An empty allocator with the given geometry.
    fn from_config(config: PoolConfig) -> Self
    where
        Self: Sized;

    /// An empty allocator of `slots` slots sized for `T`.
    fn with_slots(slots: usize) -> Self
    where
        Self: Sized,
    {
        Self::from_config(PoolConfig::for_slots::<T>(slots))
    }

    /// Move `value` into a free slot and return that slot's index.
    fn allocate(&mut self, value: T) -> Result<usize, AllocError>;

    /// Release the slot at `index`, handing its value back.
    fn deallocate(&mut self, index: usize) -> T;

    /// Grow to `new_pool_size` bytes, keeping every occupied slot where it is.
    fn reallocate(&mut self, new_pool_size: usize);

    /// Grow to hold at least `slots` slots, if it does not already.
    fn reserve_slots(&mut self, slots: usize) {
        if slots > self.capacity() {
            self.reallocate(slots * self.stride());
        }
    }

    /// Drop every value and free every slot. Capacity is unchanged.
    fn clear(&mut self);

    /// Whether a slot is free.
    fn can_allocate(&self) -> bool;

    /// Whether `index` holds a value.
    fn is_occupied(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// The value at `index`, if occupied.
    fn get(&self, index: usize) -> Option<&T>;

    /// Mutable access to the value at `index`, if occupied.
    fn get_mut(&mut self, index: usize) -> Option<&mut T>;

    /// Exchange the values stored in two occupied slots.
    fn swap(&mut self, a: usize, b: usize);

    /// Occupied slots in ascending slot order, with their index.
    fn occupied_mut(&mut self) -> Box<dyn DoubleEndedIterator<Item = (usize, &mut T)> + '_>;

    /// Number of occupied slots.
    fn allocated_count(&self) -> usize;

    /// Bytes held by occupied slots.
    fn allocated_bytes(&self) -> usize {
        self.allocated_count() * self.stride()
    }

    /// Current geometry.
    fn config(&self) -> &PoolConfig;

    /// Bytes available to slots.
    fn pool_size(&self) -> usize {
        self.config().pool_size()
    }

    /// Bytes per slot.
    fn stride(&self) -> usize {
        self.config().stride()
    }

    /// Slot alignment.
    fn alignment(&self) -> Alignment {
        self.config().alignment()
    }

    /// Number of slots.
    fn capacity(&self) -> usize {
        self.config().slots()
    }

    /// Copy every slot, the free slots included, into `dest`.
    fn copy_to(&self, dest: &mut Self)
    where
        Self: Sized,
        T: Clone;
}
