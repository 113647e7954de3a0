//! Pool geometry.

use quimera_core::{contract, contract_error};

use crate::alignment::Alignment;
use crate::error::AllocError;

/// Geometry of a [`PoolAllocator`](crate::PoolAllocator).
///
/// Validated at construction; all values are immutable after creation.
/// The pool size is always a non-zero multiple of the stride, and the
/// stride is always a multiple of the alignment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    pool_size: usize,
    stride: usize,
    alignment: Alignment,
}

impl PoolConfig {
    /// Slot count used by containers built without an explicit capacity.
    pub const DEFAULT_CAPACITY: usize = 1;

    /// Growth multiplier applied to the required capacity when a container
    /// runs out of slots.
    pub const REALLOCATION_FACTOR: f64 = 1.5;

    /// Create a pool geometry of `pool_size` bytes split into `stride`-byte
    /// slots aligned to `alignment`.
    pub fn new(pool_size: usize, stride: usize, alignment: Alignment) -> Result<Self, AllocError> {
        if stride == 0 {
            return Err(AllocError::InvalidConfig {
                reason: "stride cannot be zero".into(),
            });
        }
        if pool_size == 0 {
            return Err(AllocError::InvalidConfig {
                reason: "pool size cannot be zero".into(),
            });
        }
        if pool_size % stride != 0 {
            return Err(AllocError::InvalidConfig {
                reason: format!("pool size {pool_size} is not a multiple of stride {stride}"),
            });
        }
        if !alignment.divides(stride) {
            return Err(AllocError::InvalidConfig {
                reason: format!("stride {stride} is not a multiple of alignment {alignment}"),
            });
        }
        Ok(Self {
            pool_size,
            stride,
            alignment,
        })
    }

    /// Geometry for `slots` values of type `T`.
    ///
    /// # Panics
    ///
    /// Contract error if `slots` is zero or the pool size overflows `usize`.
    pub fn for_slots<T>(slots: usize) -> Self {
        contract_error!(slots > 0, "a pool needs at least one slot");
        let stride = Self::stride_of::<T>();
        let Some(pool_size) = slots.checked_mul(stride) else {
            contract::error(
                "slots.checked_mul(stride).is_some()",
                format_args!("{slots} slots of {stride} bytes overflow the addressable size"),
            );
        };
        Self {
            pool_size,
            stride,
            alignment: Alignment::of::<T>(),
        }
    }

    /// Bytes per slot for `T`, rounded up to `T`'s alignment. Zero-sized
    /// types still take one alignment unit so that byte counts keep
    /// tracking the number of occupied slots.
    pub fn stride_of<T>() -> usize {
        Alignment::of::<T>().align_up(std::mem::size_of::<T>().max(1))
    }

    /// Capacity after growing to hold at least `required` slots:
    /// `floor(required * REALLOCATION_FACTOR)`.
    pub fn grown_capacity(required: usize) -> usize {
        let grown = (required as f64 * Self::REALLOCATION_FACTOR) as usize;
        grown.max(required)
    }

    /// Total pool size in bytes.
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Bytes per slot.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Slot alignment.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Number of slots.
    pub fn slots(&self) -> usize {
        self.pool_size / self.stride
    }

    /// Same stride and alignment, `slots` slots.
    pub(crate) fn resized(&self, slots: usize) -> Self {
        Self {
            pool_size: slots * self.stride,
            ..self.clone()
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::for_slots::<u8>(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_slots_derives_geometry() {
        let config = PoolConfig::for_slots::<u64>(4);
        assert_eq!(config.stride(), 8);
        assert_eq!(config.pool_size(), 32);
        assert_eq!(config.slots(), 4);
        assert_eq!(config.alignment(), Alignment::of::<u64>());
    }

    #[test]
    fn zero_sized_types_take_one_byte() {
        let config = PoolConfig::for_slots::<()>(3);
        assert_eq!(config.stride(), 1);
        assert_eq!(config.pool_size(), 3);
    }

    #[test]
    fn empty_over_aligned_types_take_one_alignment_unit() {
        let config = PoolConfig::for_slots::<[u64; 0]>(2);
        assert_eq!(config.stride(), std::mem::align_of::<u64>());
        assert!(config.alignment().divides(config.stride()));
    }

    #[test]
    #[should_panic(expected = "overflow the addressable size")]
    fn overflowing_pool_size_is_a_contract_error() {
        let _ = PoolConfig::for_slots::<u64>(usize::MAX);
    }

    #[test]
    fn growth_by_factor() {
        assert_eq!(PoolConfig::grown_capacity(3), 4);
        assert_eq!(PoolConfig::grown_capacity(2), 3);
        assert_eq!(PoolConfig::grown_capacity(10), 15);
        assert_eq!(PoolConfig::grown_capacity(1), 1);
    }

    #[test]
    fn new_rejects_bad_geometry() {
        let four = Alignment::new(4).unwrap();
        assert!(PoolConfig::new(0, 4, four).is_err());
        assert!(PoolConfig::new(16, 0, four).is_err());
        assert!(PoolConfig::new(10, 4, four).is_err());
        assert!(PoolConfig::new(12, 6, four).is_err());
        let ok = PoolConfig::new(16, 4, four).unwrap();
        assert_eq!(ok.slots(), 4);
    }

    #[test]
    #[should_panic(expected = "at least one slot")]
    fn zero_slots_is_a_contract_error() {
        let _ = PoolConfig::for_slots::<u32>(0);
    }

    #[test]
    fn default_is_single_byte_slot() {
        let config = PoolConfig::default();
        assert_eq!(config.slots(), PoolConfig::DEFAULT_CAPACITY);
    }
}
