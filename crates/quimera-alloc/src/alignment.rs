//! Power-of-two alignment newtype.

use std::fmt;
use std::num::NonZeroUsize;

/// A byte alignment, always a power of two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Alignment(NonZeroUsize);

impl Alignment {
    /// Alignment of one byte.
    pub const BYTE: Self = Self(NonZeroUsize::MIN);

    /// `bytes` as an alignment, or `None` if it is not a power of two.
    pub fn new(bytes: usize) -> Option<Self> {
        if bytes.is_power_of_two() {
            NonZeroUsize::new(bytes).map(Self)
        } else {
            None
        }
    }

    /// The ABI alignment of `T`.
    pub fn of<T>() -> Self {
        // align_of is always a non-zero power of two.
        Self::new(std::mem::align_of::<T>()).unwrap_or(Self::BYTE)
    }

    /// Alignment in bytes.
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Round `size` up to the next multiple of this alignment.
    pub fn align_up(self, size: usize) -> usize {
        let mask = self.get() - 1;
        (size + mask) & !mask
    }

    /// Whether `size` is a multiple of this alignment.
    pub fn divides(self, size: usize) -> bool {
        size & (self.get() - 1) == 0
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::BYTE
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}
