//! Three-way comparison capability injected into containers.

use std::cmp::Ordering;

/// Orders two values of `T`.
///
/// Containers use the comparator for equality, `contains`, `index_of` and
/// `position_of`. Any `Fn(&T, &T) -> Ordering` closure is a comparator.
pub trait Comparator<T: ?Sized> {
    /// Three-way comparison of `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// `compare(a, b) == Ordering::Equal`.
    fn equals(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

/// Comparator built from `PartialEq` and `PartialOrd`.
///
/// Returns `Less` if `a < b`, `Equal` if `a == b`, and `Greater`
/// otherwise, so incomparable values (a `NaN`) never compare equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DefaultComparator;

impl<T: PartialOrd + ?Sized> Comparator<T> for DefaultComparator {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        if a < b {
            Ordering::Less
        } else if a == b {
            Ordering::Equal
        } else {
            Ordering::Greater
        }
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
