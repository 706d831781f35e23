//! Key ordering used by the tree.
//!
//! A tree is built with one comparator and keeps it for its whole lifetime;
//! every structural invariant is expressed in terms of that order.

use std::cmp::Ordering;

/// A strict total order over keys of type `K`.
///
/// Implemented by [`NaturalOrder`], [`ReverseOrder`] and by any closure
/// `Fn(&K, &K) -> Ordering`.
pub trait Comparator<K: ?Sized> {
    /// Compare two keys.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

/// Orders keys by the reverse of their `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReverseOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: Ord + ?Sized> Comparator<K> for ReverseOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
