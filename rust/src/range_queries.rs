//! Range query operations for BTree.
//!
//! A range is resolved to a starting cursor position with [`Cursor::seek`];
//! the end bound is checked lazily as the cursor advances.

use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::ops::{Bound, RangeBounds};

use crate::comparator::Comparator;
use crate::iteration::Cursor;
use crate::types::{BTree, Entry};

/// Iterator over the key-value pairs whose keys fall inside a range.
pub struct RangeIterator<'a, K, V, C> {
    cursor: Cursor<'a, K, V, C>,
    end: Bound<K>,
}

// ============================================================================
// RANGE QUERY OPERATIONS
// ============================================================================

impl<K: Clone, V, C: Comparator<K>> BTree<K, V, C> {
    /// Returns an iterator over key-value pairs in a range using Rust's range syntax.
    ///
    /// Bounds are compared with the tree's comparator. A range whose start
    /// lies after its end is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use mwaytree::BTree;
    ///
    /// let mut tree = BTree::new(4).unwrap();
    /// for i in 0..10 {
    ///     tree.put(i, format!("value{}", i));
    /// }
    ///
    /// let keys: Vec<_> = tree.range(3..7).map(|(k, _)| *k).collect();
    /// assert_eq!(keys, vec![3, 4, 5, 6]);
    ///
    /// let keys: Vec<_> = tree.range(3..=7).map(|(k, _)| *k).collect();
    /// assert_eq!(keys, vec![3, 4, 5, 6, 7]);
    ///
    /// let keys: Vec<_> = tree.range(..2).map(|(k, _)| *k).collect();
    /// assert_eq!(keys, vec![0, 1]);
    ///
    /// assert_eq!(tree.range(..).count(), 10);
    /// ```
    pub fn range<R>(&self, range: R) -> RangeIterator<'_, K, V, C>
    where
        R: RangeBounds<K>,
    {
        let mut cursor = self.cursor();
        match range.start_bound() {
            Bound::Unbounded => {
                cursor.first();
            }
            Bound::Included(start) => {
                cursor.seek(start);
            }
            Bound::Excluded(start) => {
                if cursor.seek(start)
                    && cursor
                        .key()
                        .is_some_and(|k| self.comparator.compare(k, start) == Ordering::Equal)
                {
                    cursor.next();
                }
            }
        }

        RangeIterator {
            cursor,
            end: range.end_bound().cloned(),
        }
    }
}

impl<'a, K, V, C: Comparator<K>> RangeIterator<'a, K, V, C> {
    fn within_end(&self, entry: &Entry<K, V>) -> bool {
        let comparator = self.cursor.tree().comparator();
        match &self.end {
            Bound::Unbounded => true,
            Bound::Included(end) => comparator.compare(&entry.key, end) != Ordering::Greater,
            Bound::Excluded(end) => comparator.compare(&entry.key, end) == Ordering::Less,
        }
    }
}

impl<'a, K, V, C: Comparator<K>> Iterator for RangeIterator<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor.entry()?;
        if !self.within_end(entry) {
            self.cursor.end();
            return None;
        }
        self.cursor.next();
        Some(entry.as_pair())
    }
}

impl<'a, K, V, C: Comparator<K>> FusedIterator for RangeIterator<'a, K, V, C> {}
