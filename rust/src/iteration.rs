//! Iterator implementations for BTree.
//!
//! [`Cursor`] is the stateful, bidirectional walker: it remembers a single
//! (node, entry index) position and reaches neighbouring entries by stepping
//! into children or climbing parent links. It keeps no stack, so a step costs
//! O(log n) in the worst case and O(1) amortized over a full traversal.
//!
//! [`ItemIterator`], [`KeyIterator`] and [`ValueIterator`] adapt a pair of
//! cursors to the standard iterator traits.

use std::iter::FusedIterator;

use crate::comparator::Comparator;
use crate::types::{BTree, Entry, Location, SearchResult};

// ============================================================================
// CURSOR
// ============================================================================

/// Where a cursor currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Before the first entry.
    Begin,
    /// On an entry.
    Between(Location),
    /// After the last entry.
    End,
}

/// A bidirectional cursor over the entries of a [`BTree`].
///
/// A fresh cursor stands before the first entry. [`next`](Cursor::next) and
/// [`prev`](Cursor::prev) move it one entry and report whether it landed on
/// one; running off either end parks it before-first or after-last.
///
/// # Examples
///
/// ```
/// use mwaytree::BTree;
///
/// let mut tree = BTree::new(3).unwrap();
/// for i in 1..=5 {
///     tree.put(i, i * 10);
/// }
///
/// let mut cursor = tree.cursor();
/// assert!(cursor.next());
/// assert_eq!(cursor.key(), Some(&1));
/// assert!(cursor.last());
/// assert_eq!(cursor.value(), Some(&50));
/// assert!(cursor.prev());
/// assert_eq!(cursor.key(), Some(&4));
/// cursor.end();
/// assert!(cursor.key().is_none());
/// ```
pub struct Cursor<'a, K, V, C> {
    tree: &'a BTree<K, V, C>,
    position: Position,
}

impl<'a, K, V, C> Clone for Cursor<'a, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            position: self.position,
        }
    }
}

impl<'a, K, V, C: Comparator<K>> Cursor<'a, K, V, C> {
    pub(crate) fn new(tree: &'a BTree<K, V, C>) -> Self {
        Self {
            tree,
            position: Position::Begin,
        }
    }

    pub(crate) fn tree(&self) -> &'a BTree<K, V, C> {
        self.tree
    }

    /// Move to the next entry. Returns false, and parks after the last
    /// entry, when there is none.
    pub fn next(&mut self) -> bool {
        let tree = self.tree;
        let found = match self.position {
            Position::End => None,
            Position::Begin => tree.root.map(|root| Location {
                node: tree.leftmost_leaf(root),
                index: 0,
            }),
            Position::Between(loc) => self.successor(loc),
        };
        match found {
            Some(loc) => {
                self.position = Position::Between(loc);
                true
            }
            None => {
                self.end();
                false
            }
        }
    }

    /// Move to the previous entry. Returns false, and parks before the
    /// first entry, when there is none.
    pub fn prev(&mut self) -> bool {
        let tree = self.tree;
        let found = match self.position {
            Position::Begin => None,
            Position::End => tree.root.map(|root| {
                let node = tree.rightmost_leaf(root);
                Location {
                    node,
                    index: tree.nodes[node].len() - 1,
                }
            }),
            Position::Between(loc) => self.predecessor(loc),
        };
        match found {
            Some(loc) => {
                self.position = Position::Between(loc);
                true
            }
            None => {
                self.begin();
                false
            }
        }
    }

    /// Park the cursor before the first entry.
    pub fn begin(&mut self) {
        self.position = Position::Begin;
    }

    /// Park the cursor after the last entry.
    pub fn end(&mut self) {
        self.position = Position::End;
    }

    /// Move to the first entry. Returns false on an empty tree.
    pub fn first(&mut self) -> bool {
        self.begin();
        self.next()
    }

    /// Move to the last entry. Returns false on an empty tree.
    pub fn last(&mut self) -> bool {
        self.end();
        self.prev()
    }

    /// Returns the entry under the cursor, `None` when parked at either end.
    pub fn entry(&self) -> Option<&'a Entry<K, V>> {
        match self.position {
            Position::Between(loc) => Some(&self.tree.nodes[loc.node].entries[loc.index]),
            Position::Begin | Position::End => None,
        }
    }

    /// Returns the key under the cursor.
    pub fn key(&self) -> Option<&'a K> {
        self.entry().map(Entry::key)
    }

    /// Returns the value under the cursor.
    pub fn value(&self) -> Option<&'a V> {
        self.entry().map(Entry::value)
    }

    /// Returns true while the cursor is parked before the first entry.
    pub fn is_before_first(&self) -> bool {
        self.position == Position::Begin
    }

    /// Returns true while the cursor is parked after the last entry.
    pub fn is_after_last(&self) -> bool {
        self.position == Position::End
    }

    /// Position the cursor on the first entry whose key is not less than
    /// `key`, or park it after the last entry if there is none.
    pub fn seek(&mut self, key: &K) -> bool {
        let tree = self.tree;
        let Some(mut current) = tree.root else {
            self.end();
            return false;
        };
        loop {
            let node = &tree.nodes[current];
            match node.search(key, &tree.comparator) {
                SearchResult::Found(index) => {
                    self.position = Position::Between(Location {
                        node: current,
                        index,
                    });
                    return true;
                }
                SearchResult::GoDown(index) if node.is_leaf() => {
                    if index < node.len() {
                        self.position = Position::Between(Location {
                            node: current,
                            index,
                        });
                        return true;
                    }
                    // Every key here is smaller; the answer is the in-order
                    // successor of the leaf's last entry.
                    self.position = Position::Between(Location {
                        node: current,
                        index: node.len() - 1,
                    });
                    return self.next();
                }
                SearchResult::GoDown(slot) => current = node.child(slot),
            }
        }
    }

    fn successor(&self, loc: Location) -> Option<Location> {
        let nodes = &self.tree.nodes;
        let node = &nodes[loc.node];

        if !node.is_leaf() {
            return Some(Location {
                node: self.tree.leftmost_leaf(node.child(loc.index + 1)),
                index: 0,
            });
        }
        if loc.index + 1 < node.len() {
            return Some(Location {
                node: loc.node,
                index: loc.index + 1,
            });
        }

        let key = node.key(loc.index);
        let mut current = node.parent;
        while let Some(ancestor) = current {
            let ancestor_node = &nodes[ancestor];
            if let SearchResult::GoDown(slot) = ancestor_node.search(key, &self.tree.comparator) {
                if slot < ancestor_node.len() {
                    return Some(Location {
                        node: ancestor,
                        index: slot,
                    });
                }
            }
            current = ancestor_node.parent;
        }
        None
    }

    fn predecessor(&self, loc: Location) -> Option<Location> {
        let nodes = &self.tree.nodes;
        let node = &nodes[loc.node];

        if !node.is_leaf() {
            let leaf = self.tree.rightmost_leaf(node.child(loc.index));
            return Some(Location {
                node: leaf,
                index: nodes[leaf].len() - 1,
            });
        }
        if loc.index > 0 {
            return Some(Location {
                node: loc.node,
                index: loc.index - 1,
            });
        }

        let key = node.key(loc.index);
        let mut current = node.parent;
        while let Some(ancestor) = current {
            let ancestor_node = &nodes[ancestor];
            if let SearchResult::GoDown(slot) = ancestor_node.search(key, &self.tree.comparator) {
                if slot > 0 {
                    return Some(Location {
                        node: ancestor,
                        index: slot - 1,
                    });
                }
            }
            current = ancestor_node.parent;
        }
        None
    }
}

// ============================================================================
// ITERATOR STRUCTS
// ============================================================================

/// Iterator over key-value pairs in ascending key order.
pub struct ItemIterator<'a, K, V, C> {
    front: Cursor<'a, K, V, C>,
    back: Cursor<'a, K, V, C>,
    remaining: usize,
}

/// Iterator over keys in ascending order.
pub struct KeyIterator<'a, K, V, C> {
    items: ItemIterator<'a, K, V, C>,
}

/// Iterator over values in key order.
pub struct ValueIterator<'a, K, V, C> {
    items: ItemIterator<'a, K, V, C>,
}

// ============================================================================
// BTREE ITERATOR METHODS
// ============================================================================

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    /// Returns a cursor parked before the first entry.
    pub fn cursor(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self)
    }

    /// Returns an iterator over all key-value pairs in sorted order.
    pub fn iter(&self) -> ItemIterator<'_, K, V, C> {
        let mut back = Cursor::new(self);
        back.end();
        ItemIterator {
            front: Cursor::new(self),
            back,
            remaining: self.len,
        }
    }

    /// Returns an iterator over all keys in sorted order.
    pub fn keys(&self) -> KeyIterator<'_, K, V, C> {
        KeyIterator { items: self.iter() }
    }

    /// Returns an iterator over all values in key order.
    pub fn values(&self) -> ValueIterator<'_, K, V, C> {
        ValueIterator { items: self.iter() }
    }
}

// ============================================================================
// ITERATOR TRAIT IMPLEMENTATIONS
// ============================================================================

impl<'a, K, V, C: Comparator<K>> Iterator for ItemIterator<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.front.next();
        self.remaining -= 1;
        self.front.entry().map(Entry::as_pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, C: Comparator<K>> DoubleEndedIterator for ItemIterator<'a, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back.prev();
        self.remaining -= 1;
        self.back.entry().map(Entry::as_pair)
    }
}

impl<'a, K, V, C: Comparator<K>> ExactSizeIterator for ItemIterator<'a, K, V, C> {}

impl<'a, K, V, C: Comparator<K>> FusedIterator for ItemIterator<'a, K, V, C> {}

impl<'a, K, V, C: Comparator<K>> Iterator for KeyIterator<'a, K, V, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<'a, K, V, C: Comparator<K>> DoubleEndedIterator for KeyIterator<'a, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items.next_back().map(|(k, _)| k)
    }
}

impl<'a, K, V, C: Comparator<K>> ExactSizeIterator for KeyIterator<'a, K, V, C> {}

impl<'a, K, V, C: Comparator<K>> Iterator for ValueIterator<'a, K, V, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<'a, K, V, C: Comparator<K>> DoubleEndedIterator for ValueIterator<'a, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items.next_back().map(|(_, v)| v)
    }
}

impl<'a, K, V, C: Comparator<K>> ExactSizeIterator for ValueIterator<'a, K, V, C> {}

impl<'a, K, V, C: Comparator<K>> IntoIterator for &'a BTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = ItemIterator<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
