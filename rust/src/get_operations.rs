//! GET operations for BTree.
//!
//! This module contains the read operations for the B-tree: key lookup,
//! value retrieval and the descent helper shared with removal.

use crate::comparator::Comparator;
use crate::error::{BTreeError, BTreeResult, KeyResult};
use crate::types::{BTree, Location, SearchResult};

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    // ============================================================================
    // PUBLIC GET OPERATIONS
    // ============================================================================

    /// Get a reference to the value associated with a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use mwaytree::BTree;
    ///
    /// let mut tree = BTree::new(3).unwrap();
    /// tree.put(1, "one");
    /// assert_eq!(tree.get(&1), Some(&"one"));
    /// assert_eq!(tree.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.locate(key)
            .map(|loc| &self.nodes[loc.node].entries[loc.index].value)
    }

    /// Check if key exists in the tree.
    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).is_some()
    }

    /// Get the stored key/value pair for a key.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.locate(key)
            .map(|loc| self.nodes[loc.node].entries[loc.index].as_pair())
    }

    /// Get value for a key, returning an error if the key doesn't exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use mwaytree::BTree;
    ///
    /// let mut tree = BTree::new(3).unwrap();
    /// tree.put(1, "one");
    /// assert_eq!(tree.get_item(&1).unwrap(), &"one");
    /// assert!(tree.get_item(&2).is_err());
    /// ```
    pub fn get_item(&self, key: &K) -> KeyResult<&V> {
        self.get(key).ok_or(BTreeError::KeyNotFound)
    }

    /// Get a mutable reference to the value for a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use mwaytree::BTree;
    ///
    /// let mut tree = BTree::new(3).unwrap();
    /// tree.put(1, "one");
    /// if let Some(value) = tree.get_mut(&1) {
    ///     *value = "ONE";
    /// }
    /// assert_eq!(tree.get(&1), Some(&"ONE"));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let loc = self.locate(key)?;
        Some(&mut self.nodes[loc.node].entries[loc.index].value)
    }

    /// Get multiple keys, failing if any of them is missing.
    pub fn get_many(&self, keys: &[K]) -> BTreeResult<Vec<&V>> {
        keys.iter()
            .map(|key| self.get(key).ok_or(BTreeError::KeyNotFound))
            .collect()
    }

    // ============================================================================
    // SEARCH HELPERS
    // ============================================================================

    /// Descend from the root looking for `key`.
    pub(crate) fn locate(&self, key: &K) -> Option<Location> {
        let mut current = self.root?;
        loop {
            let node = &self.nodes[current];
            match node.search(key, &self.comparator) {
                SearchResult::Found(index) => {
                    return Some(Location {
                        node: current,
                        index,
                    })
                }
                SearchResult::GoDown(_) if node.is_leaf() => return None,
                SearchResult::GoDown(slot) => current = node.child(slot),
            }
        }
    }
}
