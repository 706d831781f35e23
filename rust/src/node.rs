//! Entry and node primitives.
//!
//! Nodes only know how to search and edit their own entry and child vectors.
//! Anything that touches more than one node (splits, rotations, merges) lives
//! on the tree, which owns the arena.

use crate::comparator::Comparator;
use crate::types::{Entry, Node, NodeId, SearchResult};

// ============================================================================
// ENTRY IMPLEMENTATION
// ============================================================================

impl<K, V> Entry<K, V> {
    /// Creates a new entry.
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Returns the key of this entry.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value of this entry.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the key and value as a borrowed pair.
    pub fn as_pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// Consumes the entry, returning key and value.
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Swap in a new value, returning the previous one.
    pub(crate) fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }
}

// ============================================================================
// NODE IMPLEMENTATION
// ============================================================================

impl<K, V> Node<K, V> {
    /// Creates a node from its parts.
    pub(crate) fn new(
        parent: Option<NodeId>,
        entries: Vec<Entry<K, V>>,
        children: Vec<NodeId>,
    ) -> Self {
        Self {
            parent,
            entries,
            children,
        }
    }

    /// Creates a leaf holding exactly one entry.
    pub(crate) fn singleton(entry: Entry<K, V>) -> Self {
        Self::new(None, vec![entry], Vec::new())
    }

    /// Returns true if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns true if this node has no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns the parent ID, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the number of entries in this node.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if this node holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries of this node.
    pub fn entries(&self) -> &[Entry<K, V>] {
        &self.entries
    }

    /// Returns the child IDs of this node.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the key at the given index.
    #[inline]
    pub fn key(&self, index: usize) -> &K {
        &self.entries[index].key
    }

    /// Returns the child at the given slot.
    #[inline]
    pub fn child(&self, slot: usize) -> NodeId {
        self.children[slot]
    }

    /// Returns the last child ID. Panics on a leaf.
    #[inline]
    pub(crate) fn last_child(&self) -> NodeId {
        self.children[self.children.len() - 1]
    }

    /// Binary-search the entries of this node for `key`.
    pub fn search<C: Comparator<K>>(&self, key: &K, comparator: &C) -> SearchResult {
        match self
            .entries
            .binary_search_by(|entry| comparator.compare(&entry.key, key))
        {
            Ok(index) => SearchResult::Found(index),
            Err(index) => SearchResult::GoDown(index),
        }
    }

    /// Insert an entry at the given index.
    pub(crate) fn insert_entry(&mut self, index: usize, entry: Entry<K, V>) {
        self.entries.insert(index, entry);
    }

    /// Remove and return the entry at the given index.
    pub(crate) fn remove_entry(&mut self, index: usize) -> Entry<K, V> {
        self.entries.remove(index)
    }

    /// Insert a child ID at the given slot.
    pub(crate) fn insert_child(&mut self, slot: usize, child: NodeId) {
        self.children.insert(slot, child);
    }

    /// Remove and return the child ID at the given slot.
    pub(crate) fn remove_child(&mut self, slot: usize) -> NodeId {
        self.children.remove(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::{NaturalOrder, ReverseOrder};

    fn leaf(keys: &[i32]) -> Node<i32, ()> {
        Node::new(
            None,
            keys.iter().map(|&k| Entry::new(k, ())).collect(),
            Vec::new(),
        )
    }

    #[test]
    fn test_search_found_and_go_down() {
        let node = leaf(&[10, 20, 30]);
        assert_eq!(node.search(&20, &NaturalOrder), SearchResult::Found(1));
        assert_eq!(node.search(&5, &NaturalOrder), SearchResult::GoDown(0));
        assert_eq!(node.search(&25, &NaturalOrder), SearchResult::GoDown(2));
        assert_eq!(node.search(&35, &NaturalOrder), SearchResult::GoDown(3));
    }

    #[test]
    fn test_search_respects_comparator() {
        let node = leaf(&[30, 20, 10]);
        assert_eq!(node.search(&10, &ReverseOrder), SearchResult::Found(2));
        assert_eq!(node.search(&25, &ReverseOrder), SearchResult::GoDown(1));
    }

    #[test]
    fn test_search_empty_node() {
        let node = leaf(&[]);
        assert!(node.is_empty());
        assert_eq!(node.search(&1, &NaturalOrder), SearchResult::GoDown(0));
    }

    #[test]
    fn test_entry_edits() {
        let mut node = leaf(&[1, 3]);
        node.insert_entry(1, Entry::new(2, ()));
        assert_eq!(node.len(), 3);
        assert_eq!(*node.key(1), 2);
        let removed = node.remove_entry(0);
        assert_eq!(removed.into_pair(), (1, ()));
        assert_eq!(*node.key(0), 2);
        assert!(node.is_leaf());
        assert!(node.is_root());
    }

    #[test]
    fn test_entry_replace_value() {
        let mut entry = Entry::new("k", 1);
        assert_eq!(entry.replace_value(2), 1);
        assert_eq!(entry.as_pair(), (&"k", &2));
    }
}
