//! DELETE operations for BTree.
//!
//! Removal always takes an entry out of a leaf: a key found in an internal
//! node is replaced by its in-order predecessor, which is then removed from
//! its leaf instead. Underflow is repaired bottom-up by borrowing from a
//! sibling or merging with one.
//!
//! The descent records, for every level, the parent and the child slot it went
//! through. Rebalancing consumes that path, so a node's position among its
//! siblings never has to be recovered by searching the parent for a key that
//! may already be gone.

use tracing::{debug, trace};

use crate::comparator::Comparator;
use crate::types::{BTree, Entry, NodeId, SearchResult};

/// Parent and child slot taken at each level of a descent, root first.
type DescentPath = Vec<(NodeId, usize)>;

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    /// Remove a key from the tree, returning its value if it was present.
    ///
    /// Removing an absent key is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use mwaytree::BTree;
    ///
    /// let mut tree = BTree::new(3).unwrap();
    /// tree.put(1, "one");
    /// assert_eq!(tree.remove(&1), Some("one"));
    /// assert_eq!(tree.remove(&1), None);
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let mut path = DescentPath::new();
        let mut current = self.root?;
        let index = loop {
            let node = &self.nodes[current];
            match node.search(key, &self.comparator) {
                SearchResult::Found(index) => break index,
                SearchResult::GoDown(_) if node.is_leaf() => return None,
                SearchResult::GoDown(slot) => {
                    path.push((current, slot));
                    current = node.child(slot);
                }
            }
        };

        let removed = self.delete(current, index, path);
        self.len -= 1;
        Some(removed.value)
    }

    /// Remove and return the entry at `index` of `node`, then restore
    /// occupancy along `path`.
    fn delete(&mut self, node: NodeId, index: usize, mut path: DescentPath) -> Entry<K, V> {
        if self.nodes[node].is_leaf() {
            let removed = self.nodes[node].remove_entry(index);
            self.rebalance(node, path);
            return removed;
        }

        // The predecessor is the last entry of the rightmost leaf under the
        // child left of the removed entry.
        path.push((node, index));
        let mut leaf = self.nodes[node].child(index);
        while !self.nodes[leaf].is_leaf() {
            let last_slot = self.nodes[leaf].children.len() - 1;
            path.push((leaf, last_slot));
            leaf = self.nodes[leaf].child(last_slot);
        }

        let last = self.nodes[leaf].len() - 1;
        let predecessor = self.nodes[leaf].remove_entry(last);
        let removed = std::mem::replace(&mut self.nodes[node].entries[index], predecessor);
        self.rebalance(leaf, path);
        removed
    }

    /// Restore minimum occupancy of `node`, propagating toward the root.
    fn rebalance(&mut self, mut node: NodeId, mut path: DescentPath) {
        while let Some((parent, slot)) = path.pop() {
            if self.nodes[node].len() >= self.min_entries() {
                return;
            }
            debug_assert_eq!(self.nodes[node].parent, Some(parent));

            if self.borrow_from_left(node, parent, slot) || self.borrow_from_right(node, parent, slot) {
                return;
            }

            self.merge_with_sibling(node, parent, slot);

            if self.nodes[parent].is_root() && self.nodes[parent].is_empty() {
                self.collapse_root(parent, node);
                return;
            }
            node = parent;
        }

        // `node` is the root. A leaf root may only be empty once the last
        // entry is gone.
        if self.nodes[node].is_empty() && self.nodes[node].is_leaf() {
            self.nodes.take(node);
            self.root = None;
        }
    }

    /// Rotate right: the parent's separator moves down to the front of
    /// `node` and the left sibling's last entry replaces it.
    fn borrow_from_left(&mut self, node: NodeId, parent: NodeId, slot: usize) -> bool {
        if slot == 0 {
            return false;
        }
        let left = self.nodes[parent].child(slot - 1);
        if self.nodes[left].len() <= self.min_entries() {
            return false;
        }

        let sibling = &mut self.nodes[left];
        let last = sibling.len() - 1;
        let borrowed = sibling.remove_entry(last);
        let moved_child = sibling.children.pop();

        let separator = std::mem::replace(&mut self.nodes[parent].entries[slot - 1], borrowed);
        let target = &mut self.nodes[node];
        target.insert_entry(0, separator);
        if let Some(child) = moved_child {
            target.insert_child(0, child);
            self.nodes[child].parent = Some(node);
        }

        trace!(node, sibling = left, "borrowed entry from left sibling");
        true
    }

    /// Rotate left: the separator right of `node` moves down to its end and
    /// the right sibling's first entry replaces it.
    fn borrow_from_right(&mut self, node: NodeId, parent: NodeId, slot: usize) -> bool {
        if slot + 1 >= self.nodes[parent].children.len() {
            return false;
        }
        let right = self.nodes[parent].child(slot + 1);
        if self.nodes[right].len() <= self.min_entries() {
            return false;
        }

        let sibling = &mut self.nodes[right];
        let borrowed = sibling.remove_entry(0);
        let moved_child = if sibling.is_leaf() {
            None
        } else {
            Some(sibling.remove_child(0))
        };

        let separator = std::mem::replace(&mut self.nodes[parent].entries[slot], borrowed);
        let target = &mut self.nodes[node];
        target.entries.push(separator);
        if let Some(child) = moved_child {
            target.children.push(child);
            self.nodes[child].parent = Some(node);
        }

        trace!(node, sibling = right, "borrowed entry from right sibling");
        true
    }

    /// Fold a sibling and the separator between them into `node`. The right
    /// sibling is preferred; the left one is used for the last child.
    fn merge_with_sibling(&mut self, node: NodeId, parent: NodeId, slot: usize) {
        if slot + 1 < self.nodes[parent].children.len() {
            let separator = self.nodes[parent].remove_entry(slot);
            let right = self.nodes[parent].remove_child(slot + 1);
            let mut sibling = self.nodes.take(right);

            let target = &mut self.nodes[node];
            target.entries.push(separator);
            target.entries.append(&mut sibling.entries);
            target.children.append(&mut sibling.children);
            trace!(node, absorbed = right, "merged right sibling");
        } else {
            let separator = self.nodes[parent].remove_entry(slot - 1);
            let left = self.nodes[parent].remove_child(slot - 1);
            let mut sibling = self.nodes.take(left);

            let target = &mut self.nodes[node];
            sibling.entries.push(separator);
            sibling.entries.append(&mut target.entries);
            sibling.children.append(&mut target.children);
            target.entries = sibling.entries;
            target.children = sibling.children;
            trace!(node, absorbed = left, "merged left sibling");
        }
        self.reparent_children(node);
    }

    /// Drop an emptied root and promote its only child.
    fn collapse_root(&mut self, old_root: NodeId, child: NodeId) {
        self.nodes.take(old_root);
        self.nodes[child].parent = None;
        self.root = Some(child);
        debug!(height = self.height(), "root collapsed, tree shrank");
    }
}

#[cfg(test)]
mod tests {
    use crate::BTree;

    fn tree_with(order: usize, keys: impl IntoIterator<Item = i32>) -> BTree<i32, i32> {
        let mut tree = BTree::new(order).unwrap();
        for k in keys {
            tree.put(k, k * 10);
        }
        tree
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let mut tree = tree_with(3, 1..=8);
        let before = tree.to_string();
        assert_eq!(tree.remove(&42), None);
        assert_eq!(tree.len(), 8);
        assert_eq!(tree.to_string(), before);

        let mut empty: BTree<i32, i32> = BTree::new(3).unwrap();
        assert_eq!(empty.remove(&1), None);
    }

    #[test]
    fn test_remove_from_leaf_root() {
        let mut tree = tree_with(5, [1, 2, 3]);
        assert_eq!(tree.remove(&2), Some(20));
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(tree.remove(&1), Some(10));
        assert_eq!(tree.remove(&3), Some(30));
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn test_remove_internal_uses_predecessor() {
        let mut tree = tree_with(3, 1..=3);
        // root [2], leaves [1] [3]
        assert_eq!(tree.remove(&2), Some(20));
        // predecessor 1 moves up, left leaf underflows and merges.
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
        tree.check_invariants_detailed().unwrap();
    }

    #[test]
    fn test_borrow_from_right_sibling() {
        let mut tree = tree_with(3, 1..=4);
        // root [2], leaves [1] [3 4]
        assert_eq!(tree.leaf_sizes(), vec![1, 2]);
        tree.remove(&1);
        // 2 rotates down, 3 rotates up.
        assert_eq!(tree.root_keys(), vec![&3]);
        assert_eq!(tree.leaf_sizes(), vec![1, 1]);
        tree.check_invariants_detailed().unwrap();
    }

    #[test]
    fn test_borrow_from_left_sibling() {
        let mut tree = tree_with(4, [10, 20, 30, 40, 15]);
        // root [20], leaves [10 15] [30 40]
        assert_eq!(tree.leaf_sizes(), vec![2, 2]);
        tree.remove(&30);
        tree.remove(&40);
        // 20 rotates down, 15 rotates up.
        assert_eq!(tree.root_keys(), vec![&15]);
        assert_eq!(tree.leaf_sizes(), vec![1, 1]);
        tree.check_invariants_detailed().unwrap();
    }

    #[test]
    fn test_merge_collapses_root() {
        let mut tree = tree_with(3, 1..=3);
        assert_eq!(tree.height(), 2);
        tree.remove(&3);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        tree.check_invariants_detailed().unwrap();
    }

    #[test]
    fn test_cascading_rebalance_through_internal_levels() {
        let mut tree = tree_with(3, 0..100);
        let start_height = tree.height();
        for k in 0..95 {
            assert_eq!(tree.remove(&k), Some(k * 10));
            tree.check_invariants_detailed().unwrap();
        }
        assert!(tree.height() < start_height);
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![95, 96, 97, 98, 99]);
    }

    #[test]
    fn test_remove_everything_in_mixed_order() {
        let mut tree = tree_with(5, 0..300);
        let mut order: Vec<i32> = (0..300).collect();
        order.sort_by_key(|k| (k * 7919) % 300);
        for (removed, k) in order.iter().enumerate() {
            assert_eq!(tree.remove(k), Some(k * 10));
            assert_eq!(tree.len(), 300 - removed - 1);
            tree.check_invariants_detailed().unwrap();
        }
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 0);
    }
}
