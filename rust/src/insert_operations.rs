//! INSERT operations for BTree.
//!
//! Insertion descends to a leaf, places the entry at its sorted position and
//! then splits overflowing nodes bottom-up. Each split promotes one entry into
//! the parent, so the cascade touches at most one node per level and only
//! grows the height when the root itself splits.

use tracing::{debug, trace};

use crate::comparator::Comparator;
use crate::types::{BTree, Entry, Node, NodeId, SearchResult};

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    /// Insert a key-value pair into the tree.
    ///
    /// If the key already exists its value is overwritten in place and the
    /// previous value is returned; the size is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use mwaytree::BTree;
    ///
    /// let mut tree = BTree::new(3).unwrap();
    /// assert_eq!(tree.put(1, "one"), None);
    /// assert_eq!(tree.put(1, "uno"), Some("one"));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let Some(mut current) = self.root else {
            let root = self.allocate_node(Node::singleton(Entry::new(key, value)));
            self.root = Some(root);
            self.len = 1;
            return None;
        };

        loop {
            let node = &mut self.nodes[current];
            match node.search(&key, &self.comparator) {
                SearchResult::Found(index) => {
                    return Some(node.entries[index].replace_value(value));
                }
                SearchResult::GoDown(index) if node.is_leaf() => {
                    node.insert_entry(index, Entry::new(key, value));
                    self.len += 1;
                    self.split(current);
                    return None;
                }
                SearchResult::GoDown(slot) => current = node.child(slot),
            }
        }
    }

    /// Split `node` while it overflows, walking up through its ancestors.
    fn split(&mut self, mut node: NodeId) {
        while self.nodes[node].len() > self.max_entries() {
            match self.nodes[node].parent {
                None => {
                    self.split_root(node);
                    return;
                }
                Some(parent) => {
                    self.split_non_root(node, parent);
                    node = parent;
                }
            }
        }
    }

    /// Cut an overflowing node in two. `node` keeps the left half; the right
    /// half moves into a freshly allocated node whose ID is returned together
    /// with the promoted middle entry.
    fn split_off_right(&mut self, node: NodeId, parent: Option<NodeId>) -> (Entry<K, V>, NodeId) {
        let middle = self.middle();
        let left = &mut self.nodes[node];

        let right_entries = left.entries.split_off(middle + 1);
        let promoted = left.remove_entry(middle);
        let right_children = if left.is_leaf() {
            Vec::new()
        } else {
            left.children.split_off(middle + 1)
        };

        trace!(
            node,
            middle,
            left_len = left.entries.len(),
            right_len = right_entries.len(),
            "splitting node"
        );

        let right = self.allocate_node(Node::new(parent, right_entries, right_children));
        self.reparent_children(right);
        (promoted, right)
    }

    fn split_root(&mut self, root: NodeId) {
        let (promoted, right) = self.split_off_right(root, None);
        let new_root = self.allocate_node(Node::new(None, vec![promoted], vec![root, right]));
        self.nodes[root].parent = Some(new_root);
        self.nodes[right].parent = Some(new_root);
        self.root = Some(new_root);
        debug!(height = self.height(), "root split, tree grew");
    }

    fn split_non_root(&mut self, node: NodeId, parent: NodeId) {
        let (promoted, right) = self.split_off_right(node, Some(parent));
        let parent_node = &mut self.nodes[parent];
        let position = match parent_node.search(&promoted.key, &self.comparator) {
            SearchResult::GoDown(position) | SearchResult::Found(position) => position,
        };
        debug_assert_eq!(parent_node.child(position), node);
        parent_node.insert_entry(position, promoted);
        parent_node.insert_child(position + 1, right);
    }

    /// Point the parent link of every child of `node` back at `node`.
    pub(crate) fn reparent_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node].children);
        for &child in &children {
            self.nodes[child].parent = Some(node);
        }
        self.nodes[node].children = children;
    }
}

#[cfg(test)]
mod tests {
    use crate::BTree;

    #[test]
    fn test_first_put_creates_leaf_root() {
        let mut tree = BTree::new(3).unwrap();
        tree.put(1, "a");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_root_split_order_3() {
        let mut tree = BTree::new(3).unwrap();
        tree.put(1, ());
        tree.put(2, ());
        assert_eq!(tree.height(), 1);
        tree.put(3, ());
        // [1 2 3] overflows: 2 is promoted into a new root.
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.to_string(), "BTree\n    1\n2\n    3\n");
        tree.check_invariants_detailed().unwrap();
    }

    #[test]
    fn test_even_order_split_favours_right() {
        let mut tree = BTree::new(4).unwrap();
        for i in 1..=4 {
            tree.put(i, ());
        }
        // middle = (4 - 1) / 2 = 1: left keeps [1], 2 promoted, right gets [3 4].
        assert_eq!(tree.leaf_sizes(), vec![1, 2]);
        assert_eq!(tree.root_keys(), vec![&2]);
    }

    #[test]
    fn test_cascading_split_keeps_parent_links() {
        let mut tree = BTree::new(3).unwrap();
        for i in 0..200 {
            tree.put(i, i);
            tree.check_invariants_detailed().unwrap();
        }
        assert_eq!(tree.len(), 200);
    }

    #[test]
    fn test_descending_and_interleaved_inserts() {
        let mut tree = BTree::new(5).unwrap();
        for i in (0..100).rev() {
            tree.put(i, ());
        }
        for i in (1000..1100).step_by(3) {
            tree.put(i, ());
            tree.put(2000 - i, ());
        }
        tree.check_invariants_detailed().unwrap();
        let keys: Vec<_> = tree.keys().copied().collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(keys.len(), tree.len());
    }

    #[test]
    fn test_overwrite_in_internal_node() {
        let mut tree = BTree::new(3).unwrap();
        for i in 1..=8 {
            tree.put(i, i);
        }
        let root_key = *tree.root_keys()[0];
        assert_eq!(tree.put(root_key, 0), Some(root_key));
        assert_eq!(tree.get(&root_key), Some(&0));
        assert_eq!(tree.len(), 8);
    }
}
