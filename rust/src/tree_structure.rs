//! Tree structure queries for BTree.
//!
//! Size, height, boundary entries and node counting.

use crate::comparator::Comparator;
use crate::types::{BTree, Entry, Node, NodeId};

// ============================================================================
// TREE STRUCTURE OPERATIONS
// ============================================================================

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    /// Returns the number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of levels from the root to any leaf, 0 when empty.
    ///
    /// ```
    /// use mwaytree::BTree;
    ///
    /// let mut tree = BTree::new(3).unwrap();
    /// assert_eq!(tree.height(), 0);
    /// for i in 1..=7 {
    ///     tree.put(i, ());
    /// }
    /// assert_eq!(tree.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        let Some(mut current) = self.root else {
            return 0;
        };
        let mut height = 1;
        while let Some(&first) = self.nodes[current].children.first() {
            current = first;
            height += 1;
        }
        height
    }

    /// Returns the smallest entry, `None` when empty.
    pub fn left(&self) -> Option<&Entry<K, V>> {
        let leaf = self.leftmost_leaf(self.root?);
        self.nodes[leaf].entries.first()
    }

    /// Returns the largest entry, `None` when empty.
    pub fn right(&self) -> Option<&Entry<K, V>> {
        let leaf = self.rightmost_leaf(self.root?);
        self.nodes[leaf].entries.last()
    }

    /// Returns the smallest key, `None` when empty.
    pub fn left_key(&self) -> Option<&K> {
        self.left().map(Entry::key)
    }

    /// Returns the value of the smallest key, `None` when empty.
    pub fn left_value(&self) -> Option<&V> {
        self.left().map(Entry::value)
    }

    /// Returns the largest key, `None` when empty.
    pub fn right_key(&self) -> Option<&K> {
        self.right().map(Entry::key)
    }

    /// Returns the value of the largest key, `None` when empty.
    pub fn right_value(&self) -> Option<&V> {
        self.right().map(Entry::value)
    }

    /// Returns the first key-value pair in the tree.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.left().map(Entry::as_pair)
    }

    /// Returns the last key-value pair in the tree.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.right().map(Entry::as_pair)
    }

    // ============================================================================
    // TREE NAVIGATION HELPERS
    // ============================================================================

    /// Follow first children from `node` down to a leaf.
    pub(crate) fn leftmost_leaf(&self, mut node: NodeId) -> NodeId {
        while let Some(&first) = self.nodes[node].children.first() {
            node = first;
        }
        node
    }

    /// Follow last children from `node` down to a leaf.
    pub(crate) fn rightmost_leaf(&self, mut node: NodeId) -> NodeId {
        while let Some(&last) = self.nodes[node].children.last() {
            node = last;
        }
        node
    }

    // ============================================================================
    // NODE COUNTING
    // ============================================================================

    /// Returns the number of nodes allocated for this tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of leaf nodes reachable from the root.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.visit_nodes(|_, node, _| {
            if node.is_leaf() {
                count += 1;
            }
        });
        count
    }

    /// Returns the keys held by the root node (for testing/debugging).
    pub fn root_keys(&self) -> Vec<&K> {
        self.root
            .map(|root| self.nodes[root].entries.iter().map(Entry::key).collect())
            .unwrap_or_default()
    }

    /// Returns the entry counts of all leaves, left to right (for testing/debugging).
    pub fn leaf_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::new();
        self.visit_nodes(|_, node, _| {
            if node.is_leaf() {
                sizes.push(node.len());
            }
        });
        sizes
    }

    /// Walk every node in pre-order, passing its ID, the node and its depth
    /// (root at 0). Children are visited left to right.
    pub(crate) fn visit_nodes<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(NodeId, &'a Node<K, V>, usize),
    {
        let Some(root) = self.root else {
            return;
        };
        let mut pending = vec![(root, 0)];
        while let Some((id, depth)) = pending.pop() {
            let node = &self.nodes[id];
            visit(id, node, depth);
            pending.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
        }
    }
}
