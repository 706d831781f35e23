//! Validation and debugging utilities for BTree.
//!
//! This module contains invariant checking, the text rendering used by
//! `Display`/`Debug`, and test helpers for the B-tree implementation.

use std::cmp::Ordering;
use std::fmt;

use crate::comparator::Comparator;
use crate::error::{BTreeError, BTreeResult, TreeResult};
use crate::types::{BTree, NodeId};

/// Indentation emitted per tree level by the `Display` rendering.
const INDENT: &str = "    ";

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    /// Check if the tree maintains B-tree invariants.
    /// Returns true if all invariants are satisfied.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    ///
    /// Verifies ordering within and across nodes, occupancy bounds, child
    /// counts, parent links, uniform leaf depth, the entry count and that the
    /// arena holds no unreachable nodes.
    pub fn check_invariants_detailed(&self) -> BTreeResult<()> {
        let Some(root) = self.root else {
            if self.len != 0 {
                return Err(BTreeError::data_integrity(
                    "Empty tree",
                    &format!("no root but len is {}", self.len),
                ));
            }
            return self.check_arena_tree_consistency(0);
        };

        if let Some(parent) = self.nodes.get(root).and_then(|node| node.parent) {
            return Err(BTreeError::corrupted_tree(
                "Parent link",
                &format!("root {} points at parent {}", root, parent),
            ));
        }

        let mut reachable = 0;
        let mut entries = 0;
        let mut leaf_depth = None;
        // (node, depth, lower bound, upper bound), bounds exclusive.
        let mut pending: Vec<(NodeId, usize, Option<&K>, Option<&K>)> = vec![(root, 0, None, None)];

        while let Some((id, depth, lower, upper)) = pending.pop() {
            let node = self.nodes.get(id).ok_or_else(|| {
                BTreeError::corrupted_tree("Arena", &format!("node {} is not allocated", id))
            })?;
            reachable += 1;
            entries += node.len();

            self.check_occupancy(id, node.len(), node.is_root())?;
            self.check_key_order(id, node.entries.iter().map(|e| &e.key), lower, upper)?;

            if node.is_leaf() {
                match leaf_depth {
                    None => leaf_depth = Some(depth),
                    Some(expected) if expected != depth => {
                        return Err(BTreeError::data_integrity(
                            "Leaf depth",
                            &format!("leaf {} at depth {}, expected {}", id, depth, expected),
                        ));
                    }
                    Some(_) => {}
                }
                continue;
            }

            if node.children.len() != node.len() + 1 {
                return Err(BTreeError::data_integrity(
                    "Child count",
                    &format!(
                        "node {} has {} entries but {} children",
                        id,
                        node.len(),
                        node.children.len()
                    ),
                ));
            }

            for (slot, &child) in node.children.iter().enumerate() {
                let child_parent = self.nodes.get(child).and_then(|c| c.parent);
                if child_parent != Some(id) {
                    return Err(BTreeError::corrupted_tree(
                        "Parent link",
                        &format!("child {} of node {} points at {:?}", child, id, child_parent),
                    ));
                }
                let child_lower = if slot == 0 { lower } else { Some(node.key(slot - 1)) };
                let child_upper = if slot == node.len() { upper } else { Some(node.key(slot)) };
                pending.push((child, depth + 1, child_lower, child_upper));
            }
        }

        if entries != self.len {
            return Err(BTreeError::data_integrity(
                "Entry count",
                &format!("{} entries reachable but len is {}", entries, self.len),
            ));
        }

        self.check_arena_tree_consistency(reachable)
    }

    /// Alias for check_invariants_detailed (for test compatibility).
    pub fn validate(&self) -> BTreeResult<()> {
        self.check_invariants_detailed()
    }

    /// Check if tree is in a valid state for operations
    pub fn validate_for_operation(&self, operation: &str) -> BTreeResult<()> {
        self.check_invariants_detailed().map_err(|e| {
            BTreeError::data_integrity(operation, &format!("Validation for {}: {}", operation, e))
        })
    }

    fn check_occupancy(&self, id: NodeId, len: usize, is_root: bool) -> TreeResult<()> {
        if len > self.max_entries() {
            return Err(BTreeError::data_integrity(
                "Occupancy",
                &format!("node {} holds {} entries, maximum is {}", id, len, self.max_entries()),
            ));
        }
        let min = if is_root { 1 } else { self.min_entries() };
        if len < min {
            return Err(BTreeError::data_integrity(
                "Occupancy",
                &format!("node {} holds {} entries, minimum is {}", id, len, min),
            ));
        }
        Ok(())
    }

    /// Keys must be strictly ascending and strictly inside `(lower, upper)`.
    fn check_key_order<'a, I>(
        &self,
        id: NodeId,
        keys: I,
        lower: Option<&'a K>,
        upper: Option<&'a K>,
    ) -> TreeResult<()>
    where
        I: Iterator<Item = &'a K>,
        K: 'a,
    {
        let mut previous = lower;
        for (index, key) in keys.enumerate() {
            if let Some(prev) = previous {
                if self.comparator.compare(prev, key) != Ordering::Less {
                    return Err(BTreeError::data_integrity(
                        "Key order",
                        &format!("node {} entry {} is not above its predecessor", id, index),
                    ));
                }
            }
            if let Some(bound) = upper {
                if self.comparator.compare(key, bound) != Ordering::Less {
                    return Err(BTreeError::data_integrity(
                        "Key order",
                        &format!("node {} entry {} is not below its upper separator", id, index),
                    ));
                }
            }
            previous = Some(key);
        }
        Ok(())
    }

    /// Check that arena allocation matches tree structure
    fn check_arena_tree_consistency(&self, reachable: usize) -> TreeResult<()> {
        let allocated = self.nodes.len();
        if reachable != allocated {
            return Err(BTreeError::data_integrity(
                "Arena consistency check",
                &format!("{} in tree vs {} in arena", reachable, allocated),
            ));
        }
        Ok(())
    }

    // ============================================================================
    // DEBUGGING AND TESTING UTILITIES
    // ============================================================================

    /// Returns all key-value pairs as a vector (for testing/debugging).
    pub fn slice(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }

    /// Returns the depth of every leaf, left to right (for testing/debugging).
    pub fn leaf_depths(&self) -> Vec<usize> {
        let mut depths = Vec::new();
        self.visit_nodes(|_, node, depth| {
            if node.is_leaf() {
                depths.push(depth);
            }
        });
        depths
    }

    /// Prints the node structure for debugging.
    pub fn print_node_chain(&self)
    where
        K: fmt::Debug,
    {
        println!("Tree structure:");
        self.visit_nodes(|id, node, depth| {
            let keys: Vec<&K> = node.entries.iter().map(|e| &e.key).collect();
            println!(
                "{}{}[id={}]: {:?}",
                "  ".repeat(depth),
                if node.is_leaf() { "Leaf" } else { "Node" },
                id,
                keys
            );
        });
    }

    /// Write the subtree under `id` in order, one key per line, indented by depth.
    fn fmt_subtree(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result
    where
        K: fmt::Display,
    {
        let node = &self.nodes[id];
        for (index, entry) in node.entries.iter().enumerate() {
            if !node.is_leaf() {
                self.fmt_subtree(f, node.child(index), depth + 1)?;
            }
            writeln!(f, "{}{}", INDENT.repeat(depth), entry.key)?;
        }
        if !node.is_leaf() {
            self.fmt_subtree(f, node.last_child(), depth + 1)?;
        }
        Ok(())
    }
}

/// Renders the tree sideways: a `BTree` header, then every key in order on
/// its own line, indented four spaces per level below the root.
///
/// ```
/// use mwaytree::BTree;
///
/// let mut tree = BTree::new(3).unwrap();
/// for i in 1..=3 {
///     tree.put(i, ());
/// }
/// assert_eq!(tree.to_string(), "BTree\n    1\n2\n    3\n");
/// ```
impl<K: fmt::Display, V, C: Comparator<K>> fmt::Display for BTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BTree")?;
        match self.root {
            Some(root) => self.fmt_subtree(f, root, 0),
            None => Ok(()),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C: Comparator<K>> fmt::Debug for BTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::BTree;

    fn built(order: usize, n: i32) -> BTree<i32, i32> {
        let mut tree = BTree::new(order).unwrap();
        for i in 0..n {
            tree.put(i, i);
        }
        tree
    }

    #[test]
    fn test_empty_tree_is_valid() {
        let tree: BTree<i32, i32> = BTree::new(3).unwrap();
        assert!(tree.check_invariants());
        assert!(tree.validate().is_ok());
        assert_eq!(tree.to_string(), "BTree\n");
        assert_eq!(format!("{:?}", tree), "{}");
    }

    #[test]
    fn test_display_two_levels() {
        let tree = built(3, 5);
        // root [1 3], leaves [0] [2] [4]
        assert_eq!(tree.to_string(), "BTree\n    0\n1\n    2\n3\n    4\n");
    }

    #[test]
    fn test_debug_renders_as_map() {
        let mut tree = BTree::new(4).unwrap();
        tree.put(2, "b");
        tree.put(1, "a");
        assert_eq!(format!("{:?}", tree), r#"{1: "a", 2: "b"}"#);
    }

    #[test]
    fn test_leaf_depths_are_uniform() {
        let tree = built(4, 250);
        let depths = tree.leaf_depths();
        assert!(!depths.is_empty());
        assert!(depths.iter().all(|&d| d + 1 == tree.height()));
        assert_eq!(depths.len(), tree.leaf_sizes().len());
    }

    #[test]
    fn test_detects_broken_parent_link() {
        let mut tree = built(3, 10);
        let root = tree.root.unwrap();
        let child = tree.nodes[root].child(0);
        tree.nodes[child].parent = None;
        let err = tree.check_invariants_detailed().unwrap_err();
        assert!(err.is_integrity_error());
        assert!(err.to_string().contains("Parent link"));
        assert!(!tree.check_invariants());
    }

    #[test]
    fn test_detects_misordered_keys() {
        let mut tree = built(5, 30);
        let root = tree.root.unwrap();
        tree.nodes[root].entries[0].key = 1000;
        assert!(tree.check_invariants_detailed().is_err());
    }

    #[test]
    fn test_detects_len_mismatch() {
        let mut tree = built(3, 10);
        tree.len += 1;
        let err = tree.validate_for_operation("insert").unwrap_err();
        assert!(err.to_string().contains("Validation for insert"));
    }

    #[test]
    fn test_detects_orphaned_node() {
        let mut tree = built(3, 10);
        tree.allocate_node(Default::default());
        let err = tree.check_invariants_detailed().unwrap_err();
        assert!(err.to_string().contains("in arena"));
    }

    #[test]
    fn test_slice_matches_iteration() {
        let tree = built(6, 40);
        let slice = tree.slice();
        assert_eq!(slice.len(), 40);
        assert_eq!(slice[7], (&7, &7));
    }
}
