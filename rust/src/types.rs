//! Core types and data structures for BTree.
//!
//! This module contains the fundamental data structures, type definitions,
//! and constants used throughout the B-tree implementation.

use crate::comparator::{Comparator, NaturalOrder};
use crate::compact_arena::CompactArena;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Smallest order (maximum children per node) a tree may be built with.
pub const MIN_ORDER: usize = 3;

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

/// Node ID type for arena-based allocation
pub type NodeId = u32;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// An ordered map backed by an order-m B-tree.
///
/// Every node holds up to `m - 1` entries and, when internal, one more child
/// than it has entries. Unlike a B+ tree, values live in internal nodes as
/// well as in leaves, and each node keeps a back-reference to its parent so
/// that cursors can walk the tree without an auxiliary stack.
///
/// # Type Parameters
///
/// * `K` - Key type
/// * `V` - Value type
/// * `C` - Ordering capability over `K`, [`NaturalOrder`] by default
///
/// # Examples
///
/// ```
/// use mwaytree::BTree;
///
/// let mut tree = BTree::new(3).unwrap();
/// tree.put(1, "one");
/// tree.put(2, "two");
/// tree.put(3, "three");
///
/// assert_eq!(tree.get(&2), Some(&"two"));
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.height(), 2);
///
/// let keys: Vec<_> = tree.keys().copied().collect();
/// assert_eq!(keys, [1, 2, 3]);
/// ```
///
/// # Performance Characteristics
///
/// - **Insertion**: O(log n)
/// - **Lookup**: O(log n)
/// - **Deletion**: O(log n)
/// - **Cursor step**: O(log n) worst case, O(1) amortized over a full walk
#[derive(Clone)]
pub struct BTree<K, V, C = NaturalOrder> {
    /// Maximum number of children per node.
    pub(crate) order: usize,
    /// The root node, `None` while the tree is empty.
    pub(crate) root: Option<NodeId>,
    /// Number of entries stored in the tree.
    pub(crate) len: usize,
    /// Key ordering, fixed for the lifetime of the tree.
    pub(crate) comparator: C,
    /// Arena storage for every node reachable from `root`.
    pub(crate) nodes: CompactArena<Node<K, V>>,
}

/// A key/value pair stored in a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

/// A B-tree node: sorted entries plus, for internal nodes, child ids.
#[derive(Debug, Clone)]
pub struct Node<K, V> {
    /// Non-owning link to the parent, `None` for the root.
    pub(crate) parent: Option<NodeId>,
    /// Entries sorted ascending by the tree's comparator.
    pub(crate) entries: Vec<Entry<K, V>>,
    /// Empty for leaves, `entries.len() + 1` ids for internal nodes.
    pub(crate) children: Vec<NodeId>,
}

impl<K, V> Default for Node<K, V> {
    fn default() -> Self {
        Self {
            parent: None,
            entries: Vec::new(),
            children: Vec::new(),
        }
    }
}

// ============================================================================
// ENUMS AND RESULT TYPES
// ============================================================================

/// Result of searching for a key among the entries of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchResult {
    /// Key was found at the given entry index.
    Found(usize),
    /// Key was not found; the index is both the insertion point and the
    /// child slot to descend into.
    GoDown(usize),
}

/// Location of an entry inside the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Location {
    pub(crate) node: NodeId,
    pub(crate) index: usize,
}

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    /// Maximum number of entries a node may hold.
    #[inline]
    pub(crate) fn max_entries(&self) -> usize {
        self.order - 1
    }

    /// Minimum number of entries a non-root node must hold.
    #[inline]
    pub(crate) fn min_entries(&self) -> usize {
        self.order.div_ceil(2) - 1
    }

    /// Index of the entry promoted when a node overflows. Biased left so the
    /// right half receives the extra entry on even splits.
    #[inline]
    pub(crate) fn middle(&self) -> usize {
        (self.order - 1) / 2
    }
}
