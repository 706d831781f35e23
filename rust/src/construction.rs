//! Construction and initialization logic for BTree.
//!
//! This module contains order validation, constructors and default
//! implementations.

use crate::comparator::{Comparator, NaturalOrder};
use crate::compact_arena::CompactArena;
use crate::error::{BTreeError, BTreeResult, InitResult};
use crate::types::{BTree, Node, NodeId, MIN_ORDER};

/// Default order (maximum children per node) for B-tree nodes
pub const DEFAULT_ORDER: usize = 16;

impl<K, V> BTree<K, V, NaturalOrder>
where
    K: Ord,
{
    /// Create a B-tree of the given order, ordering keys by `Ord`.
    ///
    /// # Arguments
    ///
    /// * `order` - Maximum number of children per node (minimum 3)
    ///
    /// # Returns
    ///
    /// Returns `Ok(BTree)` if the order is valid, `Err(BTreeError)` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use mwaytree::BTree;
    ///
    /// let tree = BTree::<i32, String>::new(5).unwrap();
    /// assert!(tree.is_empty());
    /// assert!(BTree::<i32, String>::new(2).is_err());
    /// ```
    pub fn new(order: usize) -> InitResult<Self> {
        Self::with_comparator(order, NaturalOrder)
    }

    /// Create a B-tree with the default order.
    ///
    /// This is equivalent to calling `new(DEFAULT_ORDER)`.
    pub fn with_default_order() -> Self {
        Self::empty(DEFAULT_ORDER, NaturalOrder)
    }
}

impl<K, V, C> BTree<K, V, C>
where
    C: Comparator<K>,
{
    /// Create a B-tree of the given order with an explicit comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use mwaytree::BTree;
    ///
    /// let mut tree = BTree::with_comparator(3, |a: &i32, b: &i32| b.cmp(a)).unwrap();
    /// tree.put(1, ());
    /// tree.put(2, ());
    /// assert_eq!(tree.left_key(), Some(&2));
    /// ```
    pub fn with_comparator(order: usize, comparator: C) -> InitResult<Self> {
        validation::validate_order(order)?;
        Ok(Self::empty(order, comparator))
    }

    pub(crate) fn empty(order: usize, comparator: C) -> Self {
        Self {
            order,
            root: None,
            len: 0,
            comparator,
            nodes: CompactArena::new(),
        }
    }

    /// Returns the order (maximum children per node) of this tree.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the comparator this tree orders keys with.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Remove every entry, keeping order and comparator.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Allocate a node in the arena and return its ID.
    pub(crate) fn allocate_node(&mut self, node: Node<K, V>) -> NodeId {
        self.nodes.allocate(node)
    }
}

impl<K: Ord, V> Default for BTree<K, V, NaturalOrder> {
    /// Create a B-tree with default order.
    fn default() -> Self {
        Self::with_default_order()
    }
}

/// Validation utilities for construction
pub mod validation {
    use super::*;

    /// Validate that an order is suitable for a B-tree.
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if valid, `Err(BTreeError)` otherwise.
    pub fn validate_order(order: usize) -> BTreeResult<()> {
        if order < MIN_ORDER {
            Err(BTreeError::invalid_order(order, MIN_ORDER))
        } else {
            Ok(())
        }
    }

    /// Get the recommended order for a given expected number of elements.
    ///
    /// Returns a value that is always >= MIN_ORDER.
    pub fn recommended_order(expected_elements: usize) -> usize {
        if expected_elements < 100 {
            4
        } else if expected_elements < 10_000 {
            16
        } else if expected_elements < 1_000_000 {
            32
        } else {
            64
        }
    }
}
