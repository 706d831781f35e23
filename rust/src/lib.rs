//! Order-m B-tree in Rust with a map-like API.
//!
//! This crate provides a classic B-tree (values live in internal nodes as well
//! as leaves) whose nodes keep a link to their parent. The parent links let a
//! [`Cursor`] walk the tree in either direction without keeping a stack, and
//! let removal repair underflow bottom-up.
//!
//! ```
//! use mwaytree::BTree;
//!
//! let mut tree = BTree::new(3).unwrap();
//! for (k, v) in [(5, "five"), (1, "one"), (3, "three")] {
//!     tree.put(k, v);
//! }
//! assert_eq!(tree.get(&3), Some(&"three"));
//! assert_eq!(tree.left_key(), Some(&1));
//! assert_eq!(tree.remove(&5), Some("five"));
//! assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
//! ```

use tracing::warn;

mod compact_arena;
mod comparator;
mod construction;
mod delete_operations;
mod error;
mod get_operations;
mod insert_operations;
mod iteration;
mod node;
mod range_queries;
mod serialization;
mod tree_structure;
mod types;
mod validation;

pub use compact_arena::{CompactArena, CompactArenaStats};
pub use comparator::{Comparator, NaturalOrder, ReverseOrder};
pub use construction::validation::{recommended_order, validate_order};
pub use construction::DEFAULT_ORDER;
pub use error::{BTreeError, BTreeResult, BTreeResultExt, InitResult, KeyResult, ModifyResult};
pub use iteration::{Cursor, ItemIterator, KeyIterator, ValueIterator};
pub use range_queries::RangeIterator;
pub use types::{BTree, Entry, Node, NodeId, SearchResult, MIN_ORDER};

// ============================================================================
// CHECKED OPERATIONS
// ============================================================================

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    /// Insert with invariant checks before and after the mutation.
    ///
    /// Returns the previous value like [`put`](BTree::put), or a
    /// `DataIntegrityError` if the tree is found to be corrupted.
    pub fn try_put(&mut self, key: K, value: V) -> ModifyResult<Option<V>> {
        self.validate_for_operation("put")
            .inspect_err(|e| warn!(error = %e, "refusing put on corrupted tree"))?;

        let old_value = self.put(key, value);

        self.validate_for_operation("put")
            .inspect_err(|e| warn!(error = %e, "put left tree corrupted"))?;
        Ok(old_value)
    }

    /// Remove with invariant checks before and after the mutation.
    ///
    /// Unlike [`remove`](BTree::remove), an absent key is reported as
    /// [`BTreeError::KeyNotFound`].
    pub fn try_remove(&mut self, key: &K) -> ModifyResult<V> {
        self.validate_for_operation("remove")
            .inspect_err(|e| warn!(error = %e, "refusing remove on corrupted tree"))?;

        let value = self.remove(key).ok_or(BTreeError::KeyNotFound)?;

        self.validate_for_operation("remove")
            .inspect_err(|e| warn!(error = %e, "remove left tree corrupted"))?;
        Ok(value)
    }

    /// Checked insert of many pairs; on the first failure the keys inserted
    /// by this call are removed again.
    pub fn batch_put(&mut self, items: Vec<(K, V)>) -> ModifyResult<Vec<Option<V>>>
    where
        K: Clone,
    {
        let mut results = Vec::with_capacity(items.len());
        let mut inserted_keys = Vec::new();

        for (key, value) in items {
            match self.try_put(key.clone(), value) {
                Ok(old_value) => {
                    if old_value.is_none() {
                        inserted_keys.push(key);
                    }
                    results.push(old_value);
                }
                Err(e) => {
                    for rollback_key in &inserted_keys {
                        self.remove(rollback_key);
                    }
                    return Err(e);
                }
            }
        }

        Ok(results)
    }
}
