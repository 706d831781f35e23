//! Compact arena holding the nodes of a tree.
//!
//! Nodes refer to each other by [`NodeId`] instead of by pointer, which keeps
//! the parent back-reference a plain index rather than a second owner.

use std::convert::TryFrom;
use std::ops::{Index, IndexMut};

use crate::types::NodeId;

/// Statistics for a compact arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactArenaStats {
    pub total_capacity: usize,
    pub allocated_count: usize,
    pub free_count: usize,
    pub utilization: f64,
}

/// Arena allocator storing values in a `Vec<T>` with a free list of
/// reusable slots.
#[derive(Debug, Clone)]
pub struct CompactArena<T> {
    /// Direct storage without Option wrapper
    storage: Vec<T>,
    /// Free slot indices for reuse
    free_list: Vec<usize>,
    /// Track which slots are actually allocated
    allocated_mask: Vec<bool>,
}

impl<T> CompactArena<T> {
    /// Create a new empty compact arena
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
            free_list: Vec::new(),
            allocated_mask: Vec::new(),
        }
    }

    /// Create a new compact arena with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            allocated_mask: Vec::with_capacity(capacity),
        }
    }

    /// Allocate a new item in the arena and return its ID
    #[inline]
    pub fn allocate(&mut self, item: T) -> NodeId {
        let index = if let Some(free_index) = self.free_list.pop() {
            self.storage[free_index] = item;
            self.allocated_mask[free_index] = true;
            free_index
        } else {
            let index = self.storage.len();
            self.storage.push(item);
            self.allocated_mask.push(true);
            index
        };

        NodeId::try_from(index).expect("arena exceeded NodeId range")
    }

    /// Get a reference to an item in the arena
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        let index = usize::try_from(id).ok()?;
        if self.allocated_mask.get(index).copied().unwrap_or(false) {
            Some(&self.storage[index])
        } else {
            None
        }
    }

    /// Get a mutable reference to an item in the arena
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let index = usize::try_from(id).ok()?;
        if self.allocated_mask.get(index).copied().unwrap_or(false) {
            Some(&mut self.storage[index])
        } else {
            None
        }
    }

    /// Check if an ID is valid and allocated
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Get the number of allocated items
    pub fn len(&self) -> usize {
        self.allocated_mask.len() - self.free_list.len()
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the number of free slots
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    /// Clear all items from the arena
    pub fn clear(&mut self) {
        self.storage.clear();
        self.allocated_mask.clear();
        self.free_list.clear();
    }

    /// Get arena statistics
    pub fn stats(&self) -> CompactArenaStats {
        let total_capacity = self.storage.capacity();
        let allocated_count = self.len();
        let utilization = if total_capacity > 0 {
            allocated_count as f64 / total_capacity as f64
        } else {
            0.0
        };

        CompactArenaStats {
            total_capacity,
            allocated_count,
            free_count: self.free_list.len(),
            utilization,
        }
    }
}

impl<T: Default> CompactArena<T> {
    /// Deallocate an item from the arena and return it.
    #[inline]
    pub fn deallocate(&mut self, id: NodeId) -> Option<T> {
        let index = usize::try_from(id).ok()?;
        if !self.allocated_mask.get(index).copied().unwrap_or(false) {
            return None;
        }

        self.allocated_mask[index] = false;
        self.free_list.push(index);
        Some(std::mem::take(&mut self.storage[index]))
    }

    /// Remove an item that is known to be allocated and return it.
    ///
    /// Panics if `id` is not allocated, like indexing does.
    pub fn take(&mut self, id: NodeId) -> T {
        let item = std::mem::take(&mut self[id]);
        self.deallocate(id);
        item
    }
}

impl<T> Default for CompactArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for CompactArena<T> {
    type Output = T;

    #[inline]
    fn index(&self, id: NodeId) -> &T {
        self.get(id)
            .unwrap_or_else(|| panic!("node {} is not allocated", id))
    }
}

impl<T> IndexMut<NodeId> for CompactArena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        self.get_mut(id)
            .unwrap_or_else(|| panic!("node {} is not allocated", id))
    }
}
