//! Bulk conversion of a BTree to and from key-value pairs.
//!
//! Exported pairs are in key order. Importing replays `put` for each pair,
//! so the resulting shape depends only on the order of the input, and a
//! later duplicate key overwrites an earlier one.

use crate::comparator::Comparator;
use crate::construction::DEFAULT_ORDER;
use crate::error::InitResult;
use crate::types::{BTree, Entry, NodeId};

impl<K, V, C: Comparator<K>> BTree<K, V, C> {
    /// Returns a copy of every key-value pair in key order.
    pub fn export(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Replace the contents of the tree with `pairs`.
    ///
    /// ```
    /// use mwaytree::BTree;
    ///
    /// let mut tree = BTree::new(3).unwrap();
    /// tree.put(99, "gone");
    /// tree.import([(2, "b"), (1, "a"), (2, "B")]);
    /// assert_eq!(tree.export(), vec![(1, "a"), (2, "B")]);
    /// ```
    pub fn import<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.clear();
        self.extend(pairs);
    }

    /// Build a tree of the given order from `pairs`.
    pub fn from_pairs<I>(order: usize, comparator: C, pairs: I) -> InitResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut tree = Self::with_comparator(order, comparator)?;
        tree.extend(pairs);
        Ok(tree)
    }

    /// Consume the tree, returning its pairs in key order.
    pub fn into_pairs(mut self) -> Vec<(K, V)> {
        let Some(root) = self.root.take() else {
            return Vec::new();
        };
        let mut pairs = Vec::with_capacity(self.len);
        self.drain_subtree(root, &mut pairs);
        pairs
    }

    fn drain_subtree(&mut self, id: NodeId, out: &mut Vec<(K, V)>) {
        let node = self.nodes.take(id);
        let mut children = node.children.into_iter();
        for entry in node.entries {
            if let Some(child) = children.next() {
                self.drain_subtree(child, out);
            }
            out.push(Entry::into_pair(entry));
        }
        if let Some(last) = children.next() {
            self.drain_subtree(last, out);
        }
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for BTree<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for BTree<K, V, C> {
    /// Collects into a tree of [`DEFAULT_ORDER`].
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::empty(DEFAULT_ORDER, C::default());
        tree.extend(iter);
        tree
    }
}

impl<K, V, C: Comparator<K>> IntoIterator for BTree<K, V, C> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_pairs().into_iter()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt;
    use std::marker::PhantomData;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::comparator::Comparator;
    use crate::construction::DEFAULT_ORDER;
    use crate::types::BTree;

    impl<K, V, C> Serialize for BTree<K, V, C>
    where
        K: Serialize,
        V: Serialize,
        C: Comparator<K>,
    {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (k, v) in self {
                map.serialize_entry(k, v)?;
            }
            map.end()
        }
    }

    struct BTreeVisitor<K, V, C> {
        marker: PhantomData<fn() -> BTree<K, V, C>>,
    }

    impl<'de, K, V, C> Visitor<'de> for BTreeVisitor<K, V, C>
    where
        K: Deserialize<'de>,
        V: Deserialize<'de>,
        C: Comparator<K> + Default,
    {
        type Value = BTree<K, V, C>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map")
        }

        fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut tree = BTree::empty(DEFAULT_ORDER, C::default());
            while let Some((k, v)) = access.next_entry()? {
                tree.put(k, v);
            }
            Ok(tree)
        }
    }

    impl<'de, K, V, C> Deserialize<'de> for BTree<K, V, C>
    where
        K: Deserialize<'de>,
        V: Deserialize<'de>,
        C: Comparator<K> + Default,
    {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_map(BTreeVisitor {
                marker: PhantomData,
            })
        }
    }
}
