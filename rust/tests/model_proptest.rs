//! Property tests replaying random operation sequences against `BTreeMap`.

use mwaytree::BTree;
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum MapOp {
    Put(i16, u8),
    Remove(i16),
    Get(i16),
    Left,
    Right,
}

fn key_strategy() -> impl Strategy<Value = i16> {
    -300i16..300i16
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), any::<u8>()).prop_map(|(k, v)| MapOp::Put(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => Just(MapOp::Left),
        1 => Just(MapOp::Right),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every operation returns what `BTreeMap` returns, and the tree stays
    /// structurally valid throughout.
    #[test]
    fn ops_match_btreemap(
        order in 3usize..12,
        ops in proptest::collection::vec(map_op_strategy(), 0..400),
    ) {
        let mut tree = BTree::new(order).unwrap();
        let mut model = BTreeMap::new();

        for op in &ops {
            match *op {
                MapOp::Put(k, v) => {
                    prop_assert_eq!(tree.put(k, v), model.insert(k, v), "put({})", k);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(tree.remove(&k), model.remove(&k), "remove({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(tree.get(&k), model.get(&k), "get({})", k);
                }
                MapOp::Left => {
                    prop_assert_eq!(tree.left_key(), model.keys().next());
                }
                MapOp::Right => {
                    prop_assert_eq!(tree.right_key(), model.keys().next_back());
                }
            }
            prop_assert!(tree.check_invariants_detailed().is_ok(), "{:?}", tree.check_invariants_detailed());
        }

        prop_assert_eq!(tree.len(), model.len());
        prop_assert!(tree.iter().eq(model.iter()));
    }

    /// Walking a cursor backward after a forward walk visits the same
    /// entries in reverse.
    #[test]
    fn cursor_walks_agree(order in 3usize..8, keys in proptest::collection::btree_set(any::<i32>(), 0..200)) {
        let tree: BTree<i32, ()> = BTree::from_pairs(order, mwaytree::NaturalOrder, keys.iter().map(|&k| (k, ()))).unwrap();

        let mut cursor = tree.cursor();
        let mut forward = Vec::new();
        while cursor.next() {
            forward.push(*cursor.key().unwrap());
        }
        let mut backward = Vec::new();
        while cursor.prev() {
            backward.push(*cursor.key().unwrap());
        }
        backward.reverse();

        prop_assert_eq!(&forward, &keys.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(forward, backward);
    }

    /// Re-inserting a present key changes only its value.
    #[test]
    fn overwrite_keeps_shape(order in 3usize..10, n in 1i32..300, pick in any::<prop::sample::Index>()) {
        let mut tree = BTree::new(order).unwrap();
        for k in 0..n {
            tree.put(k, 0u32);
        }
        let key = pick.index(n as usize) as i32;
        let rendered = tree.to_string();
        prop_assert_eq!(tree.put(key, 7), Some(0));
        prop_assert_eq!(tree.to_string(), rendered);
        prop_assert_eq!(tree.get(&key), Some(&7));
        prop_assert_eq!(tree.len(), n as usize);
    }
}
