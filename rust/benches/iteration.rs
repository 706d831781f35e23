use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mwaytree::BTree;
use std::collections::BTreeMap;

const SIZE: i32 = 100_000;

fn bench_full_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_traversal");
    let map: BTreeMap<i32, i32> = (0..SIZE).map(|k| (k, k)).collect();
    group.bench_function("std_btreemap", |b| {
        b.iter(|| black_box(map.iter().map(|(_, v)| *v as i64).sum::<i64>()))
    });

    for order in [4, 16, 64] {
        let tree = BTree::from_pairs(order, mwaytree::NaturalOrder, (0..SIZE).map(|k| (k, k))).unwrap();
        group.bench_function(format!("iter_order_{}", order), |b| {
            b.iter(|| black_box(tree.iter().map(|(_, v)| *v as i64).sum::<i64>()))
        });
        group.bench_function(format!("cursor_back_order_{}", order), |b| {
            b.iter(|| {
                let mut cursor = tree.cursor();
                cursor.end();
                let mut sum = 0i64;
                while cursor.prev() {
                    sum += *cursor.value().unwrap_or(&0) as i64;
                }
                black_box(sum)
            })
        });
    }
    group.finish();
}

fn bench_short_ranges(c: &mut Criterion) {
    let mut group = c.benchmark_group("short_ranges");
    let map: BTreeMap<i32, i32> = (0..SIZE).map(|k| (k, k)).collect();
    let tree = BTree::from_pairs(16, mwaytree::NaturalOrder, (0..SIZE).map(|k| (k, k))).unwrap();

    group.bench_function("std_btreemap", |b| {
        b.iter(|| {
            for start in (0..SIZE).step_by(997) {
                black_box(map.range(start..start + 50).count());
            }
        })
    });
    group.bench_function("btree_order_16", |b| {
        b.iter(|| {
            for start in (0..SIZE).step_by(997) {
                black_box(tree.range(start..start + 50).count());
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_full_traversal, bench_short_ranges);
criterion_main!(benches);
