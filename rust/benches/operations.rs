use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mwaytree::BTree;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;

const SEED: u64 = 42;

fn generate_keys(size: usize) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..size).map(|_| rng.gen_range(0..size as i32 * 2)).collect()
}

fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("insertion");
    group.sample_size(30);

    for size in [1_000, 10_000].iter() {
        let keys = generate_keys(*size);

        group.bench_with_input(BenchmarkId::new("std_btreemap", size), size, |b, _| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in &keys {
                    black_box(map.insert(k, k));
                }
                black_box(map)
            })
        });

        for order in [4, 16, 64] {
            group.bench_with_input(
                BenchmarkId::new(format!("btree_order_{}", order), size),
                size,
                |b, _| {
                    b.iter(|| {
                        let mut tree = BTree::new(order).unwrap();
                        for &k in &keys {
                            black_box(tree.put(k, k));
                        }
                        black_box(tree)
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let keys = generate_keys(10_000);

    let map: BTreeMap<i32, i32> = keys.iter().map(|&k| (k, k)).collect();
    group.bench_function("std_btreemap", |b| {
        b.iter(|| {
            for k in keys.iter().step_by(10) {
                black_box(map.get(k));
            }
        })
    });

    for order in [4, 16, 64] {
        let tree = BTree::from_pairs(order, mwaytree::NaturalOrder, keys.iter().map(|&k| (k, k))).unwrap();
        group.bench_function(format!("btree_order_{}", order), |b| {
            b.iter(|| {
                for k in keys.iter().step_by(10) {
                    black_box(tree.get(k));
                }
            })
        });
    }
    group.finish();
}

fn bench_removal(c: &mut Criterion) {
    let mut group = c.benchmark_group("removal");
    group.sample_size(20);
    let keys = generate_keys(5_000);

    for order in [3, 16, 64] {
        let tree = BTree::from_pairs(order, mwaytree::NaturalOrder, keys.iter().map(|&k| (k, k))).unwrap();
        group.bench_function(format!("btree_order_{}", order), |b| {
            b.iter(|| {
                let mut tree = tree.clone();
                for k in &keys {
                    black_box(tree.remove(k));
                }
                black_box(tree)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insertion, bench_lookup, bench_removal);
criterion_main!(benches);
