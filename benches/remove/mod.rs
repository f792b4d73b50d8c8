use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput};
use intreap::Interval;

use crate::{populated, shuffled_intervals, STRIDE};

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("remove");

    for n_values in [100, 1_000, 10_000] {
        let t = populated(n_values);

        // Drain the treap in an order unrelated to the insertion order. Every
        // removal hits a node with zero, one or two children depending on its
        // depth, exercising successor substitution.
        let mut order = shuffled_intervals(n_values);
        order.reverse();

        g.throughput(Throughput::Elements(n_values as _)); // Removals per second
        g.bench_function(BenchmarkId::new("drain", n_values), |b| {
            b.iter_batched(
                || t.clone(),
                |mut t| {
                    for v in &order {
                        black_box(t.remove(v));
                    }
                    assert!(t.is_empty());
                    t
                },
                BatchSize::LargeInput,
            );
        });

        // Point queries that fall in the gap after each stored interval walk a
        // full root-to-leaf path without modifying the tree.
        let misses = (0..n_values as u32)
            .map(|i| Interval::new(i * STRIDE + 3, i * STRIDE + 3).unwrap())
            .collect::<Vec<_>>();

        g.throughput(Throughput::Elements(n_values as _));
        g.bench_function(BenchmarkId::new("misses", n_values), |b| {
            let mut t = t.clone();
            b.iter(|| {
                for v in &misses {
                    black_box(t.remove(v));
                }
            });
            assert_eq!(t.len(), n_values);
        });
    }
}
