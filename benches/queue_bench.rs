//! Criterion benchmarks for OrderedMultiQueue
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench queue_bench
//!
//! # Only the duplicate-heavy workloads
//! cargo bench --bench queue_bench -- 'duplicates'
//! ```
//!
//! The tree is unbalanced, so the `sorted` inputs show the worst case (a path
//! of depth n) next to the `shuffled` inputs' expected O(log n) depth.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ordered_multi_queue::OrderedMultiQueue;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Minimal LCG so benchmark inputs are reproducible without extra deps
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        self.0 >> 33
    }
}

fn shuffled(n: usize, distinct: u64, seed: u64) -> Vec<i64> {
    let mut rng = Lcg(seed);
    (0..n).map(|_| (rng.next() % distinct) as i64).collect()
}

fn fill(priorities: &[i64]) -> OrderedMultiQueue<usize, i64> {
    priorities.iter().copied().enumerate().collect()
}

fn benchmark_insert_then_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_then_drain");

    for n in [1_000usize, 10_000, 50_000] {
        let input = shuffled(n, u64::MAX >> 33, 12345);

        group.bench_with_input(BenchmarkId::new("shuffled", n), &input, |b, input| {
            b.iter(|| {
                let mut queue = fill(input);
                while let Ok(entry) = queue.remove_min() {
                    black_box(entry);
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("std_binary_heap", n), &input, |b, input| {
            b.iter(|| {
                let mut heap: BinaryHeap<Reverse<(i64, usize)>> = input
                    .iter()
                    .copied()
                    .enumerate()
                    .map(|(i, p)| Reverse((p, i)))
                    .collect();
                while let Some(entry) = heap.pop() {
                    black_box(entry);
                }
            });
        });
    }

    // Sorted input degrades the tree to a path, so keep n small
    for n in [1_000usize, 4_000] {
        let input: Vec<i64> = (0..n as i64).collect();
        group.bench_with_input(BenchmarkId::new("sorted", n), &input, |b, input| {
            b.iter(|| {
                let mut queue = fill(input);
                while let Ok(entry) = queue.remove_min() {
                    black_box(entry);
                }
            });
        });
    }

    group.finish();
}

fn benchmark_duplicates(c: &mut Criterion) {
    let mut group = c.benchmark_group("duplicates");

    for distinct in [4u64, 64, 1_024] {
        let input = shuffled(10_000, distinct, 777);
        group.bench_with_input(
            BenchmarkId::new("insert_then_drain", distinct),
            &input,
            |b, input| {
                b.iter(|| {
                    let mut queue = fill(input);
                    while let Ok(entry) = queue.remove_min() {
                        black_box(entry);
                    }
                });
            },
        );
    }

    group.finish();
}

fn benchmark_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");
    let queue = fill(&shuffled(50_000, 5_000, 4242));

    group.bench_function("iter", |b| {
        b.iter(|| black_box(queue.iter().map(|(p, _)| *p).sum::<i64>()));
    });

    group.bench_function("clone", |b| {
        b.iter(|| black_box(queue.clone()));
    });

    group.bench_function("eq", |b| {
        let copy = queue.clone();
        b.iter(|| black_box(copy == queue));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert_then_drain,
    benchmark_duplicates,
    benchmark_traversal,
);

criterion_main!(benches);
