// Copyright 2025 the Region Tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use region_tree::{Aabb2D, Tree};
use region_tree_benches::{grid_tiles, random_rects};

fn build(rects: &[Aabb2D<f64>]) -> Tree<f64, Aabb2D<f64>> {
    let mut tree = Tree::new();
    for r in rects {
        tree.add(*r);
    }
    tree
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    for &n in &[32usize, 64, 128] {
        let rects = grid_tiles(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter(|| black_box(build(&rects).len()));
        });
    }
    let rects = random_rects(7, 10_000, 5_000.0, 60.0);
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("random_10k", |b| {
        b.iter(|| black_box(build(&rects).len()));
    });
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_rect");
    let rects = random_rects(11, 20_000, 5_000.0, 60.0);
    let tree = build(&rects);
    let queries = random_rects(13, 256, 5_000.0, 400.0);
    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("tree_random_20k", |b| {
        b.iter(|| {
            let hits: usize = queries.iter().map(|q| tree.query_rect(*q).count()).sum();
            black_box(hits)
        });
    });
    group.bench_function("linear_scan_random_20k", |b| {
        b.iter(|| {
            let hits: usize = queries
                .iter()
                .map(|q| rects.iter().filter(|r| r.overlaps(q)).count())
                .sum();
            black_box(hits)
        });
    });
    group.finish();
}

fn bench_replace(c: &mut Criterion) {
    let mut group = c.benchmark_group("replace_all_in_rect");
    let rects = grid_tiles(64, 10.0);
    let patches = random_rects(17, 512, 640.0, 40.0);
    group.throughput(Throughput::Elements(patches.len() as u64));
    group.bench_function("approve_grid_n64", |b| {
        b.iter_batched(
            || build(&rects),
            |mut tree| {
                for p in &patches {
                    let _ = tree.replace_all_in_rect(*p, |_, _| true);
                }
                black_box(tree.len())
            },
            BatchSize::LargeInput,
        );
    });
    group.bench_function("veto_grid_n64", |b| {
        let mut tree = build(&rects);
        b.iter(|| {
            for p in &patches {
                let _ = tree.replace_all_in_rect(*p, |_, _| false);
            }
            black_box(tree.len())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_add, bench_query, bench_replace);
criterion_main!(benches);
