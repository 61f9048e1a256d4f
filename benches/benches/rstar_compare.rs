// Copyright 2025 the Region Tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use region_tree::{Aabb2D, Tree};
use region_tree_benches::grid_tiles;

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn to_rstar_rects(v: &[Aabb2D<f64>]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|r| Rectangle::from_corners([r.min_x, r.min_y], [r.max_x, r.max_y]))
        .collect()
}

fn bench_rstar_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rstar_compare_f64");
    for &n in &[64usize, 128] {
        let rects = grid_tiles(n, 10.0);
        let query = Aabb2D::<f64>::from_xywh(100.0, 100.0, 400.0, 400.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("region_tree_build_query_n{}", n), |b| {
            b.iter(|| {
                let mut tree: Tree<f64, Aabb2D<f64>> = Tree::new();
                for r in &rects {
                    tree.add(*r);
                }
                let hits: usize = tree.query_rect(query).count();
                black_box(hits);
            });
        });

        group.bench_function(format!("rstar_build_query_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let mut tree = RTree::new();
                    for r in rectangles {
                        tree.insert(r);
                    }
                    let aabb = AABB::from_corners(
                        [query.min_x, query.min_y],
                        [query.max_x, query.max_y],
                    );
                    // rstar counts boundary contact; only the timing is compared.
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rstar_compare_f64);
criterion_main!(benches);
