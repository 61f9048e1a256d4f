// Copyright 2025 the Region Tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared rectangle generators for the Region Tree benchmarks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use region_tree::Aabb2D;

/// `n * n` edge-sharing square tiles of side `cell`.
pub fn grid_tiles(n: usize, cell: f64) -> Vec<Aabb2D<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Aabb2D::<f64>::from_xywh(x0, y0, cell, cell));
        }
    }
    out
}

/// `count` random boxes inside `[0, span)²` with sides up to `max_side`.
pub fn random_rects(seed: u64, count: usize, span: f64, max_side: f64) -> Vec<Aabb2D<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let x = rng.random_range(0.0..span);
            let y = rng.random_range(0.0..span);
            let w = rng.random_range(0.0..max_side);
            let h = rng.random_range(0.0..max_side);
            Aabb2D::new(x, y, x + w, y + h)
        })
        .collect()
}
