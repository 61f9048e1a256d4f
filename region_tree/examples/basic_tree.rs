// Copyright 2025 the Region Tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Region Tree: add, query, and replace a region.

use region_tree::{Aabb2D, Tree};

fn main() {
    let mut tree: Tree<i64, Aabb2D<i64>> = Tree::new();
    tree.add(Aabb2D::new(0, 0, 10, 10));
    tree.add(Aabb2D::new(10, 0, 20, 10));

    // Adjacent boxes share an edge but do not intersect.
    let hits: Vec<_> = tree.query_rect(Aabb2D::new(0, 0, 10, 10)).collect();
    println!("hits for the first box: {hits:?}");

    // Merge both into one box spanning them.
    let outcome = tree.replace_all_in_rect(Aabb2D::new(5, 0, 15, 10), |_, _| true);
    println!("replace: {outcome:?}, len = {}", tree.len());
    println!("{tree:?}");
}
