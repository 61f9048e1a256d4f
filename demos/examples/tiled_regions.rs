// Copyright 2025 the Region Tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Map tiles that share edges, claimed through refusing region replaces.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p region_tree_demos --example tiled_regions`

use region_tree::{Aabb2D, Replace, Tree, TreeConfig};

#[derive(Clone, Debug)]
struct Region {
    rect: Aabb2D<i64>,
    owner: &'static str,
    locked: bool,
}

impl AsRef<Aabb2D<i64>> for Region {
    fn as_ref(&self) -> &Aabb2D<i64> {
        &self.rect
    }
}

const TILE: i64 = 256;

fn main() {
    env_logger::init();

    let config = TreeConfig {
        node_capacity: 4,
        max_depth: 12,
        world: Some(Aabb2D::new(0, 0, 16 * TILE, 16 * TILE)),
    };
    let mut tree = Tree::with_config(region_tree::SelfBounds, config)
        .expect("static config is valid");

    // A 16x16 tile map. Neighbors share edges, so nothing conflicts.
    for y in 0..16 {
        for x in 0..16 {
            let region = Region {
                rect: Aabb2D::<i64>::from_xywh(x * TILE, y * TILE, TILE, TILE),
                owner: "base",
                locked: x == 8 && y == 8,
            };
            let outcome = tree.replace_all_in_rect(region, |_, _| false);
            assert_eq!(outcome, Replace::Inserted);
        }
    }
    println!("tiles: {}", tree.len());

    // Claim a 3x3 block of tiles; unlocked tiles give way.
    let claim = |x: i64, y: i64, owner| Region {
        rect: Aabb2D::new(x * TILE, y * TILE, (x + 3) * TILE, (y + 3) * TILE),
        owner,
        locked: false,
    };
    let outcome = tree.replace_all_in_rect(claim(1, 1, "north"), |old, _| !old.locked);
    println!("north claim: {outcome:?}, tiles now {}", tree.len());

    // This block covers the locked tile, so the whole claim is refused.
    let outcome = tree.replace_all_in_rect(claim(7, 7, "south"), |old, _| !old.locked);
    println!("south claim: {outcome:?}, tiles now {}", tree.len());

    let probe = Aabb2D::new(2 * TILE + 10, 2 * TILE + 10, 2 * TILE + 20, 2 * TILE + 20);
    for region in tree.query_rect(probe) {
        println!("owner at probe: {} {:?}", region.owner, region.rect);
    }
    println!("{tree:?}");
}
