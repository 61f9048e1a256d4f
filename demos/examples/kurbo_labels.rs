// Copyright 2025 the Region Tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kurbo shapes indexed by bounding box, and labels moved by identity.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p region_tree_demos --example kurbo_labels`

use kurbo::{Circle, Point, Rect, Shape};
use region_tree::{Aabb2D, Replace, ShapeBounds, Tree};

#[derive(Clone, Debug)]
struct Label {
    id: u32,
    text: &'static str,
    anchor: Point,
}

impl Label {
    fn bounds(&self) -> Aabb2D<f64> {
        let w = 7.0 * self.text.len() as f64;
        Rect::from_origin_size(self.anchor, (w, 14.0)).into()
    }
}

fn main() {
    env_logger::init();

    // Shapes: the adapter asks kurbo for each bounding box once.
    let mut shapes = Tree::with_limit(ShapeBounds);
    for i in 0..20 {
        let center = Point::new(30.0 * f64::from(i), 40.0);
        shapes.add(Circle::new(center, 12.0));
    }
    let viewport: Aabb2D<f64> = Rect::new(100.0, 0.0, 250.0, 80.0).into();
    let visible: Vec<_> = shapes.query_rect(viewport).map(|c| c.center).collect();
    println!("circles in viewport: {visible:?}");
    println!("first area: {:?}", shapes.iter().next().map(Shape::area));

    // Labels: moving a label updates it in place instead of duplicating it.
    let mut labels = Tree::with_limit(Label::bounds);
    labels.add(Label {
        id: 1,
        text: "harbor",
        anchor: Point::new(0.0, 0.0),
    });
    labels.add(Label {
        id: 2,
        text: "lighthouse",
        anchor: Point::new(60.0, 0.0),
    });

    let nudged = Label {
        id: 2,
        text: "lighthouse",
        anchor: Point::new(64.0, 6.0),
    };
    let outcome = labels.replace_equal_in_rect(nudged, |a, b| a.id == b.id, |_, _| true);
    assert_eq!(outcome, Replace::Replaced { removed: 1 });
    labels.for_each_with_rect(|rect, label| println!("{} ({}) at {rect:?}", label.text, label.id));
}
