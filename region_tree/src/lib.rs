// Copyright 2025 the Region Tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=region_tree --heading-base-level=0

//! Region Tree: a mutable 2D index of values keyed by bounding rectangles.
//!
//! - Add values; each value's rectangle is obtained once through a [`LimitRect`] adapter.
//! - Query by rectangle, or traverse everything.
//! - Replace whatever occupies a region in one all-or-nothing step, or move an
//!   existing value (matched by identity) to a new rectangle.
//!
//! It is generic over the scalar type `T` (`f32`, `f64`, `i64`) and over the stored value.
//!
//! # Strict overlap
//!
//! Two rectangles intersect only when their interiors overlap. Rectangles that
//! share an edge or a corner do not, so adjacent tiles never conflict with each
//! other. A degenerate query (a point) strictly inside a rectangle does hit it.
//!
//! # Example
//!
//! ```rust
//! use region_tree::{Aabb2D, Replace, Tree};
//!
//! let mut tree: Tree<f64, Aabb2D<f64>> = Tree::new();
//! for r in [
//!     Aabb2D::new(0.0, 0.0, 1.0, 1.0),
//!     Aabb2D::new(1.0, 1.0, 2.0, 2.0),
//!     Aabb2D::new(2.0, 2.0, 3.0, 3.0),
//! ] {
//!     tree.add(r);
//! }
//!
//! // The middle box touches the other two only at corners.
//! let hits: Vec<_> = tree.query_rect(Aabb2D::new(1.0, 1.0, 2.0, 2.0)).collect();
//! assert_eq!(hits, [&Aabb2D::new(1.0, 1.0, 2.0, 2.0)]);
//!
//! // Collapse all three into one box.
//! let merged = Aabb2D::new(0.5, 0.5, 2.5, 2.5);
//! assert_eq!(
//!     tree.replace_all_in_rect(merged, |_, _| true),
//!     Replace::Replaced { removed: 3 }
//! );
//! assert_eq!(tree.len(), 1);
//! ```
//!
//! Values that are not rectangles are indexed through an adapter, which may be
//! any closure:
//!
//! ```rust
//! use region_tree::{Aabb2D, Replace, Tree};
//!
//! #[derive(Debug)]
//! struct Label {
//!     id: u32,
//!     at: (i64, i64),
//! }
//!
//! let mut tree =
//!     Tree::with_limit(|l: &Label| Aabb2D::new(l.at.0, l.at.1, l.at.0 + 10, l.at.1 + 2));
//! tree.add(Label { id: 1, at: (0, 0) });
//! tree.add(Label { id: 2, at: (20, 0) });
//!
//! // Move label 2 next to label 1 without duplicating it.
//! let moved = tree.replace_equal_in_rect(
//!     Label { id: 2, at: (15, 1) },
//!     |a, b| a.id == b.id,
//!     |_, _| true,
//! );
//! assert_eq!(moved, Replace::Replaced { removed: 1 });
//! assert_eq!(tree.len(), 2);
//! ```
//!
//! ## Internals
//!
//! The index is a quadtree whose root cell grows on demand. Entries sit at the
//! deepest cell whose quadrant fully contains them; entries straddling a split
//! line stay at the common ancestor. See [`TreeConfig`] for the subdivision policy.
//!
//! ## Features
//!
//! - `kurbo`: conversions between [`Aabb2D<f64>`] and `kurbo::Rect`, and the
//!   [`ShapeBounds`] adapter indexing any `kurbo::Shape` by its bounding box.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Debug builds assert.
//!
//! This crate is `no_std` and uses `alloc`. Diagnostics go through the `log` facade.

#![no_std]

extern crate alloc;

pub mod error;
pub mod limit;
mod node;
pub mod tree;
pub mod types;

pub use error::ConfigError;
#[cfg(feature = "kurbo")]
pub use limit::ShapeBounds;
pub use limit::{LimitRect, SelfBounds};
pub use tree::{Replace, Tree, TreeConfig};
pub use types::{Aabb2D, Scalar};
