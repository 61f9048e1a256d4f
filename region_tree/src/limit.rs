// Copyright 2025 the Region Tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters mapping stored values to their bounding rectangles.

use crate::types::Aabb2D;

/// Maps a stored value to the rectangle it is indexed under.
///
/// A [`Tree`](crate::Tree) calls [`limit_rect`](LimitRect::limit_rect) exactly once
/// per value, when the value is inserted or replaces another one. The result is
/// stored next to the value and never recomputed, so a value whose geometry
/// changes must be re-inserted through one of the replace operations.
///
/// Closures of the form `Fn(&V) -> Aabb2D<T>` implement this trait.
pub trait LimitRect<V, T> {
    /// Bounding rectangle of `value`.
    fn limit_rect(&self, value: &V) -> Aabb2D<T>;
}

impl<V, T, F> LimitRect<V, T> for F
where
    F: Fn(&V) -> Aabb2D<T>,
{
    fn limit_rect(&self, value: &V) -> Aabb2D<T> {
        self(value)
    }
}

/// Adapter for values that are, or embed, their own rectangle.
///
/// Any `V: AsRef<Aabb2D<T>>` qualifies, including `Aabb2D<T>` itself.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SelfBounds;

impl<V, T> LimitRect<V, T> for SelfBounds
where
    V: AsRef<Aabb2D<T>>,
    T: Copy,
{
    fn limit_rect(&self, value: &V) -> Aabb2D<T> {
        *value.as_ref()
    }
}

/// Adapter indexing any [`kurbo::Shape`] by its bounding box.
#[cfg(feature = "kurbo")]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ShapeBounds;

#[cfg(feature = "kurbo")]
impl<S: kurbo::Shape> LimitRect<S, f64> for ShapeBounds {
    fn limit_rect(&self, value: &S) -> Aabb2D<f64> {
        value.bounding_box().into()
    }
}
