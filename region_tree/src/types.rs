// Copyright 2025 the Region Tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt::Debug;

/// Axis-aligned bounding box in 2D.
///
/// Intersection is strict: two boxes intersect only when their open interiors
/// overlap along both axes, so boxes that merely share an edge or a corner are
/// disjoint. See [`Aabb2D::overlaps`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T> AsRef<Self> for Aabb2D<T> {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Whether the open interiors of the two boxes overlap.
    ///
    /// Per axis this is `a.min < b.max && b.min < a.max`. Touching edges and
    /// corners do not count, while a degenerate (point or line) box strictly
    /// inside another one does.
    ///
    /// ```
    /// use region_tree::Aabb2D;
    ///
    /// let a = Aabb2D::new(0.0, 0.0, 1.0, 1.0);
    /// assert!(!a.overlaps(&Aabb2D::new(1.0, 1.0, 2.0, 2.0)));
    /// assert!(a.overlaps(&Aabb2D::new(0.5, 0.5, 0.5, 0.5)));
    /// ```
    pub fn overlaps(&self, other: &Self) -> bool {
        lt(self.min_x, other.max_x)
            && lt(other.min_x, self.max_x)
            && lt(self.min_y, other.max_y)
            && lt(other.min_y, self.max_y)
    }

    /// Whether `other` lies entirely inside this box (boundaries included).
    pub fn contains(&self, other: &Self) -> bool {
        le(self.min_x, other.min_x)
            && le(self.min_y, other.min_y)
            && le(other.max_x, self.max_x)
            && le(other.max_y, self.max_y)
    }

    /// Return true if min <= max on both axes. Always false when a coordinate is NaN.
    pub fn is_well_formed(&self) -> bool {
        le(self.min_x, self.max_x) && le(self.min_y, self.max_y)
    }

    /// Return true if the box has zero extent on either axis.
    pub fn is_degenerate(&self) -> bool {
        !(lt(self.min_x, self.max_x) && lt(self.min_y, self.max_y))
    }
}

impl Aabb2D<f32> {
    /// Create an AABB from origin and size in f32.
    pub const fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }
}

impl Aabb2D<f64> {
    /// Create an AABB from origin and size in f64.
    pub const fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }
}

impl Aabb2D<i64> {
    /// Create an AABB from origin and size in i64.
    pub const fn from_xywh(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x + w,
            max_y: y + h,
        }
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Rect> for Aabb2D<f64> {
    fn from(r: kurbo::Rect) -> Self {
        // Kurbo rectangles may be stored with swapped corners.
        let r = r.abs();
        Self::new(r.x0, r.y0, r.x1, r.y1)
    }
}

#[cfg(feature = "kurbo")]
impl From<Aabb2D<f64>> for kurbo::Rect {
    fn from(a: Aabb2D<f64>) -> Self {
        Self::new(a.min_x, a.min_y, a.max_x, a.max_y)
    }
}

/// Numeric scalar abstraction for the coordinates stored in a [`Tree`](crate::Tree).
///
/// Cells are split at their midpoint and the root cell grows by doubling its
/// extent, so the tree only needs addition, subtraction, a midpoint and a unit.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Extent given to a degenerate axis of a root cell seeded at `at`.
    ///
    /// Never below one unit, and large enough that `at + unit_at(at)` differs from `at`.
    fn unit_at(at: Self) -> Self;

    /// Midpoint between a and b.
    fn mid(a: Self, b: Self) -> Self;
}

impl Scalar for f32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn unit_at(at: Self) -> Self {
        // A few dozen ulps, so the seeded cell can still be split.
        (at.abs() * f32::EPSILON * 64.0).max(1.0)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }
}

impl Scalar for f64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn unit_at(at: Self) -> Self {
        // A few dozen ulps, so the seeded cell can still be split.
        (at.abs() * f64::EPSILON * 64.0).max(1.0)
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }
}

impl Scalar for i64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn unit_at(_at: Self) -> Self {
        1
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Average without overflow: (a & b) + ((a ^ b) >> 1)
        (a & b) + ((a ^ b) >> 1)
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}
