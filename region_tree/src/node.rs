// Copyright 2025 the Region Tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrant cells and the pruned descent shared by every tree operation.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::tree::TreeConfig;
use crate::types::{Aabb2D, Scalar, le, lt};

bitflags::bitflags! {
    /// Quadrants of a cell around its split point. The y axis grows downward.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) struct Quadrants: u8 {
        const TOP_LEFT = 0b0001;
        const TOP_RIGHT = 0b0010;
        const BOTTOM_LEFT = 0b0100;
        const BOTTOM_RIGHT = 0b1000;
    }
}

impl Quadrants {
    const LEFT: Self = Self::TOP_LEFT.union(Self::BOTTOM_LEFT);
    const RIGHT: Self = Self::TOP_RIGHT.union(Self::BOTTOM_RIGHT);
    const TOP: Self = Self::TOP_LEFT.union(Self::TOP_RIGHT);
    const BOTTOM: Self = Self::BOTTOM_LEFT.union(Self::BOTTOM_RIGHT);

    /// Child array index of a single quadrant.
    fn child_index(self) -> usize {
        debug_assert_eq!(self.bits().count_ones(), 1, "expected a single quadrant");
        self.bits().trailing_zeros() as usize
    }

    /// Lowest single quadrant of a non-empty set.
    fn first(self) -> Option<Self> {
        self.iter().next()
    }
}

/// A cell of the tree.
///
/// Non-root nodes only hold entries contained in their cell. Entries that do not
/// fit a single quadrant stay here rather than being split across children. The
/// root may additionally hold entries outside its cell when it cannot grow any
/// further.
#[derive(Debug)]
pub(crate) struct Node<T> {
    cell: Aabb2D<T>,
    split_x: T,
    split_y: T,
    subdivided: bool,
    /// `(slot, rect)` in insertion order.
    entries: Vec<(usize, Aabb2D<T>)>,
    children: [Option<Box<Node<T>>>; 4],
}

impl<T: Scalar> Node<T> {
    /// Create an empty leaf split at the midpoint of `cell`.
    pub(crate) fn new(cell: Aabb2D<T>) -> Self {
        let split_x = T::mid(cell.min_x, cell.max_x);
        let split_y = T::mid(cell.min_y, cell.max_y);
        Self::with_split(cell, split_x, split_y)
    }

    fn with_split(cell: Aabb2D<T>, split_x: T, split_y: T) -> Self {
        Self {
            cell,
            split_x,
            split_y,
            subdivided: false,
            entries: Vec::new(),
            children: [None, None, None, None],
        }
    }

    /// Seed a root cell from the first inserted box.
    ///
    /// Degenerate axes are padded by [`Scalar::unit_at`].
    pub(crate) fn seeded(rect: &Aabb2D<T>) -> Self {
        let mut cell = *rect;
        if !lt(cell.min_x, cell.max_x) {
            cell.max_x = T::add(cell.min_x, T::unit_at(cell.min_x));
        }
        if !lt(cell.min_y, cell.max_y) {
            cell.max_y = T::add(cell.min_y, T::unit_at(cell.min_y));
        }
        Self::new(cell)
    }

    pub(crate) fn cell(&self) -> &Aabb2D<T> {
        &self.cell
    }

    fn quadrant_cell(&self, q: Quadrants) -> Aabb2D<T> {
        let (min_x, max_x) = if Quadrants::LEFT.contains(q) {
            (self.cell.min_x, self.split_x)
        } else {
            (self.split_x, self.cell.max_x)
        };
        let (min_y, max_y) = if Quadrants::TOP.contains(q) {
            (self.cell.min_y, self.split_y)
        } else {
            (self.split_y, self.cell.max_y)
        };
        Aabb2D::new(min_x, min_y, max_x, max_y)
    }

    /// Quadrants whose cell fully contains `rect`.
    ///
    /// More than one bit is set only for degenerate boxes lying on a split line.
    fn quadrants_containing(&self, rect: &Aabb2D<T>) -> Quadrants {
        if !self.cell.contains(rect) {
            return Quadrants::empty();
        }
        let mut x = Quadrants::empty();
        if le(rect.max_x, self.split_x) {
            x |= Quadrants::LEFT;
        }
        if le(self.split_x, rect.min_x) {
            x |= Quadrants::RIGHT;
        }
        let mut y = Quadrants::empty();
        if le(rect.max_y, self.split_y) {
            y |= Quadrants::TOP;
        }
        if le(self.split_y, rect.min_y) {
            y |= Quadrants::BOTTOM;
        }
        x & y
    }

    /// Quadrants whose cell strictly overlaps `query`.
    fn quadrants_overlapping(&self, query: &Aabb2D<T>) -> Quadrants {
        let mut x = Quadrants::empty();
        if lt(query.min_x, self.split_x) && lt(self.cell.min_x, query.max_x) {
            x |= Quadrants::LEFT;
        }
        if lt(self.split_x, query.max_x) && lt(query.min_x, self.cell.max_x) {
            x |= Quadrants::RIGHT;
        }
        let mut y = Quadrants::empty();
        if lt(query.min_y, self.split_y) && lt(self.cell.min_y, query.max_y) {
            y |= Quadrants::TOP;
        }
        if lt(self.split_y, query.max_y) && lt(query.min_y, self.cell.max_y) {
            y |= Quadrants::BOTTOM;
        }
        x & y
    }

    fn child_or_insert(&mut self, q: Quadrants) -> &mut Self {
        let cell = self.quadrant_cell(q);
        self.children[q.child_index()].get_or_insert_with(|| Box::new(Self::new(cell)))
    }

    /// Place an entry at the deepest node whose quadrant fully contains it.
    pub(crate) fn insert(
        &mut self,
        slot: usize,
        rect: Aabb2D<T>,
        depth: usize,
        config: &TreeConfig<T>,
    ) {
        if !self.subdivided
            && depth < config.max_depth
            && self.entries.len() >= config.node_capacity
        {
            self.subdivide(depth, config);
        }
        if self.subdivided
            && let Some(q) = self.quadrants_containing(&rect).first()
        {
            self.child_or_insert(q).insert(slot, rect, depth + 1, config);
            return;
        }
        self.entries.push((slot, rect));
    }

    /// Push local entries that fit a single quadrant down into lazily created children.
    fn subdivide(&mut self, depth: usize, config: &TreeConfig<T>) {
        log::trace!(
            "subdividing cell {:?} at depth {depth} ({} entries)",
            self.cell,
            self.entries.len()
        );
        self.subdivided = true;
        let entries = core::mem::take(&mut self.entries);
        for (slot, rect) in entries {
            match self.quadrants_containing(&rect).first() {
                Some(q) => self.child_or_insert(q).insert(slot, rect, depth + 1, config),
                None => self.entries.push((slot, rect)),
            }
        }
    }

    /// Remove the entry for `slot`, searching only nodes whose cell contains `rect`.
    pub(crate) fn remove(&mut self, slot: usize, rect: &Aabb2D<T>) -> bool {
        if let Some(pos) = self.entries.iter().position(|(s, _)| *s == slot) {
            self.entries.remove(pos);
            return true;
        }
        if !self.subdivided {
            return false;
        }
        for q in self.quadrants_containing(rect).iter() {
            if let Some(child) = self.children[q.child_index()].as_mut()
                && child.remove(slot, rect)
            {
                return true;
            }
        }
        false
    }

    /// Call `f` for every entry whose box strictly overlaps `query`.
    ///
    /// Local entries are always tested; children are skipped unless their cell
    /// overlaps `query`, which is sound because children only hold contained entries.
    pub(crate) fn visit_overlapping<F>(&self, query: &Aabb2D<T>, f: &mut F)
    where
        F: FnMut(usize, &Aabb2D<T>),
    {
        for (slot, rect) in &self.entries {
            if rect.overlaps(query) {
                f(*slot, rect);
            }
        }
        if !self.subdivided {
            return;
        }
        for q in self.quadrants_overlapping(query).iter() {
            if let Some(child) = &self.children[q.child_index()] {
                child.visit_overlapping(query, f);
            }
        }
    }

    /// Wrap this node as one quadrant of a cell twice as large, extended toward `target`.
    ///
    /// The split point of the new cell is the shared corner, so the old cell is
    /// exactly one of its quadrants. Entries that were outside the old cell move
    /// up to the new root. Returns `Err(self)` once the extent can no longer grow.
    pub(crate) fn grow_toward(mut self, target: &Aabb2D<T>) -> Result<Self, Self> {
        let c = self.cell;
        let w = T::sub(c.max_x, c.min_x);
        let h = T::sub(c.max_y, c.min_y);
        let (min_x, max_x, split_x, x_half) = if lt(target.min_x, c.min_x) {
            (T::sub(c.min_x, w), c.max_x, c.min_x, Quadrants::RIGHT)
        } else {
            (c.min_x, T::add(c.max_x, w), c.max_x, Quadrants::LEFT)
        };
        let (min_y, max_y, split_y, y_half) = if lt(target.min_y, c.min_y) {
            (T::sub(c.min_y, h), c.max_y, c.min_y, Quadrants::BOTTOM)
        } else {
            (c.min_y, T::add(c.max_y, h), c.max_y, Quadrants::TOP)
        };
        let cell = Aabb2D::new(min_x, min_y, max_x, max_y);
        if cell == c {
            return Err(self);
        }

        let (kept, hoisted): (Vec<_>, Vec<_>) = core::mem::take(&mut self.entries)
            .into_iter()
            .partition(|(_, r)| c.contains(r));
        self.entries = kept;

        let q = x_half & y_half;
        let mut root = Self::with_split(cell, split_x, split_y);
        root.subdivided = true;
        root.entries = hoisted;
        root.children[q.child_index()] = Some(Box::new(self));
        Ok(root)
    }

    /// Number of nodes in this subtree, including `self`.
    pub(crate) fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(|c| c.node_count())
            .sum::<usize>()
    }

    /// Number of levels in this subtree, including `self`.
    pub(crate) fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(|c| c.depth())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn config<T>(node_capacity: usize) -> TreeConfig<T> {
        TreeConfig {
            node_capacity,
            ..TreeConfig::default()
        }
    }

    fn slots_in(node: &Node<f64>, query: Aabb2D<f64>) -> Vec<usize> {
        let mut out = Vec::new();
        node.visit_overlapping(&query, &mut |slot, _| out.push(slot));
        out.sort_unstable();
        out
    }

    #[test]
    fn quadrant_cells_tile_the_parent() {
        let n = Node::new(Aabb2D::new(0.0, 0.0, 4.0, 2.0));
        assert_eq!(
            n.quadrant_cell(Quadrants::TOP_LEFT),
            Aabb2D::new(0.0, 0.0, 2.0, 1.0)
        );
        assert_eq!(
            n.quadrant_cell(Quadrants::BOTTOM_RIGHT),
            Aabb2D::new(2.0, 1.0, 4.0, 2.0)
        );
        assert_eq!(Quadrants::TOP_LEFT.child_index(), 0);
        assert_eq!(Quadrants::BOTTOM_RIGHT.child_index(), 3);
    }

    #[test]
    fn straddling_boxes_fit_no_quadrant() {
        let n = Node::new(Aabb2D::new(0.0, 0.0, 4.0, 4.0));
        assert_eq!(
            n.quadrants_containing(&Aabb2D::new(0.5, 0.5, 1.5, 1.5)),
            Quadrants::TOP_LEFT
        );
        assert!(
            n.quadrants_containing(&Aabb2D::new(1.0, 1.0, 3.0, 1.5))
                .is_empty()
        );
        // A point on the split point touches all four cells.
        assert_eq!(
            n.quadrants_containing(&Aabb2D::new(2.0, 2.0, 2.0, 2.0)),
            Quadrants::all()
        );
    }

    #[test]
    fn overlap_mask_ignores_split_line_contact() {
        let n = Node::new(Aabb2D::new(0.0, 0.0, 4.0, 4.0));
        assert_eq!(
            n.quadrants_overlapping(&Aabb2D::new(0.0, 0.0, 2.0, 2.0)),
            Quadrants::TOP_LEFT
        );
        assert_eq!(
            n.quadrants_overlapping(&Aabb2D::new(1.0, 1.0, 3.0, 3.0)),
            Quadrants::all()
        );
        assert!(
            n.quadrants_overlapping(&Aabb2D::new(4.0, 0.0, 5.0, 4.0))
                .is_empty()
        );
    }

    #[test]
    fn subdivision_pushes_fitting_entries_down() {
        let cfg = config(2);
        let mut n = Node::new(Aabb2D::new(0.0, 0.0, 8.0, 8.0));
        n.insert(0, Aabb2D::new(1.0, 1.0, 2.0, 2.0), 0, &cfg);
        n.insert(1, Aabb2D::new(3.0, 3.0, 5.0, 5.0), 0, &cfg);
        assert_eq!(n.node_count(), 1);
        n.insert(2, Aabb2D::new(6.0, 6.0, 7.0, 7.0), 0, &cfg);
        assert!(n.subdivided);
        // The straddler stays; the other two moved to their quadrants.
        assert_eq!(n.entries, vec![(1, Aabb2D::new(3.0, 3.0, 5.0, 5.0))]);
        assert_eq!(n.node_count(), 3);
        assert_eq!(slots_in(&n, Aabb2D::new(0.0, 0.0, 8.0, 8.0)), vec![0, 1, 2]);
        assert_eq!(slots_in(&n, Aabb2D::new(5.5, 5.5, 6.5, 6.5)), vec![2]);
    }

    #[test]
    fn max_depth_bounds_subdivision() {
        let cfg = TreeConfig {
            node_capacity: 1,
            max_depth: 3,
            world: None,
        };
        let mut n = Node::new(Aabb2D::new(0.0, 0.0, 1024.0, 1024.0));
        for i in 0..32 {
            n.insert(i, Aabb2D::new(0.0, 0.0, 0.001, 0.001), 0, &cfg);
        }
        assert_eq!(n.depth(), 4);
        assert_eq!(slots_in(&n, Aabb2D::new(0.0, 0.0, 1.0, 1.0)).len(), 32);
    }

    #[test]
    fn remove_finds_split_line_points() {
        let cfg = config(1);
        let mut n = Node::new(Aabb2D::new(0.0, 0.0, 8.0, 8.0));
        n.insert(0, Aabb2D::new(1.0, 1.0, 2.0, 2.0), 0, &cfg);
        n.insert(1, Aabb2D::new(4.0, 4.0, 4.0, 4.0), 0, &cfg);
        n.insert(2, Aabb2D::new(4.0, 1.0, 4.0, 2.0), 0, &cfg);
        assert!(n.remove(1, &Aabb2D::new(4.0, 4.0, 4.0, 4.0)));
        assert!(n.remove(2, &Aabb2D::new(4.0, 1.0, 4.0, 2.0)));
        assert!(!n.remove(2, &Aabb2D::new(4.0, 1.0, 4.0, 2.0)));
        assert_eq!(slots_in(&n, Aabb2D::new(0.0, 0.0, 8.0, 8.0)), vec![0]);
    }

    #[test]
    fn growth_keeps_old_cell_as_exact_quadrant() {
        let n = Node::<f64>::new(Aabb2D::new(0.0, 0.0, 1.0, 1.0));
        let grown = n.grow_toward(&Aabb2D::new(-3.0, 0.5, -2.0, 0.7)).unwrap();
        assert_eq!(*grown.cell(), Aabb2D::new(-1.0, 0.0, 1.0, 2.0));
        let old = grown.children[Quadrants::TOP_RIGHT.child_index()]
            .as_ref()
            .unwrap();
        assert_eq!(*old.cell(), Aabb2D::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(
            grown.quadrant_cell(Quadrants::TOP_RIGHT),
            Aabb2D::new(0.0, 0.0, 1.0, 1.0)
        );
    }

    #[test]
    fn growth_hoists_uncontained_root_entries() {
        let cfg = config(8);
        let mut n = Node::<i64>::new(Aabb2D::new(0, 0, 4, 4));
        n.insert(0, Aabb2D::new(1, 1, 2, 2), 0, &cfg);
        // Entries outside the cell can only sit at the root.
        n.insert(1, Aabb2D::new(10, 10, 12, 12), 0, &cfg);
        let grown = n.grow_toward(&Aabb2D::new(5, 5, 6, 6)).unwrap();
        assert_eq!(grown.entries, vec![(1, Aabb2D::new(10, 10, 12, 12))]);
        let mut hits = Vec::new();
        grown.visit_overlapping(&Aabb2D::new(0, 0, 20, 20), &mut |s, _| hits.push(s));
        hits.sort_unstable();
        assert_eq!(hits, vec![0, 1]);
    }

    #[test]
    fn growth_stops_when_saturated() {
        let n = Node::<i64>::new(Aabb2D::new(i64::MIN, i64::MIN, i64::MAX, i64::MAX));
        assert!(n.grow_toward(&Aabb2D::new(0, 0, 1, 1)).is_err());
    }

    #[test]
    fn seeded_pads_degenerate_axes() {
        let n = Node::<f64>::seeded(&Aabb2D::new(1.5, 1.5, 1.5, 3.0));
        assert_eq!(*n.cell(), Aabb2D::new(1.5, 1.5, 2.5, 3.0));
    }

    #[test]
    fn seeded_point_at_large_coordinates_can_grow() {
        let at = 1.0e17;
        let n = Node::<f64>::seeded(&Aabb2D::new(at, at, at, at));
        assert!(n.cell().max_x > at && n.cell().max_y > at);
        assert!(n.grow_toward(&Aabb2D::new(2.0e17, 0.0, 2.0e17, 0.0)).is_ok());
    }
}
