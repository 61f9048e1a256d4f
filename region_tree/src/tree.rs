// Copyright 2025 the Region Tree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `Tree` API: insertion, queries, and replace-in-region updates.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::ConfigError;
use crate::limit::{LimitRect, SelfBounds};
use crate::node::Node;
use crate::types::{Aabb2D, Scalar};

/// Subdivision policy and optional preset extent for a [`Tree`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TreeConfig<T> {
    /// Entries a node holds before it subdivides into quadrants.
    pub node_capacity: usize,
    /// Maximum number of subdivision levels below the root.
    pub max_depth: usize,
    /// Initial root cell. When `None` the root cell is seeded from the first entry.
    ///
    /// Either way the root grows on demand, so this is a sizing hint rather than a limit.
    pub world: Option<Aabb2D<T>>,
}

impl<T> Default for TreeConfig<T> {
    fn default() -> Self {
        Self {
            node_capacity: 8,
            max_depth: 24,
            world: None,
        }
    }
}

impl<T: Scalar> TreeConfig<T> {
    /// Check the policy for values the tree cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if let Some(world) = &self.world
            && (!world.is_well_formed() || world.is_degenerate())
        {
            return Err(ConfigError::InvalidWorld);
        }
        Ok(())
    }
}

/// Outcome of a replace operation.
///
/// A veto is an ordinary outcome: the tree is left exactly as it was.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Replace {
    /// Nothing was in the way; the value was inserted.
    Inserted,
    /// Existing entries were removed and the value was inserted in their place.
    Replaced {
        /// Number of entries removed.
        removed: usize,
    },
    /// A candidate refused to be replaced; nothing changed.
    Vetoed,
}

impl Replace {
    /// True if the new value is now stored in the tree.
    pub fn is_committed(self) -> bool {
        !matches!(self, Self::Vetoed)
    }
}

#[derive(Clone, Debug)]
struct Slot<T, V> {
    rect: Aabb2D<T>,
    value: V,
}

/// A mutable spatial index of values keyed by their bounding rectangle.
///
/// Rectangles are obtained once per value through the [`LimitRect`] adapter `L`
/// and stored alongside it. Queries use strict interior overlap (see
/// [`Aabb2D::overlaps`]), so entries that only touch a query along an edge or at
/// a corner are not reported.
///
/// Values live in a slot vector and the quadrant hierarchy stores slot numbers,
/// so full traversal runs in slot order: with insertions only, that is
/// insertion order.
pub struct Tree<T, V, L = SelfBounds> {
    limit: L,
    config: TreeConfig<T>,
    root: Option<Node<T>>,
    slots: Vec<Option<Slot<T, V>>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T, V> Tree<T, V, SelfBounds>
where
    T: Scalar,
    V: AsRef<Aabb2D<T>>,
{
    /// Create an empty tree for values that carry their own rectangle.
    pub fn new() -> Self {
        Self::with_limit(SelfBounds)
    }
}

impl<T, V> Default for Tree<T, V, SelfBounds>
where
    T: Scalar,
    V: AsRef<Aabb2D<T>>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V, L> Tree<T, V, L>
where
    T: Scalar,
    L: LimitRect<V, T>,
{
    /// Create an empty tree using `limit` to obtain each value's rectangle.
    pub fn with_limit(limit: L) -> Self {
        Self {
            limit,
            config: TreeConfig::default(),
            root: None,
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Create an empty tree with an explicit subdivision policy.
    pub fn with_config(limit: L, config: TreeConfig<T>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            limit,
            root: config.world.map(Node::new),
            config,
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        })
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The subdivision policy in use.
    pub fn config(&self) -> &TreeConfig<T> {
        &self.config
    }

    /// Insert `value` unconditionally at its rectangle. Overlaps are allowed.
    pub fn add(&mut self, value: V) {
        let rect = self.limit.limit_rect(&value);
        self.attach(value, rect);
    }

    /// Insert `value` under `rect` without consulting the adapter.
    pub fn add_with_rect(&mut self, value: V, rect: Aabb2D<T>) {
        self.attach(value, rect);
    }

    /// Iterate over every stored value.
    pub fn iter(&self) -> impl Iterator<Item = &V> + '_ {
        self.slots.iter().flatten().map(|s| &s.value)
    }

    /// Iterate over every stored `(rect, value)` pair.
    pub fn iter_with_rect(&self) -> impl Iterator<Item = (&Aabb2D<T>, &V)> + '_ {
        self.slots.iter().flatten().map(|s| (&s.rect, &s.value))
    }

    /// Visit every stored value.
    pub fn for_each<F: FnMut(&V)>(&self, mut f: F) {
        for value in self.iter() {
            f(value);
        }
    }

    /// Visit every stored value along with its stored rectangle.
    pub fn for_each_with_rect<F: FnMut(&Aabb2D<T>, &V)>(&self, mut f: F) {
        for (rect, value) in self.iter_with_rect() {
            f(rect, value);
        }
    }

    /// Visit every value whose rectangle strictly overlaps `query`.
    pub fn for_each_in_rect<F: FnMut(&V)>(&self, query: Aabb2D<T>, mut f: F) {
        self.for_each_in_rect_with_rect(query, |_, value| f(value));
    }

    /// Visit every `(rect, value)` whose rectangle strictly overlaps `query`.
    pub fn for_each_in_rect_with_rect<F: FnMut(&Aabb2D<T>, &V)>(&self, query: Aabb2D<T>, mut f: F) {
        let Some(root) = &self.root else {
            return;
        };
        root.visit_overlapping(&query, &mut |slot, rect| {
            if let Some(value) = self.value(slot) {
                f(rect, value);
            }
        });
    }

    /// Query for values whose rectangle strictly overlaps `query`.
    pub fn query_rect(&self, query: Aabb2D<T>) -> impl Iterator<Item = &V> + '_ {
        self.overlapping_slots(query)
            .into_iter()
            .filter_map(move |slot| self.value(slot))
    }

    /// First value, in traversal order, satisfying `pred`.
    pub fn find<F: FnMut(&V) -> bool>(&self, mut pred: F) -> Option<&V> {
        self.iter().find(|value| pred(value))
    }

    /// Replace everything overlapping the value's rectangle with the value, or nothing.
    ///
    /// See [`replace_all_in_rect_at`](Self::replace_all_in_rect_at).
    pub fn replace_all_in_rect<F>(&mut self, value: V, can_replace: F) -> Replace
    where
        F: FnMut(&V, &V) -> bool,
    {
        let rect = self.limit.limit_rect(&value);
        self.replace_all_in_rect_at(rect, value, can_replace)
    }

    /// Replace every entry overlapping `rect` with `value`, all or nothing.
    ///
    /// `can_replace(existing, &value)` is asked for each overlapping entry. If every
    /// entry agrees (or there are none) they are all removed and `value` is
    /// inserted under `rect`. A single refusal leaves the tree untouched; the
    /// remaining candidates are not asked.
    ///
    /// ```
    /// use region_tree::{Aabb2D, Replace, Tree};
    ///
    /// let mut tree: Tree<f64, Aabb2D<f64>> = Tree::new();
    /// tree.add(Aabb2D::new(0.0, 0.0, 1.0, 1.0));
    /// tree.add(Aabb2D::new(1.0, 1.0, 2.0, 2.0));
    ///
    /// let keep = tree.replace_all_in_rect(Aabb2D::new(0.5, 0.5, 1.5, 1.5), |_, _| false);
    /// assert_eq!(keep, Replace::Vetoed);
    /// assert_eq!(tree.len(), 2);
    ///
    /// let merged = tree.replace_all_in_rect(Aabb2D::new(0.5, 0.5, 1.5, 1.5), |_, _| true);
    /// assert_eq!(merged, Replace::Replaced { removed: 2 });
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn replace_all_in_rect_at<F>(
        &mut self,
        rect: Aabb2D<T>,
        value: V,
        mut can_replace: F,
    ) -> Replace
    where
        F: FnMut(&V, &V) -> bool,
    {
        let candidates = self.overlapping_slots(rect);
        for &slot in &candidates {
            if let Some(existing) = self.value(slot)
                && !can_replace(existing, &value)
            {
                log::debug!(
                    "replace in {rect:?} vetoed ({} candidate(s))",
                    candidates.len()
                );
                return Replace::Vetoed;
            }
        }
        for &slot in &candidates {
            self.detach(slot);
        }
        self.attach(value, rect);
        if candidates.is_empty() {
            Replace::Inserted
        } else {
            Replace::Replaced {
                removed: candidates.len(),
            }
        }
    }

    /// Update the entry `equal` to `value` near its new rectangle, or insert `value`.
    ///
    /// Entries overlapping the value's rectangle are searched, in traversal
    /// order, for the first one where `equal(existing, &value)` holds. With no
    /// match the value is inserted. With a match, `can_replace(existing, &value)`
    /// decides whether the entry is swapped for `value` (taking `value`'s
    /// rectangle) or the tree is left unchanged.
    pub fn replace_equal_in_rect<E, F>(
        &mut self,
        value: V,
        mut equal: E,
        mut can_replace: F,
    ) -> Replace
    where
        E: FnMut(&V, &V) -> bool,
        F: FnMut(&V, &V) -> bool,
    {
        let rect = self.limit.limit_rect(&value);
        let found = self
            .overlapping_slots(rect)
            .into_iter()
            .find(|&slot| self.value(slot).is_some_and(|existing| equal(existing, &value)));
        let Some(slot) = found else {
            self.attach(value, rect);
            return Replace::Inserted;
        };
        if !self
            .value(slot)
            .is_some_and(|existing| can_replace(existing, &value))
        {
            log::debug!("update of equal entry in {rect:?} vetoed");
            return Replace::Vetoed;
        }
        self.detach(slot);
        self.attach(value, rect);
        Replace::Replaced { removed: 1 }
    }

    fn value(&self, slot: usize) -> Option<&V> {
        self.slots.get(slot)?.as_ref().map(|s| &s.value)
    }

    fn overlapping_slots(&self, query: Aabb2D<T>) -> Vec<usize> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.visit_overlapping(&query, &mut |slot, _| out.push(slot));
        }
        out
    }

    fn attach(&mut self, value: V, rect: Aabb2D<T>) {
        debug_assert!(rect.is_well_formed(), "inverted or NaN rectangle: {rect:?}");
        let slot = if let Some(slot) = self.free_list.pop() {
            self.slots[slot] = Some(Slot { rect, value });
            slot
        } else {
            self.slots.push(Some(Slot { rect, value }));
            self.slots.len() - 1
        };

        let root = match self.root.take() {
            Some(root) => root,
            None => Node::seeded(&rect),
        };
        let mut root = Self::grow_root(root, &rect);
        root.insert(slot, rect, 0, &self.config);
        self.root = Some(root);
        self.len += 1;
    }

    fn detach(&mut self, slot: usize) -> Option<V> {
        let Slot { rect, value } = self.slots.get_mut(slot)?.take()?;
        let removed = self
            .root
            .as_mut()
            .is_some_and(|root| root.remove(slot, &rect));
        debug_assert!(removed, "slot {slot} missing from the node hierarchy");
        self.free_list.push(slot);
        self.len -= 1;
        Some(value)
    }

    fn grow_root(mut root: Node<T>, rect: &Aabb2D<T>) -> Node<T> {
        while !root.cell().contains(rect) {
            match root.grow_toward(rect) {
                Ok(grown) => {
                    log::trace!("root cell grown to {:?}", grown.cell());
                    root = grown;
                }
                Err(stuck) => {
                    log::trace!("root cell {:?} cannot grow to fit {rect:?}", stuck.cell());
                    return stuck;
                }
            }
        }
        root
    }
}

impl<T: Scalar, V, L> Debug for Tree<T, V, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let cell = self.root.as_ref().map(|r| *r.cell());
        let nodes = self.root.as_ref().map_or(0, |r| r.node_count());
        let depth = self.root.as_ref().map_or(0, |r| r.depth());
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("total_slots", &self.slots.len())
            .field("cell", &cell)
            .field("nodes", &nodes)
            .field("depth", &depth)
            .finish_non_exhaustive()
    }
}
