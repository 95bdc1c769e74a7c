// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partition trait: the per-variant geometry of a cell tree.
//!
//! A partition decides, for a cell region and a node's extents, which child slot (if any)
//! should receive the node, and builds the region of a child slot from its parent's region.
//! Everything else (node arrays, lazy child creation, split-threshold reinsertion, removal)
//! is shared by [`TreeGeneric`](crate::TreeGeneric).

use core::fmt::Debug;

use understory_bounds::Aabb3;

/// A small enum naming a fixed set of child slots.
pub trait SlotKey: Copy + Debug + Eq + 'static {
    /// Every slot, ordered by [`SlotKey::index`].
    const ALL: &'static [Self];

    /// Dense index of the slot in `0..Self::ALL.len()`.
    fn index(self) -> usize;
}

/// A child slot of a cell: a regular subdivision or an extended one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChildSlot<R, E> {
    /// A strict octant/quadrant. Insertion recurses into it.
    Regular(R),
    /// A half or quadrant-spanning region. Nodes placed here stay here.
    Extended(E),
}

/// The child slot type of a partition.
pub type SlotOf<P> = ChildSlot<<P as Partition>::Regular, <P as Partition>::Extended>;

impl<R: SlotKey, E: SlotKey> ChildSlot<R, E> {
    /// Number of slots across both kinds.
    pub(crate) fn count() -> usize {
        R::ALL.len() + E::ALL.len()
    }

    /// Dense index across both kinds: regular slots first.
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Regular(r) => r.index(),
            Self::Extended(e) => R::ALL.len() + e.index(),
        }
    }
}

/// Variant-specific geometry of a cell tree.
pub trait Partition: Debug {
    /// Spatial extent of one cell.
    type Region: Copy + Debug;
    /// Regular child slots (octants, quadrants).
    type Regular: SlotKey;
    /// Extended child slots.
    type Extended: SlotKey;

    /// Choose the child slot for `extents` inside `region`.
    ///
    /// Returns `None` when the node straddles too many split planes to fit any child.
    /// The caller falls back to the current cell when an extended slot is returned but
    /// the cell does not use extended cells.
    fn classify(&self, region: &Self::Region, extents: &Aabb3) -> Option<SlotOf<Self>>;

    /// Region of the child in `slot` of a cell covering `parent`.
    fn child_region(&self, parent: &Self::Region, slot: SlotOf<Self>) -> Self::Region;

    /// World-space box covered by `region`.
    fn bounds(&self, region: &Self::Region) -> Aabb3;

    /// Whether extended cells may be created anywhere in the tree.
    fn allows_extended_cells(&self) -> bool {
        true
    }
}
