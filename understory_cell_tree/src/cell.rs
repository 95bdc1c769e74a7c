// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cells: spatially bounded node containers with lazily created children.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use crate::node::NodeKey;
use crate::partition::{Partition, SlotKey, SlotOf};

/// Handle of a cell inside its tree.
///
/// Cells are arena-allocated and live until the tree is cleared; a `CellId` obtained
/// before [`clear`](crate::TreeGeneric::clear) must not be used afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellId(u32);

impl CellId {
    /// The root cell of every tree.
    pub const ROOT: Self = Self(0);

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Cell ids use 32-bit indices by design."
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// One cell of a tree.
///
/// A cell stores the keys of the nodes it currently owns and up to
/// `Regular::ALL.len() + Extended::ALL.len()` child cells, created on first use.
#[derive(Debug)]
pub struct Cell<P: Partition> {
    region: P::Region,
    level: u32,
    use_extended: bool,
    nodes: Vec<NodeKey>,
    children: Option<Box<[Option<CellId>]>>,
}

impl<P: Partition> Cell<P> {
    pub(crate) fn new(region: P::Region, level: u32, use_extended: bool) -> Self {
        Self {
            region,
            level,
            use_extended,
            nodes: Vec::new(),
            children: None,
        }
    }

    /// Spatial extent of the cell.
    pub fn region(&self) -> &P::Region {
        &self.region
    }

    /// Depth from the root (root = 0).
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Whether this cell may create extended children.
    pub fn uses_extended_cells(&self) -> bool {
        self.use_extended
    }

    /// Keys of the nodes owned by this cell, in insertion order.
    pub fn nodes(&self) -> &[NodeKey] {
        &self.nodes
    }

    /// Number of nodes owned by this cell.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Key of the node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.node_count()`.
    pub fn node(&self, index: usize) -> NodeKey {
        self.nodes[index]
    }

    /// Whether any child cell, regular or extended, has been created.
    pub fn has_child_cells(&self) -> bool {
        self.children.is_some()
    }

    /// The regular child in `slot`, if created.
    pub fn regular_child(&self, slot: P::Regular) -> Option<CellId> {
        self.child(SlotOf::<P>::Regular(slot))
    }

    /// The extended child in `slot`, if created.
    pub fn extended_child(&self, slot: P::Extended) -> Option<CellId> {
        self.child(SlotOf::<P>::Extended(slot))
    }

    /// The child in `slot`, if created.
    pub fn child(&self, slot: SlotOf<P>) -> Option<CellId> {
        self.children.as_ref().and_then(|c| c[slot.index()])
    }

    /// All created children with their slots, regular slots first.
    pub fn children(&self) -> impl Iterator<Item = (SlotOf<P>, CellId)> + '_ {
        let slots = P::Regular::ALL
            .iter()
            .map(|r| SlotOf::<P>::Regular(*r))
            .chain(P::Extended::ALL.iter().map(|e| SlotOf::<P>::Extended(*e)));
        slots.filter_map(|slot| self.child(slot).map(|id| (slot, id)))
    }

    pub(crate) fn set_child(&mut self, slot: SlotOf<P>, id: CellId) {
        let children = self
            .children
            .get_or_insert_with(|| vec![None; SlotOf::<P>::count()].into_boxed_slice());
        debug_assert!(children[slot.index()].is_none(), "child slot already taken");
        children[slot.index()] = Some(id);
    }

    pub(crate) fn set_uses_extended_cells(&mut self, use_extended: bool) {
        self.use_extended = use_extended;
    }

    /// Append a node. Capacity grows by exactly one slot at a time.
    pub(crate) fn push_node(&mut self, key: NodeKey) {
        self.nodes.reserve_exact(1);
        self.nodes.push(key);
    }

    /// Remove a node, shifting later entries left. Returns `false` if absent.
    pub(crate) fn remove_node(&mut self, key: NodeKey) -> bool {
        match self.nodes.iter().position(|k| *k == key) {
            Some(pos) => {
                self.nodes.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Drop the nodes whose entry in `moved` is `true`, keeping order of the rest.
    pub(crate) fn compact(&mut self, moved: &[bool]) {
        debug_assert_eq!(moved.len(), self.nodes.len(), "one flag per resident");
        let mut flags = moved.iter();
        self.nodes.retain(|_| !flags.next().copied().unwrap_or(false));
    }

    /// Forget all nodes and children.
    pub(crate) fn clear(&mut self) {
        self.nodes = Vec::new();
        self.children = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::octree::{ExtendedRegion, Octant, OctreePartition, OctreeRegion};
    use glam::DVec3;

    fn cell() -> Cell<OctreePartition> {
        Cell::new(OctreeRegion::new(DVec3::ZERO, DVec3::splat(2.0)), 0, true)
    }

    fn keys(n: usize) -> Vec<NodeKey> {
        let mut registry = crate::node::Registry::<()>::default();
        (0..n)
            .map(|_| {
                registry.insert(crate::node::Entry {
                    node: (),
                    extents: understory_bounds::Aabb3::new(DVec3::ZERO, DVec3::ZERO),
                    cell: None,
                })
            })
            .collect()
    }

    #[test]
    fn children_are_lazy_and_listed_regular_first() {
        let mut c = cell();
        assert!(!c.has_child_cells());
        assert_eq!(c.children().count(), 0);
        c.set_child(SlotOf::<OctreePartition>::Extended(ExtendedRegion::Left), CellId::new(2));
        c.set_child(SlotOf::<OctreePartition>::Regular(Octant::LowerBackRight), CellId::new(1));
        assert!(c.has_child_cells());
        assert_eq!(c.regular_child(Octant::LowerBackRight), Some(CellId::new(1)));
        assert_eq!(c.extended_child(ExtendedRegion::Left), Some(CellId::new(2)));
        assert_eq!(c.extended_child(ExtendedRegion::Right), None);
        let ids: Vec<_> = c.children().map(|(_, id)| id).collect();
        assert_eq!(ids, vec![CellId::new(1), CellId::new(2)]);
    }

    #[test]
    fn node_list_keeps_order_through_removal_and_compaction() {
        let k = keys(5);
        let mut c = cell();
        for key in &k {
            c.push_node(*key);
        }
        assert!(c.remove_node(k[1]));
        assert!(!c.remove_node(k[1]));
        assert_eq!(c.nodes(), &[k[0], k[2], k[3], k[4]]);
        c.compact(&[false, true, false, true]);
        assert_eq!(c.nodes(), &[k[0], k[3]]);
        assert_eq!(c.node(1), k[3]);
        c.clear();
        assert_eq!(c.node_count(), 0);
        assert!(!c.has_child_cells());
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn node_index_is_bounds_checked() {
        let c = cell();
        let _ = c.node(0);
    }
}
