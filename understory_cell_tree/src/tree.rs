// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree core: node placement, removal, updates, and queries shared by every partition.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use glam::DVec3;
use understory_bounds::Aabb3;

use crate::cell::{Cell, CellId};
use crate::config::TreeConfig;
use crate::node::{Entry, NodeKey, Registry, SpatialNode};
use crate::partition::{ChildSlot, Partition, SlotOf};

/// A cell tree over nodes of type `N`, parameterized by its partition.
///
/// Use the [`Octree`](crate::Octree) and [`Quadtree`](crate::Quadtree) aliases for the
/// built-in variants.
pub struct TreeGeneric<N: SpatialNode, P: Partition> {
    partition: P,
    config: TreeConfig,
    cells: Vec<Cell<P>>,
    registry: Registry<N>,
    max_level: u32,
}

/// Where a node goes next during descent.
enum Step {
    /// Keep it in the current cell.
    Stay,
    /// Continue in a regular child.
    Descend(CellId),
    /// Place it in an extended child, no further descent.
    Settle(CellId),
}

/// Summary of a tree's shape.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Number of cells, root included.
    pub cells: usize,
    /// Number of nodes held.
    pub nodes: usize,
    /// Deepest level any node has been placed at since construction.
    pub max_level: u32,
    /// Node count per cell level; index 0 is the root.
    pub nodes_per_level: Vec<usize>,
}

impl<N: SpatialNode, P: Partition> TreeGeneric<N, P> {
    /// Create an empty tree with the given partition, root region, and policy.
    pub fn with_partition(partition: P, root: P::Region, config: TreeConfig) -> Self {
        let mut tree = Self {
            partition,
            config,
            cells: Vec::new(),
            registry: Registry::default(),
            max_level: 0,
        };
        let use_extended = tree.root_uses_extended_cells();
        tree.cells.push(Cell::new(root, 0, use_extended));
        tree
    }

    /// Replace the policy. Returns the tree for chaining after construction.
    pub fn with_config(mut self, config: TreeConfig) -> Self {
        self.config = config;
        self.sync_root_policy();
        self
    }

    /// Current policy.
    pub fn config(&self) -> TreeConfig {
        self.config
    }

    /// Node count at which a cell pushes its residents into children.
    pub fn min_nodes_before_split(&self) -> usize {
        self.config.min_nodes_before_split
    }

    /// Set the split threshold for future insertions.
    pub fn set_min_nodes_before_split(&mut self, min_nodes: usize) {
        self.config.min_nodes_before_split = min_nodes;
    }

    /// Deepest level at which new cells still use extended children.
    pub fn max_level_for_extended_cells(&self) -> u32 {
        self.config.max_level_for_extended_cells
    }

    /// Set the extended-cell depth limit.
    ///
    /// Cells keep the flag they were created with; the root is re-derived.
    pub fn set_max_level_for_extended_cells(&mut self, level: u32) {
        self.config.max_level_for_extended_cells = level;
        self.sync_root_policy();
    }

    /// Deepest level any node has been placed at. Never decreases.
    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// The partition driving this tree.
    pub fn partition(&self) -> &P {
        &self.partition
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a node and return its key.
    ///
    /// The node lands in the smallest cell that fully contains it, an extended cell if it
    /// straddles a split plane and extended cells are enabled there, or the deepest cell it
    /// cannot leave otherwise.
    ///
    /// # Panics
    ///
    /// Panics if the node reports bounds without extents ([`Bounds::Hull`](understory_bounds::Bounds::Hull)).
    #[track_caller]
    pub fn insert(&mut self, node: N) -> NodeKey {
        let extents = Self::extents_of(&node);
        let key = self.registry.insert(Entry {
            node,
            extents,
            cell: None,
        });
        self.place(key, &extents);
        key
    }

    /// Remove a node, returning it. `None` if the key is stale.
    ///
    /// Child cells emptied by the removal are kept.
    pub fn remove(&mut self, key: NodeKey) -> Option<N> {
        if !self.detach(key) {
            return None;
        }
        self.registry.remove(key).map(|entry| entry.node)
    }

    /// Re-read a node's bounds and move it to the matching cell.
    ///
    /// Equivalent to removing and reinserting it under the same key. Returns `false`
    /// (and does nothing) if the key is stale.
    ///
    /// # Panics
    ///
    /// Panics if the node now reports bounds without extents; the node keeps its old place.
    #[track_caller]
    pub fn update_position(&mut self, key: NodeKey) -> bool {
        let Some(entry) = self.registry.get(key) else {
            return false;
        };
        let extents = Self::extents_of(&entry.node);
        if !self.detach(key) {
            return false;
        }
        if let Some(entry) = self.registry.get_mut(key) {
            entry.extents = extents;
        }
        self.place(key, &extents);
        true
    }

    /// Remove every node and every cell but the root.
    ///
    /// All keys and [`CellId`]s other than [`CellId::ROOT`] become stale.
    /// [`max_level`](Self::max_level) is kept.
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            cells = self.cells.len(),
            nodes = self.registry.len(),
            "clearing cell tree"
        );
        self.cells.truncate(1);
        self.cells[CellId::ROOT.idx()].clear();
        self.sync_root_policy();
        self.registry.clear();
    }

    /// Borrow a node.
    pub fn get(&self, key: NodeKey) -> Option<&N> {
        self.registry.get(key).map(|entry| &entry.node)
    }

    /// Borrow a node mutably.
    ///
    /// Changing its bounds does not move it; call [`update_position`](Self::update_position).
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut N> {
        self.registry.get_mut(key).map(|entry| &mut entry.node)
    }

    /// Whether `key` refers to a node in this tree.
    pub fn contains_key(&self, key: NodeKey) -> bool {
        self.registry.get(key).is_some()
    }

    /// Extents the tree currently files the node under.
    pub fn extents(&self, key: NodeKey) -> Option<Aabb3> {
        self.registry.get(key).map(|entry| entry.extents)
    }

    /// Cell currently holding the node.
    pub fn cell_of(&self, key: NodeKey) -> Option<CellId> {
        self.registry.get(key).and_then(|entry| entry.cell)
    }

    /// Level of the cell currently holding the node.
    pub fn level_of(&self, key: NodeKey) -> Option<u32> {
        self.cell_of(key).map(|id| self.cells[id.idx()].level())
    }

    /// Iterate all nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &N)> + '_ {
        self.registry.iter().map(|(key, entry)| (key, &entry.node))
    }

    /// Handle of the root cell.
    pub fn root(&self) -> CellId {
        CellId::ROOT
    }

    /// The root cell.
    pub fn root_cell(&self) -> &Cell<P> {
        &self.cells[CellId::ROOT.idx()]
    }

    /// Look up a cell.
    pub fn cell(&self, id: CellId) -> Option<&Cell<P>> {
        self.cells.get(id.idx())
    }

    /// Number of cells, root included.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// World-space box covered by a cell.
    pub fn cell_bounds(&self, id: CellId) -> Option<Aabb3> {
        self.cell(id).map(|cell| self.partition.bounds(cell.region()))
    }

    /// Query nodes whose extents intersect `query`.
    pub fn query_aabb(
        &self,
        query: &Aabb3,
    ) -> impl Iterator<Item = (NodeKey, &N)> + use<'_, N, P> {
        let mut out = Vec::new();
        let mut stack = vec![CellId::ROOT];
        while let Some(id) = stack.pop() {
            let cell = &self.cells[id.idx()];
            // Nodes reaching past the world extent are held by the root.
            if id != CellId::ROOT && !self.partition.bounds(cell.region()).overlaps(query) {
                continue;
            }
            for &key in cell.nodes() {
                if let Some(entry) = self.registry.get(key)
                    && entry.extents.overlaps(query)
                {
                    out.push((key, &entry.node));
                }
            }
            stack.extend(cell.children().map(|(_, child)| child));
        }
        out.into_iter()
    }

    /// Query nodes whose extents contain `point`.
    pub fn query_point(
        &self,
        point: DVec3,
    ) -> impl Iterator<Item = (NodeKey, &N)> + use<'_, N, P> {
        self.query_aabb(&Aabb3::new(point, point))
    }

    /// Count cells and nodes per level.
    pub fn stats(&self) -> TreeStats {
        let mut nodes_per_level: Vec<usize> = Vec::new();
        for cell in &self.cells {
            let level = cell.level() as usize;
            if nodes_per_level.len() <= level {
                nodes_per_level.resize(level + 1, 0);
            }
            nodes_per_level[level] += cell.node_count();
        }
        TreeStats {
            cells: self.cells.len(),
            nodes: self.registry.len(),
            max_level: self.max_level,
            nodes_per_level,
        }
    }

    // --- internals ---

    #[track_caller]
    fn extents_of(node: &N) -> Aabb3 {
        node.world_bounds()
            .extents()
            .unwrap_or_else(|err| panic!("cannot place node in cell tree: {err}"))
    }

    fn root_uses_extended_cells(&self) -> bool {
        self.partition.allows_extended_cells() && 0 < self.config.max_level_for_extended_cells
    }

    fn sync_root_policy(&mut self) {
        let use_extended = self.root_uses_extended_cells();
        self.cells[CellId::ROOT.idx()].set_uses_extended_cells(use_extended);
    }

    /// Descend from the root and store `key`. Returns the level it landed at.
    fn place(&mut self, key: NodeKey, extents: &Aabb3) -> u32 {
        // Zero would descend forever on point-sized nodes.
        let min_nodes = self.config.min_nodes_before_split.max(1);
        let mut cell = CellId::ROOT;
        loop {
            let count = self.cells[cell.idx()].node_count() + 1;
            if count < min_nodes {
                return self.attach(cell, key);
            }
            if count == min_nodes {
                self.attach(cell, key);
                self.reinsert_residents(cell);
                return self.level_of(key).unwrap_or(0);
            }
            match self.select_child(cell, extents) {
                Step::Stay => return self.attach(cell, key),
                Step::Descend(child) => cell = child,
                Step::Settle(child) => return self.attach(child, key),
            }
        }
    }

    /// Push every resident of `cell` that fits a child into that child, one level down.
    fn reinsert_residents(&mut self, cell: CellId) {
        let residents = self.cells[cell.idx()].nodes().to_vec();
        let mut moves = Vec::with_capacity(residents.len());
        for key in &residents {
            let Some(extents) = self.registry.get(*key).map(|entry| entry.extents) else {
                moves.push(None);
                continue;
            };
            moves.push(match self.select_child(cell, &extents) {
                Step::Stay => None,
                Step::Descend(child) | Step::Settle(child) => Some(child),
            });
        }
        let moved: Vec<bool> = moves.iter().map(Option::is_some).collect();
        self.cells[cell.idx()].compact(&moved);
        for (key, target) in residents.into_iter().zip(moves) {
            if let Some(child) = target {
                self.attach(child, key);
            }
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            level = self.cells[cell.idx()].level(),
            moved = moved.iter().filter(|m| **m).count(),
            kept = self.cells[cell.idx()].node_count(),
            "reinserted residents at split threshold"
        );
    }

    fn select_child(&mut self, cell: CellId, extents: &Aabb3) -> Step {
        let parent = &self.cells[cell.idx()];
        // Children only ever receive what their parent contains.
        if !self.partition.bounds(parent.region()).contains(extents) {
            return Step::Stay;
        }
        let use_extended = parent.uses_extended_cells();
        match self.partition.classify(parent.region(), extents) {
            None => Step::Stay,
            Some(slot @ ChildSlot::Regular(_)) => Step::Descend(self.child_or_create(cell, slot)),
            Some(slot @ ChildSlot::Extended(_)) if use_extended => {
                Step::Settle(self.child_or_create(cell, slot))
            }
            Some(ChildSlot::Extended(_)) => Step::Stay,
        }
    }

    fn child_or_create(&mut self, parent: CellId, slot: SlotOf<P>) -> CellId {
        let parent_cell = &self.cells[parent.idx()];
        if let Some(child) = parent_cell.child(slot) {
            return child;
        }
        let region = self.partition.child_region(parent_cell.region(), slot);
        let level = parent_cell.level() + 1;
        let use_extended = parent_cell.uses_extended_cells()
            && level < self.config.max_level_for_extended_cells;
        let id = CellId::new(self.cells.len());
        self.cells.push(Cell::new(region, level, use_extended));
        self.cells[parent.idx()].set_child(slot, id);
        #[cfg(feature = "tracing")]
        tracing::trace!(level, ?slot, "created child cell");
        id
    }

    fn attach(&mut self, cell: CellId, key: NodeKey) -> u32 {
        let target = &mut self.cells[cell.idx()];
        target.push_node(key);
        let level = target.level();
        if let Some(entry) = self.registry.get_mut(key) {
            entry.cell = Some(cell);
        }
        self.max_level = self.max_level.max(level);
        level
    }

    /// Take the node out of its cell via the back-reference. `false` if not placed.
    fn detach(&mut self, key: NodeKey) -> bool {
        let Some(cell) = self.registry.get_mut(key).and_then(|entry| entry.cell.take()) else {
            return false;
        };
        let removed = self.cells[cell.idx()].remove_node(key);
        debug_assert!(removed, "back-reference points at a cell not holding the node");
        removed
    }
}

impl<N: SpatialNode, P: Partition> Debug for TreeGeneric<N, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TreeGeneric")
            .field("partition", &self.partition)
            .field("config", &self.config)
            .field("cells", &self.cells.len())
            .field("nodes", &self.registry.len())
            .field("max_level", &self.max_level)
            .finish_non_exhaustive()
    }
}
