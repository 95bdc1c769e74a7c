// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node contract, generational node keys, and the slot registry backing them.

use alloc::vec::Vec;

use understory_bounds::{Aabb3, Bounds, Sphere};

use crate::cell::CellId;

/// An object that can be placed in a cell tree.
///
/// The tree asks for the bounds once on [`insert`](crate::TreeGeneric::insert) and once per
/// [`update_position`](crate::TreeGeneric::update_position); in between it works from a cached
/// copy of the extents. Returning [`Bounds::Hull`] is a contract violation and panics on insertion.
pub trait SpatialNode {
    /// Current world-space bounds.
    fn world_bounds(&self) -> Bounds;
}

impl SpatialNode for Bounds {
    fn world_bounds(&self) -> Bounds {
        self.clone()
    }
}

impl SpatialNode for Aabb3 {
    fn world_bounds(&self) -> Bounds {
        Bounds::Box(*self)
    }
}

impl SpatialNode for Sphere {
    fn world_bounds(&self) -> Bounds {
        Bounds::Sphere(*self)
    }
}

/// Generational handle for a node held by a tree.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove (or [`clear`](crate::TreeGeneric::clear)), the slot is freed and any key pointing
///   at it becomes stale.
/// - On reuse of a freed slot its generation is incremented, so stale keys never alias a new node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeKey(u32, u32);

impl NodeKey {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Node keys are intentionally 32-bit; higher bits are truncated by design."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A node as stored by the tree: payload, cached extents, and the back-reference.
#[derive(Clone, Debug)]
pub(crate) struct Entry<N> {
    pub(crate) node: N,
    pub(crate) extents: Aabb3,
    /// Cell currently holding the node. Written only by the tree.
    pub(crate) cell: Option<CellId>,
}

#[derive(Clone, Debug)]
struct Slot<N> {
    generation: u32,
    entry: Option<Entry<N>>,
}

/// Generational slot storage for tree entries.
#[derive(Clone, Debug)]
pub(crate) struct Registry<N> {
    slots: Vec<Slot<N>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<N> Default for Registry<N> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }
}

impl<N> Registry<N> {
    pub(crate) fn insert(&mut self, entry: Entry<N>) -> NodeKey {
        self.len += 1;
        if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation = slot.generation.saturating_add(1);
            slot.entry = Some(entry);
            NodeKey::new(idx, slot.generation)
        } else {
            let generation = 1_u32;
            self.slots.push(Slot {
                generation,
                entry: Some(entry),
            });
            NodeKey::new(self.slots.len() - 1, generation)
        }
    }

    pub(crate) fn remove(&mut self, key: NodeKey) -> Option<Entry<N>> {
        let slot = self.slots.get_mut(key.idx())?;
        if slot.generation != key.1 {
            return None;
        }
        let entry = slot.entry.take()?;
        self.free_list.push(key.idx());
        self.len -= 1;
        Some(entry)
    }

    pub(crate) fn get(&self, key: NodeKey) -> Option<&Entry<N>> {
        let slot = self.slots.get(key.idx())?;
        if slot.generation != key.1 {
            return None;
        }
        slot.entry.as_ref()
    }

    pub(crate) fn get_mut(&mut self, key: NodeKey) -> Option<&mut Entry<N>> {
        let slot = self.slots.get_mut(key.idx())?;
        if slot.generation != key.1 {
            return None;
        }
        slot.entry.as_mut()
    }

    /// Drop every entry. Generations persist so old keys stay stale.
    pub(crate) fn clear(&mut self) {
        self.free_list.clear();
        for (idx, slot) in self.slots.iter_mut().enumerate().rev() {
            slot.entry = None;
            self.free_list.push(idx);
        }
        self.len = 0;
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeKey, &Entry<N>)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.entry
                .as_ref()
                .map(|entry| (NodeKey::new(idx, slot.generation), entry))
        })
    }
}
