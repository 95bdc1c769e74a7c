// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_cell_tree --heading-base-level=0

//! Understory Cell Tree: octrees and quadtrees with extended cells.
//!
//! A cell tree files each node in the smallest cell that fully contains its bounds.
//!
//! - Child cells are created lazily, the first time a node needs them.
//! - A node that straddles a split plane can still go down a level, into an *extended* cell
//!   covering a half or a quadrant-spanning slab of its parent, instead of getting stuck in a
//!   coarse ancestor.
//! - A cell reaching [`TreeConfig::min_nodes_before_split`] pushes the nodes it already holds
//!   into children once, on the insertion that brings it to that count.
//! - Each node carries a back-reference to its cell, so [`TreeGeneric::remove`] finds it
//!   without searching, and [`TreeGeneric::update_position`] is a remove plus a reinsert.
//!
//! [`Octree`] splits on all three axes into 8 octants and 18 extended regions.
//! [`Quadtree`] splits on a plane picked by an [`UpAxis`] into 4 quadrants and 4 half slabs,
//! and never splits the height.
//! Both are [`TreeGeneric`] over a [`Partition`], which is the seam for other geometries.
//!
//! Nodes are owned by the tree and addressed by generational [`NodeKey`]s. Anything that
//! implements [`SpatialNode`] can be stored; [`Bounds`](understory_bounds::Bounds),
//! [`Aabb3`](understory_bounds::Aabb3) and [`Sphere`](understory_bounds::Sphere) already do.
//!
//! # Example
//!
//! ```rust
//! use glam::DVec3;
//! use understory_bounds::{Aabb3, Bounds, Sphere};
//! use understory_cell_tree::{CellId, Octant, Octree, TreeConfig};
//!
//! let mut tree: Octree<Bounds> =
//!     Octree::new(DVec3::ZERO, 8.0).with_config(TreeConfig::octree().with_min_nodes_before_split(1));
//!
//! // Fits inside the upper front right octant.
//! let small = tree.insert(Bounds::Box(Aabb3::new(DVec3::splat(0.1), DVec3::ONE)));
//! assert_eq!(tree.level_of(small), Some(1));
//! assert_eq!(tree.cell_of(small), tree.root_octant(Octant::UpperFrontRight));
//!
//! // Covers every octant, so it stays at the root.
//! let big = tree.insert(Bounds::Sphere(Sphere::new(DVec3::ZERO, 5.0)));
//! assert_eq!(tree.cell_of(big), Some(CellId::ROOT));
//!
//! let hits: Vec<_> = tree.query_point(DVec3::splat(0.5)).map(|(k, _)| k).collect();
//! assert_eq!(hits.len(), 2);
//!
//! assert!(tree.remove(small).is_some());
//! assert!(tree.remove(small).is_none());
//! ```
//!
//! ## Extended cells
//!
//! Extended cells are off by default. A cell uses them if its parent did and its level is
//! below [`TreeConfig::max_level_for_extended_cells`]; the root uses them when that limit is
//! above zero and the partition allows them.
//!
//! ## Logging
//!
//! With the `tracing` feature, cell creation and split-threshold reinsertion emit `trace`
//! events and [`TreeGeneric::clear`] emits a `debug` event.
//!
//! ### Float semantics
//!
//! Coordinates are `f64` and assumed finite. A node reaching past the world extent is
//! kept in the root cell, where every query still sees it.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod cell;
pub mod config;
pub mod node;
pub mod octree;
pub mod partition;
pub mod quadtree;
pub mod tree;

pub use cell::{Cell, CellId};
pub use config::TreeConfig;
pub use node::{NodeKey, SpatialNode};
pub use octree::{ExtendedRegion, Octant, OctreePartition, OctreeRegion, OctreeSlot, Octree};
pub use partition::{ChildSlot, Partition, SlotKey, SlotOf};
pub use quadtree::{
    HalfSlab, Plane, QuadRegion, Quadrant, Quadtree, QuadtreePartition, QuadtreeSlot, UpAxis,
};
pub use tree::{TreeGeneric, TreeStats};
