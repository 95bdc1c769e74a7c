// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Octree basics.
//!
//! Insert a few boxes and a sphere, see where they land, remove one, and query.
//!
//! Run:
//! - `cargo run -p understory_demos --example octree_basics`

use glam::DVec3;
use understory_bounds::{Aabb3, Bounds, Sphere};
use understory_cell_tree::{CellId, Octant, Octree, TreeConfig};

fn main() {
    // Split as soon as a cell holds a single node so the structure is visible.
    let mut tree: Octree<Bounds> = Octree::new(DVec3::ZERO, 8.0)
        .with_config(TreeConfig::octree().with_min_nodes_before_split(1));

    let small = tree.insert(Bounds::Box(Aabb3::new(DVec3::splat(0.1), DVec3::ONE)));
    println!("small box at level {:?}", tree.level_of(small));
    assert_eq!(tree.cell_of(small), tree.root_octant(Octant::UpperFrontRight));

    // Spans every octant, so it cannot leave the root.
    let big = tree.insert(Bounds::Sphere(Sphere::new(DVec3::ZERO, 5.0)));
    println!("big sphere at level {:?}", tree.level_of(big));
    assert_eq!(tree.cell_of(big), Some(CellId::ROOT));

    let corner = tree.insert(Bounds::Box(Aabb3::new(
        DVec3::new(-3.0, -3.0, -3.0),
        DVec3::new(-2.0, -2.0, -2.0),
    )));
    println!("corner box at level {:?}", tree.level_of(corner));

    let hits: Vec<_> = tree.query_point(DVec3::splat(0.5)).map(|(k, _)| k).collect();
    println!("nodes at (0.5, 0.5, 0.5): {hits:?}");

    // Removal goes straight to the owning cell.
    assert!(tree.remove(small).is_some());
    assert!(tree.remove(small).is_none());

    println!("{:?}", tree);
    println!("{:?}", tree.stats());
}
