// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree on the ground plane.
//!
//! With `+Y` up the tree splits X and Z and ignores height. A box crossing `X = 0` on the
//! `+Z` side lands in the right half slab, which bridges the X split, rather than at the root.
//!
//! Run:
//! - `cargo run -p understory_demos --example quadtree_extended_cells`

use glam::DVec3;
use kurbo::Rect;
use understory_bounds::Aabb3;
use understory_cell_tree::{HalfSlab, Quadrant, Quadtree, TreeConfig, UpAxis};

fn main() {
    let config = TreeConfig::quadtree()
        .with_min_nodes_before_split(1)
        .with_max_level_for_extended_cells(1);
    let mut tree: Quadtree<Aabb3> =
        Quadtree::new(DVec3::ZERO, 4.0, 10.0, UpAxis::PosY, true).with_config(config);

    let bridge = tree.insert(Aabb3::new(
        DVec3::new(-0.5, -1.0, 0.5),
        DVec3::new(0.5, 1.0, 1.5),
    ));
    let right = tree.root_cell().extended_child(HalfSlab::Right);
    println!("bridge lives in {:?} at level {:?}", tree.cell_of(bridge), tree.level_of(bridge));
    assert_eq!(tree.cell_of(bridge), right);

    let post = tree.insert(Aabb3::new(
        DVec3::new(1.0, -4.0, -1.5),
        DVec3::new(1.5, 4.0, -1.0),
    ));
    assert_eq!(tree.cell_of(post), tree.root_quadrant(Quadrant::BackRight));

    // Plane coordinates are (x, z) here.
    for (key, _) in tree.query_rect(Rect::new(0.0, -2.0, 2.0, 0.0)) {
        println!("in back right footprint: {key:?}");
    }
    println!("{:?}", tree.stats());
}
