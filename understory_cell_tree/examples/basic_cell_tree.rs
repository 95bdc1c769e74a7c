// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory Cell Tree: insert, move, remove, and query.

use glam::DVec3;
use understory_bounds::Aabb3;
use understory_cell_tree::Octree;

fn main() {
    let mut tree: Octree<Aabb3> = Octree::new(DVec3::ZERO, 100.0);
    let a = tree.insert(Aabb3::new(DVec3::splat(1.0), DVec3::splat(5.0)));
    let b = tree.insert(Aabb3::new(DVec3::splat(-20.0), DVec3::splat(-10.0)));

    // Move box a
    if let Some(node) = tree.get_mut(a) {
        *node = node.translated(DVec3::new(10.0, 0.0, 0.0));
    }
    let moved = tree.update_position(a);
    println!(
        "moved={moved}, a is in {:?} at level {:?}",
        tree.cell_of(a),
        tree.level_of(a)
    );

    // Query a point
    let hits: Vec<_> = tree.query_point(DVec3::splat(-15.0)).collect();
    println!("hits at (-15,-15,-15): {:?}", hits);

    let removed = tree.remove(b);
    println!("removed: {:?}", removed);
    println!("{:?}", tree.stats());
}
