// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Moving nodes through an octree with extended cells.
//!
//! A caller-defined node type reports its own bounds. Each step moves every node and asks
//! the tree to re-file it; nodes crossing a split plane drop into extended cells instead of
//! climbing back to the root.
//!
//! Run:
//! - `cargo run -p understory_demos --example octree_moving_nodes`

use glam::DVec3;
use understory_bounds::{Bounds, Sphere};
use understory_cell_tree::{Octree, SpatialNode, TreeConfig};

#[derive(Debug)]
struct Particle {
    position: DVec3,
    velocity: DVec3,
    radius: f64,
}

impl SpatialNode for Particle {
    fn world_bounds(&self) -> Bounds {
        Bounds::Sphere(Sphere::new(self.position, self.radius))
    }
}

fn main() {
    let config = TreeConfig::octree()
        .with_min_nodes_before_split(4)
        .with_max_level_for_extended_cells(3);
    let mut tree: Octree<Particle> = Octree::new(DVec3::ZERO, 256.0).with_config(config);

    let mut keys = Vec::new();
    for i in 0..64_u32 {
        let t = f64::from(i) * 0.37;
        keys.push(tree.insert(Particle {
            position: DVec3::new(t.cos() * 90.0, t.sin() * 40.0, (t * 0.5).cos() * 90.0),
            velocity: DVec3::new(-t.sin(), 0.25, t.cos()) * 3.0,
            radius: 1.5,
        }));
    }
    println!("after insert: {:?}", tree.stats());

    for step in 0..20 {
        for key in &keys {
            if let Some(p) = tree.get_mut(*key) {
                p.position += p.velocity;
                if p.position.abs().max_element() > 120.0 {
                    p.velocity = -p.velocity;
                }
            }
            let _ = tree.update_position(*key);
        }
        if step % 5 == 4 {
            println!("step {step}: {:?}", tree.stats());
        }
    }

    let probe = tree.get(keys[0]).map(|p| p.position).unwrap_or_default();
    let near = tree.query_point(probe).count();
    println!("nodes overlapping {probe:?}: {near}");
    println!("deepest level reached: {}", tree.max_level());
}
