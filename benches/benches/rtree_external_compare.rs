// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::DVec3;
use understory_bounds::Aabb3;
use understory_cell_tree::{Octree, TreeConfig};

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_boxes(n: usize, cell: f64) -> Vec<Aabb3> {
    let mut out = Vec::with_capacity(n * n * n);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                let min = DVec3::new(x as f64, y as f64, z as f64) * cell;
                out.push(Aabb3::new(min, min + DVec3::splat(cell)));
            }
        }
    }
    out
}

fn to_rstar_boxes(v: &[Aabb3]) -> Vec<Rectangle<[f64; 3]>> {
    v.iter()
        .map(|r| Rectangle::from_corners(r.min.to_array(), r.max.to_array()))
        .collect()
}

fn bench_rtree_external_compare_3d(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_external_compare_3d");
    for &n in &[16usize, 32] {
        let cell = 10.0;
        let boxes = gen_grid_boxes(n, cell);
        let extent = n as f64 * cell;
        let query = Aabb3::new(DVec3::splat(20.0), DVec3::splat(80.0));
        group.throughput(Throughput::Elements(boxes.len() as u64));

        for &extended in &[0u32, 4] {
            group.bench_function(format!("octree_build_query_n{}_ext{}", n, extended), |b| {
                b.iter_batched(
                    || {
                        Octree::<Aabb3>::new(DVec3::splat(extent * 0.5), extent).with_config(
                            TreeConfig::octree().with_max_level_for_extended_cells(extended),
                        )
                    },
                    |mut tree| {
                        for r in &boxes {
                            let _ = tree.insert(*r);
                        }
                        let hits: usize = tree.query_aabb(&query).count();
                        black_box(hits);
                    },
                    BatchSize::SmallInput,
                )
            });
        }

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_boxes(&boxes),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let aabb = AABB::from_corners(query.min.to_array(), query.max.to_array());
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rtree_external_compare_3d);
criterion_main!(benches);
