// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::DVec3;
use kurbo::Rect;
use understory_bounds::Aabb3;
use understory_cell_tree::{Octree, Quadtree, TreeConfig, UpAxis};

const WORLD: f64 = 1024.0;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
    fn coord(&mut self, reach: f64) -> f64 {
        (self.next_f64() - 0.5) * 2.0 * reach
    }
}

fn gen_random_boxes(count: usize, max_half: f64, seed: u64) -> Vec<Aabb3> {
    let mut rng = Rng::new(seed);
    let reach = WORLD * 0.5 - max_half;
    (0..count)
        .map(|_| {
            let center = DVec3::new(rng.coord(reach), rng.coord(reach), rng.coord(reach));
            let half = DVec3::splat(0.5 + rng.next_f64() * (max_half - 0.5));
            Aabb3::from_center_half_extents(center, half)
        })
        .collect()
}

fn gen_grid_boxes(n: usize) -> Vec<Aabb3> {
    let cell = WORLD / n as f64;
    let mut out = Vec::with_capacity(n * n * n);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                let min = DVec3::new(x as f64, y as f64, z as f64) * cell - WORLD * 0.5;
                out.push(Aabb3::new(min, min + DVec3::splat(cell * 0.9)));
            }
        }
    }
    out
}

fn octree(extended: u32) -> Octree<Aabb3> {
    Octree::new(DVec3::ZERO, WORLD)
        .with_config(TreeConfig::octree().with_max_level_for_extended_cells(extended))
}

fn bench_octree_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("octree_insert");
    for &n in &[1_000usize, 10_000] {
        let boxes = gen_random_boxes(n, 8.0, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(n as u64));
        for &extended in &[0u32, 4] {
            group.bench_function(format!("random_n{}_ext{}", n, extended), |b| {
                b.iter_batched(
                    || octree(extended),
                    |mut tree| {
                        for r in &boxes {
                            let _ = tree.insert(*r);
                        }
                        black_box(tree.max_level());
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
    let grid = gen_grid_boxes(16);
    group.throughput(Throughput::Elements(grid.len() as u64));
    group.bench_function("grid_16", |b| {
        b.iter_batched(
            || octree(0),
            |mut tree| {
                for r in &grid {
                    let _ = tree.insert(*r);
                }
                black_box(tree.cell_count());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_octree_update_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("octree_update_remove");
    let n = 10_000usize;
    let boxes = gen_random_boxes(n, 8.0, 0xBADC_F00D_1234_5678);
    let moved = gen_random_boxes(n, 8.0, 0xFACE_FEED_CAFE_BABE);
    group.throughput(Throughput::Elements(n as u64));
    for &extended in &[0u32, 4] {
        let build = || {
            let mut tree = octree(extended);
            let keys: Vec<_> = boxes.iter().map(|r| tree.insert(*r)).collect();
            (tree, keys)
        };
        group.bench_function(format!("update_n{}_ext{}", n, extended), |b| {
            b.iter_batched(
                build,
                |(mut tree, keys)| {
                    for (key, r) in keys.iter().zip(&moved) {
                        if let Some(node) = tree.get_mut(*key) {
                            *node = *r;
                        }
                        let _ = tree.update_position(*key);
                    }
                    black_box(tree.len());
                },
                BatchSize::LargeInput,
            )
        });
        group.bench_function(format!("remove_n{}_ext{}", n, extended), |b| {
            b.iter_batched(
                build,
                |(mut tree, keys)| {
                    for key in &keys {
                        black_box(tree.remove(*key));
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_octree_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("octree_query");
    let boxes = gen_random_boxes(20_000, 8.0, 0xC1A5_7E55_9999_ABCD);
    let queries = gen_random_boxes(256, 64.0, 0x0123_4567_89AB_CDEF);
    for &extended in &[0u32, 4] {
        let mut tree = octree(extended);
        for r in &boxes {
            let _ = tree.insert(*r);
        }
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(format!("aabb_ext{}", extended), |b| {
            b.iter(|| {
                let hits: usize = queries.iter().map(|q| tree.query_aabb(q).count()).sum();
                black_box(hits)
            })
        });
        group.bench_function(format!("point_ext{}", extended), |b| {
            b.iter(|| {
                let hits: usize = queries
                    .iter()
                    .map(|q| tree.query_point(q.center()).count())
                    .sum();
                black_box(hits)
            })
        });
    }
    group.finish();
}

fn bench_quadtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree");
    let n = 10_000usize;
    let boxes = gen_random_boxes(n, 8.0, 0xDEAD_BEEF_0BAD_F00D);
    group.throughput(Throughput::Elements(n as u64));
    for &extended in &[0u32, 4] {
        let config = TreeConfig::quadtree().with_max_level_for_extended_cells(extended);
        let fresh = || {
            Quadtree::<Aabb3>::new(DVec3::ZERO, WORLD, WORLD, UpAxis::PosY, true).with_config(config)
        };
        group.bench_function(format!("insert_query_n{}_ext{}", n, extended), |b| {
            b.iter_batched(
                fresh,
                |mut tree| {
                    for r in &boxes {
                        let _ = tree.insert(*r);
                    }
                    let hits = tree
                        .query_rect(Rect::new(-100.0, -100.0, 300.0, 300.0))
                        .count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_octree_insert,
    bench_octree_update_remove,
    bench_octree_query,
    bench_quadtree
);
criterion_main!(benches);
