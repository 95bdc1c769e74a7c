// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Non-box bounding volumes: spheres and convex hulls.

use alloc::vec::Vec;
use glam::DVec3;

use crate::aabb::Aabb3;

/// Bounding sphere.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    /// Center of the sphere.
    pub center: DVec3,
    /// Radius; never negative.
    pub radius: f64,
}

impl Sphere {
    /// Create a sphere from center and radius.
    pub fn new(center: DVec3, radius: f64) -> Self {
        debug_assert!(radius >= 0.0, "sphere radius must not be negative");
        Self { center, radius }
    }

    /// Tight axis-aligned box around the sphere: `center ± radius` on every axis.
    #[inline]
    pub fn aabb(&self) -> Aabb3 {
        Aabb3::from_center_half_extents(self.center, DVec3::splat(self.radius))
    }

    /// The sphere moved by `offset`.
    #[inline]
    pub fn translated(&self, offset: DVec3) -> Self {
        Self {
            center: self.center + offset,
            radius: self.radius,
        }
    }
}

/// Convex hull given by its vertices.
///
/// Hulls are carried so that a node's bounds can be tagged faithfully, but they
/// expose no extents: spatial trees reject them on insertion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvexHull {
    points: Vec<DVec3>,
}

impl ConvexHull {
    /// Create a hull from its vertices. The points are taken as-is.
    pub fn new(points: Vec<DVec3>) -> Self {
        Self { points }
    }

    /// Vertices of the hull.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// The hull moved by `offset`.
    pub fn translated(&self, offset: DVec3) -> Self {
        Self {
            points: self.points.iter().map(|p| *p + offset).collect(),
        }
    }
}
