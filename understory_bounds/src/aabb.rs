// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding box in 3D.

use glam::DVec3;

use crate::axis::Axis;

/// Axis-aligned bounding box in 3D, double precision.
///
/// Both corners are inclusive. Assumes no NaNs; debug builds assert that
/// `min <= max` on construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner (left, lower, back).
    pub min: DVec3,
    /// Maximum corner (right, upper, front).
    pub max: DVec3,
}

impl Aabb3 {
    /// Create a new AABB from min/max corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "AABB min must be <= max on all axes"
        );
        Self { min, max }
    }

    /// Create an AABB from its center and full size per axis.
    pub fn from_center_size(center: DVec3, size: DVec3) -> Self {
        Self::from_center_half_extents(center, size * 0.5)
    }

    /// Create an AABB from its center and half size per axis.
    pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Center of the box.
    #[inline]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Full size per axis (`max - min`).
    #[inline]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Half size per axis.
    #[inline]
    pub fn half_size(&self) -> DVec3 {
        self.size() * 0.5
    }

    /// Lower extent along `axis`.
    #[inline]
    pub fn min(&self, axis: Axis) -> f64 {
        axis.component(self.min)
    }

    /// Upper extent along `axis`.
    #[inline]
    pub fn max(&self, axis: Axis) -> f64 {
        axis.component(self.max)
    }

    /// Whether `other` lies fully inside this box (touching faces count).
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        self.min.cmple(other.min).all() && other.max.cmple(self.max).all()
    }

    /// Whether `other` lies inside this box on `axis`.
    #[inline]
    pub fn contains_on(&self, other: &Self, axis: Axis) -> bool {
        self.min(axis) <= other.min(axis) && other.max(axis) <= self.max(axis)
    }

    /// Whether the point lies inside this box (inclusive).
    #[inline]
    pub fn contains_point(&self, point: DVec3) -> bool {
        self.min.cmple(point).all() && point.cmple(self.max).all()
    }

    /// Whether the two boxes share any interior or boundary point.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }

    /// Smallest box containing both boxes.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// The box moved by `offset`.
    #[inline]
    pub fn translated(&self, offset: DVec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_size_round_trip() {
        let aabb = Aabb3::from_center_size(DVec3::new(1.0, 2.0, 3.0), DVec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.min, DVec3::new(0.0, 0.0, 0.0));
        assert_eq!(aabb.max, DVec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.center(), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.half_size(), DVec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn containment_is_inclusive() {
        let outer = Aabb3::new(DVec3::ZERO, DVec3::splat(4.0));
        assert!(outer.contains(&outer));
        assert!(outer.contains(&Aabb3::new(DVec3::splat(1.0), DVec3::splat(4.0))));
        assert!(!outer.contains(&Aabb3::new(DVec3::splat(1.0), DVec3::splat(4.5))));

        let tall = Aabb3::new(DVec3::new(1.0, -9.0, 1.0), DVec3::splat(2.0));
        assert!(outer.contains_on(&tall, Axis::X));
        assert!(!outer.contains_on(&tall, Axis::Y));
    }

    #[test]
    fn overlaps_touching_and_disjoint() {
        let a = Aabb3::new(DVec3::ZERO, DVec3::splat(10.0));
        let b = Aabb3::new(DVec3::splat(10.0), DVec3::splat(20.0));
        let c = Aabb3::new(DVec3::splat(11.0), DVec3::splat(20.0));
        assert!(a.overlaps(&b), "touching boxes overlap");
        assert!(!a.overlaps(&c));
        assert!(a.contains_point(DVec3::splat(10.0)));
        assert!(!a.contains_point(DVec3::splat(-0.5)));
    }

    #[test]
    fn union_and_translate() {
        let a = Aabb3::new(DVec3::ZERO, DVec3::ONE);
        let b = a.translated(DVec3::new(2.0, 0.0, 0.0));
        let u = a.union(&b);
        assert_eq!(u.min, DVec3::ZERO);
        assert_eq!(u.max, DVec3::new(3.0, 1.0, 1.0));
        assert_eq!(u.min(Axis::X), 0.0);
        assert_eq!(u.max(Axis::X), 3.0);
    }
}
