// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tagged bounding volumes and the extents they expose.

use core::fmt;

use glam::DVec3;

use crate::aabb::Aabb3;
use crate::axis::Axis;
use crate::shapes::{ConvexHull, Sphere};

/// Tag of a [`Bounds`] value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BoundsKind {
    /// Axis-aligned box.
    Box,
    /// Sphere.
    Sphere,
    /// Convex hull.
    Hull,
}

impl fmt::Display for BoundsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Box => "box",
            Self::Sphere => "sphere",
            Self::Hull => "convex hull",
        })
    }
}

/// A bounds operation was asked of a variant that does not implement it.
///
/// This is an integration error: there is no sensible fallback, so callers
/// that cannot handle it should fail fast.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{operation} is not supported for {kind} bounds")]
pub struct UnsupportedBounds {
    /// Tag of the offending bounds.
    pub kind: BoundsKind,
    /// Name of the rejected operation.
    pub operation: &'static str,
}

/// World-space bounds of a spatial object.
#[derive(Clone, Debug, PartialEq)]
pub enum Bounds {
    /// Axis-aligned box.
    Box(Aabb3),
    /// Sphere.
    Sphere(Sphere),
    /// Convex hull. Has no extents.
    Hull(ConvexHull),
}

impl Bounds {
    /// Tag of this value.
    pub fn kind(&self) -> BoundsKind {
        match self {
            Self::Box(_) => BoundsKind::Box,
            Self::Sphere(_) => BoundsKind::Sphere,
            Self::Hull(_) => BoundsKind::Hull,
        }
    }

    /// Per-axis extents as a box.
    ///
    /// Boxes return their stored corners, spheres `center ± radius`.
    /// Hulls are rejected.
    pub fn extents(&self) -> Result<Aabb3, UnsupportedBounds> {
        match self {
            Self::Box(b) => Ok(*b),
            Self::Sphere(s) => Ok(s.aabb()),
            Self::Hull(_) => Err(self.unsupported("extents")),
        }
    }

    /// Lower extent along `axis`.
    pub fn min(&self, axis: Axis) -> Result<f64, UnsupportedBounds> {
        self.extents().map(|e| e.min(axis))
    }

    /// Upper extent along `axis`.
    pub fn max(&self, axis: Axis) -> Result<f64, UnsupportedBounds> {
        self.extents().map(|e| e.max(axis))
    }

    /// Smallest box enclosing both bounds.
    pub fn union(&self, other: &Self) -> Result<Self, UnsupportedBounds> {
        let a = self.extents().map_err(|e| UnsupportedBounds {
            operation: "union",
            ..e
        })?;
        let b = other.extents().map_err(|e| UnsupportedBounds {
            operation: "union",
            ..e
        })?;
        Ok(Self::Box(a.union(&b)))
    }

    /// The bounds moved by `offset`. Supported by every variant.
    pub fn translated(&self, offset: DVec3) -> Self {
        match self {
            Self::Box(b) => Self::Box(b.translated(offset)),
            Self::Sphere(s) => Self::Sphere(s.translated(offset)),
            Self::Hull(h) => Self::Hull(h.translated(offset)),
        }
    }

    fn unsupported(&self, operation: &'static str) -> UnsupportedBounds {
        UnsupportedBounds {
            kind: self.kind(),
            operation,
        }
    }
}

impl From<Aabb3> for Bounds {
    fn from(b: Aabb3) -> Self {
        Self::Box(b)
    }
}

impl From<Sphere> for Bounds {
    fn from(s: Sphere) -> Self {
        Self::Sphere(s)
    }
}

impl From<ConvexHull> for Bounds {
    fn from(h: ConvexHull) -> Self {
        Self::Hull(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn box_and_sphere_expose_extents() {
        let b = Bounds::from(Aabb3::new(DVec3::ZERO, DVec3::ONE));
        assert_eq!(b.kind(), BoundsKind::Box);
        assert_eq!(b.min(Axis::Y), Ok(0.0));
        assert_eq!(b.max(Axis::Y), Ok(1.0));

        let s = Bounds::from(Sphere::new(DVec3::ZERO, 5.0));
        assert_eq!(s.kind(), BoundsKind::Sphere);
        assert_eq!(s.min(Axis::Z), Ok(-5.0));
        assert_eq!(s.max(Axis::X), Ok(5.0));
    }

    #[test]
    fn hull_is_rejected_with_a_named_operation() {
        let h = Bounds::from(ConvexHull::new(vec![DVec3::ZERO]));
        let err = h.extents().unwrap_err();
        assert_eq!(err.kind, BoundsKind::Hull);
        assert_eq!(err.to_string(), "extents is not supported for convex hull bounds");

        let other = Bounds::from(Aabb3::new(DVec3::ZERO, DVec3::ONE));
        let err = other.union(&h).unwrap_err();
        assert_eq!(err.operation, "union");
    }

    #[test]
    fn union_of_box_and_sphere_is_a_box() {
        let a = Bounds::from(Aabb3::new(DVec3::ZERO, DVec3::ONE));
        let s = Bounds::from(Sphere::new(DVec3::splat(3.0), 1.0));
        let u = a.union(&s).unwrap();
        assert_eq!(
            u,
            Bounds::Box(Aabb3::new(DVec3::ZERO, DVec3::splat(4.0))),
            "union should enclose both inputs"
        );
    }

    #[test]
    fn translation_keeps_the_variant() {
        let s = Bounds::from(Sphere::new(DVec3::ZERO, 1.0)).translated(DVec3::Y);
        assert_eq!(s, Bounds::Sphere(Sphere::new(DVec3::Y, 1.0)));
    }
}
