// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! World axes.

use glam::DVec3;

/// One of the three world axes.
///
/// The trees in this workspace use the convention `+X` = right, `+Y` = up and
/// `+Z` = front.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis (left/right).
    X,
    /// Vertical axis (lower/upper).
    Y,
    /// Depth axis (back/front).
    Z,
}

impl Axis {
    /// All axes in `X`, `Y`, `Z` order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Position of this axis in a `[x, y, z]` triple.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// The component of `v` along this axis.
    #[inline]
    pub fn component(self, v: DVec3) -> f64 {
        match self {
            Self::X => v.x,
            Self::Y => v.y,
            Self::Z => v.z,
        }
    }

    /// Return `v` with the component along this axis replaced by `value`.
    #[inline]
    pub fn with_component(self, mut v: DVec3, value: f64) -> DVec3 {
        match self {
            Self::X => v.x = value,
            Self::Y => v.y = value,
            Self::Z => v.z = value,
        }
        v
    }
}
