// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Split-plane tests shared by the spatial trees.
//!
//! A cell splits its space with one plane per partitioned axis, each passing
//! through the cell center. For every axis a node's extents either fall on the
//! low side, the high side, or straddle the plane.

use glam::DVec3;

use crate::aabb::Aabb3;
use crate::axis::Axis;

/// Position of an extent relative to a split plane.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Entirely at or below the plane (`max <= center`).
    Low,
    /// Entirely at or above the plane (`min >= center`).
    High,
    /// Crosses the plane.
    Straddle,
}

impl Side {
    /// Whether the extent resolved to one side.
    #[inline]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::Straddle)
    }
}

/// Classify the extent `[min, max]` against a split plane at `center`.
///
/// A degenerate extent lying exactly on the plane counts as [`Side::Low`].
#[inline]
pub fn side_of(min: f64, max: f64, center: f64) -> Side {
    if max <= center {
        Side::Low
    } else if min >= center {
        Side::High
    } else {
        Side::Straddle
    }
}

bitflags::bitflags! {
    /// Set of axes whose split plane an extent straddles.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SplitAxes: u8 {
        /// Straddles the `X` plane.
        const X = 0b0000_0001;
        /// Straddles the `Y` plane.
        const Y = 0b0000_0010;
        /// Straddles the `Z` plane.
        const Z = 0b0000_0100;
    }
}

impl SplitAxes {
    /// The flag for a single axis.
    #[inline]
    pub const fn from_axis(axis: Axis) -> Self {
        match axis {
            Axis::X => Self::X,
            Axis::Y => Self::Y,
            Axis::Z => Self::Z,
        }
    }

    /// Number of straddled axes.
    #[inline]
    pub const fn count(self) -> u32 {
        self.bits().count_ones()
    }
}

/// Per-axis split result of an extent box against a cell center.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SplitSides {
    sides: [Side; 3],
}

impl SplitSides {
    /// Classify `extents` against the planes through `center`.
    ///
    /// Only `axes` are tested; the remaining axes are reported as
    /// [`Side::Straddle`] but never appear in [`SplitSides::straddled`].
    pub fn of(extents: &Aabb3, center: DVec3, axes: &[Axis]) -> Self {
        let mut sides = [Side::Straddle; 3];
        for &axis in axes {
            sides[axis.index()] = side_of(
                extents.min(axis),
                extents.max(axis),
                axis.component(center),
            );
        }
        Self { sides }
    }

    /// Side on `axis`.
    #[inline]
    pub fn side(&self, axis: Axis) -> Side {
        self.sides[axis.index()]
    }

    /// Straddled axes among `axes`.
    pub fn straddled(&self, axes: &[Axis]) -> SplitAxes {
        axes.iter()
            .filter(|axis| !self.side(**axis).is_resolved())
            .fold(SplitAxes::empty(), |acc, axis| {
                acc | SplitAxes::from_axis(*axis)
            })
    }
}
