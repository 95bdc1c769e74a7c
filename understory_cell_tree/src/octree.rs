// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Octree partition: eight octants plus eighteen extended cells.
//!
//! Conventions: `+X` is right, `+Y` is upper, `+Z` is front.
//!
//! A node that resolves to one side of all three split planes descends into an [`Octant`].
//! A node that straddles exactly one plane goes to one of the twelve quadrant-spanning
//! [`ExtendedRegion`]s running along that axis (for example [`ExtendedRegion::UpperFront`]
//! spans the full width on `X`). A node that straddles two planes goes to one of the six
//! half cells ([`ExtendedRegion::Upper`], ...). A node straddling all three stays put.

use glam::DVec3;
use understory_bounds::{Aabb3, Axis, Side, SplitAxes, SplitSides};

use crate::cell::CellId;
use crate::config::TreeConfig;
use crate::node::SpatialNode;
use crate::partition::{ChildSlot, Partition, SlotKey};
use crate::tree::TreeGeneric;

/// Axes in the order the octree evaluates them: vertical, depth, horizontal.
const OCTREE_AXES: [Axis; 3] = [Axis::Y, Axis::Z, Axis::X];

/// Regular child of an octree cell.
///
/// The discriminant is a bit set: bit 0 = right (`+X`), bit 1 = upper (`+Y`), bit 2 = front (`+Z`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Octant {
    /// `-X -Y -Z`
    LowerBackLeft = 0,
    /// `+X -Y -Z`
    LowerBackRight = 1,
    /// `-X +Y -Z`
    UpperBackLeft = 2,
    /// `+X +Y -Z`
    UpperBackRight = 3,
    /// `-X -Y +Z`
    LowerFrontLeft = 4,
    /// `+X -Y +Z`
    LowerFrontRight = 5,
    /// `-X +Y +Z`
    UpperFrontLeft = 6,
    /// `+X +Y +Z`
    UpperFrontRight = 7,
}

impl Octant {
    /// Octant on the given side of each plane.
    pub const fn from_sides(right: bool, upper: bool, front: bool) -> Self {
        Self::ALL_OCTANTS[(right as usize) | ((upper as usize) << 1) | ((front as usize) << 2)]
    }

    const ALL_OCTANTS: [Self; 8] = [
        Self::LowerBackLeft,
        Self::LowerBackRight,
        Self::UpperBackLeft,
        Self::UpperBackRight,
        Self::LowerFrontLeft,
        Self::LowerFrontRight,
        Self::UpperFrontLeft,
        Self::UpperFrontRight,
    ];

    /// Direction of the octant center from the parent center, `±1` per axis.
    pub fn signs(self) -> DVec3 {
        let bits = self as u8;
        let sign = |bit: u8| if bits & bit != 0 { 1.0 } else { -1.0 };
        DVec3::new(sign(1), sign(2), sign(4))
    }
}

impl SlotKey for Octant {
    const ALL: &'static [Self] = &Self::ALL_OCTANTS;

    fn index(self) -> usize {
        self as usize
    }
}

/// Extended child of an octree cell.
///
/// The first twelve variants span the full parent extent along one axis and a quarter of
/// the cross-section; the last six are half cells spanning two axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExtendedRegion {
    /// Along `X`: upper and front.
    UpperFront = 0,
    /// Along `X`: upper and back.
    UpperBack = 1,
    /// Along `X`: lower and front.
    LowerFront = 2,
    /// Along `X`: lower and back.
    LowerBack = 3,
    /// Along `Y`: front and left.
    FrontLeft = 4,
    /// Along `Y`: front and right.
    FrontRight = 5,
    /// Along `Y`: back and left.
    BackLeft = 6,
    /// Along `Y`: back and right.
    BackRight = 7,
    /// Along `Z`: upper and left.
    UpperLeft = 8,
    /// Along `Z`: upper and right.
    UpperRight = 9,
    /// Along `Z`: lower and left.
    LowerLeft = 10,
    /// Along `Z`: lower and right.
    LowerRight = 11,
    /// Upper half.
    Upper = 12,
    /// Lower half.
    Lower = 13,
    /// Front half.
    Front = 14,
    /// Back half.
    Back = 15,
    /// Left half.
    Left = 16,
    /// Right half.
    Right = 17,
}

impl ExtendedRegion {
    const ALL_REGIONS: [Self; 18] = [
        Self::UpperFront,
        Self::UpperBack,
        Self::LowerFront,
        Self::LowerBack,
        Self::FrontLeft,
        Self::FrontRight,
        Self::BackLeft,
        Self::BackRight,
        Self::UpperLeft,
        Self::UpperRight,
        Self::LowerLeft,
        Self::LowerRight,
        Self::Upper,
        Self::Lower,
        Self::Front,
        Self::Back,
        Self::Left,
        Self::Right,
    ];

    /// Quadrant-spanning region running along `axis`, for a node resolved on the other two.
    ///
    /// Returns `None` if either of the other axes is not resolved.
    pub fn spanning(axis: Axis, sides: &SplitSides) -> Option<Self> {
        let high = |a: Axis| match sides.side(a) {
            Side::Low => Some(false),
            Side::High => Some(true),
            Side::Straddle => None,
        };
        let region = match axis {
            Axis::X => match (high(Axis::Y)?, high(Axis::Z)?) {
                (true, true) => Self::UpperFront,
                (true, false) => Self::UpperBack,
                (false, true) => Self::LowerFront,
                (false, false) => Self::LowerBack,
            },
            Axis::Y => match (high(Axis::Z)?, high(Axis::X)?) {
                (true, false) => Self::FrontLeft,
                (true, true) => Self::FrontRight,
                (false, false) => Self::BackLeft,
                (false, true) => Self::BackRight,
            },
            Axis::Z => match (high(Axis::Y)?, high(Axis::X)?) {
                (true, false) => Self::UpperLeft,
                (true, true) => Self::UpperRight,
                (false, false) => Self::LowerLeft,
                (false, true) => Self::LowerRight,
            },
        };
        Some(region)
    }

    /// Half cell on `side` of the plane across `axis`. `None` for [`Side::Straddle`].
    pub fn half(axis: Axis, side: Side) -> Option<Self> {
        let high = match side {
            Side::Low => false,
            Side::High => true,
            Side::Straddle => return None,
        };
        Some(match (axis, high) {
            (Axis::Y, true) => Self::Upper,
            (Axis::Y, false) => Self::Lower,
            (Axis::Z, true) => Self::Front,
            (Axis::Z, false) => Self::Back,
            (Axis::X, true) => Self::Right,
            (Axis::X, false) => Self::Left,
        })
    }

    /// Direction of the region center from the parent center.
    ///
    /// `±1` on halved axes, `0` on axes the region spans completely.
    pub fn signs(self) -> DVec3 {
        let (x, y, z) = match self {
            Self::UpperFront => (0.0, 1.0, 1.0),
            Self::UpperBack => (0.0, 1.0, -1.0),
            Self::LowerFront => (0.0, -1.0, 1.0),
            Self::LowerBack => (0.0, -1.0, -1.0),
            Self::FrontLeft => (-1.0, 0.0, 1.0),
            Self::FrontRight => (1.0, 0.0, 1.0),
            Self::BackLeft => (-1.0, 0.0, -1.0),
            Self::BackRight => (1.0, 0.0, -1.0),
            Self::UpperLeft => (-1.0, 1.0, 0.0),
            Self::UpperRight => (1.0, 1.0, 0.0),
            Self::LowerLeft => (-1.0, -1.0, 0.0),
            Self::LowerRight => (1.0, -1.0, 0.0),
            Self::Upper => (0.0, 1.0, 0.0),
            Self::Lower => (0.0, -1.0, 0.0),
            Self::Front => (0.0, 0.0, 1.0),
            Self::Back => (0.0, 0.0, -1.0),
            Self::Left => (-1.0, 0.0, 0.0),
            Self::Right => (1.0, 0.0, 0.0),
        };
        DVec3::new(x, y, z)
    }

    /// Whether this is one of the six half cells.
    pub fn is_half(self) -> bool {
        self.index() >= 12
    }
}

impl SlotKey for ExtendedRegion {
    const ALL: &'static [Self] = &Self::ALL_REGIONS;

    fn index(self) -> usize {
        self as usize
    }
}

/// Slot of an octree cell's child.
pub type OctreeSlot = ChildSlot<Octant, ExtendedRegion>;

/// Extent of an octree cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OctreeRegion {
    center: DVec3,
    size: DVec3,
    half_size: DVec3,
}

impl OctreeRegion {
    /// Region centered at `center` with full `size` per axis.
    pub fn new(center: DVec3, size: DVec3) -> Self {
        Self {
            center,
            size,
            half_size: size * 0.5,
        }
    }

    /// Center of the cell.
    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// Full size per axis.
    pub fn size(&self) -> DVec3 {
        self.size
    }

    /// Half size per axis.
    pub fn half_size(&self) -> DVec3 {
        self.half_size
    }

    /// The region as a box.
    pub fn aabb(&self) -> Aabb3 {
        Aabb3::from_center_half_extents(self.center, self.half_size)
    }

    /// Sub-region halved on every axis where `signs` is non-zero, shifted toward its sign.
    fn sub_region(&self, signs: DVec3) -> Self {
        let halved = DVec3::select(signs.cmpeq(DVec3::ZERO), DVec3::ONE, DVec3::splat(0.5));
        Self::new(self.center + signs * self.size * 0.25, self.size * halved)
    }
}

/// Octree geometry. Stateless.
#[derive(Copy, Clone, Debug, Default)]
pub struct OctreePartition;

impl Partition for OctreePartition {
    type Region = OctreeRegion;
    type Regular = Octant;
    type Extended = ExtendedRegion;

    fn classify(&self, region: &OctreeRegion, extents: &Aabb3) -> Option<OctreeSlot> {
        let sides = SplitSides::of(extents, region.center, &OCTREE_AXES);
        let straddled = sides.straddled(&OCTREE_AXES);
        match straddled.count() {
            0 => Some(ChildSlot::Regular(Octant::from_sides(
                sides.side(Axis::X) == Side::High,
                sides.side(Axis::Y) == Side::High,
                sides.side(Axis::Z) == Side::High,
            ))),
            1 => {
                let axis = OCTREE_AXES
                    .into_iter()
                    .find(|a| straddled.contains(SplitAxes::from_axis(*a)))?;
                ExtendedRegion::spanning(axis, &sides).map(ChildSlot::Extended)
            }
            2 => {
                let axis = OCTREE_AXES
                    .into_iter()
                    .find(|a| !straddled.contains(SplitAxes::from_axis(*a)))?;
                ExtendedRegion::half(axis, sides.side(axis)).map(ChildSlot::Extended)
            }
            _ => None,
        }
    }

    fn child_region(&self, parent: &OctreeRegion, slot: OctreeSlot) -> OctreeRegion {
        match slot {
            ChildSlot::Regular(octant) => parent.sub_region(octant.signs()),
            ChildSlot::Extended(region) => parent.sub_region(region.signs()),
        }
    }

    fn bounds(&self, region: &OctreeRegion) -> Aabb3 {
        region.aabb()
    }
}

/// Octree over nodes of type `N`.
pub type Octree<N> = TreeGeneric<N, OctreePartition>;

impl<N: SpatialNode> TreeGeneric<N, OctreePartition> {
    /// Create an octree covering a cube of edge `size` around `center`.
    ///
    /// Uses [`TreeConfig::octree`]: split at 8 nodes, extended cells disabled.
    pub fn new(center: DVec3, size: f64) -> Self {
        Self::with_extent(center, DVec3::splat(size))
    }

    /// Create an octree covering a box of per-axis `size` around `center`.
    pub fn with_extent(center: DVec3, size: DVec3) -> Self {
        Self::with_partition(
            OctreePartition,
            OctreeRegion::new(center, size),
            TreeConfig::octree(),
        )
    }

    /// The child of the root in `octant`, if created.
    pub fn root_octant(&self, octant: Octant) -> Option<CellId> {
        self.root_cell().regular_child(octant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::SlotOf;

    fn classify(min: [f64; 3], max: [f64; 3]) -> Option<OctreeSlot> {
        let root = OctreeRegion::new(DVec3::ZERO, DVec3::splat(8.0));
        OctreePartition.classify(
            &root,
            &Aabb3::new(DVec3::from_array(min), DVec3::from_array(max)),
        )
    }

    #[test]
    fn octant_bits_match_signs() {
        for (i, octant) in Octant::ALL.iter().enumerate() {
            assert_eq!(octant.index(), i);
            let s = octant.signs();
            assert_eq!(*octant, Octant::from_sides(s.x > 0.0, s.y > 0.0, s.z > 0.0));
        }
        assert_eq!(Octant::UpperFrontRight.signs(), DVec3::ONE);
    }

    #[test]
    fn fully_resolved_nodes_pick_an_octant() {
        assert_eq!(
            classify([0.1, 0.1, 0.1], [1.0, 1.0, 1.0]),
            Some(ChildSlot::Regular(Octant::UpperFrontRight))
        );
        assert_eq!(
            classify([-3.0, 1.0, -2.0], [-1.0, 2.0, 0.0]),
            Some(ChildSlot::Regular(Octant::UpperBackLeft))
        );
    }

    #[test]
    fn one_straddled_axis_picks_a_spanning_region() {
        // Crosses X only, upper and back.
        assert_eq!(
            classify([-1.0, 1.0, -2.0], [1.0, 2.0, -1.0]),
            Some(ChildSlot::Extended(ExtendedRegion::UpperBack))
        );
        // Crosses Y only, front and right.
        assert_eq!(
            classify([1.0, -1.0, 1.0], [2.0, 1.0, 2.0]),
            Some(ChildSlot::Extended(ExtendedRegion::FrontRight))
        );
        // Crosses Z only, lower and left.
        assert_eq!(
            classify([-2.0, -2.0, -1.0], [-1.0, -1.0, 1.0]),
            Some(ChildSlot::Extended(ExtendedRegion::LowerLeft))
        );
    }

    #[test]
    fn two_straddled_axes_pick_a_half() {
        assert_eq!(
            classify([-1.0, 0.5, -1.0], [1.0, 2.0, 1.0]),
            Some(ChildSlot::Extended(ExtendedRegion::Upper))
        );
        assert_eq!(
            classify([-2.0, -1.0, -1.0], [-0.5, 1.0, 1.0]),
            Some(ChildSlot::Extended(ExtendedRegion::Left))
        );
        assert_eq!(
            classify([-1.0, -1.0, -2.0], [1.0, 1.0, -1.0]),
            Some(ChildSlot::Extended(ExtendedRegion::Back))
        );
    }

    #[test]
    fn straddling_everything_stays() {
        assert_eq!(classify([-5.0; 3], [5.0; 3]), None);
    }

    #[test]
    fn child_regions_cover_the_expected_space() {
        let root = OctreeRegion::new(DVec3::ZERO, DVec3::splat(8.0));
        let octant =
            OctreePartition.child_region(&root, ChildSlot::Regular(Octant::UpperFrontRight));
        assert_eq!(octant.center(), DVec3::splat(2.0));
        assert_eq!(octant.size(), DVec3::splat(4.0));
        assert_eq!(octant.aabb(), Aabb3::new(DVec3::ZERO, DVec3::splat(4.0)));

        let edge =
            OctreePartition.child_region(&root, ChildSlot::Extended(ExtendedRegion::LowerFront));
        assert_eq!(edge.center(), DVec3::new(0.0, -2.0, 2.0));
        assert_eq!(edge.size(), DVec3::new(8.0, 4.0, 4.0));

        let half = OctreePartition.child_region(&root, ChildSlot::Extended(ExtendedRegion::Right));
        assert_eq!(half.center(), DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(half.size(), DVec3::new(4.0, 8.0, 8.0));
        assert_eq!(half.half_size(), DVec3::new(2.0, 4.0, 4.0));
    }

    #[test]
    fn every_extended_region_contains_what_selects_it() {
        // Place a small box at the region center; it must classify back to the region
        // whenever the region spans an axis by straddling that plane.
        let root = OctreeRegion::new(DVec3::ZERO, DVec3::splat(8.0));
        for region in ExtendedRegion::ALL.iter().copied() {
            let child = OctreePartition.child_region(&root, ChildSlot::Extended(region));
            let probe = Aabb3::from_center_half_extents(child.center(), DVec3::splat(0.5));
            assert!(child.aabb().contains(&probe));
            assert_eq!(
                OctreePartition.classify(&root, &probe),
                Some(ChildSlot::Extended(region)),
                "probe at the center of {region:?} should select it"
            );
            assert_eq!(region.is_half(), region.signs().abs().element_sum() == 1.0);
        }
    }

    #[test]
    fn slot_indices_are_dense() {
        for (i, region) in ExtendedRegion::ALL.iter().enumerate() {
            assert_eq!(region.index(), i);
        }
        assert_eq!(SlotOf::<OctreePartition>::count(), 26);
    }
}
