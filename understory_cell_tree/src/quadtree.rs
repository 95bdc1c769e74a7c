// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree partition: four quadrants plus four half slabs on a plane of world space.
//!
//! The plane is picked from the world's up axis. Positions are projected onto two in-plane
//! axes `a` and `b`; the third axis is the height and is never split, so every cell spans
//! the full height of the tree.
//!
//! In plane terms, low `a` is left, high `a` is right, low `b` is back and high `b` is front.
//! Quadrants follow that naming directly. Half slabs are named for the split they bridge:
//! a node crossing the `a` split settles in [`HalfSlab::Left`] or [`HalfSlab::Right`], the
//! slabs running the full width of `a`, on its side of `b`. A node crossing the `b` split
//! settles in [`HalfSlab::Back`] or [`HalfSlab::Front`], which run the full depth of `b`.

use glam::DVec3;
use kurbo::{Point, Rect, Size};
use understory_bounds::{Aabb3, Axis, Side, SplitAxes, SplitSides};

use crate::cell::CellId;
use crate::config::TreeConfig;
use crate::node::{NodeKey, SpatialNode};
use crate::partition::{ChildSlot, Partition, SlotKey};
use crate::tree::TreeGeneric;

/// Direction that points up in world space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum UpAxis {
    /// `+Y` is up; the tree lies on the XZ plane.
    #[default]
    PosY,
    /// `+Z` is up; the tree lies on the XY plane.
    PosZ,
    /// `-X` is up; the tree lies on the ZY plane.
    NegX,
}

impl UpAxis {
    /// The plane perpendicular to this up axis.
    pub const fn plane(self) -> Plane {
        match self {
            Self::PosY => Plane::XZ,
            Self::PosZ => Plane::XY,
            Self::NegX => Plane::ZY,
        }
    }
}

/// A world-space plane a quadtree subdivides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Plane {
    /// `a = X`, `b = Z`, height on `Y`.
    XZ,
    /// `a = X`, `b = Y`, height on `Z`.
    XY,
    /// `a = Z`, `b = Y`, height on `X`.
    ZY,
}

impl Plane {
    /// The in-plane axes `(a, b)`.
    pub const fn axes(self) -> (Axis, Axis) {
        match self {
            Self::XZ => (Axis::X, Axis::Z),
            Self::XY => (Axis::X, Axis::Y),
            Self::ZY => (Axis::Z, Axis::Y),
        }
    }

    /// The axis that is never split.
    pub const fn height_axis(self) -> Axis {
        match self {
            Self::XZ => Axis::Y,
            Self::XY => Axis::Z,
            Self::ZY => Axis::X,
        }
    }

    /// Drop the height of `v`, returning `(a, b)` as a point.
    pub fn project(self, v: DVec3) -> Point {
        let (a, b) = self.axes();
        Point::new(a.component(v), b.component(v))
    }

    /// Lift a plane point back to world space at `height`.
    pub fn unproject(self, p: Point, height: f64) -> DVec3 {
        let (a, b) = self.axes();
        let v = self.height_axis().with_component(DVec3::ZERO, height);
        b.with_component(a.with_component(v, p.x), p.y)
    }
}

/// Regular child of a quadtree cell.
///
/// The discriminant is a bit set: bit 0 = right (high `a`), bit 1 = front (high `b`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Low `a`, low `b`.
    BackLeft = 0,
    /// High `a`, low `b`.
    BackRight = 1,
    /// Low `a`, high `b`.
    FrontLeft = 2,
    /// High `a`, high `b`.
    FrontRight = 3,
}

impl Quadrant {
    const ALL_QUADRANTS: [Self; 4] = [
        Self::BackLeft,
        Self::BackRight,
        Self::FrontLeft,
        Self::FrontRight,
    ];

    /// Quadrant on the given side of each in-plane split.
    pub const fn from_sides(right: bool, front: bool) -> Self {
        Self::ALL_QUADRANTS[(right as usize) | ((front as usize) << 1)]
    }

    /// Direction of the quadrant center from the parent center, `±1` on `(a, b)`.
    pub fn signs(self) -> (f64, f64) {
        let bits = self as u8;
        let sign = |bit: u8| if bits & bit != 0 { 1.0 } else { -1.0 };
        (sign(1), sign(2))
    }
}

impl SlotKey for Quadrant {
    const ALL: &'static [Self] = &Self::ALL_QUADRANTS;

    fn index(self) -> usize {
        self as usize
    }
}

/// Extended child of a quadtree cell: one half of the parent.
///
/// `Left` and `Right` hold nodes crossing the `a` split; `Back` and `Front` hold nodes
/// crossing the `b` split.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HalfSlab {
    /// All of `a`, low half of `b`.
    Left = 0,
    /// All of `a`, high half of `b`.
    Right = 1,
    /// Low half of `a`, all of `b`.
    Back = 2,
    /// High half of `a`, all of `b`.
    Front = 3,
}

impl HalfSlab {
    const ALL_SLABS: [Self; 4] = [Self::Left, Self::Right, Self::Back, Self::Front];

    /// Direction of the slab center from the parent center; `0` on the spanned axis.
    pub fn signs(self) -> (f64, f64) {
        match self {
            Self::Left => (0.0, -1.0),
            Self::Right => (0.0, 1.0),
            Self::Back => (-1.0, 0.0),
            Self::Front => (1.0, 0.0),
        }
    }
}

impl SlotKey for HalfSlab {
    const ALL: &'static [Self] = &Self::ALL_SLABS;

    fn index(self) -> usize {
        self as usize
    }
}

/// Slot of a quadtree cell's child.
pub type QuadtreeSlot = ChildSlot<Quadrant, HalfSlab>;

/// In-plane extent of a quadtree cell.
///
/// `size.width` runs along plane axis `a`, `size.height` along `b`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadRegion {
    center: Point,
    size: Size,
    half: Size,
}

impl QuadRegion {
    /// Region centered at `center` with full `size`.
    pub fn new(center: Point, size: Size) -> Self {
        Self {
            center,
            size,
            half: size * 0.5,
        }
    }

    /// Center in plane coordinates.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Full size in plane coordinates.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Half size in plane coordinates.
    pub fn half_size(&self) -> Size {
        self.half
    }

    /// The region's footprint on the plane.
    pub fn footprint(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    fn sub_region(&self, (sa, sb): (f64, f64)) -> Self {
        let scale = |s: f64| if s == 0.0 { 1.0 } else { 0.5 };
        let center = Point::new(
            self.center.x + sa * self.size.width * 0.25,
            self.center.y + sb * self.size.height * 0.25,
        );
        let size = Size::new(self.size.width * scale(sa), self.size.height * scale(sb));
        Self::new(center, size)
    }
}

/// Quadtree geometry: the plane, the fixed height range, and the extended-cell switch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadtreePartition {
    plane: Plane,
    allow_extended: bool,
    height_center: f64,
    height: f64,
}

impl QuadtreePartition {
    /// Geometry for a tree on `plane` spanning `height` around `height_center`.
    pub fn new(plane: Plane, height_center: f64, height: f64, allow_extended: bool) -> Self {
        Self {
            plane,
            allow_extended,
            height_center,
            height,
        }
    }

    /// The subdivided plane.
    pub fn plane(&self) -> Plane {
        self.plane
    }

    /// Full height covered by every cell.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Height coordinate of the tree center.
    pub fn height_center(&self) -> f64 {
        self.height_center
    }
}

impl Partition for QuadtreePartition {
    type Region = QuadRegion;
    type Regular = Quadrant;
    type Extended = HalfSlab;

    fn classify(&self, region: &QuadRegion, extents: &Aabb3) -> Option<QuadtreeSlot> {
        let (a, b) = self.plane.axes();
        let axes = [a, b];
        let center = self.plane.unproject(region.center, self.height_center);
        let sides = SplitSides::of(extents, center, &axes);
        let straddled = sides.straddled(&axes);
        let high = |axis: Axis| sides.side(axis) == Side::High;
        if straddled == SplitAxes::from_axis(a) | SplitAxes::from_axis(b) {
            None
        } else if straddled.contains(SplitAxes::from_axis(a)) {
            let slab = if high(b) { HalfSlab::Right } else { HalfSlab::Left };
            Some(ChildSlot::Extended(slab))
        } else if straddled.contains(SplitAxes::from_axis(b)) {
            let slab = if high(a) { HalfSlab::Front } else { HalfSlab::Back };
            Some(ChildSlot::Extended(slab))
        } else {
            Some(ChildSlot::Regular(Quadrant::from_sides(high(a), high(b))))
        }
    }

    fn child_region(&self, parent: &QuadRegion, slot: QuadtreeSlot) -> QuadRegion {
        match slot {
            ChildSlot::Regular(quadrant) => parent.sub_region(quadrant.signs()),
            ChildSlot::Extended(slab) => parent.sub_region(slab.signs()),
        }
    }

    fn bounds(&self, region: &QuadRegion) -> Aabb3 {
        let rect = region.footprint();
        let half_height = self.height * 0.5;
        Aabb3::new(
            self.plane
                .unproject(rect.origin(), self.height_center - half_height),
            self.plane.unproject(
                Point::new(rect.x1, rect.y1),
                self.height_center + half_height,
            ),
        )
    }

    fn allows_extended_cells(&self) -> bool {
        self.allow_extended
    }
}

/// Quadtree over nodes of type `N`.
pub type Quadtree<N> = TreeGeneric<N, QuadtreePartition>;

impl<N: SpatialNode> TreeGeneric<N, QuadtreePartition> {
    /// Create a quadtree covering a `size` x `size` square around `center`, `height` tall.
    ///
    /// Uses [`TreeConfig::quadtree`]: split at 4 nodes, extended cells disabled until
    /// [`set_max_level_for_extended_cells`](Self::set_max_level_for_extended_cells) raises
    /// the limit. `allow_extended = false` disables them for the whole tree.
    pub fn new(center: DVec3, size: f64, height: f64, up: UpAxis, allow_extended: bool) -> Self {
        Self::with_extent(center, size, size, height, up, allow_extended)
    }

    /// Create a quadtree with `width` along plane axis `a` and `depth` along `b`.
    pub fn with_extent(
        center: DVec3,
        width: f64,
        depth: f64,
        height: f64,
        up: UpAxis,
        allow_extended: bool,
    ) -> Self {
        let plane = up.plane();
        let partition = QuadtreePartition::new(
            plane,
            plane.height_axis().component(center),
            height,
            allow_extended,
        );
        let root = QuadRegion::new(plane.project(center), Size::new(width, depth));
        Self::with_partition(partition, root, TreeConfig::quadtree())
    }

    /// The child of the root in `quadrant`, if created.
    pub fn root_quadrant(&self, quadrant: Quadrant) -> Option<CellId> {
        self.root_cell().regular_child(quadrant)
    }

    /// Query nodes whose footprint on the plane intersects `rect`, at any height.
    pub fn query_rect(&self, rect: Rect) -> impl Iterator<Item = (NodeKey, &N)> + use<'_, N> {
        let plane = self.partition().plane();
        let rect = rect.abs();
        let query = Aabb3::new(
            plane.unproject(rect.origin(), f64::NEG_INFINITY),
            plane.unproject(Point::new(rect.x1, rect.y1), f64::INFINITY),
        );
        self.query_aabb(&query)
    }
}
