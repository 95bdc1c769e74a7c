// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_bounds --heading-base-level=0

//! Understory Bounds: tagged 3D bounding volumes for spatial indexing.
//!
//! Understory Bounds is the geometry vocabulary the Understory cell trees are written against.
//!
//! - [`Aabb3`] and [`Sphere`] carry concrete extents; [`ConvexHull`] is carried as a tag only.
//! - [`Bounds`] is the tagged union a spatial object reports as its world bounds.
//! - [`side_of`] and [`SplitSides`] classify extents against split planes through a cell center.
//!
//! Operations a variant cannot perform return [`UnsupportedBounds`] instead of guessing.
//! Hulls are rejected at this boundary so recursive algorithms only ever see extents.
//!
//! All math is `f64` via [`glam::DVec3`]. Float inputs are assumed to be finite (no NaNs).
//!
//! # Example
//!
//! ```rust
//! use glam::DVec3;
//! use understory_bounds::{Aabb3, Axis, Bounds, Side, Sphere, SplitAxes, SplitSides};
//!
//! let sphere = Bounds::from(Sphere::new(DVec3::new(2.0, 0.0, 2.0), 1.0));
//! let extents = sphere.extents().unwrap();
//! assert_eq!(extents, Aabb3::new(DVec3::new(1.0, -1.0, 1.0), DVec3::new(3.0, 1.0, 3.0)));
//!
//! // Against planes through the origin the sphere is right and front, but crosses Y = 0.
//! let sides = SplitSides::of(&extents, DVec3::ZERO, &Axis::ALL);
//! assert_eq!(sides.side(Axis::X), Side::High);
//! assert_eq!(sides.straddled(&Axis::ALL), SplitAxes::Y);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod aabb;
pub mod axis;
pub mod bounds;
pub mod shapes;
pub mod split;

pub use aabb::Aabb3;
pub use axis::Axis;
pub use bounds::{Bounds, BoundsKind, UnsupportedBounds};
pub use shapes::{ConvexHull, Sphere};
pub use split::{Side, SplitAxes, SplitSides, side_of};
