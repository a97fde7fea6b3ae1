// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solid-modeling kernel seam
//!
//! The generator only decides which cross-sections, transforms and booleans
//! to issue. Everything that touches mesh topology goes through [`Kernel`].

use crate::error::Result;
use crate::profile::CrossSection;
use nalgebra::{Matrix3, Matrix4, Point3, Rotation3, Translation3, Unit, Vector3};

/// Plane definition for trimming
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Point on the plane
    pub point: Point3<f64>,
    /// Normal vector (normalized)
    pub normal: Vector3<f64>,
}

impl Plane {
    /// Create a new plane
    pub fn new(point: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Plane `normal · p = offset`, with `offset` measured along the unit normal
    pub fn from_normal_offset(normal: Vector3<f64>, offset: f64) -> Self {
        let normal = normal.normalize();
        Self {
            point: Point3::from(normal * offset),
            normal,
        }
    }

    /// Calculate signed distance from point to plane
    /// Positive = in front, Negative = behind
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        (point - self.point).dot(&self.normal)
    }
}

/// Primitive operations the box generator needs from a solid-modeling kernel.
///
/// Implementations must return closed, outward-wound solids from every
/// operation given closed inputs.
pub trait Kernel {
    /// Opaque closed volume
    type Solid: Clone;

    /// Extrude a counter-clockwise cross-section along +Z from 0 to `height`
    fn extrude(&self, section: &CrossSection, height: f64) -> Result<Self::Solid>;

    /// Apply an affine transform; mirroring transforms keep outward winding
    fn transform(&self, solid: &Self::Solid, matrix: &Matrix4<f64>) -> Self::Solid;

    /// Boolean union
    fn union(&self, a: &Self::Solid, b: &Self::Solid) -> Self::Solid;

    /// Boolean difference `a − b`
    fn difference(&self, a: &Self::Solid, b: &Self::Solid) -> Self::Solid;

    /// Subdivide until no edge is longer than `max_edge`
    fn refine(&self, solid: &Self::Solid, max_edge: f64) -> Self::Solid;

    /// Move every vertex through `f`
    fn warp(
        &self,
        solid: &Self::Solid,
        f: &(dyn Fn(Point3<f64>) -> Point3<f64> + Sync),
    ) -> Self::Solid;

    /// Keep the part of `solid` on the side `plane.normal` points to
    fn trim_by_plane(&self, solid: &Self::Solid, plane: &Plane) -> Self::Solid;

    /// Number of faces, for diagnostics
    fn face_count(&self, solid: &Self::Solid) -> usize;

    fn translate(&self, solid: &Self::Solid, offset: Vector3<f64>) -> Self::Solid {
        self.transform(solid, &Translation3::from(offset).to_homogeneous())
    }

    /// Rotate about an axis through the origin
    fn rotate(&self, solid: &Self::Solid, axis: &Unit<Vector3<f64>>, angle: f64) -> Self::Solid {
        self.transform(solid, &Rotation3::from_axis_angle(axis, angle).to_homogeneous())
    }

    /// Reflect about the plane through the origin with the given normal
    fn mirror(&self, solid: &Self::Solid, normal: &Vector3<f64>) -> Self::Solid {
        let n = match normal.try_normalize(1e-12) {
            Some(n) => n,
            None => return solid.clone(),
        };
        let mut reflect = Matrix4::identity();
        reflect
            .fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&(Matrix3::identity() - 2.0 * n * n.transpose()));
        self.transform(solid, &reflect)
    }
}
