// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Contour warp: bending the flat front cutout onto the rounded perimeter
//!
//! The cutout is built against a flat front face at `y = depth/2`. A vertex at
//! `(x, y, z)` is read as contour coordinate `a = |x|` along the perimeter and
//! radial depth `v = depth/2 - y` into the wall, then placed at the point that
//! lies `a` along the real outline and `v` inward from it. Each half of the box
//! has its own region boundaries because front and back radii may differ
//! between left and right.
//!
//! Every depth `v` follows the outline offset inward by `v`. Where `v` reaches
//! a corner radius the offset corner becomes a mitre; the arc pivot then moves
//! inward along the diagonal and keeps a bend radius of [`MIN_LOCAL_RADIUS`].
//! Straight sections are clamped to end at the moved pivot, so the map stays
//! continuous and deeper layers stay nested inside shallower ones.

use crate::cutout::CutoutContour;
use crate::params::{BoxParameters, CornerRadii, Side};
use nalgebra::{Point2, Point3};
use std::f64::consts::FRAC_PI_2;

/// Smallest bend radius, keeps triangles at an arc pivot from collapsing
pub const MIN_LOCAL_RADIUS: f64 = 0.01;

/// Interval of the unwrapped perimeter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContourRegion {
    FrontFlat,
    FrontCorner,
    SideFlat,
    BackCorner,
    BackFlat,
}

/// Region boundaries of one half of the perimeter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideContour {
    half_width: f64,
    half_depth: f64,
    front_radius: f64,
    back_radius: f64,
    /// End of the straight front section
    pub flat_bound: f64,
    /// End of the front corner arc
    pub front_arc_end: f64,
    /// End of the straight side wall
    pub side_flat_end: f64,
    /// End of the back corner arc; the back flat follows
    pub back_arc_end: f64,
}

impl SideContour {
    pub fn new(params: &BoxParameters, radii: &CornerRadii, side: Side) -> Self {
        let front_radius = radii.front(side);
        let back_radius = radii.back(side);
        let flat_bound = params.width / 2.0 - front_radius;
        let front_arc_end = flat_bound + front_radius * FRAC_PI_2;
        let side_flat_end = front_arc_end + (params.depth - front_radius - back_radius).max(0.0);
        let back_arc_end = side_flat_end + back_radius * FRAC_PI_2;

        Self {
            half_width: params.width / 2.0,
            half_depth: params.depth / 2.0,
            front_radius,
            back_radius,
            flat_bound,
            front_arc_end,
            side_flat_end,
            back_arc_end,
        }
    }

    /// Region containing contour distance `a ≥ 0`; boundaries belong to the
    /// earlier region
    pub fn region(&self, a: f64) -> ContourRegion {
        if a <= self.flat_bound {
            ContourRegion::FrontFlat
        } else if a <= self.front_arc_end {
            ContourRegion::FrontCorner
        } else if a <= self.side_flat_end {
            ContourRegion::SideFlat
        } else if a <= self.back_arc_end {
            ContourRegion::BackCorner
        } else {
            ContourRegion::BackFlat
        }
    }

    /// Position for contour distance `a` and inward depth `v` on the right
    /// half (`x ≥ 0`)
    pub fn map(&self, a: f64, v: f64) -> Point2<f64> {
        self.map_in(self.region(a), a, v)
    }

    /// Centre and bend radius of the front corner arc at depth `v`
    fn front_pivot(&self, v: f64) -> (Point2<f64>, f64) {
        let inset = self.front_radius.max(v + MIN_LOCAL_RADIUS);
        (
            Point2::new(self.half_width - inset, self.half_depth - inset),
            inset - v,
        )
    }

    /// Centre and bend radius of the back corner arc at depth `v`
    fn back_pivot(&self, v: f64) -> (Point2<f64>, f64) {
        let inset = self.back_radius.max(v + MIN_LOCAL_RADIUS);
        (
            Point2::new(self.half_width - inset, -self.half_depth + inset),
            inset - v,
        )
    }

    /// Same as [`SideContour::map`] with the region forced
    pub fn map_in(&self, region: ContourRegion, a: f64, v: f64) -> Point2<f64> {
        let (hw, hd) = (self.half_width, self.half_depth);
        let (rf, rb) = (self.front_radius, self.back_radius);

        match region {
            ContourRegion::FrontFlat => {
                let (pivot, _) = self.front_pivot(v);
                Point2::new(a.min(pivot.x), hd - v)
            }
            ContourRegion::FrontCorner => {
                let theta = (a - self.flat_bound) / rf;
                let (pivot, r_local) = self.front_pivot(v);
                Point2::new(
                    pivot.x + r_local * theta.sin(),
                    pivot.y + r_local * theta.cos(),
                )
            }
            ContourRegion::SideFlat => {
                let t = a - self.front_arc_end;
                let (front, _) = self.front_pivot(v);
                let (back, _) = self.back_pivot(v);
                Point2::new(hw - v, (hd - rf - t).min(front.y).max(back.y))
            }
            ContourRegion::BackCorner => {
                let phi = (a - self.side_flat_end) / rb;
                let (pivot, r_local) = self.back_pivot(v);
                Point2::new(
                    pivot.x + r_local * phi.cos(),
                    pivot.y - r_local * phi.sin(),
                )
            }
            ContourRegion::BackFlat => {
                let t = a - self.back_arc_end;
                let (pivot, _) = self.back_pivot(v);
                Point2::new((hw - rb - t).min(pivot.x), -hd + v)
            }
        }
    }
}

/// Vertex map from flat-front cutout space onto the box outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourWarp {
    half_depth: f64,
    left: SideContour,
    right: SideContour,
}

impl ContourWarp {
    pub fn new(params: &BoxParameters, radii: &CornerRadii) -> Self {
        Self {
            half_depth: params.depth / 2.0,
            left: SideContour::new(params, radii, Side::Left),
            right: SideContour::new(params, radii, Side::Right),
        }
    }

    #[inline]
    pub fn side(&self, side: Side) -> &SideContour {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Side and region of contour coordinate `u`
    pub fn region(&self, u: f64) -> (Side, ContourRegion) {
        let side = Side::of(u);
        (side, self.side(side).region(u.abs()))
    }

    /// Bend one vertex. Inputs past the back flat, or deeper than half the
    /// box, give distorted output; callers clamp the cutout beforehand.
    pub fn map(&self, p: Point3<f64>) -> Point3<f64> {
        let side = Side::of(p.x);
        let v = self.half_depth - p.y;
        let mapped = self.side(side).map(p.x.abs(), v);
        Point3::new(side.sign() * mapped.x, mapped.y, p.z)
    }

    /// Whether the cutout wraps past the straight front on either side
    pub fn needs_warp(&self, cutout: &CutoutContour) -> bool {
        Side::BOTH
            .iter()
            .any(|&side| cutout.span(side) > self.side(side).flat_bound)
    }
}
