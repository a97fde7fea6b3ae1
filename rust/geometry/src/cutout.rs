// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Front finger-access opening in unwrapped contour coordinates
//!
//! The opening is drawn in the `(u, z)` plane: `u` runs along the outer
//! perimeter from the front centre (positive to the right), `z` is height.
//! Each side has its own extent, bottom rounding and top flare because the
//! corner radii may differ between left and right.

use crate::config::GeneratorConfig;
use crate::limits::reach;
use crate::params::{BoxParameters, CornerRadii, OpenFront, Side};
use crate::profile::{arc_points, CrossSection};
use nalgebra::Point2;
use std::f64::consts::{FRAC_PI_2, PI};

/// Opening geometry of one half
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoutSide {
    /// Distance from the front centre to the straight side of the opening
    pub half_extent: f64,
    /// Bottom corner rounding
    pub radius: f64,
    /// Concave flare blending the side into the rim; zero gives a chimney
    pub top_radius: f64,
}

impl CutoutSide {
    /// Horizontal reach including the flare
    #[inline]
    pub fn span(&self) -> f64 {
        self.half_extent + self.top_radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoutContour {
    /// Bottom edge of the opening
    pub bottom: f64,
    /// Rim height, where the flares end
    pub height: f64,
    /// Top of the section, above the rim by the boolean overshoot
    pub top: f64,
    pub left: CutoutSide,
    pub right: CutoutSide,
}

impl CutoutContour {
    /// Derive per-side extents and radii. Inputs are expected to be clamped
    /// by [`crate::limits::clamp_open_front`]; the `min`/`max` below only keep
    /// the radii non-negative and non-overlapping.
    pub fn new(
        params: &BoxParameters,
        radii: &CornerRadii,
        open_front: &OpenFront,
        config: &GeneratorConfig,
    ) -> Self {
        let bottom = params.bottom + open_front.bottom_offset;
        let height = params.height;
        let top = height + config.boolean_overshoot;

        let side = |side: Side| {
            let reach = reach(params, radii, side);
            let half_extent = open_front.openness * reach;
            let radius = open_front
                .cutout_radius
                .min(half_extent)
                .min((top - bottom) / 2.0)
                .max(0.0);
            let top_radius = open_front
                .cutout_radius
                .min(reach - half_extent)
                .min(height - bottom - radius)
                .max(0.0);
            CutoutSide {
                half_extent,
                radius,
                top_radius,
            }
        };

        Self {
            bottom,
            height,
            top,
            left: side(Side::Left),
            right: side(Side::Right),
        }
    }

    #[inline]
    pub fn side(&self, side: Side) -> &CutoutSide {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Horizontal reach of one side including its flare
    #[inline]
    pub fn span(&self, side: Side) -> f64 {
        self.side(side).span()
    }

    /// U-shaped counter-clockwise outline in `(u, z)`.
    ///
    /// Bottom-right rounding, right flare, across the top, left flare,
    /// bottom-left rounding. Zero radii leave repeated points.
    pub fn section(&self, segments: usize) -> CrossSection {
        let (l, r) = (&self.left, &self.right);
        let mut points = Vec::with_capacity(4 * (segments + 2) + 2);

        points.extend(arc_points(
            Point2::new(r.half_extent - r.radius, self.bottom + r.radius),
            r.radius,
            -FRAC_PI_2,
            0.0,
            segments,
        ));
        points.extend(arc_points(
            Point2::new(r.half_extent + r.top_radius, self.height - r.top_radius),
            r.top_radius,
            PI,
            FRAC_PI_2,
            segments,
        ));
        points.push(Point2::new(r.span(), self.top));

        points.push(Point2::new(-l.span(), self.top));
        points.extend(arc_points(
            Point2::new(-l.half_extent - l.top_radius, self.height - l.top_radius),
            l.top_radius,
            FRAC_PI_2,
            0.0,
            segments,
        ));
        points.extend(arc_points(
            Point2::new(-l.half_extent + l.radius, self.bottom + l.radius),
            l.radius,
            PI,
            PI + FRAC_PI_2,
            segments,
        ));

        CrossSection::new(points)
    }
}
