// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Valid ranges of the user-tunable quantities
//!
//! Every function here is pure and never fails. Out-of-range requests are
//! pulled back into range with [`clamp_request`] before generation; `NaN`
//! inputs clamp to the lower bound.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::params::{BoxParameters, BoxRequest, CornerRadii, OpenFront, Side};
use std::f64::consts::FRAC_PI_2;

/// Material kept between the top of the opening's bottom edge and the rim
pub const MIN_CEILING_CLEARANCE: f64 = 1.0;

/// Perimeter left uncut before the back face, where the clips sit
pub const CLIP_CLEARANCE: f64 = 2.0;

/// Smallest openness an opening is allowed to have
pub const MIN_OPENNESS: f64 = 0.01;

/// `value` limited to `[lo, hi]`; `NaN` maps to `lo`
#[inline]
fn bounded(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi.max(lo))
}

/// Largest radius any single corner may have
pub fn max_corner_radius(params: &BoxParameters) -> f64 {
    (params.width.min(params.depth) / 2.0).max(0.0)
}

/// Largest gap between the floor and the bottom of the opening
pub fn max_bottom_offset(params: &BoxParameters) -> f64 {
    (params.height - params.bottom - MIN_CEILING_CLEARANCE).max(0.0)
}

/// Perimeter length from front centre to the end of the back corner arc
pub fn half_perimeter(params: &BoxParameters, radii: &CornerRadii, side: Side) -> f64 {
    let front = radii.front(side);
    let back = radii.back(side);
    let front_flat = (params.width / 2.0 - front).max(0.0);
    let side_flat = (params.depth - front - back).max(0.0);
    front_flat + front * FRAC_PI_2 + side_flat + back * FRAC_PI_2
}

/// How far along one side's perimeter an opening may extend
pub fn reach(params: &BoxParameters, radii: &CornerRadii, side: Side) -> f64 {
    (half_perimeter(params, radii, side) - CLIP_CLEARANCE).max(0.0)
}

/// Largest rounding of the opening that fits both sides
pub fn max_cutout_radius(
    params: &BoxParameters,
    radii: &CornerRadii,
    open_front: &OpenFront,
) -> f64 {
    let vertical = (params.height - params.bottom - open_front.bottom_offset) / 2.0;
    Side::BOTH
        .iter()
        .map(|&side| vertical.min(open_front.openness * reach(params, radii, side)))
        .fold(f64::INFINITY, f64::min)
        .max(0.0)
}

/// Every corner radius limited to `[0, max_corner_radius]`
pub fn clamp_radii(params: &BoxParameters, radii: &CornerRadii) -> CornerRadii {
    let max = max_corner_radius(params);
    radii.map(|r| bounded(r, 0.0, max))
}

/// Opening limited to the current box; radii are expected to be clamped already
pub fn clamp_open_front(
    params: &BoxParameters,
    radii: &CornerRadii,
    open_front: &OpenFront,
) -> OpenFront {
    let mut clamped = OpenFront::new(
        bounded(open_front.openness, MIN_OPENNESS, 1.0),
        bounded(open_front.bottom_offset, 0.0, max_bottom_offset(params)),
        0.0,
    );
    clamped.cutout_radius = bounded(
        open_front.cutout_radius,
        0.0,
        max_cutout_radius(params, radii, &clamped),
    );
    clamped
}

/// Request with radii and opening pulled into range; dimensions are kept
pub fn clamp_request(request: &BoxRequest) -> BoxRequest {
    let radii = clamp_radii(&request.params, &request.radii);
    BoxRequest {
        params: request.params,
        radii,
        open_front: request
            .open_front
            .map(|of| clamp_open_front(&request.params, &radii, &of)),
        corner_clips_only: request.corner_clips_only,
    }
}

/// All bounds for one request, as shown next to the host's sliders
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Limits {
    pub max_corner_radius: f64,
    pub max_bottom_offset: f64,
    /// Zero when the request has no opening
    pub max_cutout_radius: f64,
    pub reach_left: f64,
    pub reach_right: f64,
}

impl Limits {
    pub fn compute(request: &BoxRequest) -> Self {
        let clamped = clamp_request(request);
        let params = &clamped.params;
        let radii = &clamped.radii;
        Self {
            max_corner_radius: max_corner_radius(params),
            max_bottom_offset: max_bottom_offset(params),
            max_cutout_radius: clamped
                .open_front
                .map(|of| max_cutout_radius(params, radii, &of))
                .unwrap_or(0.0),
            reach_left: reach(params, radii, Side::Left),
            reach_right: reach(params, radii, Side::Right),
        }
    }
}
