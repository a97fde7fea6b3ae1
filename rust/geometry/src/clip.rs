// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snap-fit mounting clips on the back face
//!
//! A clip pair is two mirrored cantilever hooks. In clip-local coordinates
//! `x` is lateral, `y` points away from the box (negative values stick out
//! behind the back wall) and the extrusion runs along `+z`.

use crate::error::Result;
use crate::kernel::{Kernel, Plane};
use crate::params::{BoxParameters, CornerRadii};
use crate::profile::{arc_points, CrossSection};
use nalgebra::{Point2, Vector3};
use std::f64::consts::PI;

/// Vertical size of one clip
pub const CLIP_HEIGHT: f64 = 6.0;
/// Column spacing of the clip grid
pub const CLIP_PITCH_X: f64 = 25.0;
/// Row spacing of the clip grid
pub const CLIP_PITCH_Z: f64 = 25.0;
/// Lateral extent of a mirrored pair
pub const CLIP_PAIR_WIDTH: f64 = 5.6;
/// Segments of the rounded hook tip
pub const CLIP_ARC_SEGMENTS: usize = 24;

/// Depth the clip root overlaps into the back wall
const CLIP_EMBED: f64 = 0.5;
const TIP_CENTER: (f64, f64) = (1.2, -4.6);
const TIP_RADIUS: f64 = 0.4;

/// Right-hand clip silhouette at the default tip density
pub fn clip_profile() -> CrossSection {
    clip_profile_with_segments(CLIP_ARC_SEGMENTS)
}

/// Right-hand clip silhouette, counter-clockwise.
///
/// Inner arm edge down to a rounded tip, then the barb and the outer arm edge
/// back up into the wall.
pub fn clip_profile_with_segments(segments: usize) -> CrossSection {
    let mut points = vec![Point2::new(0.8, CLIP_EMBED)];
    points.extend(arc_points(
        Point2::new(TIP_CENTER.0, TIP_CENTER.1),
        TIP_RADIUS,
        PI,
        2.0 * PI,
        segments,
    ));
    points.extend([
        Point2::new(2.8, -3.6),
        Point2::new(2.8, -3.0),
        Point2::new(2.0, -2.6),
        Point2::new(2.0, CLIP_EMBED),
    ]);
    CrossSection::new(points)
}

/// Chamfer plane for upper rows: keeps `y + z ≥ 0`, so nothing overhangs more
/// than 45° below the hook
fn chamfer_plane() -> Plane {
    Plane::from_normal_offset(Vector3::new(0.0, 1.0, 1.0), 0.0)
}

/// Extruded (left, right) clip solids in clip-local coordinates
pub fn clip_pair<K: Kernel>(
    kernel: &K,
    chamfered: bool,
    segments: usize,
) -> Result<(K::Solid, K::Solid)> {
    let mut right = kernel.extrude(&clip_profile_with_segments(segments), CLIP_HEIGHT)?;
    if chamfered {
        right = kernel.trim_by_plane(&right, &chamfer_plane());
    }

    // The chamfer plane is symmetric in x, so the trimmed hook mirrors cleanly
    let left = kernel.mirror(&right, &Vector3::x());
    Ok((left, right))
}

/// One slot of the clip grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlacement {
    /// Lateral centre of the pair
    pub x: f64,
    /// Bottom of the pair
    pub z: f64,
    pub column: usize,
    pub row: usize,
    /// Upper rows print without support
    pub chamfered: bool,
}

/// Clip-pair grid for a box.
///
/// Columns fill the straight part of the back face between the back corner
/// radii; rows stack from the floor while a whole clip still fits.
pub fn clip_grid(
    params: &BoxParameters,
    radii: &CornerRadii,
    corner_only: bool,
) -> Vec<ClipPlacement> {
    let working = params.width - radii.back_left - radii.back_right - CLIP_PAIR_WIDTH;
    if !(working >= 0.0) || params.height < CLIP_HEIGHT {
        return Vec::new();
    }

    let columns = (working / CLIP_PITCH_X).floor() as usize + 1;
    let rows = ((params.height - CLIP_HEIGHT) / CLIP_PITCH_Z).floor() as usize + 1;
    let center = (radii.back_left - radii.back_right) / 2.0;
    let first_x = center - (columns - 1) as f64 * CLIP_PITCH_X / 2.0;

    let is_edge = |i: usize, n: usize| i == 0 || i + 1 == n;

    (0..rows)
        .flat_map(|row| (0..columns).map(move |column| (row, column)))
        .filter(|&(row, column)| !corner_only || (is_edge(row, rows) && is_edge(column, columns)))
        .map(|(row, column)| ClipPlacement {
            x: first_x + column as f64 * CLIP_PITCH_X,
            z: row as f64 * CLIP_PITCH_Z,
            column,
            row,
            chamfered: row > 0,
        })
        .collect()
}
