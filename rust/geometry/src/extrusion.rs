// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - converting 2D cross-sections to closed prisms

use crate::error::{Error, Result};
use crate::profile::CrossSection;
use crate::triangulation::triangulate_ccw;
use nalgebra::{Point2, Point3};

/// Points closer than this are merged before triangulation
const MERGE_EPSILON: f64 = 1e-9;

/// Extrude a cross-section along +Z from `z = 0` to `z = height`.
///
/// Returns the faces of the closed prism, each wound counter-clockwise seen
/// from outside: cap triangles first, then one quad per outline edge.
/// Clockwise input is reoriented and consecutive duplicate points
/// (zero-radius corners) are merged.
pub fn extrude_section(section: &CrossSection, height: f64) -> Result<Vec<Vec<Point3<f64>>>> {
    if !(height > 0.0) {
        return Err(Error::InvalidExtrusion(format!(
            "Height must be positive, got {height}"
        )));
    }

    let mut outline = section.deduplicated(MERGE_EPSILON);
    if outline.len() < 3 {
        return Err(Error::InvalidCrossSection(format!(
            "Cross-section needs at least 3 distinct points, got {}",
            outline.len()
        )));
    }
    if section.signed_area() < 0.0 {
        outline.reverse();
    }

    let triangles = triangulate_ccw(&outline)?;
    if triangles.is_empty() {
        return Err(Error::TriangulationError(
            "Cross-section has no area".to_string(),
        ));
    }

    let n = outline.len();
    let at = |p: &Point2<f64>, z: f64| Point3::new(p.x, p.y, z);
    let mut faces = Vec::with_capacity(triangles.len() * 2 + n);

    // Bottom cap faces -Z, so its winding is reversed
    for [a, b, c] in &triangles {
        faces.push(vec![at(&outline[*a], 0.0), at(&outline[*c], 0.0), at(&outline[*b], 0.0)]);
        faces.push(vec![
            at(&outline[*a], height),
            at(&outline[*b], height),
            at(&outline[*c], height),
        ]);
    }

    for i in 0..n {
        let (p0, p1) = (&outline[i], &outline[(i + 1) % n]);
        faces.push(vec![at(p0, 0.0), at(p1, 0.0), at(p1, height), at(p0, height)]);
    }

    Ok(faces)
}
