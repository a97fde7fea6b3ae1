// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation utilities
//!
//! Ear clipping for cross-section caps and for the planar faces csgrs hands
//! back, plus the projection and normal helpers those faces need.

use crate::{Error, Point2, Point3, Result, Vector3};

/// Twice the signed area of triangle (a, b, c); positive when counter-clockwise
#[inline]
pub fn orient_2d(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Ear-clip a simple polygon (no holes) with earcutr.
///
/// Returns index triples into `points`, each wound counter-clockwise in the
/// input plane whatever the input orientation. Zero-area ears are dropped.
pub fn triangulate_ccw(points: &[Point2<f64>]) -> Result<Vec<[usize; 3]>> {
    if points.len() < 3 {
        return Err(Error::TriangulationError(format!(
            "Need at least 3 points to triangulate, got {}",
            points.len()
        )));
    }

    let flat: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    let indices = earcutr::earcut(&flat, &[], 2)
        .map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;

    Ok(indices
        .chunks_exact(3)
        .filter_map(|tri| {
            let (a, b, c) = (tri[0], tri[1], tri[2]);
            let area = orient_2d(&points[a], &points[b], &points[c]);
            if area.abs() <= 1e-12 {
                None
            } else if area > 0.0 {
                Some([a, b, c])
            } else {
                Some([a, c, b])
            }
        })
        .collect())
}

/// Coordinates of planar 3D points in a right-handed basis of the plane with
/// the given unit normal, so counter-clockwise about `normal` stays
/// counter-clockwise in 2D. The first point is the origin.
pub fn project_to_2d(points: &[Point3<f64>], normal: &Vector3<f64>) -> Vec<Point2<f64>> {
    let origin = match points.first() {
        Some(p) => *p,
        None => return Vec::new(),
    };

    // Seed with the world axis least aligned with the normal
    let seed = normal.iamin();
    let mut reference = Vector3::zeros();
    reference[seed] = 1.0;

    let u_axis = normal.cross(&reference).normalize();
    let v_axis = normal.cross(&u_axis);

    points
        .iter()
        .map(|p| {
            let d = p - origin;
            Point2::new(d.dot(&u_axis), d.dot(&v_axis))
        })
        .collect()
}

/// Unit normal of a planar polygon by Newell's method, `None` when the
/// outline encloses no area
#[inline]
pub fn polygon_normal(points: &[Point3<f64>]) -> Option<Vector3<f64>> {
    if points.len() < 3 {
        return None;
    }

    let mut normal = Vector3::<f64>::zeros();
    for (i, current) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        normal.x += (current.y - next.y) * (current.z + next.z);
        normal.y += (current.z - next.z) * (current.x + next.x);
        normal.z += (current.x - next.x) * (current.y + next.y);
    }

    normal.try_normalize(1e-12)
}
