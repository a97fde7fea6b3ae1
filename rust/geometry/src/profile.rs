// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D cross-sections, arcs and rounded rectangles

use crate::params::CornerRadii;
use nalgebra::{Point2, Rotation2, Vector2};
use std::f64::consts::{FRAC_PI_2, PI};

/// Arc density shared by box corners and cutout rounding
pub const CORNER_SEGMENTS: usize = 10;

/// Closed, counter-clockwise 2D polygon used as the base of an extrusion
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection {
    points: Vec<Point2<f64>>,
}

impl CrossSection {
    /// Create a cross-section from an ordered point list.
    /// The closing edge (last → first) is implicit.
    pub fn new(points: Vec<Point2<f64>>) -> Self {
        Self { points }
    }

    /// Ordered outline points
    #[inline]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shoelace area, positive for counter-clockwise outlines
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice_area = 0.0;
        for i in 0..n {
            let p = &self.points[i];
            let q = &self.points[(i + 1) % n];
            twice_area += p.x * q.y - q.x * p.y;
        }
        twice_area * 0.5
    }

    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> (Point2<f64>, Point2<f64>) {
        if self.points.is_empty() {
            return (Point2::origin(), Point2::origin());
        }
        let mut min = Point2::new(f64::MAX, f64::MAX);
        let mut max = Point2::new(f64::MIN, f64::MIN);
        for p in &self.points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }

    pub fn translate(&self, offset: Vector2<f64>) -> Self {
        Self::new(self.points.iter().map(|p| p + offset).collect())
    }

    /// Rotate counter-clockwise about the origin
    pub fn rotate(&self, angle: f64) -> Self {
        let rotation = Rotation2::new(angle);
        Self::new(self.points.iter().map(|p| rotation * p).collect())
    }

    /// Mirror about the vertical (y) axis. Point order is reversed so the
    /// outline stays counter-clockwise.
    pub fn mirror_x(&self) -> Self {
        Self::new(
            self.points
                .iter()
                .rev()
                .map(|p| Point2::new(-p.x, p.y))
                .collect(),
        )
    }

    /// Mirror about the horizontal (x) axis, keeping counter-clockwise order.
    pub fn mirror_y(&self) -> Self {
        Self::new(
            self.points
                .iter()
                .rev()
                .map(|p| Point2::new(p.x, -p.y))
                .collect(),
        )
    }

    /// Points with consecutive near-duplicates (including the closing pair)
    /// removed. Zero-radius corners produce such runs.
    pub fn deduplicated(&self, epsilon: f64) -> Vec<Point2<f64>> {
        let mut points = self.points.clone();
        points.dedup_by(|a, b| (*a - *b).norm() <= epsilon);
        while points.len() > 1 {
            let first = points[0];
            let last = points[points.len() - 1];
            if (first - last).norm() <= epsilon {
                points.pop();
            } else {
                break;
            }
        }
        points
    }
}

/// Tessellate a circular arc.
///
/// Returns `segments + 2` points evenly spaced in angle from `start` to `end`
/// (both inclusive, radians), traversed from `start` towards `end`. A zero
/// radius yields repeated copies of `center`.
pub fn arc_points(
    center: Point2<f64>,
    radius: f64,
    start: f64,
    end: f64,
    segments: usize,
) -> Vec<Point2<f64>> {
    let steps = segments + 1;
    (0..=steps)
        .map(|i| {
            let angle = start + (end - start) * (i as f64) / (steps as f64);
            Point2::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect()
}

/// Rounded rectangle centred on the origin with one shared corner radius
#[inline]
pub fn rounded_rectangle(width: f64, depth: f64, radius: f64, segments: usize) -> CrossSection {
    rounded_rectangle_corners(width, depth, &CornerRadii::uniform(radius), segments)
}

/// Rounded rectangle centred on the origin with independent corner radii.
///
/// The front edge is at `+depth/2`. Corners are emitted front-right,
/// front-left, back-left, back-right, which is counter-clockwise. Each radius
/// must not exceed half of its adjacent sides; larger values give a
/// self-intersecting outline.
pub fn rounded_rectangle_corners(
    width: f64,
    depth: f64,
    radii: &CornerRadii,
    segments: usize,
) -> CrossSection {
    let half_w = width / 2.0;
    let half_d = depth / 2.0;

    // Canonical front-right arc, 0 → π/2, moved onto its corner; the other
    // three corners are its mirror images
    let corner = |radius: f64| {
        CrossSection::new(arc_points(Point2::origin(), radius, 0.0, FRAC_PI_2, segments))
            .translate(Vector2::new(half_w - radius, half_d - radius))
    };

    let mut points = Vec::with_capacity(4 * (segments + 2));
    points.extend_from_slice(corner(radii.front_right).points());
    points.extend_from_slice(corner(radii.front_left).mirror_x().points());
    points.extend_from_slice(corner(radii.back_left).rotate(PI).points());
    points.extend_from_slice(corner(radii.back_right).mirror_y().points());

    CrossSection::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn segments_intersect(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>, d: Point2<f64>) -> bool {
        let orient = |p: Point2<f64>, q: Point2<f64>, r: Point2<f64>| {
            (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x)
        };
        let d1 = orient(c, d, a);
        let d2 = orient(c, d, b);
        let d3 = orient(a, b, c);
        let d4 = orient(a, b, d);
        d1 * d2 < -1e-12 && d3 * d4 < -1e-12
    }

    fn is_simple(section: &CrossSection) -> bool {
        let pts = section.points();
        let n = pts.len();
        for i in 0..n {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                if segments_intersect(pts[i], pts[(i + 1) % n], pts[j], pts[(j + 1) % n]) {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_arc_point_count_and_endpoints() {
        let pts = arc_points(Point2::new(1.0, 2.0), 3.0, 0.0, PI, 10);
        assert_eq!(pts.len(), 12);
        assert_relative_eq!(pts[0].x, 4.0, epsilon = 1e-12);
        assert_relative_eq!(pts[0].y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(pts[11].x, -2.0, epsilon = 1e-12);
        assert_relative_eq!(pts[11].y, 2.0, epsilon = 1e-9);
        for p in &pts {
            assert_relative_eq!((p - Point2::new(1.0, 2.0)).norm(), 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_arc_runs_clockwise_when_end_below_start() {
        let pts = arc_points(Point2::origin(), 1.0, FRAC_PI_2, 0.0, 0);
        assert_eq!(pts.len(), 2);
        assert_relative_eq!(pts[0].y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(pts[1].x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_radius_arc_repeats_center() {
        let pts = arc_points(Point2::new(5.0, -1.0), 0.0, 0.0, FRAC_PI_2, 4);
        assert_eq!(pts.len(), 6);
        assert!(pts.iter().all(|p| *p == Point2::new(5.0, -1.0)));
    }

    #[test]
    fn test_rounded_rectangle_point_count_and_winding() {
        let radii = CornerRadii::new(1.0, 6.0, 0.0, 3.5);
        let section = rounded_rectangle_corners(80.0, 60.0, &radii, CORNER_SEGMENTS);
        assert_eq!(section.len(), 4 * (CORNER_SEGMENTS + 2));
        assert!(section.is_ccw());
        assert!(is_simple(&section));

        let (min, max) = section.bounds();
        assert_relative_eq!(min.x, -40.0, epsilon = 1e-9);
        assert_relative_eq!(max.x, 40.0, epsilon = 1e-9);
        assert_relative_eq!(min.y, -30.0, epsilon = 1e-9);
        assert_relative_eq!(max.y, 30.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rounded_rectangle_at_max_radius_is_simple() {
        let section = rounded_rectangle(80.0, 60.0, 30.0, CORNER_SEGMENTS);
        assert!(section.is_ccw());
        assert!(is_simple(&section));
    }

    #[test]
    fn test_uniform_corners_match_single_radius() {
        let single = rounded_rectangle(50.0, 40.0, 6.0, 8);
        let corners = rounded_rectangle_corners(50.0, 40.0, &CornerRadii::new(6.0, 6.0, 6.0, 6.0), 8);
        assert_eq!(single.len(), corners.len());
        for (a, b) in single.points().iter().zip(corners.points()) {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sharp_rectangle_area() {
        let section = rounded_rectangle(10.0, 4.0, 0.0, 3);
        assert_relative_eq!(section.signed_area(), 40.0, epsilon = 1e-9);
        assert_eq!(section.deduplicated(1e-9).len(), 4);
    }

    #[test]
    fn test_rounded_rectangle_area() {
        let r = 2.0;
        let section = rounded_rectangle(20.0, 10.0, r, 64);
        let expected = 200.0 - (4.0 - PI) * r * r;
        assert_relative_eq!(section.signed_area(), expected, epsilon = 0.05);
    }

    #[test]
    fn test_mirror_keeps_winding() {
        let section = CrossSection::new(vec![
            Point2::new(1.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(3.0, 1.0),
        ]);
        assert!(section.is_ccw());
        let mirrored = section.mirror_x();
        assert!(mirrored.is_ccw());
        assert_eq!(mirrored.points()[0], Point2::new(-3.0, 1.0));
        assert!(section.mirror_y().is_ccw());
        assert!(section.rotate(1.0).is_ccw());
        assert_relative_eq!(
            section.translate(Vector2::new(-2.0, 5.0)).signed_area(),
            section.signed_area(),
            epsilon = 1e-12
        );
    }
}
