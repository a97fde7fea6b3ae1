// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CSG kernel backed by csgrs
//!
//! Booleans run on csgrs BSP trees. Refinement, warping and transforms work
//! directly on the polygon soup so the generator never touches csgrs types.

use crate::error::{Error, Result};
use crate::extrusion::extrude_section;
use crate::kernel::{Kernel, Plane};
use crate::mesh::Mesh;
use crate::profile::CrossSection;
use crate::triangulation::{polygon_normal, project_to_2d, triangulate_ccw};
use csgrs::mesh::{polygon::Polygon, vertex::Vertex, Mesh as CSGMesh};
use csgrs::traits::CSG;
use nalgebra::{Matrix4, Point3, Rotation3, Translation3, Vector3};
use rayon::prelude::*;
use std::f64::consts::PI;

/// Refinement stops after this many halving passes even if edges remain long
const MAX_REFINE_PASSES: usize = 24;

/// Closed polygon soup owned by [`CsgKernel`]
#[derive(Clone)]
pub struct CsgSolid {
    mesh: CSGMesh<()>,
}

impl CsgSolid {
    fn from_polygons(polygons: Vec<Polygon<()>>) -> Self {
        Self {
            mesh: CSGMesh::from_polygons(&polygons, None),
        }
    }

    /// Solid with no faces
    pub fn empty() -> Self {
        Self::from_polygons(Vec::new())
    }

    #[inline]
    pub fn polygon_count(&self) -> usize {
        self.mesh.polygons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mesh.polygons.is_empty()
    }

    /// Axis-aligned bounds as (min, max), `None` when empty
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let mut vertices = self.mesh.polygons.iter().flat_map(|p| p.vertices.iter());
        let first = vertices.next()?.pos;
        let (mut min, mut max) = (first, first);
        for v in vertices {
            min = min.inf(&v.pos);
            max = max.sup(&v.pos);
        }
        Some((min, max))
    }

    /// Enclosed volume via signed tetrahedra; positive for outward winding
    pub fn volume(&self) -> f64 {
        self.mesh
            .polygons
            .par_iter()
            .map(|polygon| {
                let pts = &polygon.vertices;
                (1..pts.len().saturating_sub(1))
                    .map(|i| {
                        pts[0]
                            .pos
                            .coords
                            .cross(&pts[i].pos.coords)
                            .dot(&pts[i + 1].pos.coords)
                    })
                    .sum::<f64>()
            })
            .sum::<f64>()
            / 6.0
    }

    /// Polygon outlines as point lists, mostly for inspection in tests
    pub fn faces(&self) -> Vec<Vec<Point3<f64>>> {
        self.mesh
            .polygons
            .iter()
            .map(|p| p.vertices.iter().map(|v| v.pos).collect())
            .collect()
    }

    /// Every face as triangles; polygons with more than three vertices are fanned
    /// from their centroid so boundary vertices shared with neighbours are kept.
    fn triangles(&self) -> Vec<[Point3<f64>; 3]> {
        self.mesh
            .polygons
            .par_iter()
            .flat_map_iter(|polygon| {
                let pts: Vec<Point3<f64>> = polygon.vertices.iter().map(|v| v.pos).collect();
                fan_from_centroid(pts)
            })
            .collect()
    }
}

fn fan_from_centroid(pts: Vec<Point3<f64>>) -> Vec<[Point3<f64>; 3]> {
    match pts.len() {
        0..=2 => Vec::new(),
        3 => vec![[pts[0], pts[1], pts[2]]],
        n => {
            let centroid = Point3::from(
                pts.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords) / n as f64,
            );
            (0..n).map(|i| [centroid, pts[i], pts[(i + 1) % n]]).collect()
        }
    }
}

/// Build a csgrs polygon with a flat face normal, skipping degenerate faces
fn polygon_from_points(points: Vec<Point3<f64>>) -> Option<Polygon<()>> {
    if points.len() < 3 {
        return None;
    }
    let normal = polygon_normal(&points)?;
    let vertices = points.into_iter().map(|p| Vertex::new(p, normal)).collect();
    Some(Polygon::new(vertices, None))
}

/// Convert csgrs Mesh format back to our Mesh format
fn csgrs_to_mesh(csg_mesh: &CSGMesh<()>) -> Mesh {
    let mut mesh = Mesh::new();

    for polygon in &csg_mesh.polygons {
        let vertices = &polygon.vertices;
        if vertices.len() < 3 {
            continue;
        }

        let points_3d: Vec<Point3<f64>> = vertices.iter().map(|v| v.pos).collect();
        let normal = match polygon_normal(&points_3d) {
            Some(n) => n,
            None => continue,
        };

        // FAST PATH: Triangle - no triangulation needed
        if points_3d.len() == 3 {
            let base_idx = mesh.vertex_count() as u32;
            for p in &points_3d {
                mesh.add_vertex(*p, normal);
            }
            mesh.add_triangle(base_idx, base_idx + 1, base_idx + 2);
            continue;
        }

        // Projection keeps the outline counter-clockwise about the face normal
        let points_2d = project_to_2d(&points_3d, &normal);
        let triangles = match triangulate_ccw(&points_2d) {
            Ok(tris) => tris,
            Err(_) => continue,
        };

        let base_idx = mesh.vertex_count() as u32;
        for p in &points_3d {
            mesh.add_vertex(*p, normal);
        }
        for [a, b, c] in triangles {
            mesh.add_triangle(base_idx + a as u32, base_idx + b as u32, base_idx + c as u32);
        }
    }

    mesh
}

/// Create a box solid from AABB min/max bounds
fn aabb_to_solid(min: Point3<f64>, max: Point3<f64>) -> CsgSolid {
    let v0 = Point3::new(min.x, min.y, min.z);
    let v1 = Point3::new(max.x, min.y, min.z);
    let v2 = Point3::new(max.x, max.y, min.z);
    let v3 = Point3::new(min.x, max.y, min.z);
    let v4 = Point3::new(min.x, min.y, max.z);
    let v5 = Point3::new(max.x, min.y, max.z);
    let v6 = Point3::new(max.x, max.y, max.z);
    let v7 = Point3::new(min.x, max.y, max.z);

    // Counter-clockwise seen from outside
    let faces = [
        vec![v0, v3, v2, v1], // -Z
        vec![v4, v5, v6, v7], // +Z
        vec![v0, v4, v7, v3], // -X
        vec![v1, v2, v6, v5], // +X
        vec![v0, v1, v5, v4], // -Y
        vec![v3, v7, v6, v2], // +Y
    ];

    CsgSolid::from_polygons(faces.into_iter().filter_map(polygon_from_points).collect())
}

/// Split every edge longer than `limit` (squared) at its midpoint.
///
/// The decision and the midpoint depend only on the two edge endpoints, so
/// neighbouring triangles split a shared edge identically and the surface
/// stays watertight.
fn split_long_edges(tri: &[Point3<f64>; 3], limit: f64) -> Vec<[Point3<f64>; 3]> {
    let long = |i: usize| (tri[(i + 1) % 3] - tri[i]).norm_squared() > limit;
    let mid = |i: usize| Point3::from((tri[i].coords + tri[(i + 1) % 3].coords) * 0.5);
    let marked = [long(0), long(1), long(2)];

    match marked.iter().filter(|m| **m).count() {
        0 => vec![*tri],
        1 => {
            let i = marked.iter().position(|m| *m).unwrap_or(0);
            let (a, b, c) = (tri[i], tri[(i + 1) % 3], tri[(i + 2) % 3]);
            let m = mid(i);
            vec![[a, m, c], [m, b, c]]
        }
        2 => {
            // Rotate so the unmarked edge is c → a
            let j = marked.iter().position(|m| !*m).unwrap_or(0);
            let (c, a, b) = (tri[j], tri[(j + 1) % 3], tri[(j + 2) % 3]);
            let m_ab = mid((j + 1) % 3);
            let m_bc = mid((j + 2) % 3);
            vec![[m_ab, b, m_bc], [a, m_ab, m_bc], [a, m_bc, c]]
        }
        _ => {
            let (a, b, c) = (tri[0], tri[1], tri[2]);
            let (m_ab, m_bc, m_ca) = (mid(0), mid(1), mid(2));
            vec![[a, m_ab, m_ca], [m_ab, b, m_bc], [m_ca, m_bc, c], [m_ab, m_bc, m_ca]]
        }
    }
}

/// [`Kernel`] implementation over csgrs
#[derive(Debug, Clone, Copy, Default)]
pub struct CsgKernel;

impl CsgKernel {
    pub fn new() -> Self {
        Self
    }

    /// Triangulate a solid for rendering or export
    pub fn to_mesh(&self, solid: &CsgSolid) -> Result<Mesh> {
        let mesh = csgrs_to_mesh(&solid.mesh);
        if mesh.is_empty() {
            return Err(Error::EmptyMesh(
                "Solid has no renderable faces".to_string(),
            ));
        }
        Ok(mesh)
    }
}

impl Kernel for CsgKernel {
    type Solid = CsgSolid;

    fn extrude(&self, section: &CrossSection, height: f64) -> Result<CsgSolid> {
        let faces = extrude_section(section, height)?;
        Ok(CsgSolid::from_polygons(
            faces.into_iter().filter_map(polygon_from_points).collect(),
        ))
    }

    fn transform(&self, solid: &CsgSolid, matrix: &Matrix4<f64>) -> CsgSolid {
        let flip = matrix.fixed_view::<3, 3>(0, 0).into_owned().determinant() < 0.0;
        let polygons: Vec<Polygon<()>> = solid
            .mesh
            .polygons
            .par_iter()
            .filter_map(|polygon| {
                let mut points: Vec<Point3<f64>> = polygon
                    .vertices
                    .iter()
                    .map(|v| matrix.transform_point(&v.pos))
                    .collect();
                if flip {
                    points.reverse();
                }
                polygon_from_points(points)
            })
            .collect();
        CsgSolid::from_polygons(polygons)
    }

    fn union(&self, a: &CsgSolid, b: &CsgSolid) -> CsgSolid {
        if a.is_empty() {
            return b.clone();
        }
        if b.is_empty() {
            return a.clone();
        }
        CsgSolid {
            mesh: a.mesh.union(&b.mesh),
        }
    }

    fn difference(&self, a: &CsgSolid, b: &CsgSolid) -> CsgSolid {
        if a.is_empty() || b.is_empty() {
            return a.clone();
        }
        CsgSolid {
            mesh: a.mesh.difference(&b.mesh),
        }
    }

    fn refine(&self, solid: &CsgSolid, max_edge: f64) -> CsgSolid {
        let mut triangles = solid.triangles();
        if !(max_edge > 0.0) {
            return CsgSolid::from_polygons(
                triangles
                    .into_iter()
                    .filter_map(|t| polygon_from_points(t.to_vec()))
                    .collect(),
            );
        }

        let limit = max_edge * max_edge;
        for pass in 0..MAX_REFINE_PASSES {
            let before = triangles.len();
            triangles = triangles
                .par_iter()
                .flat_map_iter(|tri| split_long_edges(tri, limit))
                .collect();
            tracing::trace!(pass, before, after = triangles.len(), "refine pass");
            if triangles.len() == before {
                break;
            }
        }

        CsgSolid::from_polygons(
            triangles
                .into_par_iter()
                .filter_map(|t| polygon_from_points(t.to_vec()))
                .collect(),
        )
    }

    fn warp(
        &self,
        solid: &CsgSolid,
        f: &(dyn Fn(Point3<f64>) -> Point3<f64> + Sync),
    ) -> CsgSolid {
        let polygons: Vec<Polygon<()>> = solid
            .triangles()
            .into_par_iter()
            .filter_map(|[a, b, c]| polygon_from_points(vec![f(a), f(b), f(c)]))
            .collect();
        CsgSolid::from_polygons(polygons)
    }

    fn trim_by_plane(&self, solid: &CsgSolid, plane: &Plane) -> CsgSolid {
        let (min, max) = match solid.bounds() {
            Some(bounds) => bounds,
            None => return solid.clone(),
        };

        // Cutter fills the half-space behind the plane around the solid's footprint
        let center = Point3::from((min.coords + max.coords) * 0.5);
        let extent = (max - min).norm() + plane.signed_distance(&center).abs() + 1.0;
        let cutter = aabb_to_solid(
            Point3::new(-extent, -extent, -2.0 * extent),
            Point3::new(extent, extent, 0.0),
        );

        let rotation = Rotation3::rotation_between(&Vector3::z(), &plane.normal)
            .unwrap_or_else(|| Rotation3::from_axis_angle(&Vector3::x_axis(), PI));
        let anchor = center - plane.normal * plane.signed_distance(&center);
        let placement = Translation3::from(anchor.coords) * rotation;

        let cutter = self.transform(&cutter, &placement.to_homogeneous());
        self.difference(solid, &cutter)
    }

    fn face_count(&self, solid: &CsgSolid) -> usize {
        solid.polygon_count()
    }
}
