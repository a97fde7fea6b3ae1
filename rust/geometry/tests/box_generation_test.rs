// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use clipbox_geometry::limits::max_cutout_radius;
use clipbox_geometry::{
    clamp_request, clip_grid, BoxGenerator, BoxParameters, BoxRequest, ContourWarp, CornerRadii,
    CsgKernel, CutoutContour, GeneratorConfig, Kernel, Mesh, OpenFront, Point3, Side, Vector3,
};

fn reference_params() -> BoxParameters {
    BoxParameters::new(52.0, 80.0, 60.0, 2.0, 3.0)
}

fn small_params() -> BoxParameters {
    BoxParameters::new(30.0, 50.0, 40.0, 2.0, 3.0)
}

fn draft_generator() -> BoxGenerator<CsgKernel> {
    BoxGenerator::new(CsgKernel::new(), GeneratorConfig::draft())
}

/// Whether some triangle lying in the plane `y = face_y` covers `(x, z)`
fn face_covers(mesh: &Mesh, face_y: f64, x: f64, z: f64) -> bool {
    mesh.triangles().any(|[a, b, c]| {
        if [a, b, c].iter().any(|p| (p.y - face_y).abs() > 1e-3) {
            return false;
        }
        let cross = |p: &clipbox_geometry::Point3<f64>, q: &clipbox_geometry::Point3<f64>| {
            (q.x - p.x) * (z - p.z) - (q.z - p.z) * (x - p.x)
        };
        let (d1, d2, d3) = (cross(&a, &b), cross(&b, &c), cross(&c, &a));
        let has_neg = d1 < -1e-9 || d2 < -1e-9 || d3 < -1e-9;
        let has_pos = d1 > 1e-9 || d2 > 1e-9 || d3 > 1e-9;
        !(has_neg && has_pos)
    })
}

fn analyze_mesh(mesh: &Mesh, name: &str) {
    let (min, max) = mesh.bounds();
    println!("\n=== {} Mesh Analysis ===", name);
    println!("  Triangles: {}", mesh.triangle_count());
    println!("  Vertices: {}", mesh.vertex_count());
    println!(
        "  Bounds: min=({:.2}, {:.2}, {:.2}), max=({:.2}, {:.2}, {:.2})",
        min.x, min.y, min.z, max.x, max.y, max.z
    );
    println!("  Volume: {:.2}", mesh.signed_volume());

    assert_eq!(mesh.positions.len(), mesh.normals.len());
    assert_eq!(mesh.indices.len() % 3, 0);
    assert!(mesh
        .indices
        .iter()
        .all(|&i| (i as usize) < mesh.vertex_count()));
}

#[test]
fn test_reference_box_is_closed_front_with_clips() {
    let generator = BoxGenerator::default();
    let params = reference_params();
    let radii = CornerRadii::uniform(6.0);
    let request = BoxRequest::new(params, radii);

    let placements = clip_grid(&params, &radii, false);
    assert!(!placements.is_empty(), "expected at least one clip pair");

    let solid = generator.generate(&request).expect("generation failed");
    let mesh = generator.kernel().to_mesh(&solid).expect("empty mesh");
    analyze_mesh(&mesh, "Reference box");

    // Clips stick out behind the back face
    let (min, max) = mesh.bounds();
    assert!((min.y as f64) < -30.0 - 4.0);
    assert!(((max.y as f64) - 30.0).abs() < 1e-3);
    assert!(((max.z as f64) - 52.0).abs() < 1e-3);

    // Solid front wall
    assert!(face_covers(&mesh, 30.0, 0.0, 26.0));
    assert!(face_covers(&mesh, 30.0, 10.0, 45.0));

    // Clips add material to the hollow shell
    let hollow = generator.kernel().difference(
        &generator.shell(&params, &radii).unwrap(),
        &generator.cavity(&params, &radii).unwrap(),
    );
    assert!(solid.volume() > hollow.volume());
}

#[test]
fn test_open_front_removes_front_material() {
    let generator = draft_generator();
    let params = small_params();
    let radii = CornerRadii::uniform(6.0);
    let closed = BoxRequest::new(params, radii);
    let open = closed.with_open_front(OpenFront::new(0.15, 4.0, 3.0));

    let closed_solid = generator.generate(&closed).unwrap();
    let open_solid = generator.generate(&open).unwrap();
    assert!(open_solid.volume() < closed_solid.volume());

    let mesh = generator.kernel().to_mesh(&open_solid).unwrap();
    analyze_mesh(&mesh, "Open front box");
    // Centre of the front is cut away, the band under the opening stays
    assert!(!face_covers(&mesh, 20.0, 0.0, 20.0));
    assert!(face_covers(&mesh, 20.0, 0.0, 3.0));
}

#[test]
fn test_openness_sweep_is_monotone_and_triggers_warp() {
    let params = reference_params();
    let radii = CornerRadii::uniform(6.0);
    let config = GeneratorConfig::default();
    let warp = ContourWarp::new(&params, &radii);
    let flat_bound = params.width / 2.0 - radii.front_right;

    let mut previous = 0.0;
    let mut warped = false;
    for step in 0..=19 {
        let openness = 0.05 + 0.05 * step as f64;
        let request = BoxRequest::new(params, radii)
            .with_open_front(OpenFront::new(openness, 5.0, 4.0));
        let request = clamp_request(&request);
        let open_front = request.open_front.unwrap();
        let contour = CutoutContour::new(&params, &request.radii, &open_front, &config);

        let extent = contour.right.half_extent;
        assert!(extent >= previous, "extent shrank at openness {openness}");
        previous = extent;

        if extent > flat_bound {
            assert!(warp.needs_warp(&contour), "no warp at openness {openness}");
            warped = true;
        }
    }
    assert!(warped);
}

#[test]
fn test_oversized_cutout_radius_is_clamped() {
    let generator = draft_generator();
    let params = small_params();
    let radii = CornerRadii::uniform(6.0);
    let request = BoxRequest::new(params, radii).with_open_front(OpenFront::new(0.2, 2.0, 1000.0));

    let clamped = clamp_request(&request);
    let open_front = clamped.open_front.unwrap();
    let bound = max_cutout_radius(&params, &clamped.radii, &open_front);
    assert!(open_front.cutout_radius <= bound + 1e-12);

    let contour = CutoutContour::new(&params, &clamped.radii, &open_front, generator.config());
    for side in Side::BOTH {
        assert!(contour.side(side).radius <= bound + 1e-12);
    }

    let solid = generator.generate(&request).expect("clamped request must generate");
    assert!(solid.volume() > 0.0);
}

#[test]
fn test_wide_opening_wraps_around_corners() {
    let generator = draft_generator();
    let params = small_params();
    let radii = CornerRadii::new(6.0, 8.0, 4.0, 4.0);
    let request = BoxRequest::new(params, radii).with_open_front(OpenFront::new(0.5, 2.0, 2.0));

    let solid = generator.generate(&request).unwrap();
    let mesh = generator.kernel().to_mesh(&solid).unwrap();
    analyze_mesh(&mesh, "Wrapped opening");

    // Side walls are cut just behind the front corners, but not further back
    assert!(!face_covers_side(&mesh, 25.0, 20.0 - 8.0 - 0.5, 20.0));
    assert!(!face_covers_side(&mesh, -25.0, 20.0 - 6.0 - 1.0, 20.0));
    assert!(face_covers_side(&mesh, 25.0, 0.0, 20.0));
    assert!(mesh.signed_volume() > 0.0);
}

/// Whether some triangle in the plane `x = face_x` covers `(y, z)`
fn face_covers_side(mesh: &Mesh, face_x: f64, y: f64, z: f64) -> bool {
    mesh.triangles().any(|[a, b, c]| {
        if [a, b, c].iter().any(|p| (p.x - face_x).abs() > 1e-3) {
            return false;
        }
        let cross = |p: &clipbox_geometry::Point3<f64>, q: &clipbox_geometry::Point3<f64>| {
            (q.y - p.y) * (z - p.z) - (q.z - p.z) * (y - p.y)
        };
        let (d1, d2, d3) = (cross(&a, &b), cross(&b, &c), cross(&c, &a));
        let has_neg = d1 < -1e-9 || d2 < -1e-9 || d3 < -1e-9;
        let has_pos = d1 > 1e-9 || d2 > 1e-9 || d3 > 1e-9;
        !(has_neg && has_pos)
    })
}

#[test]
fn test_corner_clips_only_places_four_pairs() {
    let params = BoxParameters::new(80.0, 120.0, 60.0, 2.0, 3.0);
    let radii = CornerRadii::uniform(4.0);

    let full = clip_grid(&params, &radii, false);
    let corners = clip_grid(&params, &radii, true);
    assert!(full.len() > 4);
    assert_eq!(corners.len(), 4);

    let generator = draft_generator();
    let request = BoxRequest::new(params, radii).with_corner_clips_only(true);
    let sparse = generator.generate(&request).unwrap();
    let dense = generator
        .generate(&request.with_corner_clips_only(false))
        .unwrap();
    assert!(sparse.volume() < dense.volume());
}

#[test]
fn test_out_of_range_radii_still_generate() {
    let generator = draft_generator();
    let request = BoxRequest::new(small_params(), CornerRadii::new(-3.0, 500.0, 0.0, 2.0));
    let mesh = generator.generate_mesh(&request).unwrap();
    let (min, max) = mesh.bounds();
    assert!(((max.x - min.x) as f64 - 50.0).abs() < 1e-3);
    assert!(mesh.signed_volume() > 0.0);
}

/// Number of triangles the ray `origin + t·dir` (t > 0) passes through
fn ray_crossings(mesh: &Mesh, origin: Point3<f64>, dir: Vector3<f64>) -> usize {
    mesh.triangles()
        .filter(|[a, b, c]| {
            let (e1, e2) = (b - a, c - a);
            let h = dir.cross(&e2);
            let det = e1.dot(&h);
            if det.abs() < 1e-12 {
                return false;
            }
            let s = origin - a;
            let u = s.dot(&h) / det;
            if !(0.0..=1.0).contains(&u) {
                return false;
            }
            let q = s.cross(&e1);
            let v = dir.dot(&q) / det;
            if v < 0.0 || u + v > 1.0 {
                return false;
            }
            e2.dot(&q) / det > 1e-9
        })
        .count()
}

/// Inside test by crossing parity along three skew rays. All three must
/// agree on a closed mesh.
fn is_inside(mesh: &Mesh, p: Point3<f64>) -> bool {
    let votes: Vec<bool> = [
        Vector3::new(0.267, 0.534, 0.802),
        Vector3::new(-0.577, 0.211, 0.789),
        Vector3::new(0.305, -0.838, 0.452),
    ]
    .iter()
    .map(|dir| ray_crossings(mesh, p, *dir) % 2 == 1)
    .collect();
    assert!(
        votes.iter().all(|v| *v == votes[0]),
        "mesh is not closed around {:?}: {:?}",
        p,
        votes
    );
    votes[0]
}

#[test]
fn test_opening_cuts_through_small_corner_radii() {
    // Edges short enough that every corner arc receives vertices
    let config = GeneratorConfig {
        warp_max_edge: 1.0,
        ..GeneratorConfig::draft()
    };
    let generator = BoxGenerator::new(CsgKernel::new(), config);
    let params = small_params();

    for radius in [1.0, 2.0] {
        let radii = CornerRadii::uniform(radius);
        let request =
            BoxRequest::new(params, radii).with_open_front(OpenFront::new(0.5, 2.0, 2.0));
        let mesh = generator.generate_mesh(&request).unwrap();
        analyze_mesh(&mesh, &format!("Opening with {radius} mm corners"));

        let clamped = clamp_request(&request);
        let contour = CutoutContour::new(
            &params,
            &clamped.radii,
            &clamped.open_front.unwrap(),
            generator.config(),
        );
        let warp = ContourWarp::new(&params, &clamped.radii);
        let reach = 0.9 * contour.right.half_extent;
        assert!(reach > warp.side(Side::Right).front_arc_end);

        // Mid-wall points along the bent opening are all cut away
        let steps = 24;
        for i in 0..=steps {
            let u = -reach + 2.0 * reach * i as f64 / steps as f64;
            let p = warp.map(Point3::new(u, params.depth / 2.0 - params.wall / 2.0, 20.0));
            assert!(
                !is_inside(&mesh, p),
                "wall left standing at u = {u:.2} with {radius} mm corners"
            );
        }

        // Walls away from the opening are untouched
        assert!(is_inside(&mesh, Point3::new(0.0, -19.0, 15.0)));
        assert!(is_inside(&mesh, Point3::new(24.0, -5.0, 20.0)));
        assert!(is_inside(&mesh, Point3::new(0.0, 19.0, 3.5)));
    }
}
