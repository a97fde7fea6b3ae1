// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clipbox Geometry
//!
//! Parametric solids for wall-mountable storage boxes with snap-fit clips,
//! built from rounded-rectangle cross-sections, a front opening bent around
//! the corners, and csgrs booleans.
//!
//! ```no_run
//! use clipbox_geometry::{BoxGenerator, BoxParameters, BoxRequest, CornerRadii};
//!
//! let generator = BoxGenerator::default();
//! let request = BoxRequest::new(
//!     BoxParameters::new(52.0, 80.0, 60.0, 2.0, 3.0),
//!     CornerRadii::uniform(6.0),
//! );
//! let mesh = generator.generate_mesh(&request).unwrap();
//! println!("{} triangles", mesh.triangle_count());
//! ```

pub mod clip;
pub mod config;
pub mod contour;
pub mod csg;
pub mod cutout;
pub mod error;
pub mod extrusion;
pub mod generator;
pub mod kernel;
pub mod limits;
pub mod mesh;
pub mod params;
pub mod profile;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use clip::{clip_grid, clip_pair, clip_profile, ClipPlacement};
pub use config::GeneratorConfig;
pub use contour::{ContourRegion, ContourWarp, SideContour};
pub use csg::{CsgKernel, CsgSolid};
pub use cutout::{CutoutContour, CutoutSide};
pub use error::{Error, Result};
pub use extrusion::extrude_section;
pub use generator::BoxGenerator;
pub use kernel::{Kernel, Plane};
pub use limits::{clamp_open_front, clamp_radii, clamp_request, Limits};
pub use mesh::Mesh;
pub use params::{BoxParameters, BoxRequest, CornerRadii, OpenFront, Side};
pub use profile::{arc_points, rounded_rectangle, rounded_rectangle_corners, CrossSection};
pub use triangulation::triangulate_ccw;
