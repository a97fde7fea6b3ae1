// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Box solid assembly
//!
//! Shell minus cavity, minus the optional front opening, plus the clip grid.
//! The request is clamped first, so any parameter combination with positive
//! dimensions yields a solid.

use crate::clip::{clip_grid, clip_pair, ClipPlacement};
use crate::config::GeneratorConfig;
use crate::contour::ContourWarp;
use crate::csg::CsgKernel;
use crate::cutout::CutoutContour;
use crate::error::Result;
use crate::kernel::Kernel;
use crate::limits::clamp_request;
use crate::mesh::Mesh;
use crate::params::{BoxParameters, BoxRequest, CornerRadii, OpenFront};
use crate::profile::rounded_rectangle_corners;
use nalgebra::Vector3;
use std::f64::consts::FRAC_PI_2;

/// Builds box solids with one kernel and one configuration
#[derive(Debug, Clone)]
pub struct BoxGenerator<K: Kernel> {
    kernel: K,
    config: GeneratorConfig,
}

impl<K: Kernel> BoxGenerator<K> {
    pub fn new(kernel: K, config: GeneratorConfig) -> Self {
        Self { kernel, config }
    }

    #[inline]
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    #[inline]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build the complete box for one parameter snapshot
    pub fn generate(&self, request: &BoxRequest) -> Result<K::Solid> {
        let request = clamp_request(request);
        let params = &request.params;
        let radii = &request.radii;

        tracing::debug!(
            height = params.height,
            width = params.width,
            depth = params.depth,
            wall = params.wall,
            bottom = params.bottom,
            open_front = request.open_front.is_some(),
            corner_clips_only = request.corner_clips_only,
            "generating box"
        );

        let shell = self.shell(params, radii)?;
        let cavity = self.cavity(params, radii)?;
        let mut solid = self.kernel.difference(&shell, &cavity);

        if let Some(open_front) = &request.open_front {
            let cutter = self.cutout(params, radii, open_front)?;
            solid = self.kernel.difference(&solid, &cutter);
        }

        let placements = clip_grid(params, radii, request.corner_clips_only);
        if let Some(clips) = self.clips(params, &placements)? {
            solid = self.kernel.union(&solid, &clips);
        }

        tracing::debug!(
            clip_pairs = placements.len(),
            faces = self.kernel.face_count(&solid),
            "box generated"
        );

        Ok(solid)
    }

    /// Outer rounded prism
    pub fn shell(&self, params: &BoxParameters, radii: &CornerRadii) -> Result<K::Solid> {
        let section = rounded_rectangle_corners(
            params.width,
            params.depth,
            radii,
            self.config.corner_segments,
        );
        self.kernel.extrude(&section, params.height)
    }

    /// Interior negative, open through the top
    pub fn cavity(&self, params: &BoxParameters, radii: &CornerRadii) -> Result<K::Solid> {
        let section = rounded_rectangle_corners(
            params.width - 2.0 * params.wall,
            params.depth - 2.0 * params.wall,
            &radii.inset(params.wall),
            self.config.corner_segments,
        );
        let height = params.height - params.bottom + self.config.boolean_overshoot;
        let cavity = self.kernel.extrude(&section, height)?;
        Ok(self
            .kernel
            .translate(&cavity, Vector3::new(0.0, 0.0, params.bottom)))
    }

    /// Opening cutter through the front wall, bent around the corners when
    /// it reaches past the straight front
    pub fn cutout(
        &self,
        params: &BoxParameters,
        radii: &CornerRadii,
        open_front: &OpenFront,
    ) -> Result<K::Solid> {
        let contour = CutoutContour::new(params, radii, open_front, &self.config);
        let section = contour.section(self.config.corner_segments);
        let overshoot = self.config.boolean_overshoot;

        // Section plane (u, z) onto the front face; the extrusion runs inward
        // from `overshoot` outside the face to `overshoot` past the wall
        let slab = self
            .kernel
            .extrude(&section, params.wall + 2.0 * overshoot)?;
        let cutter = self.kernel.rotate(&slab, &Vector3::x_axis(), FRAC_PI_2);
        let cutter = self
            .kernel
            .translate(&cutter, Vector3::new(0.0, params.depth / 2.0 + overshoot, 0.0));

        let warp = ContourWarp::new(params, radii);
        let needs_warp = warp.needs_warp(&contour);
        tracing::debug!(
            left_half_extent = contour.left.half_extent,
            right_half_extent = contour.right.half_extent,
            left_radius = contour.left.radius,
            right_radius = contour.right.radius,
            needs_warp,
            "front cutout"
        );

        if !needs_warp {
            return Ok(cutter);
        }

        let refined = self.kernel.refine(&cutter, self.config.warp_max_edge);
        tracing::trace!(faces = self.kernel.face_count(&refined), "cutout refined");
        Ok(self.kernel.warp(&refined, &|p| warp.map(p)))
    }

    /// All clip pairs united, placed on the back face. `None` when the grid is empty.
    pub fn clips(
        &self,
        params: &BoxParameters,
        placements: &[ClipPlacement],
    ) -> Result<Option<K::Solid>> {
        if placements.is_empty() {
            return Ok(None);
        }

        let segments = self.config.clip_arc_segments;
        let pair = |chamfered: bool| -> Result<K::Solid> {
            let (left, right) = clip_pair(&self.kernel, chamfered, segments)?;
            Ok(self.kernel.union(&left, &right))
        };
        let plain = pair(false)?;
        let chamfered = if placements.iter().any(|p| p.chamfered) {
            Some(pair(true)?)
        } else {
            None
        };

        let mut clips: Option<K::Solid> = None;
        for placement in placements {
            let solid = match (&chamfered, placement.chamfered) {
                (Some(chamfered), true) => chamfered,
                _ => &plain,
            };
            let offset = Vector3::new(placement.x, -params.depth / 2.0, placement.z);
            let placed = self.kernel.translate(solid, offset);
            clips = Some(match clips {
                Some(acc) => self.kernel.union(&acc, &placed),
                None => placed,
            });
        }

        Ok(clips)
    }
}

impl BoxGenerator<CsgKernel> {
    /// Generate and triangulate in one step
    pub fn generate_mesh(&self, request: &BoxRequest) -> Result<Mesh> {
        let solid = self.generate(request)?;
        self.kernel.to_mesh(&solid)
    }
}

impl Default for BoxGenerator<CsgKernel> {
    fn default() -> Self {
        Self::new(CsgKernel::new(), GeneratorConfig::default())
    }
}
