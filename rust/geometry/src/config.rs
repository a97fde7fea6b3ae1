// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generator tuning knobs

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::clip::CLIP_ARC_SEGMENTS;
use crate::profile::CORNER_SEGMENTS;

/// Tessellation and boolean settings captured by a [`crate::BoxGenerator`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct GeneratorConfig {
    /// Segments per box corner and cutout arc
    pub corner_segments: usize,
    /// Segments of the clip tip curve
    pub clip_arc_segments: usize,
    /// Longest edge allowed on the cutout before it is bent onto the perimeter
    pub warp_max_edge: f64,
    /// How far cutters poke past the faces they cut
    pub boolean_overshoot: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            corner_segments: CORNER_SEGMENTS,
            clip_arc_segments: CLIP_ARC_SEGMENTS,
            warp_max_edge: 1.5,
            boolean_overshoot: 1.0,
        }
    }
}

impl GeneratorConfig {
    /// Coarser settings for previews
    pub fn draft() -> Self {
        Self {
            corner_segments: 4,
            clip_arc_segments: 8,
            warp_max_edge: 4.0,
            boolean_overshoot: 1.0,
        }
    }
}
