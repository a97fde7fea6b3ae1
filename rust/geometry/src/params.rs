// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Box parameter snapshot
//!
//! One [`BoxRequest`] fully describes one regeneration. All lengths are in
//! millimetres.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outer dimensions and wall thicknesses of the box
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BoxParameters {
    /// Total height (z)
    pub height: f64,
    /// Outer width (x)
    pub width: f64,
    /// Outer depth (y)
    pub depth: f64,
    /// Side wall thickness
    pub wall: f64,
    /// Floor thickness
    pub bottom: f64,
}

impl BoxParameters {
    pub fn new(height: f64, width: f64, depth: f64, wall: f64, bottom: f64) -> Self {
        Self {
            height,
            width,
            depth,
            wall,
            bottom,
        }
    }
}

/// Left or right half of the box, seen from the front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Both sides, left first
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Sign of the x axis on this side
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    /// Side a contour or x coordinate falls on (zero counts as right)
    #[inline]
    pub fn of(x: f64) -> Self {
        if x < 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }
}

/// Independent radii of the four vertical box edges
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CornerRadii {
    pub front_left: f64,
    pub front_right: f64,
    pub back_left: f64,
    pub back_right: f64,
}

impl CornerRadii {
    #[inline]
    pub const fn new(front_left: f64, front_right: f64, back_left: f64, back_right: f64) -> Self {
        Self {
            front_left,
            front_right,
            back_left,
            back_right,
        }
    }

    /// Same radius on all four corners.
    #[inline]
    pub const fn uniform(radius: f64) -> Self {
        Self::new(radius, radius, radius, radius)
    }

    /// Front corner radius of one side
    #[inline]
    pub fn front(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.front_left,
            Side::Right => self.front_right,
        }
    }

    /// Back corner radius of one side
    #[inline]
    pub fn back(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.back_left,
            Side::Right => self.back_right,
        }
    }

    /// Apply `f` to every radius
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(
            f(self.front_left),
            f(self.front_right),
            f(self.back_left),
            f(self.back_right),
        )
    }

    /// Radii shrunk by `amount`, floored at zero (used for the inner cavity)
    pub fn inset(&self, amount: f64) -> Self {
        self.map(|r| (r - amount).max(0.0))
    }
}

/// Front finger-access opening
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OpenFront {
    /// Fraction (0, 1] of the available perimeter half-length the opening spans
    pub openness: f64,
    /// Gap between the floor and the bottom of the opening
    pub bottom_offset: f64,
    /// Rounding of the opening's corners
    pub cutout_radius: f64,
}

impl OpenFront {
    pub fn new(openness: f64, bottom_offset: f64, cutout_radius: f64) -> Self {
        Self {
            openness,
            bottom_offset,
            cutout_radius,
        }
    }
}

/// Full parameter snapshot for one regeneration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BoxRequest {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub params: BoxParameters,
    pub radii: CornerRadii,
    #[cfg_attr(feature = "serde", serde(default))]
    pub open_front: Option<OpenFront>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub corner_clips_only: bool,
}

impl BoxRequest {
    /// Closed-front box with clips on the full grid
    pub fn new(params: BoxParameters, radii: CornerRadii) -> Self {
        Self {
            params,
            radii,
            open_front: None,
            corner_clips_only: false,
        }
    }

    pub fn with_open_front(mut self, open_front: OpenFront) -> Self {
        self.open_front = Some(open_front);
        self
    }

    pub fn with_corner_clips_only(mut self, corner_clips_only: bool) -> Self {
        self.corner_clips_only = corner_clips_only;
        self
    }
}
