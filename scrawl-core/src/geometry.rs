//! Canvas geometry: normalized board coordinates and pixel coordinates.
//!
//! Every position that leaves the input layer or crosses the wire is
//! normalized to `[0, 1]` relative to the canvas dimensions at the time it
//! was captured. Pixel coordinates only exist at the surface boundary, so a
//! resize never invalidates stored state.
//!
//! ```text
//!  PixelPoint ──normalize()──▶ NormPoint ──to_pixels()──▶ PixelPoint
//!  (canvas px)                 ([0,1]²)                   (current size)
//! ```

use serde::{Deserialize, Serialize};

/// Position on the board in normalized coordinates, `x, y ∈ [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormPoint {
    pub x: f64,
    pub y: f64,
}

impl NormPoint {
    pub const ORIGIN: NormPoint = NormPoint { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a point with both components clamped into `[0, 1]`.
    pub fn clamped(x: f64, y: f64) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }
}

impl Default for NormPoint {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// Position on the canvas in CSS pixels, relative to its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Shift by a pixel offset. Used to place name tags next to markers.
    pub fn offset(&self, dx: f64, dy: f64) -> PixelPoint {
        PixelPoint {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Current pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Scale a normalized point to pixels: `px = n × dimension`.
    pub fn to_pixels(&self, p: NormPoint) -> PixelPoint {
        PixelPoint {
            x: p.x * self.width,
            y: p.y * self.height,
        }
    }

    /// Inverse of [`to_pixels`](Self::to_pixels), clamped into `[0, 1]`.
    ///
    /// A zero-sized axis maps to 0 instead of NaN.
    pub fn normalize(&self, p: PixelPoint) -> NormPoint {
        NormPoint {
            x: ratio(p.x, self.width),
            y: ratio(p.y, self.height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

fn ratio(value: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    clamp_unit(value / extent)
}

/// Clamp into `[0, 1]`; NaN collapses to 0.
pub(crate) fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
