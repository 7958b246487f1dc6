//! Elementary total transforms: translation and axis-aligned scaling.

use super::CoordinateTransform;

/// Translation by a fixed offset. Total: always defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translate {
    dx: f64,
    dy: f64,
}

impl Translate {
    /// Creates a translation by `(dx, dy)`.
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

impl CoordinateTransform for Translate {
    fn apply(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        Some((x + self.dx, y + self.dy))
    }
}

/// Axis-aligned scaling about the origin. Total: always defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    kx: f64,
    ky: f64,
}

impl Scale {
    /// Creates a scaling with independent per-axis factors.
    pub fn new(kx: f64, ky: f64) -> Self {
        Self { kx, ky }
    }

    /// Creates a uniform scaling, same factor on both axes.
    pub fn uniform(k: f64) -> Self {
        Self { kx: k, ky: k }
    }
}

impl CoordinateTransform for Scale {
    fn apply(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        Some((x * self.kx, y * self.ky))
    }
}
