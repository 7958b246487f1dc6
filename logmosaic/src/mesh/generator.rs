//! Quad-tree mesh generation over a transform's domain.

use rayon::prelude::*;
use tracing::debug;

use super::{Mesh, Quad, QuadBox};
use crate::transform::CoordinateTransform;

/// Tuning knobs for mesh generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshParams {
    step: u32,
    discontinuity_limit: f64,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            step: 8,
            discontinuity_limit: 100.0,
        }
    }
}

impl MeshParams {
    /// Creates parameters with the default step and discontinuity limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the top-level grid step in output pixels.
    pub fn with_step(mut self, step: u32) -> Self {
        self.step = step;
        self
    }

    /// Set the source-space corner spread (per axis, in source pixels)
    /// beyond which a cell is treated as discontinuous and subdivided.
    pub fn with_discontinuity_limit(mut self, limit: f64) -> Self {
        self.discontinuity_limit = limit;
        self
    }

    /// Top-level grid step in output pixels.
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Per-axis source-space spread treated as a discontinuity.
    pub fn discontinuity_limit(&self) -> f64 {
        self.discontinuity_limit
    }
}

impl Mesh {
    /// Builds a mesh approximating `transform` over an output rectangle.
    ///
    /// The rectangle is cut into a row-major grid of `params.step()` sized
    /// cells (edge cells clamped to the rectangle, so coverage is exact).
    /// Each cell subdivides independently:
    ///
    /// - four defined, mutually close corners emit one bilinear quad;
    /// - four defined corners spreading past the discontinuity limit
    ///   subdivide, bottoming out in a degenerate single-corner quad;
    /// - a mix of defined and undefined corners subdivides toward the
    ///   domain boundary, bottoming out in a degenerate quad anchored at
    ///   the first defined corner;
    /// - four undefined corners emit nothing.
    ///
    /// Cells are independent, so they are generated in parallel; the
    /// result is deterministic either way.
    pub fn build(
        transform: &dyn CoordinateTransform,
        out_size: (u32, u32),
        params: &MeshParams,
    ) -> Mesh {
        let (width, height) = out_size;
        let step = params.step.max(1);

        let mut cells = Vec::new();
        let mut y = 0;
        while y < height {
            let mut x = 0;
            while x < width {
                cells.push(QuadBox::new(
                    x,
                    y,
                    (x + step).min(width),
                    (y + step).min(height),
                ));
                x += step;
            }
            y += step;
        }

        let quads: Vec<Quad> = cells
            .par_iter()
            .flat_map_iter(|cell| subdivide_cell(transform, *cell, params))
            .collect();

        debug!(
            quads = quads.len(),
            cells = cells.len(),
            width,
            height,
            "mesh built"
        );
        Mesh::from_parts(quads, width, height)
    }
}

/// Subdivides one top-level cell with an explicit work stack.
///
/// The stack replaces recursion so a pathologically discontinuous
/// transform cannot exhaust the call stack; a cell halves at most
/// log2(step) times before reaching pixel size.
fn subdivide_cell(
    transform: &dyn CoordinateTransform,
    cell: QuadBox,
    params: &MeshParams,
) -> Vec<Quad> {
    let mut quads = Vec::new();
    let mut stack = vec![cell];

    while let Some(b) = stack.pop() {
        if b.is_empty() {
            continue;
        }

        // Corner probes in NW, SW, SE, NE order
        let corners = [
            transform.apply(b.x1 as f64, b.y1 as f64),
            transform.apply(b.x1 as f64, b.y2 as f64),
            transform.apply(b.x2 as f64, b.y2 as f64),
            transform.apply(b.x2 as f64, b.y1 as f64),
        ];

        if corners.iter().all(Option::is_none) {
            continue;
        }

        let minimal = b.width() <= 1 && b.height() <= 1;

        if let [Some(a), Some(sb), Some(c), Some(d)] = corners {
            let src = [a, sb, c, d];
            if continuous(&src, params.discontinuity_limit) {
                quads.push(Quad { dst: b, src });
                continue;
            }
            if minimal {
                // Too small to split further: paint with one corner
                quads.push(Quad { dst: b, src: [a; 4] });
                continue;
            }
        } else if minimal {
            // Domain boundary at pixel size: anchor on the first defined
            // corner rather than leaving a hole in the coverage
            let anchor = corners.iter().flatten().next().copied().unwrap();
            quads.push(Quad {
                dst: b,
                src: [anchor; 4],
            });
            continue;
        }

        let xm = b.x1 + b.width() / 2;
        let ym = b.y1 + b.height() / 2;
        // Pushed in reverse so children pop in NW, NE, SW, SE order
        stack.push(QuadBox::new(xm, ym, b.x2, b.y2));
        stack.push(QuadBox::new(b.x1, ym, xm, b.y2));
        stack.push(QuadBox::new(xm, b.y1, b.x2, ym));
        stack.push(QuadBox::new(b.x1, b.y1, xm, ym));
    }

    quads
}

/// True when the four source corners stay within the limit on both axes.
fn continuous(src: &[(f64, f64); 4], limit: f64) -> bool {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(x, y) in src {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    max_x - min_x < limit && max_y - min_y < limit
}
