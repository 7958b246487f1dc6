//! Adaptive mesh generation
//!
//! Turns a [`CoordinateTransform`] into a finite set of bilinear patches
//! covering the output rectangle exactly once. Nonlinear maps are handled
//! by quad-tree subdivision: wherever the four corner mappings of a cell
//! spread too far apart (the angular wraparound seam of a log-polar map,
//! for instance) the cell splits until each piece is either locally smooth
//! or a single pixel. Cells straddling the transform's domain boundary
//! subdivide the same way, so holes appear only where the transform is
//! genuinely undefined.
//!
//! [`CoordinateTransform`]: crate::transform::CoordinateTransform

mod generator;
mod types;

pub use generator::MeshParams;
pub use types::{Mesh, Quad, QuadBox};
