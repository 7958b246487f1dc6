//! Warp execution
//!
//! A [`WarpExecutor`] resamples a source raster through a [`Mesh`]: each
//! quad's four-corner correspondence is interpolated across its
//! destination box and the source is sampled at the interpolated
//! positions. The mesh already guarantees full, non-overlapping coverage
//! and excludes fully-undefined regions, so an executor only deals in
//! defined quads.
//!
//! [`Mesh`]: crate::mesh::Mesh

mod bilinear;

pub use bilinear::BilinearWarper;

use image::RgbaImage;

use crate::mesh::Mesh;

/// Resamples a source raster through a correspondence mesh.
///
/// The returned raster always has `out_size` dimensions. Destination
/// pixels no quad covers (holes in the transform's domain) and source
/// samples falling outside the source raster both come out fully
/// transparent. Quad boxes extending past `out_size` are clipped.
pub trait WarpExecutor: Send + Sync {
    /// Warps `source` into a new raster of `out_size` dimensions.
    fn warp(&self, source: &RgbaImage, mesh: &Mesh, out_size: (u32, u32)) -> RgbaImage;
}
