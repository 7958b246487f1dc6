//! LogMosaic - wide-field logarithmic map mosaics
//!
//! This library fetches square map fragments at successive zoom levels from a
//! static-map service and warps them into one continuous log-polar view, so a
//! single image shows a whole hemisphere at its top and street-level detail at
//! its bottom.
//!
//! The pipeline is built from small, independently usable pieces:
//!
//! - [`transform`] - composable coordinate maps with first-class partiality
//! - [`projection`] - log-polar, inverse log-polar and mercator-to-orthographic maps
//! - [`mesh`] - adaptive subdivision of a transform into bilinear patches
//! - [`warp`] - executing a mesh against a raster
//! - [`feather`] - edge-fading alpha masks for seamless band overlap
//! - [`provider`] - fetching fragments from the static-map service
//! - [`cache`] - transparent on-disk fragment caching
//! - [`compositor`] - the zoom-band loop gluing everything into one mosaic

pub mod cache;
pub mod compositor;
pub mod coord;
pub mod feather;
pub mod logging;
pub mod mesh;
pub mod projection;
pub mod provider;
pub mod transform;
pub mod warp;

pub use compositor::{MosaicCompositor, MosaicError, MosaicRequest, ProjectionMode, ZoomRange};
pub use provider::{FragmentRequest, MapScale, MapStyle, TileSource};

/// Crate version, for CLI `--version` output.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
