//! Zoom-band compositing engine.
//!
//! Renders the final mosaic by stacking one warped band per zoom level
//! on a shared canvas. All geometry is derived from the output width:
//! the log-polar scale makes one zoom level (a doubling of map scale)
//! exactly `ln(2) / (2*pi) * width` output rows tall, which is what lets
//! square fragments of wildly different ground resolution line up into
//! one continuous image.

use std::f64::consts::PI;

use image::RgbaImage;
use thiserror::Error;
use tracing::{debug, info};

use super::blend::paste_masked;
use super::request::{ConfigError, MosaicRequest, ProjectionMode};
use crate::coord::longitude_span;
use crate::feather::{apply_alpha, feather_mask, Margins};
use crate::mesh::{Mesh, MeshParams};
use crate::projection::{LogPolar, LogPolarConfig, MercatorOrtho};
use crate::provider::{FetchError, FragmentRequest, TileSource};
use crate::transform::{Compose, CoordinateTransform};
use crate::warp::{BilinearWarper, WarpExecutor};

/// Errors from rendering a mosaic.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MosaicError {
    /// The request failed validation; nothing was fetched.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A band's fragment could not be fetched; the composite is
    /// abandoned, no partial result.
    #[error("Fragment fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Observer invoked once per completed band: zoom level, band index,
/// band count.
pub type ProgressFn = Box<dyn Fn(u8, usize, usize) + Send + Sync>;

/// Multi-zoom mosaic compositor over an injected [`TileSource`].
///
/// # Example
///
/// ```no_run
/// use logmosaic::{MosaicCompositor, MosaicRequest, ZoomRange};
/// use logmosaic::provider::{ReqwestClient, StaticMapsSource};
///
/// let source = StaticMapsSource::new(ReqwestClient::new()?);
/// let compositor = MosaicCompositor::new(source);
/// let request = MosaicRequest::new(59.93778, 30.494908, ZoomRange::new(0, 12)?);
/// let mosaic = compositor.render(&request)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct MosaicCompositor<S: TileSource> {
    source: S,
    warper: Box<dyn WarpExecutor>,
    progress: Option<ProgressFn>,
}

impl<S: TileSource> MosaicCompositor<S> {
    /// Creates a compositor with the default CPU warper.
    pub fn new(source: S) -> Self {
        Self {
            source,
            warper: Box::new(BilinearWarper::new()),
            progress: None,
        }
    }

    /// Replace the warp implementation.
    pub fn with_warper(mut self, warper: impl WarpExecutor + 'static) -> Self {
        self.warper = Box::new(warper);
        self
    }

    /// Register a progress observer, called once per completed band.
    pub fn with_progress(
        mut self,
        progress: impl Fn(u8, usize, usize) + Send + Sync + 'static,
    ) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Renders the mosaic described by `request`.
    ///
    /// Bands are processed in increasing zoom order; each one is fetched,
    /// feathered, warped into the shared log-polar frame and blended onto
    /// the canvas. Any fetch failure aborts the whole composite.
    pub fn render(&self, request: &MosaicRequest) -> Result<RgbaImage, MosaicError> {
        request.validate()?;

        let out_width = request.out_width();
        // Output rows covered by one doubling of map scale
        let zoom_level_offset = 0.5 * std::f64::consts::LN_2 / PI * out_width as f64;
        let band_count = request.zoom_range().count() as usize;
        let canvas_height = (zoom_level_offset * band_count as f64) as u32;
        let band_size = (out_width, (3.0 * zoom_level_offset) as u32);

        info!(
            latitude = request.latitude(),
            longitude = request.longitude(),
            zoom_start = request.zoom_range().start(),
            zoom_end = request.zoom_range().end(),
            width = out_width,
            height = canvas_height,
            projection = ?request.projection(),
            "rendering mosaic"
        );

        let mut canvas = RgbaImage::new(out_width, canvas_height);
        let params = MeshParams::new().with_step(request.mesh_step());
        let margins = Margins::bottom(request.bottom_margin());
        let mut dy_base: Option<f64> = None;

        for (index, zoom) in request.zoom_range().levels().enumerate() {
            let fragment_request = FragmentRequest::new(
                request.latitude(),
                request.longitude(),
                zoom,
                request.fragment_size(),
            )
            .with_style(request.style())
            .with_scale(request.scale());

            let mut fragment = self.source.fetch(&fragment_request)?;
            let mask = feather_mask(fragment.dimensions(), request.gradient(), margins);
            apply_alpha(&mut fragment, &mask);

            let (frag_w, frag_h) = fragment.dimensions();
            let span = longitude_span(frag_w, request.scale().factor(), zoom);

            let (transform, dy): (Box<dyn CoordinateTransform>, f64) = match request.projection() {
                ProjectionMode::Mercator => {
                    let logpolar = LogPolar::new(
                        LogPolarConfig::new((frag_w, frag_h)).with_out_width(out_width),
                    );
                    let dy = (zoom - request.zoom_range().start()) as f64 * zoom_level_offset;
                    (Box::new(logpolar), dy)
                }
                ProjectionMode::Orthographic => {
                    let ortho = MercatorOrtho::new(
                        (frag_w, frag_h),
                        request.latitude().to_radians(),
                        span,
                        frag_w,
                    );
                    // Physical pixel scale decides the vertical placement;
                    // the first band anchors the stack at zero
                    let level_offset = 0.5 / PI * ortho.pixel_size().ln() * out_width as f64;
                    let dy = *dy_base.get_or_insert(level_offset) - level_offset;

                    let logpolar = LogPolar::new(
                        LogPolarConfig::new(ortho.output_size()).with_out_width(out_width),
                    );
                    let chain = Compose::new(vec![Box::new(ortho), Box::new(logpolar)]);
                    (Box::new(chain), dy)
                }
            };

            let mesh = Mesh::build(transform.as_ref(), band_size, &params);
            let band = self.warper.warp(&fragment, &mesh, band_size);
            paste_masked(&mut canvas, &band, (0, dy.round() as i64));

            debug!(
                zoom,
                dy,
                quads = mesh.len(),
                span_degrees = span.to_degrees(),
                "band composited"
            );

            if let Some(progress) = &self.progress {
                progress(zoom, index, band_count);
            }
        }

        Ok(canvas)
    }
}
