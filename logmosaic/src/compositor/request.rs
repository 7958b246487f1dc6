//! Mosaic request types and validation.

use thiserror::Error;

use crate::coord::{validate_coordinate, validate_zoom, CoordError};
use crate::provider::{MapScale, MapStyle};

/// Errors in a mosaic configuration, reported before any fetch happens.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Geographic center outside the supported coordinate or zoom range.
    #[error("Invalid coordinate: {0}")]
    Coord(#[from] CoordError),

    /// Zoom range start exceeds its end.
    #[error("Invalid zoom range: {start}:{end}")]
    InvalidZoomRange { start: u8, end: u8 },

    /// Output width of zero.
    #[error("Output width must be positive")]
    InvalidOutputWidth,

    /// Fragment dimension of zero.
    #[error("Fragment dimensions must be positive")]
    InvalidFragmentSize,

    /// Mesh step of zero.
    #[error("Mesh step must be positive")]
    InvalidMeshStep,
}

/// Inclusive range of zoom levels, one composited band per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomRange {
    start: u8,
    end: u8,
}

impl ZoomRange {
    /// Creates a validated range. The start may not exceed the end, and
    /// the end may not exceed the deepest supported zoom.
    pub fn new(start: u8, end: u8) -> Result<Self, ConfigError> {
        if start > end {
            return Err(ConfigError::InvalidZoomRange { start, end });
        }
        validate_zoom(end)?;
        Ok(Self { start, end })
    }

    /// First (coarsest) zoom level.
    pub fn start(&self) -> u8 {
        self.start
    }

    /// Last (deepest) zoom level.
    pub fn end(&self) -> u8 {
        self.end
    }

    /// Number of levels in the range, always at least one.
    pub fn count(&self) -> u32 {
        (self.end - self.start) as u32 + 1
    }

    /// Iterate the levels in increasing order.
    pub fn levels(&self) -> impl Iterator<Item = u8> {
        self.start..=self.end
    }
}

/// How fragments are projected before the log-polar step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    /// Undo the Mercator stretch first, so coarse zoom levels show the
    /// round globe instead of the smeared cylinder.
    #[default]
    Orthographic,
    /// Use fragments directly in their Web Mercator frame.
    Mercator,
}

/// Everything the compositor needs to render one mosaic.
///
/// Built with [`MosaicRequest::new`] plus builder-style setters; the
/// defaults give a reasonable medium-resolution mosaic.
///
/// # Example
///
/// ```
/// use logmosaic::{MosaicRequest, ProjectionMode, ZoomRange};
/// use logmosaic::provider::MapStyle;
///
/// let request = MosaicRequest::new(59.93778, 30.494908, ZoomRange::new(0, 19)?)
///     .with_style(MapStyle::Roadmap)
///     .with_out_width(2048);
/// assert_eq!(request.projection(), ProjectionMode::Orthographic);
/// # Ok::<(), logmosaic::compositor::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicRequest {
    latitude: f64,
    longitude: f64,
    zoom_range: ZoomRange,
    style: MapStyle,
    projection: ProjectionMode,
    fragment_size: (u32, u32),
    out_width: u32,
    mesh_step: u32,
    gradient: u32,
    bottom_margin: u32,
    scale: MapScale,
}

impl MosaicRequest {
    /// Creates a request centered on the given coordinate with default
    /// rendering parameters.
    pub fn new(latitude: f64, longitude: f64, zoom_range: ZoomRange) -> Self {
        Self {
            latitude,
            longitude,
            zoom_range,
            style: MapStyle::Satellite,
            projection: ProjectionMode::Orthographic,
            fragment_size: (512, 512),
            out_width: 1024,
            mesh_step: 8,
            gradient: 10,
            bottom_margin: 20,
            scale: MapScale::Two,
        }
    }

    /// Set the map style.
    pub fn with_style(mut self, style: MapStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the projection mode.
    pub fn with_projection(mut self, projection: ProjectionMode) -> Self {
        self.projection = projection;
        self
    }

    /// Set the per-level fragment size requested from the tile source.
    pub fn with_fragment_size(mut self, size: (u32, u32)) -> Self {
        self.fragment_size = size;
        self
    }

    /// Set the mosaic width in pixels. The height follows from the zoom
    /// range.
    pub fn with_out_width(mut self, width: u32) -> Self {
        self.out_width = width;
        self
    }

    /// Set the initial mesh cell size used when warping bands.
    pub fn with_mesh_step(mut self, step: u32) -> Self {
        self.mesh_step = step;
        self
    }

    /// Set the feather gradient width in fragment pixels.
    pub fn with_gradient(mut self, gradient: u32) -> Self {
        self.gradient = gradient;
        self
    }

    /// Set the hard-cropped margin at the bottom of every fragment, in
    /// fragment pixels. Crops the service watermark out of the blend.
    pub fn with_bottom_margin(mut self, margin: u32) -> Self {
        self.bottom_margin = margin;
        self
    }

    /// Set the pixel-density multiplier for fetched fragments.
    pub fn with_scale(mut self, scale: MapScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn zoom_range(&self) -> ZoomRange {
        self.zoom_range
    }

    pub fn style(&self) -> MapStyle {
        self.style
    }

    pub fn projection(&self) -> ProjectionMode {
        self.projection
    }

    pub fn fragment_size(&self) -> (u32, u32) {
        self.fragment_size
    }

    pub fn out_width(&self) -> u32 {
        self.out_width
    }

    pub fn mesh_step(&self) -> u32 {
        self.mesh_step
    }

    pub fn gradient(&self) -> u32 {
        self.gradient
    }

    pub fn bottom_margin(&self) -> u32 {
        self.bottom_margin
    }

    pub fn scale(&self) -> MapScale {
        self.scale
    }

    /// Checks everything the type system cannot. Runs before any fetch.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_coordinate(self.latitude, self.longitude)?;
        if self.out_width == 0 {
            return Err(ConfigError::InvalidOutputWidth);
        }
        if self.fragment_size.0 == 0 || self.fragment_size.1 == 0 {
            return Err(ConfigError::InvalidFragmentSize);
        }
        if self.mesh_step == 0 {
            return Err(ConfigError::InvalidMeshStep);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::MAX_ZOOM;

    #[test]
    fn test_zoom_range_valid() {
        let range = ZoomRange::new(0, 3).unwrap();
        assert_eq!(range.start(), 0);
        assert_eq!(range.end(), 3);
        assert_eq!(range.count(), 4);
        assert_eq!(range.levels().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_zoom_range_single_level() {
        let range = ZoomRange::new(5, 5).unwrap();
        assert_eq!(range.count(), 1);
        assert_eq!(range.levels().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn test_zoom_range_inverted_rejected() {
        assert_eq!(
            ZoomRange::new(3, 2),
            Err(ConfigError::InvalidZoomRange { start: 3, end: 2 })
        );
    }

    #[test]
    fn test_zoom_range_beyond_ceiling_rejected() {
        assert!(ZoomRange::new(0, MAX_ZOOM).is_ok());
        assert!(matches!(
            ZoomRange::new(0, MAX_ZOOM + 1),
            Err(ConfigError::Coord(_))
        ));
    }

    #[test]
    fn test_request_defaults() {
        let request = MosaicRequest::new(10.0, 20.0, ZoomRange::new(0, 19).unwrap());
        assert_eq!(request.style(), MapStyle::Satellite);
        assert_eq!(request.projection(), ProjectionMode::Orthographic);
        assert_eq!(request.fragment_size(), (512, 512));
        assert_eq!(request.out_width(), 1024);
        assert_eq!(request.mesh_step(), 8);
        assert_eq!(request.gradient(), 10);
        assert_eq!(request.bottom_margin(), 20);
        assert_eq!(request.scale(), MapScale::Two);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_coordinate() {
        let request = MosaicRequest::new(95.0, 0.0, ZoomRange::new(0, 3).unwrap());
        assert!(matches!(request.validate(), Err(ConfigError::Coord(_))));
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        let range = ZoomRange::new(0, 3).unwrap();
        let request = MosaicRequest::new(0.0, 0.0, range).with_out_width(0);
        assert_eq!(request.validate(), Err(ConfigError::InvalidOutputWidth));

        let request = MosaicRequest::new(0.0, 0.0, range).with_fragment_size((512, 0));
        assert_eq!(request.validate(), Err(ConfigError::InvalidFragmentSize));

        let request = MosaicRequest::new(0.0, 0.0, range).with_mesh_step(0);
        assert_eq!(request.validate(), Err(ConfigError::InvalidMeshStep));
    }
}
