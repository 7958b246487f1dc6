//! Map fragment request types.
//!
//! Provides the `FragmentRequest` type that encapsulates all information
//! needed to fetch one rendered map fragment, independent of the concrete
//! imagery service behind the `TileSource`.

use std::fmt;

/// Rendering style of a map fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MapStyle {
    /// Satellite imagery.
    #[default]
    Satellite,
    /// Rendered street map.
    Roadmap,
    /// Satellite imagery with road overlay.
    Hybrid,
    /// Shaded relief map.
    Terrain,
}

impl MapStyle {
    /// Value used in service URLs and cache file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            MapStyle::Satellite => "satellite",
            MapStyle::Roadmap => "roadmap",
            MapStyle::Hybrid => "hybrid",
            MapStyle::Terrain => "terrain",
        }
    }
}

impl fmt::Display for MapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel-density multiplier offered by the imagery service.
///
/// A scale of two returns a fragment with twice the pixel dimensions for
/// the same geographic extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MapScale {
    #[default]
    One,
    Two,
}

impl MapScale {
    /// The multiplier as a plain integer.
    pub fn factor(&self) -> u32 {
        match self {
            MapScale::One => 1,
            MapScale::Two => 2,
        }
    }
}

impl fmt::Display for MapScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.factor())
    }
}

/// Request to fetch one rendered map fragment.
///
/// Contains the geographic center, zoom level and raster parameters of a
/// single square-ish map image centered on a point.
///
/// # Example
///
/// ```
/// use logmosaic::provider::{FragmentRequest, MapScale, MapStyle};
///
/// let request = FragmentRequest::new(59.93778, 30.494908, 10, (512, 512))
///     .with_style(MapStyle::Roadmap)
///     .with_scale(MapScale::Two);
/// assert_eq!(request.zoom(), 10);
/// assert_eq!(request.style(), MapStyle::Roadmap);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentRequest {
    /// Latitude of the fragment center, degrees
    latitude: f64,
    /// Longitude of the fragment center, degrees
    longitude: f64,
    /// Map zoom level
    zoom: u8,
    /// Requested raster size in pixels before the scale multiplier
    size: (u32, u32),
    style: MapStyle,
    scale: MapScale,
}

impl FragmentRequest {
    /// Create a new fragment request with default style and scale.
    ///
    /// # Arguments
    ///
    /// * `latitude` - Center latitude in degrees
    /// * `longitude` - Center longitude in degrees
    /// * `zoom` - Map zoom level (0 = whole world)
    /// * `size` - Raster dimensions in pixels
    pub fn new(latitude: f64, longitude: f64, zoom: u8, size: (u32, u32)) -> Self {
        Self {
            latitude,
            longitude,
            zoom,
            size,
            style: MapStyle::default(),
            scale: MapScale::default(),
        }
    }

    /// Set the map style.
    pub fn with_style(mut self, style: MapStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the pixel-density multiplier.
    pub fn with_scale(mut self, scale: MapScale) -> Self {
        self.scale = scale;
        self
    }

    /// Get the center latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the center longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Get the zoom level.
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Get the requested raster size in pixels.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Get the map style.
    pub fn style(&self) -> MapStyle {
        self.style
    }

    /// Get the pixel-density multiplier.
    pub fn scale(&self) -> MapScale {
        self.scale
    }
}
