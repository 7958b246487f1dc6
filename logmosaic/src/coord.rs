//! Geographic coordinate validation and angular extents
//!
//! Bounds checking for latitude/longitude/zoom inputs and the angular width
//! covered by a fetched map fragment at a given zoom level. The static-map
//! service uses the Web Mercator projection, so latitudes are capped at the
//! projection's limits rather than the geographic poles.

use std::f64::consts::PI;
use thiserror::Error;

/// Minimum latitude representable in Web Mercator, in degrees.
pub const MIN_LAT: f64 = -85.05112878;
/// Maximum latitude representable in Web Mercator, in degrees.
pub const MAX_LAT: f64 = 85.05112878;
/// Minimum longitude, in degrees.
pub const MIN_LON: f64 = -180.0;
/// Maximum longitude, in degrees.
pub const MAX_LON: f64 = 180.0;
/// Lowest zoom level (the whole world in one 256 px tile).
pub const MIN_ZOOM: u8 = 0;
/// Highest zoom level the static-map service resolves.
pub const MAX_ZOOM: u8 = 21;

/// Errors for out-of-range geographic inputs.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoordError {
    /// Latitude outside the Web Mercator range.
    #[error("invalid latitude {0} (must be within -85.05112878..=85.05112878)")]
    InvalidLatitude(f64),
    /// Longitude outside -180..=180 degrees.
    #[error("invalid longitude {0} (must be within -180..=180)")]
    InvalidLongitude(f64),
    /// Zoom level beyond what the service resolves.
    #[error("invalid zoom level {0} (must be at most 21)")]
    InvalidZoom(u8),
}

/// Validates a geographic coordinate in degrees.
///
/// # Arguments
///
/// * `lat` - Latitude in degrees (-85.05112878 to 85.05112878)
/// * `lon` - Longitude in degrees (-180.0 to 180.0)
#[inline]
pub fn validate_coordinate(lat: f64, lon: f64) -> Result<(), CoordError> {
    if !(MIN_LAT..=MAX_LAT).contains(&lat) {
        return Err(CoordError::InvalidLatitude(lat));
    }
    if !(MIN_LON..=MAX_LON).contains(&lon) {
        return Err(CoordError::InvalidLongitude(lon));
    }
    Ok(())
}

/// Validates a zoom level.
#[inline]
pub fn validate_zoom(zoom: u8) -> Result<(), CoordError> {
    if zoom > MAX_ZOOM {
        return Err(CoordError::InvalidZoom(zoom));
    }
    Ok(())
}

/// Angular width covered by a fragment raster, in radians.
///
/// At zoom 0 the world is `256 * scale` pixels wide, doubling every level.
/// `width_px` is the actual raster width, after the scale factor is applied
/// by the service, so a 1024 px raster at scale 2 and zoom 0 spans the world
/// twice (the map repeats).
///
/// # Example
///
/// ```
/// use std::f64::consts::PI;
/// use logmosaic::coord::longitude_span;
///
/// // One full world: 512 px at scale 2, zoom 0
/// let span = longitude_span(512, 2, 0);
/// assert!((span - 2.0 * PI).abs() < 1e-12);
/// ```
#[inline]
pub fn longitude_span(width_px: u32, scale: u32, zoom: u8) -> f64 {
    2.0 * PI * width_px as f64 / (256.0 * scale as f64 * 2.0_f64.powi(zoom as i32))
}
