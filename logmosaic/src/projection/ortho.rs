//! Orthographic view of a Mercator map piece.
//!
//! Turns a fragment of a Web Mercator map into the view of the globe from
//! infinitely far away, centered on a reference point. Used to undo the
//! Mercator stretch before the log-polar step, so coarse zoom levels show
//! a round Earth instead of a smeared cylinder.

use crate::transform::{Compose, CoordinateTransform, Scale, Translate};

/// Width of the orthographic footprint of a Mercator map piece, in Earth
/// radii.
///
/// The longitude span projects to `2 * sin(span / 2)` across the equator,
/// saturating at the full disc diameter once the span reaches half a turn.
/// Away from the equator the footprint narrows by the cosine of latitude;
/// the extreme of the piece's latitude range closest to the equator is the
/// widest parallel, so that is the one that decides (zero if the range
/// crosses the equator).
///
/// # Arguments
///
/// * `mercator_size` - Source raster dimensions in pixels
/// * `latitude` - Latitude of the raster center, in radians
/// * `angular_width` - Longitude span of the raster, in radians
pub fn orthographic_footprint_width(
    mercator_size: (u32, u32),
    latitude: f64,
    angular_width: f64,
) -> f64 {
    let (sw, sh) = mercator_size;
    let y_merc0 = latitude.tan().asinh();
    let src_pixel_size = angular_width / sw as f64;

    // Latitude extremes of the piece, via inverse Mercator
    let h0 = y_merc0 - src_pixel_size * sh as f64 * 0.5;
    let h1 = y_merc0 + src_pixel_size * sh as f64 * 0.5;
    let lat0 = h0.sinh().atan();
    let lat1 = h1.sinh().atan();

    let widest_latitude = if lat0.signum() != lat1.signum() {
        0.0
    } else {
        lat0.abs().min(lat1.abs())
    };

    let longitude_projection_width = if angular_width >= std::f64::consts::PI {
        2.0
    } else {
        2.0 * (angular_width / 2.0).sin()
    };

    longitude_projection_width * widest_latitude.cos()
}

/// Spherical core of the projection: orthographic image point on the unit
/// disc to (longitude, Mercator y) relative to the reference point.
///
/// Undefined outside the unit disc (the far side of the globe is not
/// visible) and at the exact poles (no longitude there).
#[derive(Debug, Clone, Copy)]
struct OrthoToMercator {
    sin_lat: f64,
    cos_lat: f64,
    y_merc0: f64,
}

impl OrthoToMercator {
    fn new(latitude: f64) -> Self {
        Self {
            sin_lat: latitude.sin(),
            cos_lat: latitude.cos(),
            y_merc0: latitude.tan().asinh(),
        }
    }
}

impl CoordinateTransform for OrthoToMercator {
    fn apply(&self, xp: f64, yp: f64) -> Option<(f64, f64)> {
        let r2 = xp * xp + yp * yp;
        if r2 > 1.0 {
            return None;
        }
        let zp = (1.0 - r2).sqrt();

        // Lift to the sphere and rotate by the reference latitude in the
        // xz plane, so the reference point faces the viewer
        let x = zp * self.cos_lat - yp * self.sin_lat;
        let z = zp * self.sin_lat + yp * self.cos_lat;
        let y = xp;

        let r_xy = (x * x + y * y).sqrt();
        if r_xy == 0.0 {
            return None;
        }
        // asinh(z / r_xy) is asinh(tan(latitude)), the Mercator ordinate
        Some((y.atan2(x), (z / r_xy).asinh() - self.y_merc0))
    }
}

/// Output-to-source map from an orthographic view back onto a Mercator
/// raster, with pixel scaling on both ends.
///
/// The output canvas keeps the source's aspect ratio; the disc is centered
/// in it and sized from the footprint width, so [`pixel_size`] reports how
/// many Earth radii one output pixel covers. That scale is what the
/// compositor uses to align zoom bands vertically.
///
/// [`pixel_size`]: MercatorOrtho::pixel_size
pub struct MercatorOrtho {
    chain: Compose,
    out_size: (u32, u32),
    pixel_size: f64,
}

impl MercatorOrtho {
    /// Builds the projection.
    ///
    /// # Arguments
    ///
    /// * `mercator_size` - Source raster dimensions in pixels
    /// * `latitude` - Latitude of the raster center, in radians
    /// * `angular_width` - Longitude span of the raster, in radians
    /// * `out_width` - Output canvas width in pixels
    pub fn new(
        mercator_size: (u32, u32),
        latitude: f64,
        angular_width: f64,
        out_width: u32,
    ) -> Self {
        let (sw, sh) = mercator_size;
        let out_height = (sh as f64 / sw as f64 * out_width as f64) as u32;

        let src_pixel_size = angular_width / sw as f64;
        let projection_width =
            orthographic_footprint_width(mercator_size, latitude, angular_width);
        let dst_pixel_size = projection_width / out_width as f64;

        let chain = Compose::new(vec![
            Box::new(Translate::new(sw as f64 * 0.5, sh as f64 * 0.5)),
            Box::new(Scale::uniform(-1.0 / src_pixel_size)),
            Box::new(OrthoToMercator::new(latitude)),
            Box::new(Scale::uniform(-dst_pixel_size)),
            Box::new(Translate::new(
                -(out_width as f64) * 0.5,
                -(out_height as f64) * 0.5,
            )),
        ]);

        Self {
            chain,
            out_size: (out_width, out_height),
            pixel_size: dst_pixel_size,
        }
    }

    /// Output canvas dimensions.
    pub fn output_size(&self) -> (u32, u32) {
        self.out_size
    }

    /// Earth radii covered by one output pixel at the reference point.
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }
}

impl CoordinateTransform for MercatorOrtho {
    fn apply(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        self.chain.apply(x, y)
    }
}
