//! Log-polar projection: square source image to angle/log-radius strip.

use std::f64::consts::PI;

use crate::transform::CoordinateTransform;

/// Log-radius of the innermost representable ring, half a source pixel.
const MIN_LOG: f64 = -std::f64::consts::LN_2;

/// Configuration for a [`LogPolar`] projection.
///
/// Only the source size is mandatory; everything else has a derived
/// default. The output width fixes the angular resolution (full width is
/// one turn), and the default height is chosen so the farthest source
/// corner fits on the top line while the innermost half pixel sits on the
/// bottom line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogPolarConfig {
    source_size: (u32, u32),
    center: Option<(f64, f64)>,
    out_width: Option<u32>,
    out_height: Option<u32>,
    start_angle: f64,
}

impl LogPolarConfig {
    /// Creates a configuration for a source image of the given size.
    pub fn new(source_size: (u32, u32)) -> Self {
        Self {
            source_size,
            center: None,
            out_width: None,
            out_height: None,
            start_angle: 0.0,
        }
    }

    /// Set the projection center in source pixels. Default is the midpoint.
    pub fn with_center(mut self, x: f64, y: f64) -> Self {
        self.center = Some((x, y));
        self
    }

    /// Set the output strip width in pixels.
    ///
    /// Default is `(source_width + source_height) * 2`, enough angular
    /// resolution for a mostly lossless transform.
    pub fn with_out_width(mut self, width: u32) -> Self {
        self.out_width = Some(width);
        self
    }

    /// Set the output strip height in pixels. Default is derived from the
    /// width so the whole source fits.
    pub fn with_out_height(mut self, height: u32) -> Self {
        self.out_height = Some(height);
        self
    }

    /// Set the angle mapped to the strip's left edge, in radians.
    /// Default is 0, the positive x axis.
    pub fn with_start_angle(mut self, radians: f64) -> Self {
        self.start_angle = radians;
        self
    }
}

/// Output-to-source map for the log-polar projection.
///
/// The strip's horizontal axis is the angle around the center (one full
/// turn across the width) and its vertical axis is log-radius, largest
/// radius on the top line. Both axes share the scale `2*pi / out_width`,
/// so moving down by `out_width * ln(2) / (2*pi)` pixels exactly halves
/// the radius: one vertical "octave" per doubling of magnification.
///
/// Total on all inputs. Points whose radius falls outside the source are a
/// sampling concern, not a domain concern, so they still map to (out of
/// bounds) source coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogPolar {
    center: (f64, f64),
    out_size: (u32, u32),
    scale: f64,
    max_log: f64,
    start_angle: f64,
}

impl LogPolar {
    /// Builds the projection, deriving any defaults the config left unset.
    pub fn new(config: LogPolarConfig) -> Self {
        let (sw, sh) = config.source_size;
        let (x0, y0) = config
            .center
            .unwrap_or((sw as f64 / 2.0, sh as f64 / 2.0));

        let out_width = config.out_width.unwrap_or((sw + sh) * 2);
        let scale = 2.0 * PI / out_width as f64;

        // Distance from the center to the farthest source corner decides
        // the top line: the whole source must be representable.
        let far_x = x0.max(sw as f64 - x0);
        let far_y = y0.max(sh as f64 - y0);
        let max_log = (far_x * far_x + far_y * far_y).ln() * 0.5;

        let out_height = config
            .out_height
            .unwrap_or_else(|| (out_width as f64 / (2.0 * PI) * (max_log - MIN_LOG)) as u32);

        Self {
            center: (x0, y0),
            out_size: (out_width, out_height),
            scale,
            max_log,
            start_angle: config.start_angle,
        }
    }

    /// Output strip dimensions, including any derived defaults.
    pub fn output_size(&self) -> (u32, u32) {
        self.out_size
    }

    /// Log-radius mapped to the strip's top line.
    pub fn max_log(&self) -> f64 {
        self.max_log
    }
}

impl CoordinateTransform for LogPolar {
    fn apply(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let angle = x * self.scale + self.start_angle;
        // Highest resolution at the bottom: log-radius shrinks as y grows
        let radius = (self.max_log - y * self.scale).exp();
        Some((
            angle.cos() * radius + self.center.0,
            angle.sin() * radius + self.center.1,
        ))
    }
}
