//! Inverse log-polar projection: strip back to a disc image.

use std::f64::consts::PI;

use crate::transform::{Compose, CoordinateTransform, Scale, Translate};

/// Complex logarithm of a plane point: `(x, y)` to `(angle, log-radius)`.
///
/// The exact origin has no angle and an infinite negative log-radius, so
/// it is pinned to angle 0 and the log-radius of a hundredth of a pixel.
/// That keeps the surrounding mesh finite while still mapping the pole far
/// outside any real strip.
#[derive(Debug, Clone, Copy)]
struct ComplexLog;

impl CoordinateTransform for ComplexLog {
    fn apply(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if x == 0.0 && y == 0.0 {
            Some((0.0, 1e-2_f64.ln()))
        } else {
            Some((y.atan2(x), (x * x + y * y).ln() * 0.5))
        }
    }
}

/// Output-to-source map turning a log-polar strip back into a disc image.
///
/// The dual of [`LogPolar`]: the source here is a strip whose horizontal
/// axis spans one full turn over `width - 1` pixels and whose vertical
/// axis is log-radius descending from `top`, and the output is a disc
/// image centered in an `out_size` canvas, sized so the disc's corner
/// radius lands on the strip's `top` line. Total on all inputs; disc
/// points beyond the strip simply sample out of bounds.
///
/// [`LogPolar`]: crate::projection::LogPolar
pub struct InverseLogPolar {
    chain: Compose,
}

impl InverseLogPolar {
    /// Builds the projection.
    ///
    /// # Arguments
    ///
    /// * `strip_size` - Dimensions of the log-polar strip being sampled
    /// * `out_size` - Dimensions of the disc image to produce
    /// * `top` - Strip row holding the outermost radius (the disc corner)
    pub fn new(strip_size: (u32, u32), out_size: (u32, u32), top: f64) -> Self {
        let (sw, _) = strip_size;
        let (ow, oh) = out_size;
        let xc = ow as f64 / 2.0;
        let yc = oh as f64 / 2.0;

        // Corner radius of the output disc sits on the strip's top line
        let log_rmax = (xc * xc + yc * yc).ln() * 0.5;

        // Strip pixels per radian; the full width is one turn
        let source_scale = (sw as f64 - 1.0) / (2.0 * PI);

        let chain = Compose::new(vec![
            Box::new(Translate::new(
                source_scale * PI,
                log_rmax * source_scale + top,
            )),
            Box::new(Scale::new(source_scale, -source_scale)),
            Box::new(ComplexLog),
            Box::new(Translate::new(-xc, -yc)),
        ]);

        Self { chain }
    }
}

impl CoordinateTransform for InverseLogPolar {
    fn apply(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        self.chain.apply(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{LogPolar, LogPolarConfig};

    #[test]
    fn test_disc_center_maps_far_below_strip() {
        let inv = InverseLogPolar::new((1025, 600), (512, 512), 0.0);
        let (u, v) = inv.apply(256.0, 256.0).unwrap();

        // Pole maps to angle 0, which is the strip's midline
        let s = 1024.0 / (2.0 * PI);
        assert!((u - s * PI).abs() < 1e-9);

        // Sentinel log-radius of 1e-2 px lands way below any real strip
        let log_rmax = (256.0_f64 * 256.0 * 2.0).ln() * 0.5;
        let expected_v = (log_rmax - 1e-2_f64.ln()) * s;
        assert!((v - expected_v).abs() < 1e-9);
        assert!(v > 600.0, "pole row {} should fall outside the strip", v);
    }

    #[test]
    fn test_corner_radius_lands_on_top_line() {
        let top = 40.0;
        let inv = InverseLogPolar::new((1025, 600), (512, 512), top);

        // A point at the disc's corner radius, along the positive x axis
        let rmax = (256.0_f64 * 256.0 * 2.0).sqrt();
        let (_, v) = inv.apply(256.0 + rmax, 256.0).unwrap();
        assert!((v - top).abs() < 1e-9);
    }

    #[test]
    fn test_halving_radius_descends_one_octave() {
        let inv = InverseLogPolar::new((1025, 600), (512, 512), 0.0);
        let s = 1024.0 / (2.0 * PI);

        let (_, v1) = inv.apply(256.0 + 200.0, 256.0).unwrap();
        let (_, v2) = inv.apply(256.0 + 100.0, 256.0).unwrap();
        assert!((v2 - v1 - s * std::f64::consts::LN_2).abs() < 1e-9);
    }

    #[test]
    fn test_angle_seam_on_negative_x_axis() {
        let inv = InverseLogPolar::new((1025, 600), (512, 512), 0.0);

        // Exactly on the negative x axis: angle pi, the strip's right edge
        let (u, _) = inv.apply(56.0, 256.0).unwrap();
        assert!((u - 1024.0).abs() < 1e-9);

        // Nudged to negative y: angle wraps to just above -pi, left edge
        let (u, _) = inv.apply(56.0, 256.0 - 1e-9).unwrap();
        assert!(u < 1.0);
    }

    #[test]
    fn test_round_trips_with_forward_projection() {
        // Forward: strip -> disc, with the left edge at angle -pi to match
        // the inverse's atan2 convention. The inverse spreads one turn over
        // width - 1 strip pixels, so a 1025-wide strip matches a forward
        // width of 1024 exactly.
        let forward = LogPolar::new(
            LogPolarConfig::new((512, 512))
                .with_out_width(1024)
                .with_start_angle(-PI),
        );
        let inverse = InverseLogPolar::new((1025, 600), (512, 512), 0.0);

        for u in [0.0, 1.0, 255.5, 512.0, 768.25, 1023.0] {
            for v in [0.0, 10.0, 99.5, 300.0, 550.0] {
                let (dx, dy) = forward.apply(u, v).unwrap();
                let (u2, v2) = inverse.apply(dx, dy).unwrap();
                assert!(
                    (u2 - u).abs() < 1e-6 && (v2 - v).abs() < 1e-6,
                    "round trip drifted: ({}, {}) -> ({}, {})",
                    u,
                    v,
                    u2,
                    v2
                );
            }
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_round_trip_property(
                u in 0.0..1024.0_f64,
                v in 0.0..600.0_f64
            ) {
                let forward = LogPolar::new(
                    LogPolarConfig::new((512, 512))
                        .with_out_width(1024)
                        .with_start_angle(-PI),
                );
                let inverse = InverseLogPolar::new((1025, 600), (512, 512), 0.0);

                let (dx, dy) = forward.apply(u, v).unwrap();
                let (u2, v2) = inverse.apply(dx, dy).unwrap();

                prop_assert!((u2 - u).abs() < 1e-6, "u drifted: {} -> {}", u, u2);
                prop_assert!((v2 - v).abs() < 1e-6, "v drifted: {} -> {}", v, v2);
            }

            #[test]
            fn test_always_defined(
                x in -2000.0..2000.0_f64,
                y in -2000.0..2000.0_f64
            ) {
                let inv = InverseLogPolar::new((1025, 600), (512, 512), 0.0);
                prop_assert!(inv.apply(x, y).is_some());
            }
        }
    }
}
