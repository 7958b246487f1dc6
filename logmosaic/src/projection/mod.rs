//! Projection maps between map spaces
//!
//! Every projection here is exposed in the direction resampling needs:
//! output-space pixel to source-space pixel. All of them are pure
//! [`CoordinateTransform`]s; points with no preimage (outside the visible
//! hemisphere, the exact pole) come back as `None`, never as an error.
//!
//! [`CoordinateTransform`]: crate::transform::CoordinateTransform

mod invlogpolar;
mod logpolar;
mod ortho;

pub use invlogpolar::InverseLogPolar;
pub use logpolar::{LogPolar, LogPolarConfig};
pub use ortho::{orthographic_footprint_width, MercatorOrtho};
