//! Composable 2D coordinate transforms
//!
//! Every geometric map in this crate is a [`CoordinateTransform`]: a pure
//! function from an output-space point to a source-space point, or to
//! "undefined" when the point has no preimage (outside an orthographic
//! hemisphere, for example). Undefined is a first-class value, never an
//! error, so transforms stay composable and the mesh generator can probe
//! freely around domain boundaries.

mod affine;
mod compose;

pub use affine::{Scale, Translate};
pub use compose::Compose;

/// A pure map from output-space coordinates to source-space coordinates.
///
/// Returns `None` where the map is undefined. Implementations must be pure
/// and re-entrant: the mesh generator evaluates the same point repeatedly
/// while subdividing, and fans evaluation out across threads, so the result
/// for a given `(x, y)` must never change between calls.
///
/// Closures of the right shape implement this trait directly, which keeps
/// one-off maps in tests and call sites lightweight:
///
/// ```
/// use logmosaic::transform::CoordinateTransform;
///
/// let flip = |x: f64, y: f64| Some((y, x));
/// assert_eq!(flip.apply(1.0, 2.0), Some((2.0, 1.0)));
/// ```
pub trait CoordinateTransform: Send + Sync {
    /// Maps one point, or returns `None` where the map is undefined.
    fn apply(&self, x: f64, y: f64) -> Option<(f64, f64)>;
}

impl<F> CoordinateTransform for F
where
    F: Fn(f64, f64) -> Option<(f64, f64)> + Send + Sync,
{
    fn apply(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        self(x, y)
    }
}
