//! Transform composition with short-circuit on undefined points.

use super::CoordinateTransform;

/// An ordered chain of transforms, applied last-stage-first.
///
/// Mirrors mathematical composition: `Compose::new(vec![f, g, h])` computes
/// `f(g(h(x, y)))`. If any stage returns `None` the whole chain is `None`
/// and the remaining (outer) stages are never evaluated.
///
/// ```
/// use logmosaic::transform::{Compose, CoordinateTransform, Scale, Translate};
///
/// // First shift, then double: f(g(p)) with g the shift
/// let chain = Compose::new(vec![
///     Box::new(Scale::uniform(2.0)),
///     Box::new(Translate::new(1.0, 0.0)),
/// ]);
/// assert_eq!(chain.apply(2.0, 3.0), Some((6.0, 6.0)));
/// ```
pub struct Compose {
    stages: Vec<Box<dyn CoordinateTransform>>,
}

impl Compose {
    /// Creates a composition from outermost to innermost stage.
    pub fn new(stages: Vec<Box<dyn CoordinateTransform>>) -> Self {
        Self { stages }
    }

    /// Number of stages in the chain.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// True when the chain has no stages (and acts as the identity).
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl CoordinateTransform for Compose {
    fn apply(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let mut point = (x, y);
        for stage in self.stages.iter().rev() {
            point = stage.apply(point.0, point.1)?;
        }
        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{Scale, Translate};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_empty_compose_is_identity() {
        let chain = Compose::new(vec![]);
        assert_eq!(chain.apply(3.5, -1.25), Some((3.5, -1.25)));
    }

    #[test]
    fn test_evaluation_order_is_last_first() {
        // Translate runs first, scale second: (x+1)*2, not x*2+1
        let chain = Compose::new(vec![
            Box::new(Scale::uniform(2.0)),
            Box::new(Translate::new(1.0, 1.0)),
        ]);
        assert_eq!(chain.apply(0.0, 0.0), Some((2.0, 2.0)));
    }

    #[test]
    fn test_undefined_short_circuits() {
        let chain = Compose::new(vec![
            Box::new(Translate::new(100.0, 100.0)),
            Box::new(|_x: f64, _y: f64| None),
        ]);
        assert_eq!(chain.apply(0.0, 0.0), None);
    }

    #[test]
    fn test_outer_stage_not_evaluated_after_undefined() {
        static OUTER_CALLS: AtomicUsize = AtomicUsize::new(0);

        let outer = |x: f64, y: f64| {
            OUTER_CALLS.fetch_add(1, Ordering::SeqCst);
            Some((x, y))
        };
        let chain = Compose::new(vec![
            Box::new(outer),
            Box::new(|_x: f64, _y: f64| None),
        ]);

        assert_eq!(chain.apply(1.0, 2.0), None);
        assert_eq!(OUTER_CALLS.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_matches_manual_nesting() {
        let f = Scale::new(3.0, 0.5);
        let g = Translate::new(-2.0, 4.0);
        let chain = Compose::new(vec![Box::new(f), Box::new(g)]);

        for &(x, y) in &[(0.0, 0.0), (1.5, -3.25), (1e6, -1e6)] {
            let (gx, gy) = g.apply(x, y).unwrap();
            assert_eq!(chain.apply(x, y), f.apply(gx, gy));
        }
    }
}
