//! Local extrema by three-point comparison on the sampling grid.
//!
//! A grid sample is a maximum when it is strictly greater than both neighbours and a
//! minimum when it is strictly smaller. Plateaus are not reported and an extremum
//! narrower than the grid spacing can be missed.

use crate::Real;
use crate::config::AnalysisConfig;
use crate::error::ParseError;
use crate::resolve::Expression;
use crate::types::{CriticalKind, CriticalPoint, Interval, Point};
use tracing::debug;

fn classify(left: Real, centre: Real, right: Real) -> Option<CriticalKind> {
    if centre > left && centre > right {
        Some(CriticalKind::Maximum)
    } else if centre < left && centre < right {
        Some(CriticalKind::Minimum)
    } else {
        None
    }
}

impl Expression {
    /// Local maxima and minima inside `interval`, in increasing `x` order.
    ///
    /// The grid has `config.sample_count` points. A window is only considered when
    /// all three of its samples are defined, so the interval ends are never reported.
    pub fn critical_points(&self, interval: Interval, config: &AnalysisConfig) -> Vec<CriticalPoint> {
        let mut found: Vec<CriticalPoint> = Vec::new();
        // The two most recent samples, oldest first
        let mut window: [Option<(Real, Real)>; 2] = [None, None];
        let mut samples = 0usize;

        for x in interval.grid(config.sample_count) {
            samples += 1;
            let current = self.eval(x).ok().map(|y| (x, y));
            if let [Some((_, left)), Some((x, y))] = window {
                if let Some((_, right)) = current {
                    if let Some(kind) = classify(left, y, right) {
                        found.push(CriticalPoint {
                            point: Point::new(x, y),
                            kind,
                        });
                    }
                }
            }
            window = [window[1], current];
        }

        debug!(
            expression = self.source(),
            samples,
            critical_points = found.len(),
            "critical points found"
        );
        found
    }
}

/// Local extrema of `expression` inside `interval`, with default settings.
///
/// # Examples
///
/// ```
/// use graph_eval::{CriticalKind, Interval, find_critical_points};
///
/// let points = find_critical_points("-(x^2)", Interval::new(-5.0, 5.0)).unwrap();
/// assert_eq!(points.len(), 1);
/// assert_eq!(points[0].kind, CriticalKind::Maximum);
/// assert_eq!(points[0].point.x, 0.0);
/// ```
pub fn find_critical_points(
    expression: &str,
    interval: Interval,
) -> Result<Vec<CriticalPoint>, ParseError> {
    find_critical_points_with(expression, interval, &AnalysisConfig::default())
}

/// Local extrema of `expression` inside `interval`.
pub fn find_critical_points_with(
    expression: &str,
    interval: Interval,
    config: &AnalysisConfig,
) -> Result<Vec<CriticalPoint>, ParseError> {
    Ok(Expression::parse(expression)?.critical_points(interval, config))
}
