//! Uniform sampling of a formula for plotting.

use crate::error::ParseError;
use crate::resolve::Expression;
use crate::types::{Interval, Point};
use tracing::{debug, trace};

impl Expression {
    /// Evaluates the formula on `count` evenly spaced values across `interval`.
    ///
    /// Values where the formula is undefined are left out, so the result can be
    /// shorter than `count` and is empty when nothing is defined. Points are in
    /// increasing `x` order and every coordinate is finite.
    pub fn sample(&self, interval: Interval, count: usize) -> Vec<Point> {
        let mut points = Vec::new();
        for x in interval.grid(count) {
            match self.eval(x) {
                Ok(y) => points.push(Point::new(x, y)),
                Err(reason) => trace!(x, %reason, "sample dropped"),
            }
        }
        debug!(
            expression = self.source(),
            requested = count,
            kept = points.len(),
            "sampled"
        );
        points
    }
}

/// Samples `expression` on `count` evenly spaced values across `interval`.
///
/// Fails only when the text does not compile. Undefined samples are dropped.
///
/// # Examples
///
/// ```
/// use graph_eval::{Interval, generate_points};
///
/// let points = generate_points("1/x", Interval::new(-1.0, 1.0), 3).unwrap();
/// // x = 0 is dropped
/// assert_eq!(points.len(), 2);
/// assert_eq!(points[0].y, -1.0);
/// ```
pub fn generate_points(
    expression: &str,
    interval: Interval,
    count: usize,
) -> Result<Vec<Point>, ParseError> {
    Ok(Expression::parse(expression)?.sample(interval, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Real;

    #[test]
    fn test_samples_cover_interval() {
        let points = generate_points("2x + 1", Interval::new(0.0, 10.0), 11).unwrap();
        assert_eq!(points.len(), 11);
        assert_eq!(points[0], Point::new(0.0, 1.0));
        assert_eq!(points[10], Point::new(10.0, 21.0));
        assert!(points.windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn test_undefined_samples_are_dropped() {
        let points = generate_points("1/x", Interval::new(-1.0, 1.0), 101).unwrap();
        assert_eq!(points.len(), 100);
        assert!(points.iter().all(|p| p.x != 0.0 && p.y.is_finite()));

        let points = generate_points("sqrt(x)", Interval::new(-1.0, 1.0), 21).unwrap();
        assert_eq!(points.len(), 11);
        assert_eq!(points[0].x, 0.0);
    }

    #[test]
    fn test_nowhere_defined_is_empty_not_error() {
        let points = generate_points("sqrt(-1 - x^2)", Interval::new(-5.0, 5.0), 50).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_parse_errors_surface_before_sampling() {
        assert_eq!(
            generate_points("foo(x)", Interval::new(0.0, 1.0), 10),
            Err(ParseError::UnknownFunction { name: "foo".into() })
        );
    }

    #[test]
    fn test_degenerate_counts() {
        let expr = Expression::parse("x").unwrap();
        assert!(expr.sample(Interval::new(0.0, 1.0), 0).is_empty());
        let single = expr.sample(Interval::new(0.5, 1.0), 1);
        assert_eq!(single, vec![Point::new(0.5, 0.5)]);
        let point: Vec<Real> = expr
            .sample(Interval::new(2.0, 2.0), 3)
            .iter()
            .map(|p| p.x)
            .collect();
        assert_eq!(point, vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_large_counts_allocate_only_kept_points() {
        let points = generate_points("sqrt(-1 - x^2)", Interval::new(-5.0, 5.0), 100_000).unwrap();
        assert!(points.is_empty());
        assert_eq!(points.capacity(), 0);
    }

    #[test]
    fn test_swapped_interval_samples_ascending() {
        let expr = Expression::parse("x").unwrap();
        let xs: Vec<Real> = expr
            .sample(Interval { min: 1.0, max: -1.0 }, 3)
            .iter()
            .map(|p| p.x)
            .collect();
        assert_eq!(xs, vec![-1.0, 0.0, 1.0]);
    }
}
