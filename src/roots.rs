//! Root finding: x-intercepts by grid scan and bisection, and the y-intercept.
//!
//! The x-intercept search samples the formula on a uniform grid, takes every sample
//! that is exactly zero as a root, and refines every strict sign change between two
//! neighbouring defined samples with [`bisect`]. A sign change across a pole (as in
//! `1/x` or `tan(x)`) also brackets a "root"; those are recognised by their residual,
//! which grows instead of shrinking, and discarded.

use crate::Real;
use crate::config::AnalysisConfig;
use crate::error::{EvaluationError, ParseError, SearchFailure};
use crate::resolve::Expression;
use crate::types::{Interval, Point};
use tracing::{debug, trace, warn};

/// Finds a root of `f` in the bracket `[a, b]` by bisection.
///
/// The bracket must have a sign change. An endpoint where `f` is exactly zero is
/// returned as is. Otherwise the bracket is halved until `|f(mid)| < tolerance`, the
/// half-width drops below `tolerance`, or `max_iterations` steps have run; the last
/// midpoint is returned in every case.
///
/// # Errors
///
/// - [`SearchFailure::EmptyInterval`] when a bound is not finite or `a == b`.
/// - [`SearchFailure::NoSignChange`] when `f(a)` and `f(b)` have the same sign.
/// - [`SearchFailure::Undefined`] when `f` fails at an endpoint or a midpoint.
///
/// # Examples
///
/// ```
/// use graph_eval::{Real, bisect};
///
/// let root = bisect(|x| Ok(x * x - 2.0), 0.0, 2.0, 1e-6, 100).unwrap();
/// assert!((root - (2.0 as Real).sqrt()).abs() < 1e-5);
/// ```
pub fn bisect<F>(
    f: F,
    a: Real,
    b: Real,
    tolerance: Real,
    max_iterations: usize,
) -> Result<Real, SearchFailure>
where
    F: Fn(Real) -> Result<Real, EvaluationError>,
{
    if !a.is_finite() || !b.is_finite() || a == b {
        return Err(SearchFailure::EmptyInterval);
    }
    let (mut lo, mut hi) = if a < b { (a, b) } else { (b, a) };
    let eval = |x: Real| f(x).map_err(|reason| SearchFailure::Undefined { x, reason });

    let mut f_lo = eval(lo)?;
    let f_hi = eval(hi)?;
    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }
    if (f_lo < 0.0) == (f_hi < 0.0) {
        return Err(SearchFailure::NoSignChange { a: lo, b: hi });
    }

    let mut mid = lo + (hi - lo) / 2.0;
    for step in 0..max_iterations {
        mid = lo + (hi - lo) / 2.0;
        let f_mid = eval(mid)?;
        trace!(step, mid, f_mid, "bisection step");
        if f_mid.abs() < tolerance || (hi - lo) / 2.0 < tolerance {
            return Ok(mid);
        }
        if (f_mid < 0.0) == (f_lo < 0.0) {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    Ok(mid)
}

impl Expression {
    /// Points where the curve crosses or touches the x-axis inside `interval`.
    ///
    /// Roots are sorted by `x`, closer together than `config.tolerance` only once,
    /// and reported with `y = 0`. Resolution is bounded by `config.sample_count`:
    /// a root where the curve touches zero between two grid points without changing
    /// sign is not found.
    pub fn x_intercepts(&self, interval: Interval, config: &AnalysisConfig) -> Vec<Point> {
        if !interval.is_finite() {
            return Vec::new();
        }
        let mut roots: Vec<Real> = Vec::new();
        let mut previous: Option<(Real, Real)> = None;
        let mut samples = 0usize;

        for x in interval.grid(config.sample_count) {
            samples += 1;
            let current = self.eval(x).ok().map(|y| (x, y));
            if current.is_some_and(|(_, y)| y == 0.0) {
                roots.push(x);
            }
            if let (Some(left), Some(right)) = (previous, current) {
                if let Some(root) = self.refine_crossing(left, right, config) {
                    roots.push(root);
                }
            }
            previous = current;
        }

        roots.sort_by(|a, b| a.total_cmp(b));
        roots.dedup_by(|next, kept| (*next - *kept).abs() <= config.tolerance);
        debug!(
            expression = self.source(),
            samples,
            roots = roots.len(),
            "x-intercepts found"
        );
        roots.into_iter().map(|x| Point::new(x, 0.0)).collect()
    }

    // Bisects a strict sign change between two neighbouring defined samples
    fn refine_crossing(
        &self,
        (xa, ya): (Real, Real),
        (xb, yb): (Real, Real),
        config: &AnalysisConfig,
    ) -> Option<Real> {
        let crosses = (ya < 0.0 && yb > 0.0) || (ya > 0.0 && yb < 0.0);
        if !crosses {
            return None;
        }
        let root = match bisect(|x| self.eval(x), xa, xb, config.tolerance, config.max_iterations) {
            Ok(root) => root,
            Err(failure) => {
                trace!(a = xa, b = xb, %failure, "bracket dropped");
                return None;
            }
        };
        let bound = ya.abs().max(yb.abs());
        match self.eval(root) {
            Ok(residual) if residual.abs() <= bound => Some(root),
            Ok(residual) => {
                warn!(
                    expression = self.source(),
                    x = root,
                    residual,
                    "sign change at a pole, not a root"
                );
                None
            }
            Err(reason) => {
                trace!(x = root, %reason, "refined root undefined");
                None
            }
        }
    }

    /// The point where the curve crosses the y-axis, if the formula is defined at 0.
    pub fn y_intercept(&self) -> Option<Point> {
        self.eval(0.0).ok().map(|y| Point::new(0.0, y))
    }
}

/// X-intercepts of `expression` inside `interval`, with default settings.
///
/// # Examples
///
/// ```
/// use graph_eval::{Interval, find_x_intercepts};
///
/// let roots = find_x_intercepts("x^2 - 4", Interval::new(-5.0, 5.0)).unwrap();
/// assert_eq!(roots.len(), 2);
/// assert!((roots[0].x + 2.0).abs() < 1e-6);
/// assert!((roots[1].x - 2.0).abs() < 1e-6);
/// ```
pub fn find_x_intercepts(expression: &str, interval: Interval) -> Result<Vec<Point>, ParseError> {
    find_x_intercepts_with(expression, interval, &AnalysisConfig::default())
}

/// X-intercepts of `expression` inside `interval`.
pub fn find_x_intercepts_with(
    expression: &str,
    interval: Interval,
    config: &AnalysisConfig,
) -> Result<Vec<Point>, ParseError> {
    Ok(Expression::parse(expression)?.x_intercepts(interval, config))
}

/// The y-intercept of `expression`, or `None` when it is undefined at `x = 0`.
///
/// # Examples
///
/// ```
/// use graph_eval::{Point, find_y_intercept};
///
/// assert_eq!(find_y_intercept("x^2 - 4").unwrap(), Some(Point::new(0.0, -4.0)));
/// assert_eq!(find_y_intercept("1/x").unwrap(), None);
/// ```
pub fn find_y_intercept(expression: &str) -> Result<Option<Point>, ParseError> {
    Ok(Expression::parse(expression)?.y_intercept())
}
