//! One-call analysis of a formula over a plot window.

use crate::config::AnalysisConfig;
use crate::error::ParseError;
use crate::resolve::Expression;
use crate::types::{CriticalPoint, DomainRestriction, Interval, Point};
use serde::Serialize;
use tracing::debug;

/// Everything a plot needs about one formula, computed from a single compilation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FunctionAnalysis {
    pub expression: String,
    pub domain: DomainRestriction,
    /// Curve samples, `config.sample_count` of them minus the undefined ones.
    pub points: Vec<Point>,
    pub x_intercepts: Vec<Point>,
    pub y_intercept: Option<Point>,
    pub critical_points: Vec<CriticalPoint>,
}

impl Expression {
    /// Runs every analysis on this formula over `interval`.
    pub fn analyze(&self, interval: Interval, config: &AnalysisConfig) -> FunctionAnalysis {
        let analysis = FunctionAnalysis {
            expression: self.source().to_string(),
            domain: self.domain(config),
            points: self.sample(interval, config.sample_count),
            x_intercepts: self.x_intercepts(interval, config),
            y_intercept: self.y_intercept(),
            critical_points: self.critical_points(interval, config),
        };
        debug!(
            expression = self.source(),
            min = interval.min,
            max = interval.max,
            "analysis complete"
        );
        analysis
    }
}

/// Compiles `expression` once and runs every analysis over `interval`.
///
/// # Examples
///
/// ```
/// use graph_eval::{AnalysisConfig, Interval, analyze};
///
/// let report = analyze("x^2 - 4", Interval::new(-5.0, 5.0), &AnalysisConfig::default()).unwrap();
/// assert_eq!(report.x_intercepts.len(), 2);
/// assert_eq!(report.y_intercept.unwrap().y, -4.0);
/// assert_eq!(report.critical_points.len(), 1);
/// ```
pub fn analyze(
    expression: &str,
    interval: Interval,
    config: &AnalysisConfig,
) -> Result<FunctionAnalysis, ParseError> {
    Ok(Expression::parse(expression)?.analyze(interval, config))
}
