//! Heuristic detection of where a formula is undefined.
//!
//! The analysis looks for four idioms applied directly to the free variable:
//! `sqrt(x)`, a logarithm of `x`, a division by `x` and `tan(x)`. Compound arguments
//! such as `sqrt(x - 3)` or `1/(x - 1)` are not analysed, so the result can both miss
//! and over-report restrictions. It is meant for display hints; sampling and search
//! rely on evaluation failures instead.

use crate::Real;
use crate::config::AnalysisConfig;
use crate::error::ParseError;
use crate::functions::LOGARITHMS;
use crate::resolve::Expression;
use crate::types::{AstExpr, BinaryOp, DomainRestriction};
use bitflags::bitflags;
use tracing::debug;

bitflags! {
    /// Domain idioms found in a formula.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DomainHints: u8 {
        /// `sqrt(x)`: the variable must be non-negative.
        const SQRT_OF_VARIABLE = 0b0001;
        /// `ln(x)`, `log(x)`, `log10(x)` or `log2(x)`: the variable must be positive.
        const LOG_OF_VARIABLE = 0b0010;
        /// `… / x`: zero is excluded.
        const DIVISION_BY_VARIABLE = 0b0100;
        /// `tan(x)`: odd multiples of π/2 are excluded.
        const TAN_OF_VARIABLE = 0b1000;
    }
}

/// Collects the domain idioms that appear anywhere in `ast`.
pub fn detect_hints(ast: &AstExpr, variable: &str) -> DomainHints {
    let mut hints = DomainHints::empty();
    visit(ast, variable, &mut hints);
    hints
}

fn visit(ast: &AstExpr, variable: &str, hints: &mut DomainHints) {
    match ast {
        AstExpr::Constant(_) | AstExpr::Variable(_) => {}
        AstExpr::Neg(operand) => visit(operand, variable, hints),
        AstExpr::Binary { op, left, right } => {
            if *op == BinaryOp::Div && right.is_variable(variable) {
                hints.insert(DomainHints::DIVISION_BY_VARIABLE);
            }
            visit(left, variable, hints);
            visit(right, variable, hints);
        }
        AstExpr::Function { name, arg } => {
            if arg.is_variable(variable) {
                match name.as_str() {
                    "sqrt" => hints.insert(DomainHints::SQRT_OF_VARIABLE),
                    "tan" => hints.insert(DomainHints::TAN_OF_VARIABLE),
                    log if LOGARITHMS.contains(&log) => hints.insert(DomainHints::LOG_OF_VARIABLE),
                    _ => {}
                }
            }
            visit(arg, variable, hints);
        }
    }
}

/// Turns detected idioms into bounds and excluded values.
pub fn restrictions_from_hints(hints: DomainHints, config: &AnalysisConfig) -> DomainRestriction {
    let mut restriction = DomainRestriction::default();

    if hints.contains(DomainHints::LOG_OF_VARIABLE) {
        restriction.lower = Some(config.log_epsilon);
    } else if hints.contains(DomainHints::SQRT_OF_VARIABLE) {
        restriction.lower = Some(0.0);
    }

    if hints.contains(DomainHints::DIVISION_BY_VARIABLE) {
        restriction.excluded.push(0.0);
    }

    if hints.contains(DomainHints::TAN_OF_VARIABLE) {
        restriction
            .excluded
            .extend(tan_poles(config.tan_exclusion_limit));
    }

    restriction.excluded.sort_by(|a, b| a.total_cmp(b));
    restriction.excluded.dedup();
    restriction
}

/// Most `tan(x)` poles listed on each side of zero.
pub const MAX_TAN_POLES: usize = 1000;

/// Odd multiples of π/2 with magnitude at most `limit`, nearest first, at most
/// [`MAX_TAN_POLES`] per side. A NaN or negative limit lists none.
fn tan_poles(limit: Real) -> Vec<Real> {
    let half_pi = crate::constants::PI / 2.0;
    let mut poles = Vec::new();
    if limit.is_nan() {
        return poles;
    }
    for k in 0..MAX_TAN_POLES {
        let pole = (2 * k + 1) as Real * half_pi;
        if pole > limit {
            break;
        }
        poles.push(pole);
        poles.push(-pole);
    }
    poles
}

impl Expression {
    /// The domain idioms found in this formula.
    pub fn domain_hints(&self) -> DomainHints {
        detect_hints(self.ast(), self.variable())
    }

    /// Heuristic domain restrictions of this formula.
    pub fn domain(&self, config: &AnalysisConfig) -> DomainRestriction {
        let hints = self.domain_hints();
        let restriction = restrictions_from_hints(hints, config);
        debug!(
            expression = self.source(),
            ?hints,
            excluded = restriction.excluded.len(),
            "domain analysed"
        );
        restriction
    }
}

/// Reports where `expression` is undefined, with default settings.
///
/// # Examples
///
/// ```
/// use graph_eval::domain_restrictions;
///
/// assert_eq!(domain_restrictions("sqrt(x)").unwrap().lower, Some(0.0));
/// assert_eq!(domain_restrictions("1/x").unwrap().excluded, vec![0.0]);
/// assert!(domain_restrictions("x^2").unwrap().is_empty());
/// ```
pub fn domain_restrictions(expression: &str) -> Result<DomainRestriction, ParseError> {
    domain_restrictions_with(expression, &AnalysisConfig::default())
}

/// Reports where `expression` is undefined.
pub fn domain_restrictions_with(
    expression: &str,
    config: &AnalysisConfig,
) -> Result<DomainRestriction, ParseError> {
    Ok(Expression::parse(expression)?.domain(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    fn hints(expr: &str) -> DomainHints {
        Expression::parse(expr).unwrap().domain_hints()
    }

    #[test]
    fn test_detects_idioms() {
        assert_eq!(hints("sqrt(x)"), DomainHints::SQRT_OF_VARIABLE);
        assert_eq!(hints("2 + ln(x)"), DomainHints::LOG_OF_VARIABLE);
        assert_eq!(hints("log2 x"), DomainHints::LOG_OF_VARIABLE);
        assert_eq!(hints("3/x"), DomainHints::DIVISION_BY_VARIABLE);
        assert_eq!(hints("tan(x)"), DomainHints::TAN_OF_VARIABLE);
        assert_eq!(
            hints("sqrt(x)/x"),
            DomainHints::SQRT_OF_VARIABLE | DomainHints::DIVISION_BY_VARIABLE
        );
        assert_eq!(hints("x^2 + 1"), DomainHints::empty());
    }

    #[test]
    fn test_compound_arguments_are_not_analysed() {
        assert_eq!(hints("sqrt(x - 3)"), DomainHints::empty());
        assert_eq!(hints("1/(x + 1)"), DomainHints::empty());
        assert_eq!(hints("sin(sqrt(x))"), DomainHints::SQRT_OF_VARIABLE);
    }

    #[test]
    fn test_restrictions() {
        let sqrt = domain_restrictions("sqrt(x)").unwrap();
        assert_eq!(sqrt.lower, Some(0.0));
        assert!(sqrt.excluded.is_empty());

        let log = domain_restrictions("ln(x)").unwrap();
        assert_eq!(log.lower, Some(1e-10));

        let both = domain_restrictions("sqrt(x) + ln(x)").unwrap();
        assert_eq!(both.lower, Some(1e-10));

        let div = domain_restrictions("1/x").unwrap();
        assert_eq!(div.lower, None);
        assert_eq!(div.excluded, vec![0.0]);
        assert!(!div.allows(0.0));
        assert!(div.allows(0.5));
    }

    #[test]
    fn test_tan_poles_are_sorted_and_bounded() {
        let tan = domain_restrictions("tan(x)").unwrap();
        let half_pi = crate::constants::PI / 2.0;
        assert!(!tan.excluded.is_empty());
        assert!(tan.excluded.iter().all(|v| v.abs() <= 100.0));
        assert!(tan.excluded.windows(2).all(|w| w[0] < w[1]));
        assert!(tan.excluded.iter().any(|&v| (v - half_pi).abs() < 1e-12));
        // 32 odd multiples of π/2 on each side of zero
        assert_eq!(tan.excluded.len(), 64);
        assert_approx_eq!(tan.excluded[0], -63.0 * half_pi);
    }

    #[test]
    fn test_custom_tan_limit() {
        let config = AnalysisConfig {
            tan_exclusion_limit: 5.0,
            ..AnalysisConfig::default()
        };
        let tan = domain_restrictions_with("tan(x)/x", &config).unwrap();
        let half_pi = crate::constants::PI / 2.0;
        assert_eq!(tan.excluded.len(), 5);
        assert_approx_eq!(tan.excluded[0], -3.0 * half_pi);
        assert_eq!(tan.excluded[2], 0.0);
    }

    #[test]
    fn test_tan_pole_count_is_capped() {
        for limit in [1e7, Real::INFINITY, Real::MAX] {
            let config = AnalysisConfig {
                tan_exclusion_limit: limit,
                ..AnalysisConfig::default()
            };
            let tan = domain_restrictions_with("tan(x)", &config).unwrap();
            assert_eq!(tan.excluded.len(), 2 * MAX_TAN_POLES);
            assert!(tan.excluded.windows(2).all(|w| w[0] < w[1]));
        }

        for limit in [Real::NAN, -1.0, 1.0] {
            let config = AnalysisConfig {
                tan_exclusion_limit: limit,
                ..AnalysisConfig::default()
            };
            let tan = domain_restrictions_with("tan(x)", &config).unwrap();
            assert!(tan.excluded.is_empty());
        }
    }

    #[test]
    fn test_parse_failure_is_reported() {
        assert!(domain_restrictions("sqrt(").is_err());
        assert!(domain_restrictions("").is_err());
    }
}
