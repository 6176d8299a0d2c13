//! Type definitions for the expression parser and the analysis results.
//!
//! This module contains the core data structures used throughout the crate: the
//! Abstract Syntax Tree (AST) produced by the parser, token kinds produced by the
//! lexer, and the plain data values handed back to the plotting UI.

use crate::Real;
use serde::{Deserialize, Serialize};

/// Abstract Syntax Tree (AST) node representing a parsed formula.
///
/// Identifiers are still unresolved names at this stage; binding them to the
/// free variable, constants and functions is the job of [`crate::resolve`].
#[derive(Clone, Debug, PartialEq)]
pub enum AstExpr {
    /// A literal numerical value.
    ///
    /// Examples: `3.14`, `42`, `.5`
    Constant(Real),

    /// A named value: the free variable or a constant.
    ///
    /// Examples: `x`, `pi`, `e`
    Variable(String),

    /// Unary negation. Unary plus is dropped by the parser.
    Neg(Box<AstExpr>),

    /// A binary arithmetic operation.
    Binary {
        op: BinaryOp,
        left: Box<AstExpr>,
        right: Box<AstExpr>,
    },

    /// A call of a named unary function.
    ///
    /// Examples: `sin(x)`, `sqrt x`, `log(2x + 1)`
    Function { name: String, arg: Box<AstExpr> },
}

impl AstExpr {
    pub(crate) fn binary(op: BinaryOp, left: AstExpr, right: AstExpr) -> Self {
        AstExpr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// True when this node is exactly the identifier `name`.
    pub fn is_variable(&self, name: &str) -> bool {
        matches!(self, AstExpr::Variable(v) if v == name)
    }
}

/// Binary arithmetic operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }
}

impl core::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Classifies the kind of token produced during lexical analysis.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    /// A numerical literal.
    Number,

    /// An identifier: variable, constant or function name.
    Variable,

    /// One of `+ - * / ^ **`.
    Operator,

    /// An opening parenthesis.
    Open,

    /// A closing parenthesis.
    Close,

    /// An error token representing invalid input.
    Error,
}

/// A sampled or computed point on the curve. Both coordinates are finite.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: Real,
    pub y: Real,
}

impl Point {
    pub fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }
}

/// Whether a critical point is a local maximum or minimum.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriticalKind {
    Maximum,
    Minimum,
}

/// A local extremum found by comparing a sample with its grid neighbours.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CriticalPoint {
    #[serde(flatten)]
    pub point: Point,
    pub kind: CriticalKind,
}

/// Where a formula is undefined, as far as the heuristics can tell.
///
/// Advisory only: the evaluator does not enforce it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainRestriction {
    pub lower: Option<Real>,
    pub upper: Option<Real>,
    /// Isolated excluded values, sorted ascending.
    pub excluded: Vec<Real>,
}

impl DomainRestriction {
    /// No restriction was detected.
    pub fn is_empty(&self) -> bool {
        self.lower.is_none() && self.upper.is_none() && self.excluded.is_empty()
    }

    /// True when `x` lies inside the bounds and is not an excluded value.
    pub fn allows(&self, x: Real) -> bool {
        if self.lower.is_some_and(|lo| x < lo) || self.upper.is_some_and(|hi| x > hi) {
            return false;
        }
        !self.excluded.contains(&x)
    }
}

/// A closed range `[min, max]` of the free variable, typically the plot viewport.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: Real,
    pub max: Real,
}

impl Interval {
    /// Creates an interval from two bounds given in either order.
    pub fn new(a: Real, b: Real) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn width(&self) -> Real {
        let (min, max) = self.bounds();
        max - min
    }

    // The bounds in increasing order; the fields are public and may arrive swapped
    fn bounds(&self) -> (Real, Real) {
        if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        }
    }

    /// Both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// The uniform sampling grid of `count` positions, inclusive of both ends.
    ///
    /// The grid always ascends, even when `min` and `max` were set in reverse.
    /// `count == 1` yields only the lower bound; `count == 0` yields nothing.
    pub fn grid(&self, count: usize) -> impl Iterator<Item = Real> + use<> {
        let (min, max) = self.bounds();
        let last = count.saturating_sub(1);
        (0..count).map(move |i| {
            if last == 0 || i == 0 {
                min
            } else if i == last {
                max
            } else {
                min + (max - min) * (i as Real) / (last as Real)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_orders_bounds() {
        let iv = Interval::new(3.0, -1.0);
        assert_eq!(iv.min, -1.0);
        assert_eq!(iv.max, 3.0);
        assert_eq!(iv.width(), 4.0);
    }

    #[test]
    fn test_grid_is_inclusive_and_uniform() {
        let iv = Interval::new(-5.0, 5.0);
        let grid: Vec<Real> = iv.grid(11).collect();
        assert_eq!(grid.len(), 11);
        assert_eq!(grid[0], -5.0);
        assert_eq!(grid[5], 0.0);
        assert_eq!(grid[10], 5.0);
        for pair in grid.windows(2) {
            assert!((pair[1] - pair[0] - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_grid_degenerate_counts() {
        let iv = Interval::new(1.0, 2.0);
        assert_eq!(iv.grid(0).count(), 0);
        assert_eq!(iv.grid(1).collect::<Vec<_>>(), vec![1.0]);
        assert_eq!(iv.grid(2).collect::<Vec<_>>(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_swapped_fields_still_ascend() {
        let iv = Interval { min: 1.0, max: -1.0 };
        assert_eq!(iv.grid(3).collect::<Vec<_>>(), vec![-1.0, 0.0, 1.0]);
        assert_eq!(iv.grid(1).collect::<Vec<_>>(), vec![-1.0]);
        assert_eq!(iv.width(), 2.0);

        let iv: Interval = serde_json::from_str(r#"{ "min": 5.0, "max": -5.0 }"#).unwrap();
        let grid: Vec<Real> = iv.grid(11).collect();
        assert_eq!(grid.first(), Some(&-5.0));
        assert_eq!(grid.last(), Some(&5.0));
    }

    #[test]
    fn test_domain_restriction_allows() {
        let r = DomainRestriction {
            lower: Some(0.0),
            upper: None,
            excluded: vec![1.0],
        };
        assert!(!r.is_empty());
        assert!(!r.allows(-0.5));
        assert!(r.allows(0.0));
        assert!(!r.allows(1.0));
        assert!(r.allows(10.0));
        assert!(DomainRestriction::default().is_empty());
    }
}
