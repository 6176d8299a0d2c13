#![doc = r#"
# graph-eval

Expression evaluation and numerical analysis engine for single-variable function plotting.

## Overview

graph-eval takes a formula in one free variable (conventionally `x`) as typed by a user,
compiles it once, and answers the questions a graphing calculator asks about it:

- the value at a point,
- where the formula is (heuristically) undefined,
- a uniform sample of points for drawing the curve,
- the x-intercepts, the y-intercept and local extrema over a viewport.

Formulas are tokenized, normalized (implicit multiplication, `π`, `√`, `²`...),
parsed with a Pratt parser into an explicit AST and bound against a symbol table.
Evaluation walks the tree; there is no code execution path and no textual rewriting.

## Quick Start

```rust
use graph_eval::{Interval, evaluate, find_x_intercepts};

let y = evaluate("2x^2 + 3(x - 1)", 2.0).unwrap();
assert_eq!(y, 11.0);

let roots = find_x_intercepts("x^2 - 4", Interval::new(-5.0, 5.0)).unwrap();
assert_eq!(roots.len(), 2);
assert!((roots[0].x + 2.0).abs() < 1e-6);
assert!((roots[1].x - 2.0).abs() < 1e-6);
```

## Undefined Points

Points where the formula leaves the real numbers are reported as typed errors
instead of `NaN` or infinity:

```rust
use graph_eval::{EvaluationError, ExprError, evaluate};

assert!(matches!(
    evaluate("1/x", 0.0),
    Err(ExprError::Evaluation(EvaluationError::DivisionByZero))
));
assert!(matches!(
    evaluate("sqrt(x)", -1.0),
    Err(ExprError::Evaluation(EvaluationError::NonFinite { .. }))
));
```

Sampling and search operations drop such points and keep going; only a
[`ParseError`] on the formula itself is returned to the caller.

## Compiling Once

The free functions compile the formula on every call. Hosts that evaluate the same
formula repeatedly can compile an [`Expression`] themselves:

```rust
use graph_eval::{AnalysisConfig, Expression, Interval};

let expr = Expression::parse("sin(x) / x").unwrap();
let config = AnalysisConfig::default();
let points = expr.sample(Interval::new(-10.0, 10.0), 200);
let extrema = expr.critical_points(Interval::new(-10.0, 10.0), &config);
assert!(!points.is_empty());
assert!(!extrema.is_empty());
```

## Custom Symbols

```rust
use graph_eval::{Expression, SymbolTable};

let mut symbols = SymbolTable::new();
symbols.register_constant("g", 9.81);
symbols.register_function("sq", |v| v * v);

let expr = Expression::parse_with("sq(x) * g", &symbols).unwrap();
assert_eq!(expr.eval(2.0).unwrap(), 4.0 * 9.81);
```

## Supported Grammar

| Precedence | Operators              | Associativity |
|------------|------------------------|---------------|
| 9          | `+` `-`                | Left          |
| 10         | `*` `/`, implicit `*`  | Left          |
| 14         | unary `+` `-`          | Right         |
| 15         | `^` `**`               | Right         |
| 16         | call without `( )`     | Right         |

### Calls Without Parentheses

A function name directly followed by an operand is a call on that single operand
and binds tighter than any operator, `^` included. This differs from the usual
handwritten reading of some formulas:

```rust
use graph_eval::evaluate;

let x = 1.5;
// `sin 2x` is `sin(2) * x`, not `sin(2x)`
assert_eq!(evaluate("sin 2x", x).unwrap(), evaluate("sin(2) * x", x).unwrap());
// `sin x^2` is `(sin x)^2`, not `sin(x^2)`
assert_eq!(evaluate("sin x^2", x).unwrap(), evaluate("(sin(x))^2", x).unwrap());
```

Write the argument in parentheses, as in `sin(2x)` or `sin(x^2)`, for the other reading.

Built-in functions: `sin`, `cos`, `tan`, `asin`, `acos`, `atan`, `sinh`, `cosh`, `tanh`,
`sqrt`, `cbrt`, `abs`, `exp`, `ln`, `log` (base 10), `log10`, `log2`, `floor`, `ceil`,
`round`, `sign`. Built-in constants: `pi`, `e`, `tau`.

## Feature Flags

- `f32`: use 32-bit floating point for calculations (64-bit is the default)
"#]

pub mod analysis;
pub mod config;
pub mod context;
pub mod domain;
pub mod engine;
pub mod error;
pub mod eval;
pub mod extrema;
pub mod functions;
pub mod lexer;
pub mod normalize;
pub mod resolve;
pub mod roots;
pub mod sampler;
pub mod types;

pub use analysis::{FunctionAnalysis, analyze};
pub use config::AnalysisConfig;
pub use context::SymbolTable;
pub use domain::{DomainHints, domain_restrictions, domain_restrictions_with};
pub use engine::{evaluate, is_valid, is_valid_with, parse_expression, parse_expression_with};
pub use error::{EvaluationError, ExprError, ParseError, SearchFailure};
pub use extrema::{find_critical_points, find_critical_points_with};
pub use resolve::Expression;
pub use roots::{bisect, find_x_intercepts, find_x_intercepts_with, find_y_intercept};
pub use sampler::generate_points;
pub use types::{CriticalKind, CriticalPoint, DomainRestriction, Interval, Point};

/// Define the floating-point type based on feature flags
#[cfg(feature = "f32")]
pub type Real = f32;

#[cfg(not(feature = "f32"))]
pub type Real = f64;

pub mod constants {
    use super::Real;

    #[cfg(feature = "f32")]
    pub const PI: Real = core::f32::consts::PI;
    #[cfg(feature = "f32")]
    pub const E: Real = core::f32::consts::E;
    #[cfg(feature = "f32")]
    pub const TAU: Real = core::f32::consts::TAU;
    #[cfg(feature = "f32")]
    pub const TEST_PRECISION: Real = 1e-5;

    #[cfg(not(feature = "f32"))]
    pub const PI: Real = core::f64::consts::PI;
    #[cfg(not(feature = "f32"))]
    pub const E: Real = core::f64::consts::E;
    #[cfg(not(feature = "f32"))]
    pub const TAU: Real = core::f64::consts::TAU;
    #[cfg(not(feature = "f32"))]
    pub const TEST_PRECISION: Real = 1e-10;
}

/// Utility macro to check if two floating point values are approximately equal
/// within a specified epsilon. Supports optional format arguments like assert_eq!.
#[macro_export]
macro_rules! assert_approx_eq {
    // assert_approx_eq!(left, right) -> use default epsilon
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($left, $right, $crate::constants::TEST_PRECISION)
    };
    // assert_approx_eq!(left, right, epsilon)
    ($left:expr, $right:expr, $epsilon:expr $(,)?) => {{
        let left_val = $left;
        let right_val = $right;
        let eps = $epsilon;
        assert!(
            (left_val - right_val).abs() < eps,
            "assertion failed: `(left ≈ right)` (left: `{}`, right: `{}`, epsilon: `{}`)",
            left_val,
            right_val,
            eps
        );
    }};
    // assert_approx_eq!(left, right, epsilon, "format message with args", args...)
    ($left:expr, $right:expr, $epsilon:expr, $($arg:tt)+) => {{
        let left_val = $left;
        let right_val = $right;
        let eps = $epsilon;
        assert!((left_val - right_val).abs() < eps, $($arg)+);
    }};
}
