//! Tree-walking evaluation of resolved expressions.
//!
//! Arithmetic follows IEEE-754 with two exceptions that matter for plotting: a zero
//! divisor is reported as [`EvaluationError::DivisionByZero`] instead of producing an
//! infinity, and any NaN or infinity produced by an operator or a function is reported
//! as [`EvaluationError::NonFinite`] naming where it came from.

use crate::Real;
use crate::context::NativeFunction;
use crate::error::EvaluationError;
use crate::functions;
use crate::resolve::Node;
use crate::types::BinaryOp;

/// Evaluates `node` with the free variable bound to `x`.
pub(crate) fn eval_node(node: &Node, x: Real) -> Result<Real, EvaluationError> {
    match node {
        Node::Constant(value) => Ok(*value),
        Node::Variable => Ok(x),
        Node::Neg(operand) => Ok(-eval_node(operand, x)?),
        Node::Binary { op, left, right } => {
            let a = eval_node(left, x)?;
            let b = eval_node(right, x)?;
            apply_binary(*op, a, b)
        }
        Node::Call { function, arg } => {
            let value = eval_node(arg, x)?;
            apply_function(function, value)
        }
    }
}

/// Applies a binary operator to two finite operands.
pub(crate) fn apply_binary(op: BinaryOp, a: Real, b: Real) -> Result<Real, EvaluationError> {
    let value = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(EvaluationError::DivisionByZero);
            }
            a / b
        }
        BinaryOp::Pow => functions::pow(a, b),
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvaluationError::non_finite(op.symbol()))
    }
}

/// Calls `function` and rejects results outside the real line.
pub(crate) fn apply_function(function: &NativeFunction, arg: Real) -> Result<Real, EvaluationError> {
    let value = function.call(arg);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvaluationError::non_finite(&function.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;
    use crate::resolve::Expression;

    fn eval(expr: &str, x: Real) -> Result<Real, EvaluationError> {
        Expression::parse(expr).unwrap().eval(x)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval("2 + 3 * 4", 0.0), Ok(14.0));
        assert_eq!(eval("(2 + 3) * 4", 0.0), Ok(20.0));
        assert_eq!(eval("x^2 + 2x + 1", 3.0), Ok(16.0));
        assert_eq!(eval("-x^2", 3.0), Ok(-9.0));
        assert_eq!(eval("2^3^2", 0.0), Ok(512.0));
        assert_eq!(eval("10 - 4 - 3", 0.0), Ok(3.0));
        assert_eq!(eval("x**2", 4.0), Ok(16.0));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("1/x", 0.0), Err(EvaluationError::DivisionByZero));
        assert_eq!(eval("x/(x - 1)", 1.0), Err(EvaluationError::DivisionByZero));
        assert_eq!(eval("0/x", 0.0), Err(EvaluationError::DivisionByZero));
        assert_eq!(eval("1/x", 2.0), Ok(0.5));
    }

    #[test]
    fn test_domain_violations_name_their_origin() {
        let origin = |expr: &str, x: Real| match eval(expr, x) {
            Err(EvaluationError::NonFinite { origin }) => origin,
            other => panic!("expected non-finite error, got {:?}", other),
        };
        assert_eq!(origin("sqrt(x)", -1.0), "sqrt");
        assert_eq!(origin("ln(x)", 0.0), "ln");
        assert_eq!(origin("log(x)", -2.0), "log");
        assert_eq!(origin("x^0.5", -4.0), "^");
        assert_eq!(origin("exp(x)", 1000.0), "exp");
        assert_eq!(origin("x * x", Real::MAX / 2.0), "*");
    }

    #[test]
    fn test_functions() {
        assert_approx_eq!(eval("sin(x)", crate::constants::PI / 2.0).unwrap(), 1.0);
        assert_approx_eq!(eval("cos(0)", 0.0).unwrap(), 1.0);
        assert_approx_eq!(eval("ln(e)", 0.0).unwrap(), 1.0);
        assert_approx_eq!(eval("log(1000)", 0.0).unwrap(), 3.0);
        assert_approx_eq!(eval("abs(x)", -3.5).unwrap(), 3.5);
        assert_approx_eq!(eval("sqrt(x)", 2.25).unwrap(), 1.5);
        assert!(eval("(-8)^(1/3)", 0.0).is_err());
        assert_approx_eq!(eval("(-2)^3", 0.0).unwrap(), -8.0);
    }

    #[test]
    fn test_zero_to_the_zero() {
        assert_eq!(eval("x^0", 0.0), Ok(1.0));
    }
}
