//! Binding of parsed formulas against a symbol table.
//!
//! The resolver turns an [`AstExpr`], whose identifiers are plain names, into the tree
//! the evaluator walks: the free variable becomes a variable slot, constants become
//! their values and function names become the function implementations. Every name is
//! checked here, once, so an unknown function is reported before any sampling starts.
//!
//! Sub-trees that do not depend on the variable are folded to numbers innermost first,
//! e.g. `sin(pi/2) * x` is evaluated as `1 * x`. A constant sub-tree that is undefined
//! (such as `sqrt(-1)`) is left in place so that evaluation reports it.

use crate::Real;
use crate::context::{NativeFunction, SymbolTable};
use crate::engine::parse_expression_with;
use crate::error::{EvaluationError, ParseError};
use crate::eval::{apply_binary, apply_function, eval_node};
use crate::types::{AstExpr, BinaryOp};
use std::fmt;

/// Resolved expression tree.
#[derive(Clone, Debug)]
pub(crate) enum Node {
    Constant(Real),
    Variable,
    Neg(Box<Node>),
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Call {
        function: NativeFunction,
        arg: Box<Node>,
    },
}

/// A compiled formula in one free variable.
///
/// Compiling validates every name against the symbol table; evaluation afterwards can
/// only fail for values of the variable where the formula is undefined.
///
/// # Examples
///
/// ```
/// use graph_eval::Expression;
///
/// let expr = Expression::parse("3x^2 - 2x + 1").unwrap();
/// assert_eq!(expr.eval(2.0).unwrap(), 9.0);
/// assert_eq!(expr.source(), "3x^2 - 2x + 1");
/// ```
#[derive(Clone)]
pub struct Expression {
    source: String,
    variable: String,
    ast: AstExpr,
    root: Node,
}

impl Expression {
    /// Compiles `text` against the default symbol table (free variable `x`).
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::parse_with(text, &SymbolTable::new())
    }

    /// Compiles `text` against `symbols`.
    pub fn parse_with(text: &str, symbols: &SymbolTable) -> Result<Self, ParseError> {
        let ast = parse_expression_with(text, symbols)?;
        let root = resolve(&ast, symbols)?;
        Ok(Self {
            source: text.to_string(),
            variable: symbols.variable().to_string(),
            ast,
            root,
        })
    }

    /// The formula text this expression was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Name of the free variable.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The parsed, unresolved syntax tree.
    pub fn ast(&self) -> &AstExpr {
        &self.ast
    }

    /// True when the formula does not depend on the variable.
    pub fn is_constant(&self) -> bool {
        matches!(self.root, Node::Constant(_))
    }

    /// Evaluates the formula with the free variable bound to `x`.
    ///
    /// The result is always finite; division by zero and values outside a
    /// function's domain are reported as [`EvaluationError`].
    pub fn eval(&self, x: Real) -> Result<Real, EvaluationError> {
        if !x.is_finite() {
            return Err(EvaluationError::non_finite(&self.variable));
        }
        let value = eval_node(&self.root, x)?;
        if !value.is_finite() {
            return Err(EvaluationError::non_finite("result"));
        }
        Ok(value)
    }

    /// True when evaluation succeeds at one or more of `probes`.
    pub(crate) fn is_defined_somewhere(&self, probes: &[Real]) -> bool {
        probes.iter().any(|&x| self.eval(x).is_ok())
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expression")
            .field("source", &self.source)
            .field("variable", &self.variable)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Binds every identifier in `ast` and folds constant sub-trees.
pub(crate) fn resolve(ast: &AstExpr, symbols: &SymbolTable) -> Result<Node, ParseError> {
    match ast {
        AstExpr::Constant(value) => Ok(Node::Constant(*value)),
        AstExpr::Variable(name) => resolve_name(name, symbols),
        AstExpr::Neg(operand) => {
            let operand = resolve(operand, symbols)?;
            Ok(match operand {
                Node::Constant(v) => Node::Constant(-v),
                other => Node::Neg(Box::new(other)),
            })
        }
        AstExpr::Binary { op, left, right } => {
            let left = resolve(left, symbols)?;
            let right = resolve(right, symbols)?;
            if let (Node::Constant(a), Node::Constant(b)) = (&left, &right) {
                if let Ok(value) = apply_binary(*op, *a, *b) {
                    return Ok(Node::Constant(value));
                }
            }
            Ok(Node::Binary {
                op: *op,
                left: Box::new(left),
                right: Box::new(right),
            })
        }
        AstExpr::Function { name, arg } => {
            let Some(function) = symbols.function(name) else {
                return Err(ParseError::UnknownFunction { name: name.clone() });
            };
            let arg = resolve(arg, symbols)?;
            if let Node::Constant(v) = arg {
                if let Ok(value) = apply_function(function, v) {
                    return Ok(Node::Constant(value));
                }
            }
            Ok(Node::Call {
                function: function.clone(),
                arg: Box::new(arg),
            })
        }
    }
}

fn resolve_name(name: &str, symbols: &SymbolTable) -> Result<Node, ParseError> {
    if name == symbols.variable() {
        return Ok(Node::Variable);
    }
    if let Some(value) = symbols.constant(name) {
        return Ok(Node::Constant(value));
    }
    if symbols.is_function(name) {
        return Err(ParseError::MissingArgument {
            name: name.to_string(),
        });
    }
    Err(ParseError::UnknownVariable {
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_constant_folding() {
        let expr = Expression::parse("sin(pi/2) + 2^3").unwrap();
        assert!(expr.is_constant());
        assert_approx_eq!(expr.eval(0.0).unwrap(), 9.0);

        let expr = Expression::parse("sqrt(16) * x").unwrap();
        assert!(!expr.is_constant());
        assert!(matches!(
            &expr.root,
            Node::Binary { left, .. } if matches!(**left, Node::Constant(v) if v == 4.0)
        ));
    }

    #[test]
    fn test_undefined_constant_is_not_folded() {
        let expr = Expression::parse("sqrt(-1) + x").unwrap();
        assert!(matches!(
            expr.eval(1.0),
            Err(EvaluationError::NonFinite { ref origin }) if origin == "sqrt"
        ));
        let expr = Expression::parse("1/0").unwrap();
        assert_eq!(expr.eval(1.0), Err(EvaluationError::DivisionByZero));
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(
            Expression::parse("foo(x)").unwrap_err(),
            ParseError::UnknownFunction { name: "foo".into() }
        );
        assert_eq!(
            Expression::parse("y + 1").unwrap_err(),
            ParseError::UnknownVariable { name: "y".into() }
        );
        assert_eq!(
            Expression::parse("y x").unwrap_err(),
            ParseError::UnknownVariable { name: "y".into() }
        );
        assert_eq!(
            Expression::parse("2 y").unwrap_err(),
            ParseError::UnknownVariable { name: "y".into() }
        );
        assert_eq!(
            Expression::parse("sin + 1").unwrap_err(),
            ParseError::MissingArgument { name: "sin".into() }
        );
    }

    #[test]
    fn test_function_names_containing_variable_letter() {
        // `exp` and `max`-like names must not be read as products with x
        let expr = Expression::parse("exp(x)").unwrap();
        assert_approx_eq!(expr.eval(1.0).unwrap(), crate::constants::E);
        let mut symbols = SymbolTable::new();
        symbols.register_function("xmax", |v| v.max(0.0));
        let expr = Expression::parse_with("xmax(x - 1)", &symbols).unwrap();
        assert_eq!(expr.eval(0.0).unwrap(), 0.0);
        assert_eq!(expr.eval(3.0).unwrap(), 2.0);
    }

    #[test]
    fn test_non_finite_variable_value() {
        let expr = Expression::parse("x").unwrap();
        assert!(matches!(
            expr.eval(Real::NAN),
            Err(EvaluationError::NonFinite { ref origin }) if origin == "x"
        ));
        assert!(expr.eval(Real::INFINITY).is_err());
    }

    #[test]
    fn test_custom_variable_name() {
        let symbols = SymbolTable::new().with_variable("t");
        let expr = Expression::parse_with("2t + 1", &symbols).unwrap();
        assert_eq!(expr.variable(), "t");
        assert_eq!(expr.eval(2.0).unwrap(), 5.0);
        assert!(Expression::parse_with("2x", &symbols).is_err());
    }

    #[test]
    fn test_expression_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Expression>();
    }
}
