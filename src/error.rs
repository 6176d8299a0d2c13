//! Error types for expression parsing, evaluation and numerical search.
//!
//! Errors are split by the stage that produces them:
//!
//! - [`ParseError`] is raised once, while compiling formula text, and lets the
//!   caller reject the input outright.
//! - [`EvaluationError`] describes why a single evaluation point is undefined.
//!   Sampling and search algorithms recover from it locally by dropping the point.
//! - [`SearchFailure`] is the expected "nothing found" outcome of a bracketed search.
//!
//! [`ExprError`] unifies the first two for the point evaluation entry points.

use crate::Real;
use thiserror::Error;

/// Result type used by the evaluation entry points.
pub type Result<T> = core::result::Result<T, ExprError>;

/// Error raised while turning formula text into an evaluable expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The input is empty or contains only whitespace.
    #[error("Empty expression")]
    Empty,

    /// The input exceeds the maximum accepted length.
    #[error("Expression too long: {length} characters (maximum is {max})")]
    TooLong { length: usize, max: usize },

    /// A single name or number exceeds the maximum token length.
    #[error("Token too long at position {position}: {length} characters (maximum is {max})")]
    TokenTooLong {
        position: usize,
        length: usize,
        max: usize,
    },

    /// A character that cannot start any token.
    #[error("Unexpected character '{found}' at position {position}")]
    UnexpectedCharacter { position: usize, found: String },

    /// A numeric literal that could not be read, such as `1..2`.
    #[error("Malformed number '{text}' at position {position}")]
    MalformedNumber { position: usize, text: String },

    /// A token that does not fit the grammar where it appears.
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// An opening or closing parenthesis without its partner.
    #[error("Unmatched parenthesis at position {position}: found '{found}'")]
    UnmatchedParenthesis { position: usize, found: String },

    /// Nesting deeper than the parser accepts.
    #[error("Expression too complex: exceeded maximum nesting depth of {0}")]
    RecursionLimit(usize),

    /// A call to a name that is not in the symbol table.
    #[error("Unknown function: '{name}'")]
    UnknownFunction { name: String },

    /// An identifier that is neither the free variable nor a known constant.
    #[error("Unknown variable: '{name}'")]
    UnknownVariable { name: String },

    /// A function name used as a value, e.g. `sin + 1`.
    #[error("Function '{name}' used without an argument")]
    MissingArgument { name: String },
}

/// Reason a single evaluation produced no value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    /// Arithmetic division with a zero divisor.
    #[error("Division by zero")]
    DivisionByZero,

    /// A function, power or the final result was NaN or infinite.
    ///
    /// `origin` names the operation that left the real numbers, e.g. `sqrt`,
    /// `^` or `x` when the bound variable value itself was not finite.
    #[error("Non-finite result from '{origin}'")]
    NonFinite { origin: String },
}

impl EvaluationError {
    pub(crate) fn non_finite(origin: &str) -> Self {
        EvaluationError::NonFinite {
            origin: origin.to_string(),
        }
    }
}

/// Any failure of [`crate::evaluate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

impl ExprError {
    /// True when the expression itself is fine and only this point is undefined.
    pub fn is_point_failure(&self) -> bool {
        matches!(self, ExprError::Evaluation(_))
    }
}

/// Outcome of a bracketed search that found nothing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchFailure {
    /// The bracket endpoints do not have strictly opposite signs.
    #[error("No sign change between {a} and {b}")]
    NoSignChange { a: Real, b: Real },

    /// The function could not be evaluated at a point the search needed.
    #[error("Function undefined at {x}: {reason}")]
    Undefined { x: Real, reason: EvaluationError },

    /// The search interval is empty or has non-finite bounds.
    #[error("Empty or non-finite search interval")]
    EmptyInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(EvaluationError::DivisionByZero.to_string(), "Division by zero");
        assert_eq!(
            EvaluationError::non_finite("sqrt").to_string(),
            "Non-finite result from 'sqrt'"
        );
        assert_eq!(
            ParseError::UnknownFunction { name: "foo".into() }.to_string(),
            "Unknown function: 'foo'"
        );
    }

    #[test]
    fn test_expr_error_from_and_transparency() {
        let err: ExprError = EvaluationError::DivisionByZero.into();
        assert!(err.is_point_failure());
        assert_eq!(err.to_string(), "Division by zero");

        let err: ExprError = ParseError::Empty.into();
        assert!(!err.is_point_failure());
        assert_eq!(err.to_string(), "Empty expression");
    }
}
