use crate::Real;
use crate::config::AnalysisConfig;
use crate::context::SymbolTable;
use crate::error::{ParseError, Result};
use crate::lexer::Token;
use crate::normalize::tokenize;
use crate::resolve::Expression;
use crate::types::{AstExpr, BinaryOp, TokenKind};

/// Token binding powers for the Pratt parser
#[derive(Debug, Clone, Copy)]
struct BindingPower {
    left: u8,
    right: u8,
}

impl BindingPower {
    const fn new(left: u8, right: u8) -> Self {
        Self { left, right }
    }

    // For left-associative operators, right binding power is left + 1
    const fn left_assoc(power: u8) -> Self {
        Self::new(power, power + 1)
    }

    // For right-associative operators, right binding power is same as left
    const fn right_assoc(power: u8) -> Self {
        Self::new(power, power)
    }
}

/// Binding power of unary `+` and `-`. Lower than `^` so `-x^2` is `-(x^2)`.
const PREFIX_BINDING_POWER: u8 = 14;

/// Binding power used for the argument of a juxtaposed call such as `sin x`.
/// Higher than any infix operator, so `sin x^2` is `(sin x)^2`.
const JUXTAPOSITION_BINDING_POWER: u8 = 16;

/// Maximum nesting of the parser's calls and maximum height of the tree it builds.
///
/// Long operator chains such as `x+x+…+x` nest in the tree without nesting in the
/// parser, and resolution and evaluation recurse once per tree level, so both are bounded.
const MAX_NESTING_DEPTH: usize = 256;

/// A parsed sub-expression and the height of its tree.
type Parsed = (AstExpr, usize);

/// Pratt parser for mathematical expressions
struct PrattParser<'s> {
    symbols: &'s SymbolTable,
    tokens: Vec<Token>,
    pos: usize,
    recursion_depth: usize,
    max_recursion_depth: usize,
}

impl<'s> PrattParser<'s> {
    fn new(tokens: Vec<Token>, symbols: &'s SymbolTable) -> Self {
        Self {
            symbols,
            tokens,
            pos: 0,
            recursion_depth: 0,
            max_recursion_depth: MAX_NESTING_DEPTH,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    // Get binding power and operator for an infix token
    fn get_binding_power(op: &str) -> Option<(BinaryOp, BindingPower)> {
        match op {
            "+" => Some((BinaryOp::Add, BindingPower::left_assoc(9))),
            "-" => Some((BinaryOp::Sub, BindingPower::left_assoc(9))),
            "*" => Some((BinaryOp::Mul, BindingPower::left_assoc(10))),
            "/" => Some((BinaryOp::Div, BindingPower::left_assoc(10))),
            "^" | "**" => Some((BinaryOp::Pow, BindingPower::right_assoc(15))),
            _ => None,
        }
    }

    // Height of a new node over children of height `child_height`
    fn node_height(&self, child_height: usize) -> std::result::Result<usize, ParseError> {
        let height = child_height + 1;
        if height > self.max_recursion_depth {
            return Err(ParseError::RecursionLimit(self.max_recursion_depth));
        }
        Ok(height)
    }

    // Parse an expression with the given minimum binding power
    fn parse_expr(&mut self, min_bp: u8) -> std::result::Result<Parsed, ParseError> {
        // Check recursion depth to prevent stack overflow
        self.recursion_depth += 1;
        if self.recursion_depth > self.max_recursion_depth {
            return Err(ParseError::RecursionLimit(self.max_recursion_depth));
        }

        let lhs = self.parse_prefix_or_primary()?;
        let lhs = self.parse_infix_operators(lhs, min_bp)?;

        self.recursion_depth -= 1;
        Ok(lhs)
    }

    fn parse_prefix_or_primary(&mut self) -> std::result::Result<Parsed, ParseError> {
        let Some(tok) = self.peek() else {
            return Err(ParseError::Syntax("Unexpected end of input".to_string()));
        };
        if tok.kind != TokenKind::Operator || !(tok.text == "-" || tok.text == "+") {
            return self.parse_primary();
        }

        let negate = tok.text == "-";
        let op_position = tok.position;
        self.next();

        if self.peek().is_none() {
            return Err(ParseError::Syntax(format!(
                "Expected expression after '{}' at position {}",
                if negate { "-" } else { "+" },
                op_position
            )));
        }

        let (rhs, height) = self.parse_expr(PREFIX_BINDING_POWER)?;
        if negate {
            Ok((AstExpr::Neg(Box::new(rhs)), self.node_height(height)?))
        } else {
            // Unary + is a no-op
            Ok((rhs, height))
        }
    }

    fn parse_infix_operators(
        &mut self,
        lhs: Parsed,
        min_bp: u8,
    ) -> std::result::Result<Parsed, ParseError> {
        let (mut lhs, mut lhs_height) = lhs;
        loop {
            let Some(tok) = self.peek() else { break };
            if tok.kind != TokenKind::Operator {
                break;
            }
            let Some((op, bp)) = Self::get_binding_power(&tok.text) else {
                break;
            };

            // If the operator's left binding power is less than the minimum, we're done
            if bp.left < min_bp {
                break;
            }

            let op_position = tok.position;
            self.next();
            if self.peek().is_none() {
                return Err(ParseError::Syntax(format!(
                    "Expected expression after '{}' at position {}",
                    op, op_position
                )));
            }

            let (rhs, rhs_height) = self.parse_expr(bp.right)?;
            lhs_height = self.node_height(lhs_height.max(rhs_height))?;
            lhs = AstExpr::binary(op, lhs, rhs);
        }
        Ok((lhs, lhs_height))
    }

    // Parse a primary expression (number, identifier, call, parenthesized expression)
    fn parse_primary(&mut self) -> std::result::Result<Parsed, ParseError> {
        let Some(tok) = self.next() else {
            return Err(ParseError::Syntax("Unexpected end of input".to_string()));
        };

        match tok.kind {
            TokenKind::Number => Ok((AstExpr::Constant(tok.value.unwrap_or(0.0)), 1)),
            TokenKind::Variable => self.parse_identifier(tok.text),
            TokenKind::Open => self.parse_parenthesized_expr(tok.position),
            TokenKind::Close => Err(ParseError::UnmatchedParenthesis {
                position: tok.position,
                found: tok.text,
            }),
            TokenKind::Operator | TokenKind::Error => Err(ParseError::Syntax(format!(
                "Unexpected token at position {}: '{}'",
                tok.position, tok.text
            ))),
        }
    }

    // A function name followed by an operand is a call. An unknown name followed by
    // `(` is parsed as a call too so the resolver can report an unknown function.
    fn parse_identifier(&mut self, name: String) -> std::result::Result<Parsed, ParseError> {
        let is_function = self.symbols.is_function(&name);
        let is_known = self.symbols.is_known(&name);
        if is_known && !is_function {
            return Ok((AstExpr::Variable(name), 1));
        }
        let Some(next) = self.peek() else {
            return Ok((AstExpr::Variable(name), 1));
        };
        let (kind, position) = (next.kind, next.position);
        let is_sign = next.text == "-" || next.text == "+";
        let (arg, height) = match kind {
            TokenKind::Open => {
                self.next();
                self.parse_parenthesized_expr(position)?
            }
            TokenKind::Number | TokenKind::Variable if is_function => {
                self.parse_expr(JUXTAPOSITION_BINDING_POWER)?
            }
            TokenKind::Operator if is_function && is_sign => {
                self.parse_expr(JUXTAPOSITION_BINDING_POWER)?
            }
            _ => return Ok((AstExpr::Variable(name), 1)),
        };
        let call = AstExpr::Function {
            name,
            arg: Box::new(arg),
        };
        Ok((call, self.node_height(height)?))
    }

    // Parses the inside of a parenthesized expression, the opening token already consumed
    fn parse_parenthesized_expr(
        &mut self,
        open_position: usize,
    ) -> std::result::Result<Parsed, ParseError> {
        if let Some(tok) = self.peek() {
            if tok.kind == TokenKind::Close {
                return Err(ParseError::Syntax(format!(
                    "Empty parentheses at position {}",
                    open_position
                )));
            }
        }

        let expr = self.parse_expr(0)?;

        match self.next() {
            Some(tok) if tok.kind == TokenKind::Close => Ok(expr),
            Some(tok) => Err(ParseError::Syntax(format!(
                "Expected closing parenthesis ')' but found '{}' at position {} (opening at position {})",
                tok.text, tok.position, open_position
            ))),
            None => Err(ParseError::UnmatchedParenthesis {
                position: open_position,
                found: "(".to_string(),
            }),
        }
    }

    // Parse a complete expression
    fn parse(&mut self) -> std::result::Result<AstExpr, ParseError> {
        self.recursion_depth = 0;
        let (expr, _) = self.parse_expr(0)?;

        // Check for unexpected trailing tokens
        if let Some(tok) = self.peek() {
            if tok.kind == TokenKind::Close {
                // For expressions like "x)", it's an error
                return Err(ParseError::UnmatchedParenthesis {
                    position: tok.position,
                    found: tok.text.clone(),
                });
            }
            return Err(ParseError::Syntax(format!(
                "Unexpected token at position {}: '{}'",
                tok.position, tok.text
            )));
        }

        Ok(expr)
    }
}

/// Parse an expression string into an AST with the default symbol table.
/// Returns a Result with either the parsed AST or an error explaining what went wrong.
pub fn parse_expression(input: &str) -> std::result::Result<AstExpr, ParseError> {
    parse_expression_with(input, &SymbolTable::new())
}

/// Parse an expression string into an AST; `symbols` guides implicit multiplication.
pub fn parse_expression_with(
    input: &str,
    symbols: &SymbolTable,
) -> std::result::Result<AstExpr, ParseError> {
    let tokens = tokenize(input, symbols)?;
    PrattParser::new(tokens, symbols).parse()
}

/// Evaluates `expression` with the free variable bound to `x`.
///
/// # Examples
///
/// ```
/// use graph_eval::{EvaluationError, ExprError, evaluate};
///
/// assert_eq!(evaluate("x^2", -3.0).unwrap(), 9.0);
/// assert_eq!(evaluate("2(x + 1)", 1.0).unwrap(), 4.0);
/// assert_eq!(
///     evaluate("1/x", 0.0),
///     Err(ExprError::Evaluation(EvaluationError::DivisionByZero))
/// );
/// ```
pub fn evaluate(expression: &str, x: Real) -> Result<Real> {
    let compiled = Expression::parse(expression)?;
    Ok(compiled.eval(x)?)
}

/// True when `expression` compiles and is defined at one or more probe points.
pub fn is_valid(expression: &str) -> bool {
    is_valid_with(expression, &AnalysisConfig::default())
}

/// [`is_valid`] with explicit probe points.
pub fn is_valid_with(expression: &str, config: &AnalysisConfig) -> bool {
    match Expression::parse(expression) {
        Ok(compiled) => compiled.is_defined_somewhere(&config.probe_points),
        Err(err) => {
            tracing::debug!(expression, error = %err, "rejected expression");
            false
        }
    }
}
