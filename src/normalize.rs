//! Canonicalization of user-typed formulas before parsing.
//!
//! Users type formulas the way they are written on paper: `2x`, `3(x+1)`, `πx²`,
//! `xsin(x)`. The normalizer turns that into a token stream the Pratt parser can
//! read without special cases:
//!
//! 1. Typographic symbols are folded to their ASCII spelling (`π` → `pi`, `²` → `^2`).
//!    This is the only step that touches text, and it never touches identifiers.
//! 2. Run-together identifiers that are not known names are split into the longest
//!    known names (`pix` → `pi x`). Known names are never split, so `exp` stays a
//!    function and is not read as `e` times `x` times `p`.
//! 3. An explicit `*` token is inserted wherever two operands are juxtaposed.

use crate::context::SymbolTable;
use crate::error::ParseError;
use crate::lexer::{Lexer, MAX_TOKEN_LENGTH, Token};
use crate::types::TokenKind;
use std::borrow::Cow;

/// Maximum accepted expression length in bytes.
pub const MAX_EXPRESSION_LENGTH: usize = 10_000;

/// Replaces typographic math symbols with their ASCII equivalents.
pub fn fold_symbols(input: &str) -> Cow<'_, str> {
    if input.is_ascii() {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            'π' => out.push_str(" pi "),
            '√' => out.push_str(" sqrt "),
            '×' | '·' | '∗' | '⋅' => out.push('*'),
            '÷' | '∕' => out.push('/'),
            '−' | '–' => out.push('-'),
            '²' => out.push_str("^2"),
            '³' => out.push_str("^3"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Lexes, folds and normalizes `input` into a token stream ready for parsing.
pub fn tokenize(input: &str, symbols: &SymbolTable) -> Result<Vec<Token>, ParseError> {
    if input.len() > MAX_EXPRESSION_LENGTH {
        return Err(ParseError::TooLong {
            length: input.len(),
            max: MAX_EXPRESSION_LENGTH,
        });
    }
    let folded = fold_symbols(input);
    let mut raw = Vec::new();
    for token in Lexer::new(&folded) {
        if token.kind == TokenKind::Error {
            return Err(lex_error(token));
        }
        raw.push(token);
    }
    if raw.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(normalize_tokens(raw, symbols))
}

fn lex_error(token: Token) -> ParseError {
    if token.text.len() > MAX_TOKEN_LENGTH {
        return ParseError::TokenTooLong {
            position: token.position,
            length: token.text.len(),
            max: MAX_TOKEN_LENGTH,
        };
    }
    let starts_numeric = token
        .text
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '.');
    if starts_numeric {
        ParseError::MalformedNumber {
            position: token.position,
            text: token.text,
        }
    } else {
        ParseError::UnexpectedCharacter {
            position: token.position,
            found: token.text,
        }
    }
}

/// Splits unknown identifiers and inserts implicit multiplication.
pub fn normalize_tokens(tokens: Vec<Token>, symbols: &SymbolTable) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len() * 2);
    for token in tokens.into_iter().flat_map(|t| split_identifier(t, symbols)) {
        if let Some(prev) = out.last() {
            if needs_implicit_mul(prev, &token, symbols) {
                out.push(Token::synthetic_operator("*", token.position));
            }
        }
        out.push(token);
    }
    out
}

/// Splits an identifier that is not itself a known name into known names.
///
/// The split is greedy, longest name first. If the identifier cannot be covered
/// completely it is returned unchanged so the resolver can report it by its full name.
fn split_identifier(token: Token, symbols: &SymbolTable) -> Vec<Token> {
    if token.kind != TokenKind::Variable || symbols.is_known(&token.text) {
        return vec![token];
    }
    let mut parts = Vec::new();
    let mut rest = token.text.as_str();
    let mut offset = token.position;
    while !rest.is_empty() {
        let Some(prefix) = symbols.longest_prefix(rest) else {
            return vec![token];
        };
        parts.push(Token::identifier(prefix, offset));
        offset += prefix.len();
        rest = &rest[prefix.len()..];
    }
    parts
}

fn needs_implicit_mul(left: &Token, right: &Token, symbols: &SymbolTable) -> bool {
    let left_is_operand = match left.kind {
        TokenKind::Number | TokenKind::Close => true,
        // An unknown name directly before `(` stays callable so `foo(x)` reports an
        // unknown function; before anything else it is an unknown variable
        TokenKind::Variable => {
            !symbols.is_function(&left.text)
                && (symbols.is_known(&left.text) || right.kind != TokenKind::Open)
        }
        _ => false,
    };
    let right_starts_operand = match right.kind {
        TokenKind::Variable | TokenKind::Open => true,
        TokenKind::Number => left.kind != TokenKind::Number,
        _ => false,
    };
    left_is_operand && right_starts_operand
}
