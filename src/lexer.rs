use crate::Real;
use crate::types::TokenKind;

/// Maximum length of a single identifier or number.
pub const MAX_TOKEN_LENGTH: usize = 1000;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<Real>,
    pub text: String,
    pub position: usize,
}

impl Token {
    /// An operator token that does not come from the input, e.g. an implicit `*`.
    pub(crate) fn synthetic_operator(op: &str, position: usize) -> Self {
        Token {
            kind: TokenKind::Operator,
            value: None,
            text: op.to_string(),
            position,
        }
    }

    pub(crate) fn identifier(name: &str, position: usize) -> Self {
        Token {
            kind: TokenKind::Variable,
            value: None,
            text: name.to_string(),
            position,
        }
    }

    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }
}

/// The lexer struct, which produces tokens from an input string.
#[derive(Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pub pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Peek at the current character.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Peek at the character after the current one.
    fn peek_second(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advance the position by one character.
    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    /// Skip whitespace.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn error_token(&self, start_pos: usize) -> Token {
        Token {
            kind: TokenKind::Error,
            value: None,
            text: self.input[start_pos..self.pos].to_string(),
            position: start_pos,
        }
    }

    /// True when the input at the current position is an exponent suffix
    /// (`e` or `E`, an optional sign, then at least one digit).
    fn at_exponent(&self) -> bool {
        let rest = &self.input[self.pos..];
        let mut chars = rest.chars();
        if !matches!(chars.next(), Some('e' | 'E')) {
            return false;
        }
        match chars.next() {
            Some('+' | '-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    fn lex_number(&mut self) -> Token {
        let start_pos = self.pos;
        let mut saw_dot = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.' && !saw_dot {
                saw_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        // A second dot makes the literal malformed, e.g. `1.2.3`
        if saw_dot && self.peek() == Some('.') {
            while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '.') {
                self.advance();
            }
            return self.error_token(start_pos);
        }

        // Scientific notation only when digits follow, so `2e` stays `2` and `e`
        if self.at_exponent() {
            self.advance(); // e or E
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if self.pos - start_pos > MAX_TOKEN_LENGTH {
            return self.error_token(start_pos);
        }

        let num_str = &self.input[start_pos..self.pos];
        match num_str.parse::<Real>() {
            Ok(val) => Token {
                kind: TokenKind::Number,
                value: Some(val),
                text: num_str.to_string(),
                position: start_pos,
            },
            Err(_) => self.error_token(start_pos),
        }
    }

    /// Get the next token from the input.
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();
        let start_pos = self.pos;
        let c = self.peek()?;

        // Number (integer, decimal, leading-dot decimal, scientific notation)
        if c.is_ascii_digit() || (c == '.' && self.peek_second().is_some_and(|d| d.is_ascii_digit()))
        {
            return Some(self.lex_number());
        }

        // Identifier (variable, constant, function)
        if c.is_ascii_alphabetic() || c == '_' {
            while self
                .peek()
                .is_some_and(|nc| nc.is_ascii_alphanumeric() || nc == '_')
            {
                self.advance();
            }
            if self.pos - start_pos > MAX_TOKEN_LENGTH {
                return Some(self.error_token(start_pos));
            }
            return Some(Token::identifier(&self.input[start_pos..self.pos], start_pos));
        }

        // `**` is a synonym for `^`
        if c == '*' && self.peek_second() == Some('*') {
            self.advance();
            self.advance();
            return Some(Token {
                kind: TokenKind::Operator,
                value: None,
                text: "**".to_string(),
                position: start_pos,
            });
        }

        let kind = match c {
            '+' | '-' | '*' | '/' | '^' => TokenKind::Operator,
            '(' => TokenKind::Open,
            ')' => TokenKind::Close,
            _ => TokenKind::Error,
        };
        self.advance();
        Some(Token {
            kind,
            value: None,
            text: c.to_string(),
            position: start_pos,
        })
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
