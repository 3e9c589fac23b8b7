//! Constrained arithmetic evaluator.
//!
//! Accepts numeric literals, `+ - * /`, unary sign, parentheses and
//! whitespace. Anything else is rejected; message text is never executed.
//!
//! Grammar:
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := ('+' | '-') factor | number | '(' expr ')'
//! ```

use parley_core::{EvalError, Evaluator};

/// Maximum nesting of parentheses and unary signs.
const MAX_DEPTH: usize = 64;

/// [`Evaluator`] backed by the recursive-descent parser in this module.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArithmeticEvaluator;

impl Evaluator for ArithmeticEvaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        evaluate(expression)
    }
}

/// Evaluate an arithmetic expression.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;

    if let Some(tok) = parser.peek() {
        return Err(EvalError::UnexpectedChar(tok.symbol, tok.offset));
    }
    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}

/// Render a result the way a person would write it: `4`, not `4.0`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

// =============================================================================
// Lexer
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: TokenKind,
    /// First character of the token, for error reporting.
    symbol: char,
    /// Byte offset in the source expression.
    offset: usize,
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        let kind = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let mut end = offset;
                while let Some(&(i, d)) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        end = i + d.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let literal = &input[offset..end];
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidNumber(literal.to_string()))?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    symbol: c,
                    offset,
                });
                continue;
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            other => return Err(EvalError::UnexpectedChar(other, offset)),
        };
        chars.next();
        tokens.push(Token {
            kind,
            symbol: c,
            offset,
        });
    }

    Ok(tokens)
}

// =============================================================================
// Parser
// =============================================================================

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.peek();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        loop {
            match self.peek().map(|t| t.kind) {
                Some(TokenKind::Plus) => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(TokenKind::Minus) => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.factor()?;
        loop {
            match self.peek().map(|t| t.kind) {
                Some(TokenKind::Star) => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                Some(TokenKind::Slash) => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn factor(&mut self) -> Result<f64, EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeep(MAX_DEPTH));
        }
        let result = self.factor_inner();
        self.depth -= 1;
        result
    }

    fn factor_inner(&mut self) -> Result<f64, EvalError> {
        let tok = self.next().ok_or(EvalError::UnexpectedEnd)?;
        match tok.kind {
            TokenKind::Number(n) => Ok(n),
            TokenKind::Plus => self.factor(),
            TokenKind::Minus => Ok(-self.factor()?),
            TokenKind::LParen => {
                let value = self.expr()?;
                match self.next() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => Ok(value),
                    Some(other) => Err(EvalError::UnexpectedChar(other.symbol, other.offset)),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            _ => Err(EvalError::UnexpectedChar(tok.symbol, tok.offset)),
        }
    }
}
