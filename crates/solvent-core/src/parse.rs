//! Expression parser.
//!
//! A tokenizer followed by a recursive-descent parser. The grammar, from
//! loosest to tightest binding:
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/') unary | <implicit> unary)*
//! unary   := ('-' | '+') unary | power
//! power   := primary (('^' | '**') unary)?
//! primary := number | name | name '(' sum ')' | '(' sum ')'
//! ```
//!
//! Exponentiation is right associative and binds tighter than unary minus,
//! so `-x^2` is `-(x^2)` and `2^-1` is `1/2`. Implicit multiplication
//! applies only between adjacent tokens: `2x`, `2(x + 1)`, `(x + 1)(x - 1)`
//! and `(x + 1)x`.
//!
//! The parser interns the tree exactly as written (subtraction as
//! `a + (-1)*b`, division as `a * b**-1`); pass the result through
//! [`ExprArena::canonicalize`] to evaluate it.

use solvent_integers::{Integer, Rational};
use smallvec::smallvec;

use crate::arena::ExprArena;
use crate::error::ParseError;
use crate::expr::{Constant, Func};
use crate::handle::ExprHandle;

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Integer(String),
    Decimal(String),
    Name(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    start: usize,
    end: usize,
}

impl Token {
    fn text(&self) -> String {
        match &self.kind {
            TokenKind::Integer(s) | TokenKind::Decimal(s) | TokenKind::Name(s) => s.clone(),
            TokenKind::Plus => "+".into(),
            TokenKind::Minus => "-".into(),
            TokenKind::Star => "*".into(),
            TokenKind::Slash => "/".into(),
            TokenKind::Caret => "^".into(),
            TokenKind::LParen => "(".into(),
            TokenKind::RParen => ")".into(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let mut text = String::new();
            let mut end = start;
            while let Some(&(i, d)) = chars.peek() {
                if d.is_ascii_digit() || d == '.' {
                    text.push(d);
                    end = i + 1;
                    chars.next();
                } else {
                    break;
                }
            }
            let exponent = exponent_len(&input[end..]);
            if exponent > 0 {
                text.push_str(&input[end..end + exponent]);
                end += exponent;
                for _ in 0..exponent {
                    chars.next();
                }
            }
            let kind = match text.matches('.').count() {
                0 if exponent == 0 => TokenKind::Integer(text),
                0 => TokenKind::Decimal(text),
                1 if text.len() > 1 => TokenKind::Decimal(text),
                _ => return Err(ParseError::InvalidNumber(text)),
            };
            tokens.push(Token { kind, start, end });
            continue;
        }

        if c.is_ascii_alphabetic() {
            let mut text = String::new();
            let mut end = start;
            while let Some(&(i, d)) = chars.peek() {
                if d.is_ascii_alphabetic() {
                    text.push(d);
                    end = i + 1;
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token {
                kind: TokenKind::Name(text),
                start,
                end,
            });
            continue;
        }

        chars.next();
        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '/' => TokenKind::Slash,
            '^' => TokenKind::Caret,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '*' => {
                if chars.peek().is_some_and(|&(_, n)| n == '*') {
                    chars.next();
                    tokens.push(Token {
                        kind: TokenKind::Caret,
                        start,
                        end: start + 2,
                    });
                    continue;
                }
                TokenKind::Star
            }
            other => return Err(ParseError::UnexpectedChar { ch: other, pos: start }),
        };
        tokens.push(Token {
            kind,
            start,
            end: start + c.len_utf8(),
        });
    }

    Ok(tokens)
}

/// Length of a `e[+-]digits` suffix at the start of `rest`, or 0.
///
/// An `e` not followed by digits is left alone so `2e` stays `2*E`.
fn exponent_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return 0;
    }
    let sign = usize::from(matches!(bytes.get(1), Some(b'+' | b'-')));
    let digits = bytes[1 + sign..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        0
    } else {
        1 + sign + digits
    }
}

/// What a bare name refers to.
enum Name {
    Function(Option<Func>),
    Constant(Constant),
    Symbols(Vec<char>),
}

fn resolve_name(name: &str) -> Result<Name, ParseError> {
    if name == "sqrt" {
        return Ok(Name::Function(None));
    }
    if let Some(f) = Func::from_name(name) {
        return Ok(Name::Function(Some(f)));
    }
    let constant = match name {
        "pi" => Some(Constant::Pi),
        "e" | "E" => Some(Constant::E),
        "I" => Some(Constant::I),
        "oo" | "inf" | "infinity" => Some(Constant::Infinity),
        _ => None,
    };
    if let Some(c) = constant {
        return Ok(Name::Constant(c));
    }
    match name.len() {
        1 | 2 => Ok(Name::Symbols(name.chars().collect())),
        _ => Err(ParseError::UnknownIdentifier(name.to_string())),
    }
}

/// Deepest nesting of parentheses, signs and exponents accepted.
pub const MAX_NESTING: usize = 256;

struct Parser<'a> {
    arena: &'a mut ExprArena,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn unexpected(&self) -> ParseError {
        match self.tokens.get(self.pos) {
            Some(t) => ParseError::UnexpectedToken {
                token: t.text(),
                pos: t.start,
            },
            None => ParseError::UnexpectedEnd,
        }
    }

    fn expect_rparen(&mut self) -> Result<(), ParseError> {
        if self.peek() == Some(&TokenKind::RParen) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn negate(&mut self, h: ExprHandle) -> ExprHandle {
        let m = self.arena.neg_one();
        self.arena.raw_mul(smallvec![m, h])
    }

    fn parse_sum(&mut self) -> Result<ExprHandle, ParseError> {
        let mut terms = vec![self.parse_product()?];
        loop {
            match self.peek() {
                Some(TokenKind::Plus) => {
                    self.pos += 1;
                    terms.push(self.parse_product()?);
                }
                Some(TokenKind::Minus) => {
                    self.pos += 1;
                    let rhs = self.parse_product()?;
                    terms.push(self.negate(rhs));
                }
                _ => break,
            }
        }
        Ok(self.arena.raw_add(terms))
    }

    /// True if the next token continues a product without an operator.
    fn implicit_product(&self) -> bool {
        let (Some(prev), Some(next)) = (
            self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)),
            self.tokens.get(self.pos),
        ) else {
            return false;
        };
        prev.end == next.start
            && matches!(prev.kind, TokenKind::Integer(_) | TokenKind::Decimal(_) | TokenKind::RParen)
            && matches!(next.kind, TokenKind::Name(_) | TokenKind::LParen)
    }

    fn parse_product(&mut self) -> Result<ExprHandle, ParseError> {
        let mut factors = vec![self.parse_unary()?];
        loop {
            match self.peek() {
                Some(TokenKind::Star) => {
                    self.pos += 1;
                    factors.push(self.parse_unary()?);
                }
                Some(TokenKind::Slash) => {
                    self.pos += 1;
                    let rhs = self.parse_unary()?;
                    let m = self.arena.neg_one();
                    factors.push(self.arena.raw_pow(rhs, m));
                }
                _ if self.implicit_product() => factors.push(self.parse_unary()?),
                _ => break,
            }
        }
        Ok(self.arena.raw_mul(factors))
    }

    /// Every nested construct passes through here, so this bounds recursion.
    fn parse_unary(&mut self) -> Result<ExprHandle, ParseError> {
        if self.depth >= MAX_NESTING {
            let pos = self.tokens.get(self.pos).map_or(0, |t| t.start);
            return Err(ParseError::TooDeep { limit: MAX_NESTING, pos });
        }
        self.depth += 1;
        let result = self.parse_signed();
        self.depth -= 1;
        result
    }

    fn parse_signed(&mut self) -> Result<ExprHandle, ParseError> {
        match self.peek() {
            Some(TokenKind::Minus) => {
                self.pos += 1;
                let inner = self.parse_unary()?;
                Ok(self.negate(inner))
            }
            Some(TokenKind::Plus) => {
                self.pos += 1;
                self.parse_unary()
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<ExprHandle, ParseError> {
        let base = self.parse_primary()?;
        if self.peek() == Some(&TokenKind::Caret) {
            self.pos += 1;
            let exp = self.parse_unary()?;
            return Ok(self.arena.raw_pow(base, exp));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<ExprHandle, ParseError> {
        let Some(token) = self.advance() else {
            return Err(ParseError::UnexpectedEnd);
        };
        match token.kind {
            TokenKind::Integer(text) => Integer::parse(&text)
                .map(|n| self.arena.rational(Rational::from_integer(n)))
                .map_err(|_| ParseError::InvalidNumber(text)),
            TokenKind::Decimal(text) => text
                .parse::<f64>()
                .map(|v| self.arena.float(v))
                .map_err(|_| ParseError::InvalidNumber(text)),
            TokenKind::LParen => {
                let inner = self.parse_sum()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            TokenKind::Name(name) => self.parse_name(&name),
            _ => {
                self.pos -= 1;
                Err(self.unexpected())
            }
        }
    }

    fn parse_name(&mut self, name: &str) -> Result<ExprHandle, ParseError> {
        match resolve_name(name)? {
            Name::Function(func) => {
                if self.peek() != Some(&TokenKind::LParen) {
                    return Err(ParseError::MissingCall(name.to_string()));
                }
                self.pos += 1;
                let arg = self.parse_sum()?;
                self.expect_rparen()?;
                Ok(match func {
                    Some(f) => self.arena.raw_func(f, arg),
                    None => {
                        let half = self.arena.half();
                        self.arena.raw_pow(arg, half)
                    }
                })
            }
            Name::Constant(c) => Ok(self.arena.constant(c)),
            Name::Symbols(letters) => {
                let symbols: Vec<ExprHandle> = letters
                    .into_iter()
                    .map(|ch| self.arena.symbol(ch.encode_utf8(&mut [0; 4])))
                    .collect();
                Ok(self.arena.raw_mul(symbols))
            }
        }
    }
}

/// Parses `input` into an uncanonicalized expression.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first problem found.
pub fn parse(arena: &mut ExprArena, input: &str) -> Result<ExprHandle, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut parser = Parser {
        arena,
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.parse_sum()?;
    if parser.pos < parser.tokens.len() {
        return Err(parser.unexpected());
    }
    Ok(expr)
}
