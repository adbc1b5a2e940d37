//! Error types for parsing and expression construction.

use thiserror::Error;

/// Errors that can occur while parsing an expression string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing to parse.
    #[error("empty expression")]
    Empty,

    /// A character that cannot start any token.
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Byte offset in the input.
        pos: usize,
    },

    /// A token that does not fit the grammar at this point.
    #[error("unexpected '{token}' at position {pos}")]
    UnexpectedToken {
        /// Source text of the token.
        token: String,
        /// Byte offset in the input.
        pos: usize,
    },

    /// The input ended in the middle of an expression.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// A name that is neither a function, a constant nor a symbol.
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),

    /// A malformed numeric literal.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    /// Parentheses, signs or exponents nested beyond [`MAX_NESTING`](crate::parse::MAX_NESTING).
    #[error("expression nested deeper than {limit} levels at position {pos}")]
    TooDeep {
        /// The nesting bound.
        limit: usize,
        /// Byte offset where the bound was reached.
        pos: usize,
    },

    /// A function name used without an argument list.
    #[error("function '{0}' must be called with parentheses")]
    MissingCall(String),
}

/// Errors raised while building or evaluating expressions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    /// Zero raised to a negative power.
    #[error("division by zero")]
    DivisionByZero,

    /// An operation with no value, such as `log(0)`.
    #[error("{0} is undefined")]
    Undefined(String),

    /// An indeterminate combination of infinities.
    #[error("indeterminate form {0}")]
    Indeterminate(String),

    /// An integer exponent beyond [`Limits::max_exponent`](crate::Limits).
    #[error("exponent {exponent} exceeds the limit of {limit}")]
    ExponentTooLarge {
        /// The exponent that was requested.
        exponent: String,
        /// The configured limit.
        limit: u32,
    },

    /// An expansion beyond [`Limits::max_terms`](crate::Limits).
    #[error("expression grows beyond {limit} terms")]
    TooManyTerms {
        /// The configured limit.
        limit: usize,
    },
}

/// Result alias for expression construction.
pub type MathResult<T> = Result<T, MathError>;
