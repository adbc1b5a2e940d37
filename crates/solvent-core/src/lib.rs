//! # solvent-core
//!
//! Core expression engine for the solvent math problem solver.
//!
//! This crate provides:
//! - Arena-allocated expression storage with hash-consing
//! - Canonical, auto-evaluating construction (`add`, `mul`, `pow`, `func`)
//! - Expansion and substitution
//! - A parser for the infix notation problems are written in
//! - A printer producing conventional CAS output (`x**2 + 2*x + 1`)
//! - Numeric evaluation and per-arena resource limits
//!
//! ## Design Principles
//!
//! - **Hash-Consing**: every structurally unique expression is stored once,
//!   so equality of canonical expressions is handle equality
//! - **Canonical Form**: constructors keep sums and products flattened,
//!   sorted and collected, so algorithms never see `x + x`
//! - **Zero-Cost Handles**: 32-bit indices instead of pointers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod canonical;
pub mod display;
pub mod error;
pub mod eval;
pub mod expand;
pub mod expr;
pub mod handle;
pub mod intern;
pub mod limits;
pub mod number;
pub mod order;
pub mod parse;
pub mod subs;
pub mod visit;

#[cfg(test)]
mod proptests;

pub use arena::ExprArena;
pub use display::{format_float, format_float_full, ExprDisplay};
pub use error::{MathError, MathResult, ParseError};
pub use eval::Complex;
pub use expr::{Args, Constant, ExprNode, Func, SymbolId};
pub use handle::ExprHandle;
pub use limits::Limits;
pub use number::Num;
pub use parse::{parse, MAX_NESTING};
