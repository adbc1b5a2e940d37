//! # solvent-solve
//!
//! Equation solving in one variable for the solvent CAS.
//!
//! This crate provides:
//! - Reduction of `lhs = rhs` to a numerator over a common denominator
//! - Closed-form roots of linear and quadratic polynomials, including
//!   symbolic coefficients and complex roots
//! - Rational-root deflation for numeric polynomials of higher degree
//! - Isolation of a single occurrence of the unknown through `exp`, `log`,
//!   powers and the trigonometric functions
//!
//! Solutions are exact expressions. Numeric real solutions come first in
//! ascending order, followed by complex ones.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod isolate;
pub mod polynomial;
pub mod solve;

#[cfg(test)]
mod proptests;

pub use error::SolveError;
pub use isolate::isolate;
pub use polynomial::{quadratic_roots, solve_polynomial};
pub use solve::{solve, solve_zero};
