//! # solvent-limits
//!
//! Limit computation for the solvent CAS.
//!
//! This crate provides:
//! - Direct substitution where the expression is continuous
//! - Rational functions by cancellation of common factors at a point and by
//!   degree comparison at infinity
//! - `0/0` and `∞/∞` quotients by L'Hôpital's rule, bounded by
//!   `Limits::lhopital_depth`
//! - `c/0` as a signed infinity, using the side of approach
//! - Growth comparison of logarithmic, polynomial and exponential terms at
//!   infinity
//!
//! Limits at a finite point are taken from the right unless a
//! [`Direction`] says otherwise. A limit at `-oo` is computed as the limit
//! at `oo` of the reflected expression.
//!
//! # Example
//!
//! ```ignore
//! use solvent_limits::{limit, Point};
//!
//! // lim (x→0) sin(x)/x = 1
//! let zero = arena.zero();
//! let result = limit(&mut arena, expr, x, Point::Finite(zero))?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod comparison;
pub mod error;
pub mod limit;

#[cfg(test)]
mod proptests;

pub use comparison::{growth, ComparisonClass, Growth};
pub use error::LimitError;
pub use limit::{limit, limit_with_direction, Direction, LimitContext, Point};
