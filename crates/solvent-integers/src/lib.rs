//! # solvent-integers
//!
//! Arbitrary precision integer and rational arithmetic for the solvent
//! expression engine.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - Arbitrary precision rationals (`Rational`)
//!
//! Every exact numeric literal a problem contains ends up as a `Rational`, so
//! answers like `x = 5/2` never pass through floating point.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
pub use rational::Rational;
