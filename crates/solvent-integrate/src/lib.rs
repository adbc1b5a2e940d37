//! # solvent-integrate
//!
//! Indefinite integration for the solvent CAS.
//!
//! This crate provides:
//! - Linearity and the power rule, with `x**-1` integrating to `log(x)`
//! - A table of elementary antiderivatives for linear arguments `a*x + b`
//! - Polynomial times `exp`, `sin`, `cos`, `sinh` or `cosh` of a linear
//!   argument by repeated integration by parts
//! - Substitution when the cofactor is a constant multiple of the inner
//!   derivative
//! - Partial fractions for rational functions over Q, giving `log` and
//!   `atan` terms
//! - Power reduction for `sin**2` and `cos**2` of a linear argument
//! - Expansion of products and powers of sums as a last resort
//!
//! Results omit the constant of integration. When no rule applies the
//! integrand is reported back in [`IntegrateError::NoClosedForm`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod integrator;
pub mod linear;
pub mod parts;
pub mod rational;
pub mod table;

#[cfg(test)]
mod proptests;

pub use error::IntegrateError;
pub use integrator::{integrate, Integrator};
pub use linear::linear_parts;
pub use parts::polynomial_times;
pub use rational::rational_antiderivative;
pub use table::{function_antiderivative, power_antiderivative};
