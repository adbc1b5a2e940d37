//! # solvent-poly
//!
//! Univariate polynomial arithmetic over Q for the solvent CAS.
//!
//! This crate provides:
//! - Dense univariate polynomials with rational coefficients
//! - Euclidean division, GCD and square-free parts
//! - Rational root search with multiplicities
//! - Conversion between expressions and polynomials, including symbolic
//!   coefficient extraction for polynomials with parameters

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod convert;
pub mod dense;
pub mod gcd;
pub mod roots;

#[cfg(test)]
mod proptests;

pub use convert::{coefficients, degree, from_poly, is_polynomial, to_poly};
pub use dense::DensePoly;
pub use gcd::{exact_div, make_monic, poly_div_rem, poly_gcd, square_free};
pub use roots::{rational_roots, RationalRoot};
