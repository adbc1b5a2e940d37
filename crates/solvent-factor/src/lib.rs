//! # solvent-factor
//!
//! Polynomial factorization over Q for the solvent CAS.
//!
//! This crate provides:
//! - **Squarefree decomposition**: Yun's algorithm over Q
//! - **Univariate factorization**: rational content and linear factors with
//!   multiplicity; irreducible remainders are kept whole
//! - **Content and monomial extraction** for multivariate polynomials
//! - **Homogeneous bivariate factorization** by dehomogenizing, factoring
//!   and homogenizing back (`x**2 - y**2 = (x - y)*(x + y)`)
//! - [`factor`], the expression-level entry point, which factors the
//!   numerator and denominator of a rational expression separately

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod factor;
pub mod homogeneous;
pub mod sparse;
pub mod squarefree;
pub mod univariate;

#[cfg(test)]
mod proptests;

pub use factor::factor;
pub use squarefree::squarefree_decomposition;
pub use univariate::{factor_univariate, UnivariateFactor, UnivariateFactorization};
