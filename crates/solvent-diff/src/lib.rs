//! # solvent-diff
//!
//! Symbolic differentiation for the solvent CAS.
//!
//! A derivation D satisfies
//! - D(a + b) = D(a) + D(b)  (additivity)
//! - D(a · b) = D(a)·b + a·D(b)  (Leibniz rule)
//!
//! and is extended through powers and the elementary functions by the
//! chain rule. Results are built with the canonical constructors, so they
//! come out collected and ordered.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod derivation;
pub mod error;

#[cfg(test)]
mod proptests;

pub use derivation::{diff, diff_n, Derivation};
pub use error::DiffError;
