//! # solvent-simplify
//!
//! Simplification for the solvent CAS.
//!
//! This crate provides:
//! - `together` and rational-function cancellation over Q
//! - An e-graph language mirroring the expression arena
//! - Arithmetic, trigonometric and exp/log rewrite rules run by `egg`
//! - The `simplify` pipeline that keeps the smallest equivalent form
//!
//! ## Equality Saturation vs. Greedy Rewriting
//!
//! Unlike greedy term rewriting, equality saturation explores all
//! possible rewrite paths simultaneously, avoiding local minima
//! and the phase ordering problem. Canonical construction already
//! folds numbers and collects like terms, so the rules here only need
//! to cover identities the arena cannot see on its own.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod convert;
pub mod cost;
pub mod engine;
pub mod language;
pub mod pipeline;
pub mod rules;
pub mod together;

#[cfg(test)]
mod proptests;

pub use engine::{SimplificationStats, Simplifier, SimplifierConfig};
pub use language::SolventLang;
pub use pipeline::simplify;
pub use together::{cancel, numer_denom, together};
