//! # solvent
//!
//! Solves math problems written in plain English.
//!
//! This crate provides:
//! - A keyword classifier assigning each problem a [`Category`]
//! - A dispatcher routing the problem to one handler by fixed substring rules
//! - Handlers that extract expressions with regular expressions, call the
//!   CAS through the [`Backend`] trait and format a one-line answer
//! - [`CasBackend`], the backend over the solvent CAS crates
//! - A tagged [`Outcome`] and a [`SolverConfig`] with an optional timeout
//!
//! # Example
//!
//! ```ignore
//! assert_eq!(solvent::solve("Solve for x: 2x + 3 = 7", "algebra"), "x = 2");
//! ```
//!
//! Every call works on a fresh expression arena, so results depend on the
//! input text alone.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod backend;
pub mod category;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod outcome;

#[cfg(test)]
mod proptests;

pub use backend::{Backend, CasBackend};
pub use category::{detect_category, Category};
pub use config::SolverConfig;
pub use dispatch::{solve, Solver};
pub use error::{CasError, HandlerError};
pub use handlers::Route;
pub use outcome::Outcome;
