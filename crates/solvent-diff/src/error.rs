//! Differentiation errors.

use solvent_core::{Func, MathError};
use thiserror::Error;

/// Errors raised while differentiating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// A function whose derivative is not supported.
    #[error("differentiation of {0} is not supported")]
    Unsupported(Func),

    /// Building the derivative failed.
    #[error(transparent)]
    Math(#[from] MathError),
}
