//! Error types for equation solving.

use solvent_core::MathError;
use thiserror::Error;

/// Errors that can occur while solving an equation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The equation is outside every implemented method.
    #[error("no method to solve {0} = 0")]
    Unsupported(String),

    /// A polynomial whose irreducible part is too large for closed forms.
    #[error("cannot solve a polynomial equation of degree {0} in closed form")]
    Degree(usize),

    /// Expression construction failed.
    #[error(transparent)]
    Math(#[from] MathError),
}
