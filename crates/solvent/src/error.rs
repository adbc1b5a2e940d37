//! Error types for the router.

use solvent_core::{MathError, ParseError};
use solvent_diff::DiffError;
use solvent_integrate::IntegrateError;
use solvent_limits::LimitError;
use solvent_solve::SolveError;
use thiserror::Error;

/// Errors raised by a [`Backend`](crate::Backend).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CasError {
    /// The expression text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Expression construction failed.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Equation solving failed.
    #[error(transparent)]
    Solve(#[from] SolveError),

    /// Differentiation failed.
    #[error(transparent)]
    Diff(#[from] DiffError),

    /// Integration failed.
    #[error(transparent)]
    Integrate(#[from] IntegrateError),

    /// Limit computation failed.
    #[error(transparent)]
    Limit(#[from] LimitError),
}

impl CasError {
    /// True for errors in the problem text rather than in the mathematics.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, CasError::Parse(_))
    }
}

/// Errors that abort a solve and become an apology message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// A computation failed.
    #[error(transparent)]
    Cas(#[from] CasError),

    /// A captured number is not a valid float.
    #[error("could not convert string to float: '{0}'")]
    InvalidNumber(String),

    /// The configured time budget ran out.
    #[error("computation timed out after {0} ms")]
    Timeout(u64),

    /// The worker thread ended without sending a result.
    #[error("the solver thread stopped without a result")]
    WorkerLost,

    /// The worker thread could not be started.
    #[error("could not start the solver thread: {0}")]
    Spawn(String),

    /// A handler panicked.
    #[error("internal error: {0}")]
    Panicked(String),
}
