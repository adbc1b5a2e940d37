//! Error types for limit computation.

use solvent_core::MathError;
use solvent_diff::DiffError;
use thiserror::Error;

/// Errors that can occur during limit computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitError {
    /// The expression oscillates or the one-sided limits disagree.
    #[error("the limit of {0} does not exist")]
    DoesNotExist(String),

    /// No method settled the limit.
    #[error("cannot determine the limit of {0}")]
    Undetermined(String),

    /// Expression construction failed.
    #[error(transparent)]
    Math(#[from] MathError),

    /// A derivative for L'Hôpital's rule failed.
    #[error(transparent)]
    Diff(#[from] DiffError),
}
