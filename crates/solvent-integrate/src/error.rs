//! Error types for integration.

use solvent_core::MathError;
use solvent_diff::DiffError;
use thiserror::Error;

/// Errors that can occur while integrating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrateError {
    /// No rule produced an antiderivative.
    #[error("no closed-form antiderivative found for {0}")]
    NoClosedForm(String),

    /// Expression construction failed.
    #[error(transparent)]
    Math(#[from] MathError),

    /// An intermediate derivative failed.
    #[error(transparent)]
    Diff(#[from] DiffError),
}
