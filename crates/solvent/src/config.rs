//! Solver configuration.

use serde::{Deserialize, Serialize};
use solvent_core::Limits;
use solvent_simplify::SimplifierConfig;

/// Configuration for a [`Solver`](crate::Solver).
///
/// Every field has a default, so partial configuration files are accepted:
///
/// ```toml
/// timeout_ms = 5000
///
/// [limits]
/// max_exponent = 200
///
/// [simplifier]
/// node_limit = 20000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Wall-clock budget per problem; `None` solves on the calling thread
    /// without a deadline.
    pub timeout_ms: Option<u64>,
    /// Resource bounds for symbolic computation.
    pub limits: Limits,
    /// Equality-saturation bounds for `simplify`.
    pub simplifier: SimplifierConfig,
}

impl SolverConfig {
    /// Sets the per-problem timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = Some(ms);
        self
    }
}
