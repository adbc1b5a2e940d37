//! Resource bounds for symbolic computation.

use serde::{Deserialize, Serialize};

/// Bounds that keep a single computation from running away.
///
/// Every arena carries one `Limits` value; algorithms read it through
/// [`ExprArena::limits`](crate::ExprArena::limits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Largest integer exponent that is evaluated exactly or expanded.
    pub max_exponent: u32,
    /// Largest number of terms an expansion may produce.
    pub max_terms: usize,
    /// Maximum number of successive L'Hôpital steps.
    pub lhopital_depth: usize,
    /// Recursion guard for limits and integration.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_exponent: 1000,
            max_terms: 5000,
            lhopital_depth: 6,
            max_depth: 48,
        }
    }
}
