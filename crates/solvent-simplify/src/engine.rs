//! The equality-saturation engine.
//!
//! This module provides the high-level API for simplifying expressions
//! using equality saturation.

use std::fmt;
use std::time::Duration;

use egg::{Extractor, RecExpr, Rewrite, Runner};
use serde::{Deserialize, Serialize};
use solvent_core::{ExprArena, ExprHandle, MathResult};

use crate::convert::{from_rec_expr, to_rec_expr};
use crate::cost::AstSizeCost;
use crate::language::SolventLang;
use crate::rules;

/// Configuration for the simplification engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifierConfig {
    /// Maximum number of iterations.
    pub iter_limit: usize,
    /// Maximum number of nodes in the e-graph.
    pub node_limit: usize,
    /// Time limit in milliseconds.
    pub time_limit_ms: u64,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self {
            iter_limit: 30,
            node_limit: 10_000,
            time_limit_ms: 2_000,
        }
    }
}

/// The main simplification engine.
#[derive(Clone)]
pub struct Simplifier {
    /// Configuration.
    config: SimplifierConfig,
    /// Rewrite rules.
    rules: Vec<Rewrite<SolventLang, ()>>,
}

impl fmt::Debug for Simplifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simplifier")
            .field("config", &self.config)
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl Default for Simplifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Simplifier {
    /// Creates a new simplifier with default rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SimplifierConfig::default())
    }

    /// Creates a simplifier with custom configuration.
    #[must_use]
    pub fn with_config(config: SimplifierConfig) -> Self {
        Self {
            config,
            rules: rules::all_rules(),
        }
    }

    /// Sets custom rules (replaces default rules).
    #[must_use]
    pub fn with_rules(mut self, rules: Vec<Rewrite<SolventLang, ()>>) -> Self {
        self.rules = rules;
        self
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &SimplifierConfig {
        &self.config
    }

    fn run(&self, expr: &RecExpr<SolventLang>) -> Runner<SolventLang, ()> {
        Runner::default()
            .with_expr(expr)
            .with_iter_limit(self.config.iter_limit)
            .with_node_limit(self.config.node_limit)
            .with_time_limit(Duration::from_millis(self.config.time_limit_ms))
            .run(&self.rules)
    }

    /// Simplifies a term, returning the cheapest equivalent found.
    #[must_use]
    pub fn simplify(&self, expr: &RecExpr<SolventLang>) -> RecExpr<SolventLang> {
        self.simplify_with_stats(expr).0
    }

    /// Simplifies and returns both the result and statistics.
    #[must_use]
    pub fn simplify_with_stats(
        &self,
        expr: &RecExpr<SolventLang>,
    ) -> (RecExpr<SolventLang>, SimplificationStats) {
        let runner = self.run(expr);

        let stats = SimplificationStats {
            iterations: runner.iterations.len(),
            egraph_nodes: runner.egraph.total_number_of_nodes(),
            egraph_classes: runner.egraph.number_of_classes(),
            stop_reason: format!("{:?}", runner.stop_reason),
        };

        let extractor = Extractor::new(&runner.egraph, AstSizeCost);
        let (_, best) = extractor.find_best(runner.roots[0]);

        (best, stats)
    }

    /// Runs the rules over an arena expression and rebuilds the result in
    /// canonical form.
    ///
    /// Returns `Ok(None)` if the extracted term cannot be mapped back.
    ///
    /// # Errors
    ///
    /// Propagates construction errors raised while rebuilding.
    pub fn simplify_expr(
        &self,
        arena: &mut ExprArena,
        h: ExprHandle,
    ) -> MathResult<Option<ExprHandle>> {
        let (rec, leaves) = to_rec_expr(arena, h);
        let (best, stats) = self.simplify_with_stats(&rec);
        tracing::trace!(
            iterations = stats.iterations,
            nodes = stats.egraph_nodes,
            classes = stats.egraph_classes,
            stop = %stats.stop_reason,
            "equality saturation finished"
        );
        from_rec_expr(arena, &best, &leaves)
    }
}

/// Statistics about the simplification process.
#[derive(Clone, Debug)]
pub struct SimplificationStats {
    /// Number of iterations run.
    pub iterations: usize,
    /// Total nodes in the e-graph.
    pub egraph_nodes: usize,
    /// Number of equivalence classes.
    pub egraph_classes: usize,
    /// Reason the runner stopped.
    pub stop_reason: String,
}
