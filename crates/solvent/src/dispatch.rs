//! The solver entry points.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use once_cell::sync::Lazy;
use solvent_simplify::Simplifier;
use tracing::{debug, error, warn};

use crate::backend::{Backend, CasBackend};
use crate::category::{detect_category, Category};
use crate::config::SolverConfig;
use crate::error::HandlerError;
use crate::handlers::{HandlerResult, Route};
use crate::outcome::Outcome;

static DEFAULT: Lazy<Solver> = Lazy::new(Solver::default);

/// Solves `problem` with the default configuration.
///
/// `problem_type` is one of `algebra`, `calculus`, `geometry` or `general`;
/// any other value is treated as `general`.
///
/// ```ignore
/// assert_eq!(solvent::solve("What is 2+2", "general"), "Result: 4");
/// ```
#[must_use]
pub fn solve(problem: &str, problem_type: &str) -> String {
    DEFAULT.solve(problem, problem_type)
}

/// Routes problems to handlers.
///
/// Cheap to clone; clones share the compiled simplifier rules.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    engine: Arc<Engine>,
}

#[derive(Debug, Default)]
struct Engine {
    config: SolverConfig,
    simplifier: Simplifier,
}

impl Solver {
    /// Creates a solver.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        let simplifier = Simplifier::with_config(config.simplifier.clone());
        Self {
            engine: Arc::new(Engine { config, simplifier }),
        }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.engine.config
    }

    /// Solves a problem and returns the text shown to the user.
    #[must_use]
    pub fn solve(&self, problem: &str, problem_type: &str) -> String {
        self.solve_detailed(problem, Category::from_hint(problem_type))
            .into_text()
    }

    /// Solves a problem, keeping the kind of result.
    ///
    /// Never fails: errors become [`Outcome::Failed`].
    #[must_use]
    pub fn solve_detailed(&self, problem: &str, category: Category) -> Outcome {
        let result = match self.engine.config.timeout_ms {
            Some(ms) => self.run_with_timeout(problem, category, ms),
            None => self.engine.run(problem, category),
        };
        result.unwrap_or_else(|e| {
            error!(error = %e, "solve failed");
            Outcome::failed(&e)
        })
    }

    fn run_with_timeout(
        &self,
        problem: &str,
        category: Category,
        ms: u64,
    ) -> Result<Outcome, HandlerError> {
        let (tx, rx) = mpsc::channel();
        let engine = Arc::clone(&self.engine);
        let problem = problem.to_string();
        let started = Instant::now();

        thread::Builder::new()
            .name("solvent-worker".to_string())
            .spawn(move || {
                // The receiver is gone once the deadline passed.
                let _ = tx.send(engine.run(&problem, category));
            })
            .map_err(|e| HandlerError::Spawn(e.to_string()))?;

        match rx.recv_timeout(Duration::from_millis(ms)) {
            Ok(result) => {
                debug!(elapsed = ?started.elapsed(), "worker finished");
                result
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                warn!(timeout_ms = ms, "solve timed out, detaching worker");
                Err(HandlerError::Timeout(ms))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(HandlerError::WorkerLost),
        }
    }
}

impl Engine {
    fn run(&self, problem: &str, category: Category) -> Result<Outcome, HandlerError> {
        let text = problem.trim().to_lowercase();
        if category == Category::General {
            let detected = detect_category(&text);
            debug!(%detected, "classified problem");
        }
        let route = Route::select(&text);
        debug!(route = route.name(), %category, "dispatching");

        let mut backend = CasBackend::new(self.config.limits, &self.simplifier);
        run_guarded(route, &mut backend, &text)
    }
}

/// Runs a handler, turning a panic into [`HandlerError::Panicked`].
fn run_guarded<B: Backend>(route: Route, backend: &mut B, text: &str) -> HandlerResult {
    panic::catch_unwind(AssertUnwindSafe(|| route.run(backend, text)))
        .unwrap_or_else(|payload| Err(HandlerError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
