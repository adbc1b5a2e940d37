//! The full simplification pipeline.
//!
//! Several equivalent forms of the input are produced and the one with the
//! fewest nodes wins. Ties keep the earlier candidate, so an expression
//! that is already as small as it gets comes back unchanged.

use solvent_core::{ExprArena, ExprHandle};

use crate::engine::Simplifier;
use crate::together::cancel;

struct Best {
    handle: ExprHandle,
    size: usize,
}

impl Best {
    fn offer(&mut self, arena: &ExprArena, candidate: ExprHandle, source: &str) {
        let size = arena.tree_size(candidate);
        if size < self.size {
            tracing::trace!(source, size, "smaller form found");
            self.handle = candidate;
            self.size = size;
        }
    }
}

/// Simplifies a canonical expression.
///
/// Candidates, in order of preference on ties: the input itself, its
/// cancelled rational form, its expansion, and the result of equality
/// saturation on the input and on the best form so far. A candidate whose
/// construction fails (for instance an expansion beyond the term limit) is
/// skipped.
pub fn simplify(arena: &mut ExprArena, h: ExprHandle, simplifier: &Simplifier) -> ExprHandle {
    let mut best = Best {
        handle: h,
        size: arena.tree_size(h),
    };

    match cancel(arena, h) {
        Ok(c) => best.offer(arena, c, "cancel"),
        Err(e) => tracing::debug!(error = %e, "cancel skipped"),
    }
    match arena.expand(h) {
        Ok(c) => best.offer(arena, c, "expand"),
        Err(e) => tracing::debug!(error = %e, "expand skipped"),
    }

    let mut seeds = vec![h];
    if best.handle != h {
        seeds.push(best.handle);
    }
    for seed in seeds {
        match simplifier.simplify_expr(arena, seed) {
            Ok(Some(c)) => best.offer(arena, c, "egg"),
            Ok(None) => {}
            Err(e) => tracing::debug!(error = %e, "equality saturation result discarded"),
        }
    }

    best.handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvent_core::parse;

    fn simplified(s: &str) -> String {
        let mut arena = ExprArena::new();
        let raw = parse(&mut arena, s).unwrap();
        let h = arena.canonicalize(raw).unwrap();
        let out = simplify(&mut arena, h, &Simplifier::new());
        arena.render(out)
    }

    #[test]
    fn test_trig_identity() {
        assert_eq!(simplified("sin(x)^2 + cos(x)^2"), "1");
        assert_eq!(simplified("1 - sin(x)^2"), "cos(x)**2");
        assert_eq!(simplified("tan(x)*cos(x)"), "sin(x)");
    }

    #[test]
    fn test_rational_cancellation() {
        assert_eq!(simplified("(x^2 - 1)/(x - 1)"), "x + 1");
    }

    #[test]
    fn test_like_terms() {
        assert_eq!(simplified("2x + 3x"), "5*x");
    }

    #[test]
    fn test_expansion_when_smaller() {
        assert_eq!(simplified("(x + 1)*(x - 1)"), "x**2 - 1");
    }

    #[test]
    fn test_already_simple_is_kept() {
        assert_eq!(simplified("x^2 + 2*x + 1"), "x**2 + 2*x + 1");
        assert_eq!(simplified("x*(x + 1)"), "x*(x + 1)");
        assert_eq!(simplified("log(exp(x))"), "log(exp(x))");
    }

    #[test]
    fn test_idempotent() {
        let mut arena = ExprArena::new();
        let simplifier = Simplifier::new();
        let raw = parse(&mut arena, "(x^2 + 2*x + 1)/(x + 1) + sin(y)^2").unwrap();
        let h = arena.canonicalize(raw).unwrap();
        let once = simplify(&mut arena, h, &simplifier);
        let twice = simplify(&mut arena, once, &simplifier);
        assert_eq!(once, twice);
    }
}
