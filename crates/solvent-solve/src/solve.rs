//! Equation solving entry points.

use std::cmp::Ordering;

use solvent_core::{Complex, ExprArena, ExprHandle};
use solvent_simplify::numer_denom;
use tracing::debug;

use crate::error::SolveError;
use crate::isolate::isolate;
use crate::polynomial::solve_polynomial;

/// Relative size below which a residual counts as zero.
const RESIDUAL_TOLERANCE: f64 = 1e-9;

/// Solves `lhs = rhs` for `var`.
///
/// # Errors
///
/// See [`solve_zero`].
pub fn solve(
    arena: &mut ExprArena,
    lhs: ExprHandle,
    rhs: ExprHandle,
    var: ExprHandle,
) -> Result<Vec<ExprHandle>, SolveError> {
    let h = arena.sub(lhs, rhs)?;
    solve_zero(arena, h, var)
}

/// Solves `h = 0` for `var`.
///
/// `h` is brought over a common denominator and the numerator is solved,
/// as a polynomial when it is one and by isolation when `var` occurs once.
/// Roots that make the denominator vanish are discarded. An `h` that does
/// not involve `var` has no solutions.
///
/// # Errors
///
/// Fails with [`SolveError::Unsupported`] when no method applies and with
/// [`SolveError::Degree`] for polynomials without closed-form roots.
pub fn solve_zero(
    arena: &mut ExprArena,
    h: ExprHandle,
    var: ExprHandle,
) -> Result<Vec<ExprHandle>, SolveError> {
    let expanded = arena.expand(h)?;
    let (num, den) = numer_denom(arena, expanded)?;
    let num = arena.expand(num)?;

    if !arena.contains(num, var) {
        debug!(equation = %arena.display(num), "equation does not involve the unknown");
        return Ok(Vec::new());
    }

    let candidates = if let Some(roots) = solve_polynomial(arena, num, var)? {
        debug!(equation = %arena.display(num), roots = roots.len(), "solved as polynomial");
        roots
    } else if arena.count_occurrences(num, var) == 1 {
        let found = isolate(arena, num, var)?;
        debug!(equation = %arena.display(num), candidates = found.len(), "solved by isolation");
        found
            .into_iter()
            .filter(|&r| satisfies(arena, num, var, r))
            .collect()
    } else {
        return Err(SolveError::Unsupported(arena.render(num)));
    };

    let roots: Vec<ExprHandle> = candidates
        .into_iter()
        .filter(|&r| !vanishes(arena, den, var, r))
        .collect();
    Ok(order(arena, roots))
}

/// True unless substituting `root` gives a value that is clearly nonzero.
fn satisfies(arena: &mut ExprArena, h: ExprHandle, var: ExprHandle, root: ExprHandle) -> bool {
    let Ok(value) = arena.substitute(h, var, root) else {
        return false;
    };
    match arena.eval_complex(value) {
        Some(c) => {
            let scale = arena
                .eval_complex(root)
                .map_or(1.0, |r| r.re.hypot(r.im).max(1.0));
            c.re.hypot(c.im) <= RESIDUAL_TOLERANCE * scale
        }
        None => true,
    }
}

/// True if the denominator is zero (or undefined) at `root`.
fn vanishes(arena: &mut ExprArena, den: ExprHandle, var: ExprHandle, root: ExprHandle) -> bool {
    if !arena.contains(den, var) {
        return false;
    }
    match arena.substitute(den, var, root).and_then(|d| arena.expand(d)) {
        Ok(d) => arena.is_zero(d),
        Err(_) => true,
    }
}

/// Real numeric roots ascending, then complex roots by real and imaginary
/// part, then symbolic roots in the order found. Duplicates are dropped.
fn order(arena: &ExprArena, roots: Vec<ExprHandle>) -> Vec<ExprHandle> {
    let mut real: Vec<(f64, ExprHandle)> = Vec::new();
    let mut complex: Vec<(Complex, ExprHandle)> = Vec::new();
    let mut symbolic: Vec<ExprHandle> = Vec::new();
    let mut seen: Vec<ExprHandle> = Vec::new();

    for r in roots {
        if seen.contains(&r) {
            continue;
        }
        seen.push(r);
        match arena.eval_complex(r) {
            Some(c) if c.im == 0.0 => real.push((c.re, r)),
            Some(c) => complex.push((c, r)),
            None => symbolic.push(r),
        }
    }

    real.sort_by(|a, b| a.0.total_cmp(&b.0));
    complex.sort_by(|a, b| match a.0.re.total_cmp(&b.0.re) {
        Ordering::Equal => a.0.im.total_cmp(&b.0.im),
        other => other,
    });
    real.into_iter()
        .map(|(_, r)| r)
        .chain(complex.into_iter().map(|(_, r)| r))
        .chain(symbolic)
        .collect()
}
