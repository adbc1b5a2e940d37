//! Recognition of linear arguments.

use solvent_core::{ExprArena, ExprHandle, MathResult};
use solvent_poly::coefficients;

/// Splits `u` as `a*var + b` with `a` nonzero and both free of `var`.
///
/// # Errors
///
/// Propagates expansion errors.
pub fn linear_parts(
    arena: &mut ExprArena,
    u: ExprHandle,
    var: ExprHandle,
) -> MathResult<Option<(ExprHandle, ExprHandle)>> {
    let expanded = arena.expand(u)?;
    Ok(match coefficients(arena, expanded, var)?.as_deref() {
        Some(&[b, a]) => Some((a, b)),
        _ => None,
    })
}
