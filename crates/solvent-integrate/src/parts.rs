//! Polynomial times an elementary function by repeated integration by
//! parts.
//!
//! With `u = a*x + b` and `p⁽ᵏ⁾` the derivatives of `p`:
//!
//! - `∫p·exp(u) = exp(u)·Σ (-1)ᵏ p⁽ᵏ⁾/aᵏ⁺¹`
//! - `∫p·sin(u) = -cos(u)·A + sin(u)·B`
//! - `∫p·cos(u) = sin(u)·A + cos(u)·B`
//!
//! where `A = Σ (-1)ᵏ p⁽²ᵏ⁾/a²ᵏ⁺¹` and `B = Σ (-1)ᵏ p⁽²ᵏ⁺¹⁾/a²ᵏ⁺²`. The
//! hyperbolic pair uses the same sums without the alternating sign.

use num_traits::One;
use solvent_core::{ExprArena, ExprHandle, Func};
use solvent_diff::Derivation;
use solvent_poly::{degree, from_poly, to_poly};

use crate::error::IntegrateError;

/// `p, p', p'', ...` up to the last nonzero derivative.
fn derivatives(
    arena: &mut ExprArena,
    p: ExprHandle,
    var: ExprHandle,
    deg: usize,
) -> Result<Vec<ExprHandle>, IntegrateError> {
    let mut d = Derivation::new(var);
    let mut out = Vec::with_capacity(deg + 1);
    let mut current = p;
    while !arena.is_zero(current) && out.len() <= deg {
        out.push(current);
        current = d.derive(arena, current)?;
    }
    Ok(out)
}

/// `Σ ± derivs[k]/a**(k+1)` over the indices `k` in `ks`.
fn weighted_sum(
    arena: &mut ExprArena,
    derivs: &[ExprHandle],
    a: ExprHandle,
    ks: impl Iterator<Item = usize>,
    alternating: bool,
) -> Result<ExprHandle, IntegrateError> {
    let mut terms = Vec::new();
    for (j, k) in ks.enumerate() {
        let Some(&dk) = derivs.get(k) else {
            break;
        };
        let power = -i64::try_from(k + 1).unwrap_or(i64::MAX);
        let scale = arena.powi(a, power)?;
        let sign = arena.integer(if alternating && j % 2 == 1 { -1 } else { 1 });
        terms.push(arena.mul(&[sign, scale, dk])?);
    }
    let sum = arena.add(&terms)?;
    Ok(arena.expand(sum)?)
}

/// `q * e`, pulling the rational content out of `q` so that the printed
/// form reads `(2*x - 1)*exp(2*x)/4`.
fn with_content(
    arena: &mut ExprArena,
    q: ExprHandle,
    e: ExprHandle,
    var: ExprHandle,
) -> Result<ExprHandle, IntegrateError> {
    if let Some(poly) = to_poly(arena, q, var) {
        if poly.degree() > 0 {
            let (content, primitive) = poly.content_primitive();
            let prim = from_poly(arena, &primitive, var)?;
            if content.is_one() {
                return Ok(arena.mul(&[prim, e])?);
            }
            let c = arena.rational(content);
            return Ok(arena.mul(&[c, prim, e])?);
        }
    }
    Ok(arena.mul(&[q, e])?)
}

/// `∫p·func(u) dx` for a polynomial `p` in `var` and `u = a*x + b`.
///
/// Returns `Ok(None)` when `func` has no rule here or `p` is not a
/// polynomial.
///
/// # Errors
///
/// Propagates construction and differentiation errors.
pub fn polynomial_times(
    arena: &mut ExprArena,
    p: ExprHandle,
    func: Func,
    u: ExprHandle,
    a: ExprHandle,
    var: ExprHandle,
) -> Result<Option<ExprHandle>, IntegrateError> {
    let p = arena.expand(p)?;
    let Some(deg) = degree(arena, p, var) else {
        return Ok(None);
    };
    let derivs = derivatives(arena, p, var, deg)?;
    let f = arena.func(func, u)?;

    let result = match func {
        Func::Exp => {
            let q = weighted_sum(arena, &derivs, a, 0.., true)?;
            with_content(arena, q, f, var)?
        }
        Func::Sin | Func::Cos | Func::Sinh | Func::Cosh => {
            let alternating = matches!(func, Func::Sin | Func::Cos);
            let even = weighted_sum(arena, &derivs, a, (0..).step_by(2), alternating)?;
            let odd = weighted_sum(arena, &derivs, a, (1..).step_by(2), alternating)?;
            let partner = match func {
                Func::Sin => Func::Cos,
                Func::Cos => Func::Sin,
                Func::Sinh => Func::Cosh,
                _ => Func::Sinh,
            };
            let g = arena.func(partner, u)?;
            // (first, second) multiply the even and odd sums.
            let (first, second) = match func {
                Func::Sin => (arena.neg(g)?, f),
                Func::Cos => (g, f),
                _ => (g, arena.neg(f)?),
            };
            let lhs = arena.mul(&[first, even])?;
            let rhs = arena.mul(&[second, odd])?;
            let sum = arena.add(&[lhs, rhs])?;
            arena.expand(sum)?
        }
        _ => return Ok(None),
    };
    Ok(Some(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvent_core::parse;

    fn by_parts(p: &str, func: Func, u: &str) -> String {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let raw = parse(&mut arena, p).unwrap();
        let p = arena.canonicalize(raw).unwrap();
        let raw = parse(&mut arena, u).unwrap();
        let u = arena.canonicalize(raw).unwrap();
        let (a, _) = crate::linear_parts(&mut arena, u, x).unwrap().unwrap();
        let r = polynomial_times(&mut arena, p, func, u, a, x).unwrap().unwrap();
        arena.render(r)
    }

    #[test]
    fn test_exp() {
        assert_eq!(by_parts("x", Func::Exp, "x"), "(x - 1)*exp(x)");
        assert_eq!(by_parts("x^2", Func::Exp, "x"), "(x**2 - 2*x + 2)*exp(x)");
        assert_eq!(by_parts("x", Func::Exp, "2*x"), "(2*x - 1)*exp(2*x)/4");
    }

    #[test]
    fn test_trig() {
        assert_eq!(by_parts("x", Func::Sin, "x"), "-x*cos(x) + sin(x)");
        assert_eq!(by_parts("x", Func::Cos, "x"), "x*sin(x) + cos(x)");
    }

    #[test]
    fn test_hyperbolic() {
        assert_eq!(by_parts("x", Func::Cosh, "x"), "x*sinh(x) - cosh(x)");
    }

    #[test]
    fn test_not_polynomial() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let one = arena.one();
        let s = arena.func(Func::Sin, x).unwrap();
        assert_eq!(
            polynomial_times(&mut arena, s, Func::Exp, x, one, x).unwrap(),
            None
        );
    }
}
