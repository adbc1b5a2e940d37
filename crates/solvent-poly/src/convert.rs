//! Conversion between expressions and polynomials.
//!
//! Both directions work on expanded canonical expressions: a polynomial in
//! `x` is a sum of terms `c * x**k`, where `c` is free of `x` and `k` is a
//! non-negative integer.

use solvent_core::{ExprArena, ExprHandle, ExprNode, MathResult};
use solvent_integers::Rational;

use crate::dense::DensePoly;

/// Splits a term into `(coefficient factors, power of var)`.
///
/// Returns `None` if `var` appears other than as a non-negative integer
/// power, or if the power exceeds the arena's exponent limit.
fn split_term(
    arena: &ExprArena,
    term: ExprHandle,
    var: ExprHandle,
) -> Option<(Vec<ExprHandle>, usize)> {
    let limit = usize::try_from(arena.limits().max_exponent).unwrap_or(usize::MAX);
    let mut coeff = Vec::new();
    let mut power = 0usize;
    for f in arena.factors(term) {
        if f == var {
            power += 1;
            continue;
        }
        if let ExprNode::Pow { base, exp } = arena.get(f) {
            if *base == var {
                let k = usize::try_from(arena.as_i64(*exp)?).ok()?;
                power += k;
                continue;
            }
        }
        if arena.contains(f, var) {
            return None;
        }
        coeff.push(f);
    }
    (power <= limit).then_some((coeff, power))
}

/// Degree of an expanded expression in `var`, if it is a polynomial in it.
#[must_use]
pub fn degree(arena: &ExprArena, h: ExprHandle, var: ExprHandle) -> Option<usize> {
    let mut deg = 0;
    for t in arena.terms(h) {
        let (_, k) = split_term(arena, t, var)?;
        deg = deg.max(k);
    }
    Some(deg)
}

/// True if the expanded expression is a polynomial in `var`.
#[must_use]
pub fn is_polynomial(arena: &ExprArena, h: ExprHandle, var: ExprHandle) -> bool {
    degree(arena, h, var).is_some()
}

/// Converts an expanded expression to a polynomial in `var` with rational
/// coefficients.
///
/// Returns `None` if any coefficient is not an exact rational.
#[must_use]
pub fn to_poly(arena: &ExprArena, h: ExprHandle, var: ExprHandle) -> Option<DensePoly> {
    let mut coeffs: Vec<Rational> = Vec::new();
    for t in arena.terms(h) {
        let (factors, k) = split_term(arena, t, var)?;
        let c = match factors.as_slice() {
            [] => Rational::from(1),
            [single] => arena.as_rational(*single)?.clone(),
            _ => return None,
        };
        if coeffs.len() <= k {
            coeffs.resize(k + 1, Rational::from(0));
        }
        coeffs[k] = &coeffs[k] + &c;
    }
    Some(DensePoly::new(coeffs))
}

/// Builds the canonical expression of `p` in `var`.
///
/// # Errors
///
/// Propagates construction errors (only limit violations are possible).
pub fn from_poly(arena: &mut ExprArena, p: &DensePoly, var: ExprHandle) -> MathResult<ExprHandle> {
    let mut terms = Vec::with_capacity(p.coeffs().len());
    for (k, c) in p.coeffs().iter().enumerate() {
        if num_traits::Zero::is_zero(c) {
            continue;
        }
        let c = arena.rational(c.clone());
        let power = arena.powi(var, i64::try_from(k).unwrap_or(i64::MAX))?;
        terms.push(arena.mul(&[c, power])?);
    }
    arena.add(&terms)
}

/// Coefficients of an expanded expression by power of `var`, lowest first.
///
/// Coefficients may involve other symbols: `a*x**2 + b*x + c` gives
/// `[c, b, a]`. Returns `Ok(None)` if the expression is not a polynomial
/// in `var`.
///
/// # Errors
///
/// Propagates construction errors.
pub fn coefficients(
    arena: &mut ExprArena,
    h: ExprHandle,
    var: ExprHandle,
) -> MathResult<Option<Vec<ExprHandle>>> {
    let mut buckets: Vec<Vec<ExprHandle>> = Vec::new();
    for t in arena.terms(h) {
        let Some((factors, k)) = split_term(arena, t, var) else {
            return Ok(None);
        };
        if buckets.len() <= k {
            buckets.resize(k + 1, Vec::new());
        }
        let c = arena.mul(&factors)?;
        buckets[k].push(c);
    }
    let mut out = Vec::with_capacity(buckets.len());
    for bucket in buckets {
        out.push(arena.add(&bucket)?);
    }
    while out.len() > 1 && out.last().is_some_and(|&c| arena.is_zero(c)) {
        out.pop();
    }
    if out.is_empty() {
        out.push(arena.zero());
    }
    Ok(Some(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvent_core::parse;

    fn expr(arena: &mut ExprArena, s: &str) -> ExprHandle {
        let raw = parse(arena, s).unwrap();
        let h = arena.canonicalize(raw).unwrap();
        arena.expand(h).unwrap()
    }

    #[test]
    fn test_to_poly() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let h = expr(&mut arena, "(x - 1)*(x + 2)/2");
        let p = to_poly(&arena, h, x).unwrap();
        assert_eq!(
            p,
            DensePoly::new(vec![
                Rational::from(-1),
                Rational::from_i64(1, 2),
                Rational::from_i64(1, 2)
            ])
        );
        assert_eq!(degree(&arena, h, x), Some(2));
    }

    #[test]
    fn test_not_polynomial() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let h = expr(&mut arena, "x + 1/x");
        assert!(to_poly(&arena, h, x).is_none());
        let s = expr(&mut arena, "sin(x) + x");
        assert!(!is_polynomial(&arena, s, x));
        let y = expr(&mut arena, "y*x + 1");
        assert!(is_polynomial(&arena, y, x));
        assert!(to_poly(&arena, y, x).is_none());
    }

    #[test]
    fn test_round_trip() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let h = expr(&mut arena, "x^3 - 2x + 5");
        let p = to_poly(&arena, h, x).unwrap();
        assert_eq!(from_poly(&mut arena, &p, x).unwrap(), h);
    }

    #[test]
    fn test_symbolic_coefficients() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let h = expr(&mut arena, "a*x^2 + b*x + c + 2*x");
        let coeffs = coefficients(&mut arena, h, x).unwrap().unwrap();
        let rendered: Vec<String> = coeffs.iter().map(|&c| arena.render(c)).collect();
        assert_eq!(rendered, vec!["c", "b + 2", "a"]);
    }
}
