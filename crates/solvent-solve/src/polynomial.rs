//! Polynomial equations.

use solvent_core::{ExprArena, ExprHandle, MathResult};
use solvent_poly::{coefficients, from_poly, rational_roots, to_poly};

use crate::error::SolveError;

/// Roots of `a*x**2 + b*x + c` by the quadratic formula.
///
/// A negative numeric discriminant yields complex roots in `I`; a zero
/// discriminant yields the double root once.
///
/// # Errors
///
/// Propagates construction errors, e.g. `a = 0`.
pub fn quadratic_roots(
    arena: &mut ExprArena,
    a: ExprHandle,
    b: ExprHandle,
    c: ExprHandle,
) -> MathResult<Vec<ExprHandle>> {
    // b**2 - 4*a*c
    let b2 = arena.powi(b, 2)?;
    let m4 = arena.integer(-4);
    let ac = arena.mul(&[m4, a, c])?;
    let disc = arena.add(&[b2, ac])?;
    let disc = arena.expand(disc)?;

    let two = arena.integer(2);
    let denom = arena.mul(&[two, a])?;
    let minus_b = arena.neg(b)?;
    if arena.is_zero(disc) {
        return Ok(vec![arena.div(minus_b, denom)?]);
    }

    let root = arena.sqrt(disc)?;
    let mut out = Vec::with_capacity(2);
    for sign in [-1, 1] {
        let s = arena.integer(sign);
        let signed = arena.mul(&[s, root])?;
        let num = arena.add(&[minus_b, signed])?;
        out.push(arena.div(num, denom)?);
    }
    Ok(out)
}

fn linear_root(arena: &mut ExprArena, c0: ExprHandle, c1: ExprHandle) -> MathResult<ExprHandle> {
    let n = arena.neg(c0)?;
    arena.div(n, c1)
}

/// Solves `p = 0` for an expanded `p`.
///
/// A factor `var**k` is split off first and contributes the root `0`.
/// Degrees one and two are solved in closed form with whatever symbolic
/// coefficients `p` carries. Higher degrees need rational coefficients:
/// rational roots are divided out and a remaining factor of degree at most
/// two goes through the quadratic formula. Returns `Ok(None)` if `p` is not
/// a polynomial in `var`.
///
/// # Errors
///
/// Fails with [`SolveError::Degree`] when an irreducible factor of degree
/// three or more remains.
pub fn solve_polynomial(
    arena: &mut ExprArena,
    p: ExprHandle,
    var: ExprHandle,
) -> Result<Option<Vec<ExprHandle>>, SolveError> {
    let Some(coeffs) = coefficients(arena, p, var)? else {
        return Ok(None);
    };
    let degree = coeffs.len() - 1;
    let zeros = coeffs.iter().take_while(|&&c| arena.is_zero(c)).count();
    if zeros > 0 && zeros < coeffs.len() {
        let mut terms = Vec::with_capacity(coeffs.len() - zeros);
        for (i, &c) in coeffs[zeros..].iter().enumerate() {
            let power = arena.powi(var, i64::try_from(i).unwrap_or(i64::MAX))?;
            terms.push(arena.mul(&[c, power])?);
        }
        let rest = arena.add(&terms)?;
        let mut roots = vec![arena.zero()];
        match solve_polynomial(arena, rest, var) {
            Ok(Some(more)) => roots.extend(more),
            Ok(None) => return Ok(None),
            Err(SolveError::Degree(_)) => return Err(SolveError::Degree(degree)),
            Err(e) => return Err(e),
        }
        return Ok(Some(roots));
    }

    let roots = match coeffs[..] {
        [_] => Vec::new(),
        [c0, c1] => vec![linear_root(arena, c0, c1)?],
        [c, b, a] => quadratic_roots(arena, a, b, c)?,
        _ => higher_degree(arena, p, var, degree)?,
    };
    Ok(Some(roots))
}

fn higher_degree(
    arena: &mut ExprArena,
    p: ExprHandle,
    var: ExprHandle,
    degree: usize,
) -> Result<Vec<ExprHandle>, SolveError> {
    let poly = to_poly(arena, p, var).ok_or(SolveError::Degree(degree))?;
    let (roots, rest) = rational_roots(&poly).ok_or(SolveError::Degree(degree))?;
    if rest.degree() > 2 {
        return Err(SolveError::Degree(degree));
    }

    let mut out: Vec<ExprHandle> = roots
        .into_iter()
        .map(|r| arena.rational(r.value))
        .collect();
    if rest.degree() > 0 {
        let remaining = from_poly(arena, &rest, var)?;
        if let Some(more) = solve_polynomial(arena, remaining, var)? {
            out.extend(more);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvent_core::parse;

    fn roots(s: &str) -> Result<Vec<String>, SolveError> {
        let mut arena = ExprArena::new();
        let raw = parse(&mut arena, s).unwrap();
        let h = arena.canonicalize(raw).unwrap();
        let h = arena.expand(h).unwrap();
        let x = arena.symbol("x");
        let found = solve_polynomial(&mut arena, h, x)?.unwrap();
        Ok(found.into_iter().map(|r| arena.render(r)).collect())
    }

    #[test]
    fn test_linear() {
        assert_eq!(roots("2x - 4").unwrap(), vec!["2"]);
        assert_eq!(roots("3x + 1").unwrap(), vec!["-1/3"]);
    }

    #[test]
    fn test_quadratic_surds() {
        assert_eq!(
            roots("x^2 - 2x - 1").unwrap(),
            vec!["1 - sqrt(2)", "1 + sqrt(2)"]
        );
    }

    #[test]
    fn test_quadratic_double_root() {
        assert_eq!(roots("x^2 - 6x + 9").unwrap(), vec!["3"]);
    }

    #[test]
    fn test_quadratic_complex() {
        assert_eq!(roots("x^2 + 1").unwrap(), vec!["-I", "I"]);
    }

    #[test]
    fn test_cubic_deflation() {
        assert_eq!(
            roots("x^3 - 1").unwrap(),
            vec!["1", "-1/2 - sqrt(3)*I/2", "-1/2 + sqrt(3)*I/2"]
        );
    }

    #[test]
    fn test_irreducible_quintic() {
        assert_eq!(roots("x^5 - 2"), Err(SolveError::Degree(5)));
    }

    #[test]
    fn test_monomial_factor() {
        let mut arena = ExprArena::new();
        let raw = parse(&mut arena, "x^2 + x*y").unwrap();
        let h = arena.canonicalize(raw).unwrap();
        let h = arena.expand(h).unwrap();
        let x = arena.symbol("x");
        let found = solve_polynomial(&mut arena, h, x).unwrap().unwrap();
        let rendered: Vec<String> = found.into_iter().map(|r| arena.render(r)).collect();
        assert_eq!(rendered, vec!["0", "-y"]);

        assert_eq!(roots("x^3 - 4x").unwrap(), vec!["0", "-2", "2"]);
    }

    #[test]
    fn test_degree_reports_input() {
        assert_eq!(roots("x^100 - 1"), Err(SolveError::Degree(100)));
        assert_eq!(roots("x^7 - 2x^2"), Err(SolveError::Degree(7)));
    }

    #[test]
    fn test_constant() {
        assert!(roots("7").unwrap().is_empty());
    }

    #[test]
    fn test_not_polynomial() {
        let mut arena = ExprArena::new();
        let raw = parse(&mut arena, "exp(x) - 2").unwrap();
        let h = arena.canonicalize(raw).unwrap();
        let x = arena.symbol("x");
        assert_eq!(solve_polynomial(&mut arena, h, x).unwrap(), None);
    }
}
