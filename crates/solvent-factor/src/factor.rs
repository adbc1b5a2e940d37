//! Expression-level factorization.

use num_traits::{One, Zero};
use solvent_core::{ExprArena, ExprHandle, ExprNode, MathResult};
use solvent_integers::Rational;
use solvent_poly::{from_poly, DensePoly};
use solvent_simplify::numer_denom;

use crate::homogeneous::{factor_homogeneous, is_homogeneous};
use crate::sparse::{active_vars, content_and_monomial, terms_of, to_expr};
use crate::univariate::factor_univariate;

/// A factored polynomial: `content * prod base**multiplicity`.
#[derive(Debug)]
struct Factored {
    content: Rational,
    factors: Vec<(ExprHandle, usize)>,
}

/// Factors an expanded polynomial expression.
///
/// Returns `Ok(None)` when the expression is not a polynomial with rational
/// coefficients in its free symbols.
fn factor_polynomial(arena: &mut ExprArena, p: ExprHandle) -> MathResult<Option<Factored>> {
    let vars: Vec<ExprHandle> = arena
        .free_symbols(p)
        .into_iter()
        .map(|id| arena.intern(ExprNode::Symbol(id)))
        .collect();
    let Some(terms) = terms_of(arena, p, &vars) else {
        return Ok(None);
    };
    if terms.is_empty() {
        return Ok(Some(Factored {
            content: Rational::zero(),
            factors: Vec::new(),
        }));
    }

    let (mut content, monomial, primitive) = content_and_monomial(&terms);
    let mut factors: Vec<(ExprHandle, usize)> = vars
        .iter()
        .zip(&monomial)
        .filter(|&(_, &e)| e > 0)
        .map(|(&v, &e)| (v, e as usize))
        .collect();

    match active_vars(&primitive)[..] {
        [] => {}
        [i] => {
            let mut coeffs = Vec::new();
            for t in &primitive {
                let k = t.exps[i] as usize;
                if coeffs.len() <= k {
                    coeffs.resize(k + 1, Rational::zero());
                }
                coeffs[k] = &coeffs[k] + &t.coeff;
            }
            let f = factor_univariate(&DensePoly::new(coeffs));
            content = &content * &f.content;
            for u in &f.factors {
                factors.push((from_poly(arena, &u.poly, vars[i])?, u.multiplicity));
            }
        }
        [i, j] if is_homogeneous(&primitive) => {
            let (c, fs) = factor_homogeneous(arena, &primitive, &vars, (i, j))?;
            content = &content * &c;
            factors.extend(fs);
        }
        _ => factors.push((to_expr(arena, &primitive, &vars)?, 1)),
    }

    Ok(Some(Factored { content, factors }))
}

/// Factors an expression over the rationals.
///
/// The numerator and denominator are factored separately. Each polynomial
/// loses its rational content and common monomial; a polynomial in one
/// variable is split into rational linear factors with multiplicity, and a
/// homogeneous polynomial in two variables is factored through its
/// dehomogenization. Anything that is not a polynomial with rational
/// coefficients comes back unchanged.
///
/// # Errors
///
/// Propagates construction and expansion errors.
pub fn factor(arena: &mut ExprArena, h: ExprHandle) -> MathResult<ExprHandle> {
    let (n, d) = numer_denom(arena, h)?;
    let n = arena.expand(n)?;
    let d = arena.expand(d)?;

    let Some(top) = factor_polynomial(arena, n)? else {
        return Ok(h);
    };
    let bottom = if arena.is_one(d) {
        Factored {
            content: Rational::one(),
            factors: Vec::new(),
        }
    } else {
        match factor_polynomial(arena, d)? {
            Some(f) => f,
            None => return Ok(h),
        }
    };

    if top.content.is_zero() {
        return Ok(arena.zero());
    }

    let content = &top.content / &bottom.content;
    let mut items = Vec::with_capacity(top.factors.len() + bottom.factors.len() + 1);
    if !content.is_one() {
        items.push(arena.rational(content));
    }
    for (base, m) in top.factors {
        items.push(power(arena, base, i64::try_from(m).unwrap_or(i64::MAX))?);
    }
    for (base, m) in bottom.factors {
        items.push(power(arena, base, -i64::try_from(m).unwrap_or(i64::MAX))?);
    }

    Ok(match items[..] {
        [] => arena.one(),
        [single] => single,
        _ => arena.mul_unevaluated(&items),
    })
}

fn power(arena: &mut ExprArena, base: ExprHandle, m: i64) -> MathResult<ExprHandle> {
    if m == 1 {
        Ok(base)
    } else {
        arena.powi(base, m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvent_core::parse;

    fn factored(s: &str) -> String {
        let mut arena = ExprArena::new();
        let raw = parse(&mut arena, s).unwrap();
        let h = arena.canonicalize(raw).unwrap();
        let f = factor(&mut arena, h).unwrap();
        arena.render(f)
    }

    #[test]
    fn test_cubic_with_integer_roots() {
        assert_eq!(factored("x^3 - 6x^2 + 11x - 6"), "(x - 3)*(x - 2)*(x - 1)");
    }

    #[test]
    fn test_irreducible_kept() {
        assert_eq!(factored("x^2 + 1"), "x**2 + 1");
    }

    #[test]
    fn test_content() {
        assert_eq!(factored("2x^2 - 8"), "2*(x - 2)*(x + 2)");
        assert_eq!(factored("2x + 6"), "2*(x + 3)");
    }

    #[test]
    fn test_bivariate() {
        assert_eq!(factored("x^2 - y^2"), "(x - y)*(x + y)");
    }

    #[test]
    fn test_monomial_and_multiplicity() {
        assert_eq!(factored("x^3 + 2x^2 + x"), "x*(x + 1)**2");
    }

    #[test]
    fn test_rational_function() {
        assert_eq!(factored("(x^2 - 1)/(x + 2)"), "(x - 1)*(x + 1)/(x + 2)");
    }

    #[test]
    fn test_not_polynomial() {
        assert_eq!(factored("sin(x) + 1"), "sin(x) + 1");
    }

    #[test]
    fn test_number() {
        assert_eq!(factored("12"), "12");
        assert_eq!(factored("0"), "0");
    }
}
