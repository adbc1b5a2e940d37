//! Homogeneous bivariate polynomials.
//!
//! A form of degree `d` in `x, y` factors exactly as `y**d * p(x/y)`, so
//! factoring the univariate `p(t)` and homogenizing each factor back gives
//! the factorization of the form.

use num_traits::Zero;
use solvent_core::{ExprArena, ExprHandle, MathResult};
use solvent_integers::Rational;
use solvent_poly::DensePoly;

use crate::sparse::{to_expr, Term};
use crate::univariate::factor_univariate;

/// True if every term has the same total degree.
#[must_use]
pub fn is_homogeneous(terms: &[Term]) -> bool {
    match terms.first() {
        Some(first) => terms.iter().all(|t| t.degree() == first.degree()),
        None => true,
    }
}

/// Factors a homogeneous polynomial in the variables at positions `x` and
/// `y` of `vars`.
///
/// Returns the rational content and the factors with multiplicities.
///
/// # Errors
///
/// Propagates construction errors.
pub fn factor_homogeneous(
    arena: &mut ExprArena,
    terms: &[Term],
    vars: &[ExprHandle],
    (x, y): (usize, usize),
) -> MathResult<(Rational, Vec<(ExprHandle, usize)>)> {
    let mut coeffs: Vec<Rational> = Vec::new();
    let mut total = 0u32;
    for t in terms {
        let k = t.exps[x] as usize;
        total = t.degree();
        if coeffs.len() <= k {
            coeffs.resize(k + 1, Rational::zero());
        }
        coeffs[k] = &coeffs[k] + &t.coeff;
    }
    let p = DensePoly::new(coeffs);
    let factorization = factor_univariate(&p);

    let mut factors = Vec::with_capacity(factorization.factors.len() + 1);
    let missing = total as usize - p.degree();
    if missing > 0 {
        factors.push((vars[y], missing));
    }
    for f in &factorization.factors {
        let k = f.poly.degree();
        let homogenized: Vec<Term> = f
            .poly
            .coeffs()
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(j, c)| {
                let mut exps = vec![0u32; vars.len()];
                exps[x] = u32::try_from(j).unwrap_or(u32::MAX);
                exps[y] = u32::try_from(k - j).unwrap_or(u32::MAX);
                Term {
                    coeff: c.clone(),
                    exps,
                }
            })
            .collect();
        factors.push((to_expr(arena, &homogenized, vars)?, f.multiplicity));
    }
    Ok((factorization.content, factors))
}
