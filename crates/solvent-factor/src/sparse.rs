//! Sparse multivariate view of expanded polynomial expressions.

use num_traits::{One, Zero};
use solvent_core::{ExprArena, ExprHandle, MathResult};
use solvent_integers::{Integer, Rational};

/// A term `coeff * prod vars[i]**exps[i]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term {
    /// Rational coefficient.
    pub coeff: Rational,
    /// Exponent of each variable, in variable order.
    pub exps: Vec<u32>,
}

impl Term {
    /// Total degree.
    #[must_use]
    pub fn degree(&self) -> u32 {
        self.exps.iter().sum()
    }
}

/// Reads an expanded expression as a polynomial in `vars` with rational
/// coefficients.
///
/// Returns `None` if any term has an inexact coefficient or a factor that
/// is not a non-negative integer power of one of `vars`.
#[must_use]
pub fn terms_of(arena: &ExprArena, h: ExprHandle, vars: &[ExprHandle]) -> Option<Vec<Term>> {
    if arena.is_zero(h) {
        return Some(Vec::new());
    }
    let mut out = Vec::new();
    for t in arena.terms(h) {
        let (coeff, rest) = arena.coeff_factors(t);
        let coeff = coeff.as_exact()?.clone();
        let mut exps = vec![0u32; vars.len()];
        for f in rest {
            let (base, exp) = arena.base_exp(f);
            let pos = vars.iter().position(|&v| v == base)?;
            let e = u32::try_from(arena.as_i64(exp)?).ok()?;
            exps[pos] += e;
        }
        out.push(Term { coeff, exps });
    }
    Some(out)
}

/// Splits off the rational content and the common monomial.
///
/// The content's sign makes the lexicographically leading term of the
/// primitive part positive. Returns `(content, monomial exponents,
/// primitive terms)`.
#[must_use]
pub fn content_and_monomial(terms: &[Term]) -> (Rational, Vec<u32>, Vec<Term>) {
    let Some(first) = terms.first() else {
        return (Rational::zero(), Vec::new(), Vec::new());
    };

    let mut monomial = first.exps.clone();
    for t in terms {
        for (m, e) in monomial.iter_mut().zip(&t.exps) {
            *m = (*m).min(*e);
        }
    }

    let den_lcm = terms
        .iter()
        .fold(Integer::one(), |acc, t| acc.lcm(&t.coeff.denominator()));
    let num_gcd = terms
        .iter()
        .fold(Integer::zero(), |acc, t| acc.gcd(&t.coeff.numerator()));
    let mut content = Rational::new(num_gcd, den_lcm);

    let leading = terms
        .iter()
        .max_by(|a, b| a.exps.cmp(&b.exps))
        .map_or_else(Rational::one, |t| t.coeff.clone());
    if leading.is_negative() {
        content = -content;
    }

    let primitive = terms
        .iter()
        .map(|t| Term {
            coeff: &t.coeff / &content,
            exps: t.exps.iter().zip(&monomial).map(|(e, m)| e - m).collect(),
        })
        .collect();
    (content, monomial, primitive)
}

/// Indices of the variables that occur in some term.
#[must_use]
pub fn active_vars(terms: &[Term]) -> Vec<usize> {
    let n = terms.first().map_or(0, |t| t.exps.len());
    (0..n)
        .filter(|&i| terms.iter().any(|t| t.exps[i] > 0))
        .collect()
}

/// Builds the canonical expression of a list of terms.
///
/// # Errors
///
/// Propagates construction errors.
pub fn to_expr(arena: &mut ExprArena, terms: &[Term], vars: &[ExprHandle]) -> MathResult<ExprHandle> {
    let mut out = Vec::with_capacity(terms.len());
    for t in terms {
        let mut factors = vec![arena.rational(t.coeff.clone())];
        for (&v, &e) in vars.iter().zip(&t.exps) {
            factors.push(arena.powi(v, i64::from(e))?);
        }
        out.push(arena.mul(&factors)?);
    }
    arena.add(&out)
}
