//! Rational functions over Q by partial fractions.
//!
//! The denominator is split into its rational linear factors plus at most
//! one quadratic without rational roots. Over such a denominator
//!
//! ```text
//! P/Q = S + Σ A_ij/(x - r_i)^j + (B*x + C)/q
//! ```
//!
//! and every fraction integrates to a power, a `log` or an `atan`. The
//! coefficients come from matching `Σ A_ij*Q/(x - r_i)^j + (B*x + C)*Q/q`
//! against the remainder of `P/Q`, a square linear system over Q.

use num_traits::{One, Zero};
use solvent_core::{ExprArena, ExprHandle, Func, MathResult};
use solvent_integers::Rational;
use solvent_poly::{exact_div, from_poly, poly_div_rem, rational_roots, to_poly, DensePoly};
use solvent_simplify::numer_denom;
use tracing::trace;

use crate::error::IntegrateError;

/// Largest denominator degree decomposed.
const MAX_DENOMINATOR_DEGREE: usize = 12;

/// One irreducible factor of the denominator.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Factor {
    /// `(x - root)**power`.
    Linear { root: Rational, power: usize },
    /// A quadratic with no rational roots, to the first power.
    Quadratic(DensePoly),
}

/// The decomposition of a rational function.
#[derive(Debug, Clone)]
struct PartialFractions {
    polynomial: DensePoly,
    /// `(x - root)**power` with its numerator.
    linear: Vec<(Rational, usize, Rational)>,
    /// `q` with the numerator `B*x + C` as `(q, B, C)`.
    quadratic: Option<(DensePoly, Rational, Rational)>,
}

fn factor_denominator(q: &DensePoly) -> Option<Vec<Factor>> {
    let (roots, rest) = rational_roots(q)?;
    let mut factors: Vec<Factor> = roots
        .into_iter()
        .map(|r| Factor::Linear {
            root: r.value,
            power: r.multiplicity,
        })
        .collect();
    match rest.degree() {
        0 => {}
        2 => factors.push(Factor::Quadratic(rest)),
        _ => return None,
    }
    Some(factors)
}

/// Solves the square system whose rows are `[a_0 .. a_n-1 | b]`.
fn solve_linear(mut rows: Vec<Vec<Rational>>) -> Option<Vec<Rational>> {
    let n = rows.len();
    for col in 0..n {
        let pivot = (col..n).find(|&r| !rows[r][col].is_zero())?;
        rows.swap(col, pivot);
        let inv = rows[col][col].recip();
        for v in &mut rows[col][col..] {
            *v = &*v * &inv;
        }
        for r in 0..n {
            if r == col || rows[r][col].is_zero() {
                continue;
            }
            let factor = rows[r][col].clone();
            for c in col..=n {
                let delta = &factor * &rows[col][c];
                rows[r][c] = &rows[r][c] - &delta;
            }
        }
    }
    Some(rows.into_iter().map(|mut row| row.swap_remove(n)).collect())
}

fn decompose(p: &DensePoly, q: &DensePoly) -> Option<PartialFractions> {
    let (polynomial, remainder) = poly_div_rem(p, q);
    let factors = factor_denominator(q)?;

    let mut basis = Vec::with_capacity(q.degree());
    for factor in &factors {
        match factor {
            Factor::Linear { root, power } => {
                let linear = DensePoly::linear_factor(root);
                for j in 1..=*power {
                    let j = u32::try_from(j).ok()?;
                    basis.push(exact_div(q, &linear.pow(j))?);
                }
            }
            Factor::Quadratic(quad) => {
                let cofactor = exact_div(q, quad)?;
                basis.push(cofactor.mul(&DensePoly::x()));
                basis.push(cofactor);
            }
        }
    }
    let n = q.degree();
    if basis.len() != n {
        return None;
    }

    let rows = (0..n)
        .map(|k| {
            let mut row: Vec<Rational> = basis.iter().map(|b| b.coeff(k)).collect();
            row.push(remainder.coeff(k));
            row
        })
        .collect();
    let mut coeffs = solve_linear(rows)?.into_iter();

    let mut linear = Vec::new();
    let mut quadratic = None;
    for factor in factors {
        match factor {
            Factor::Linear { root, power } => {
                for j in 1..=power {
                    linear.push((root.clone(), j, coeffs.next()?));
                }
            }
            Factor::Quadratic(quad) => {
                let b = coeffs.next()?;
                let c = coeffs.next()?;
                quadratic = Some((quad, b, c));
            }
        }
    }
    Some(PartialFractions {
        polynomial,
        linear,
        quadratic,
    })
}

fn poly_integral(p: &DensePoly) -> DensePoly {
    let mut coeffs = vec![Rational::zero()];
    for (i, c) in p.coeffs().iter().enumerate() {
        let next = Rational::from(i64::try_from(i + 1).unwrap_or(i64::MAX));
        coeffs.push(c / &next);
    }
    DensePoly::new(coeffs)
}

/// `∫(B*x + C)/q dx` for a quadratic `q = a*x**2 + b*x + c` with no
/// rational roots.
fn quadratic_term(
    arena: &mut ExprArena,
    quad: &DensePoly,
    num_x: &Rational,
    num_c: &Rational,
    var: ExprHandle,
) -> MathResult<ExprHandle> {
    let a = quad.coeff(2);
    let b = quad.coeff(1);
    let c = quad.coeff(0);
    let two_a = &Rational::from(2) * &a;
    let mut terms = Vec::with_capacity(3);

    // B/(2a) * q'/q
    if !num_x.is_zero() {
        let q = from_poly(arena, quad, var)?;
        let log = arena.func(Func::Log, q)?;
        let scale = arena.rational(num_x / &two_a);
        terms.push(arena.mul(&[scale, log])?);
    }

    // D/q with q = a*(u**2 + k), u = x + b/(2a)
    let d = num_c - &(&(num_x * &b) / &two_a);
    if !d.is_zero() {
        let shift = &b / &two_a;
        let u = from_poly(arena, &DensePoly::new(vec![shift, Rational::one()]), var)?;
        let disc = &(&Rational::from(4) * &(&a * &c)) - &(&b * &b);
        let k = &disc / &(&two_a * &two_a);
        let scale = arena.rational(&d / &a);
        if k.is_positive() {
            let k = arena.rational(k);
            let s = arena.sqrt(k)?;
            let ratio = arena.div(u, s)?;
            let atan = arena.func(Func::Atan, ratio)?;
            let term = arena.div(atan, s)?;
            terms.push(arena.mul(&[scale, term])?);
        } else {
            // (log(u - s) - log(u + s)) / (2s)
            let k = arena.rational(-k);
            let s = arena.sqrt(k)?;
            let below = arena.sub(u, s)?;
            let above = arena.add(&[u, s])?;
            let lo = arena.func(Func::Log, below)?;
            let hi = arena.func(Func::Log, above)?;
            let diff = arena.sub(lo, hi)?;
            let two = arena.integer(2);
            let width = arena.mul(&[two, s])?;
            let term = arena.div(diff, width)?;
            terms.push(arena.mul(&[scale, term])?);
        }
    }
    arena.add(&terms)
}

fn assemble(
    arena: &mut ExprArena,
    parts: &PartialFractions,
    var: ExprHandle,
) -> MathResult<ExprHandle> {
    let mut terms = Vec::with_capacity(parts.linear.len() + 2);
    terms.push(from_poly(arena, &poly_integral(&parts.polynomial), var)?);

    for (root, power, coeff) in &parts.linear {
        if coeff.is_zero() {
            continue;
        }
        let u = from_poly(arena, &DensePoly::linear_factor(root), var)?;
        let a = arena.rational(coeff.clone());
        if *power == 1 {
            let log = arena.func(Func::Log, u)?;
            terms.push(arena.mul(&[a, log])?);
        } else {
            // A*u**(1 - j)/(1 - j)
            let e = 1 - i64::try_from(*power).unwrap_or(i64::MAX);
            let p = arena.powi(u, e)?;
            let scaled = arena.rational(coeff / &Rational::from(e));
            terms.push(arena.mul(&[scaled, p])?);
        }
    }

    if let Some((quad, b, c)) = &parts.quadratic {
        terms.push(quadratic_term(arena, quad, b, c, var)?);
    }
    arena.add(&terms)
}

/// `∫h dx` when `h` is a quotient of polynomials in `var` with rational
/// coefficients.
///
/// Returns `Ok(None)` when `h` is not such a quotient, when its
/// denominator is constant, or when the denominator has an irreducible
/// factor other than a single quadratic.
///
/// # Errors
///
/// Propagates construction errors.
pub fn rational_antiderivative(
    arena: &mut ExprArena,
    h: ExprHandle,
    var: ExprHandle,
) -> Result<Option<ExprHandle>, IntegrateError> {
    let (n, d) = numer_denom(arena, h)?;
    if arena.is_one(d) || !arena.contains(d, var) {
        return Ok(None);
    }
    let n = arena.expand(n)?;
    let d = arena.expand(d)?;
    let (Some(p), Some(q)) = (to_poly(arena, n, var), to_poly(arena, d, var)) else {
        return Ok(None);
    };
    if q.is_constant() || q.degree() > MAX_DENOMINATOR_DEGREE {
        return Ok(None);
    }
    let Some(parts) = decompose(&p, &q) else {
        return Ok(None);
    };
    trace!(
        denominator = %q,
        linear = parts.linear.len(),
        quadratic = parts.quadratic.is_some(),
        "integrating by partial fractions"
    );
    Ok(Some(assemble(arena, &parts, var)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvent_core::parse;

    fn q(n: i64, d: i64) -> Rational {
        Rational::from_i64(n, d)
    }

    /// Checks `F' = f` at `at` by a central difference.
    fn check_antiderivative(s: &str, at: f64) -> String {
        let mut arena = ExprArena::new();
        let raw = parse(&mut arena, s).unwrap();
        let f = arena.canonicalize(raw).unwrap();
        let x = arena.symbol("x");
        let id = arena.as_symbol(x).unwrap();
        let big_f = rational_antiderivative(&mut arena, f, x).unwrap().unwrap();

        let step = 1e-5;
        let hi = arena.eval_f64(big_f, &[(id, at + step)]).unwrap();
        let lo = arena.eval_f64(big_f, &[(id, at - step)]).unwrap();
        let slope = (hi - lo) / (2.0 * step);
        let expected = arena.eval_f64(f, &[(id, at)]).unwrap();
        assert!(
            (slope - expected).abs() < 1e-5 * expected.abs().max(1.0),
            "{s}: F' = {slope}, f = {expected}"
        );
        arena.render(big_f)
    }

    #[test]
    fn test_solve_linear() {
        // x + y = 3, x - y = 1
        let rows = vec![
            vec![q(1, 1), q(1, 1), q(3, 1)],
            vec![q(1, 1), q(-1, 1), q(1, 1)],
        ];
        assert_eq!(solve_linear(rows), Some(vec![q(2, 1), q(1, 1)]));

        let singular = vec![
            vec![q(1, 1), q(2, 1), q(1, 1)],
            vec![q(2, 1), q(4, 1), q(2, 1)],
        ];
        assert_eq!(solve_linear(singular), None);
    }

    #[test]
    fn test_decompose_distinct_roots() {
        // 1/(x**2 - 4) = (1/4)/(x - 2) - (1/4)/(x + 2)
        let parts = decompose(&DensePoly::one(), &DensePoly::from_i64s(&[-4, 0, 1])).unwrap();
        assert!(parts.polynomial.is_zero());
        assert!(parts.quadratic.is_none());
        assert_eq!(
            parts.linear,
            vec![(q(-2, 1), 1, q(-1, 4)), (q(2, 1), 1, q(1, 4))]
        );
    }

    #[test]
    fn test_decompose_repeated_root() {
        // x/(x - 1)**2 = 1/(x - 1) + 1/(x - 1)**2
        let parts = decompose(
            &DensePoly::from_i64s(&[0, 1]),
            &DensePoly::from_i64s(&[1, -2, 1]),
        )
        .unwrap();
        assert_eq!(
            parts.linear,
            vec![(q(1, 1), 1, q(1, 1)), (q(1, 1), 2, q(1, 1))]
        );
    }

    #[test]
    fn test_decompose_with_quadratic() {
        // 1/((x - 1)(x**2 + 1)) = (1/2)/(x - 1) - (x/2 + 1/2)/(x**2 + 1)
        let parts = decompose(&DensePoly::one(), &DensePoly::from_i64s(&[-1, 1, -1, 1])).unwrap();
        assert_eq!(parts.linear, vec![(q(1, 1), 1, q(1, 2))]);
        assert_eq!(
            parts.quadratic,
            Some((DensePoly::from_i64s(&[1, 0, 1]), q(-1, 2), q(-1, 2)))
        );
    }

    #[test]
    fn test_improper_fraction() {
        // x**3/(x + 1) = x**2 - x + 1 - 1/(x + 1)
        let rendered = check_antiderivative("x^3/(x + 1)", 1.3);
        assert!(rendered.contains("x**3/3"), "{rendered}");
        assert!(rendered.contains("log(x + 1)"), "{rendered}");
    }

    #[test]
    fn test_logarithmic_terms() {
        let rendered = check_antiderivative("1/(x^2 - 4)", 3.5);
        assert!(rendered.contains("log(x - 2)"), "{rendered}");
        assert!(rendered.contains("log(x + 2)"), "{rendered}");

        let rendered = check_antiderivative("1/(x*(x + 1))", 0.7);
        assert!(rendered.contains("log(x)"), "{rendered}");
        assert!(rendered.contains("log(x + 1)"), "{rendered}");

        check_antiderivative("x/(x - 1)^2", 2.5);
    }

    #[test]
    fn test_arctangent_terms() {
        let rendered = check_antiderivative("1/(x^2 + 4)", 0.4);
        assert!(rendered.contains("atan(x/2)"), "{rendered}");
        check_antiderivative("(3x + 1)/(x^2 + 2x + 5)", -0.6);
        check_antiderivative("1/((x - 1)*(x^2 + 1))", 2.2);
    }

    #[test]
    fn test_irrational_roots() {
        // x**2 - 2 has no rational roots but splits over the reals.
        let rendered = check_antiderivative("1/(x^2 - 2)", 3.0);
        assert!(rendered.contains("log"), "{rendered}");
    }

    #[test]
    fn test_not_rational() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        for s in ["x^2 + 1", "sin(x)/x", "1/(x^4 + 1)", "1/(y + x)"] {
            let raw = parse(&mut arena, s).unwrap();
            let h = arena.canonicalize(raw).unwrap();
            assert_eq!(rational_antiderivative(&mut arena, h, x).unwrap(), None, "{s}");
        }
    }
}
