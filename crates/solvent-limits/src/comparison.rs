//! Asymptotic comparison for limits at infinity.
//!
//! An expression that tends to `0` or `±∞` as `x → ∞` is described by its
//! magnitude `|f| ~ C·exp(P(x))·x^p·log(x)^q`, where `P` is a polynomial
//! with zero constant term. Two such magnitudes compare by the leading
//! coefficient of the difference of their exponent polynomials, then by
//! `p`, then by `q`.

use std::cmp::Ordering;

use num_traits::Zero;
use solvent_core::{ExprArena, ExprHandle, ExprNode, Func};
use solvent_integers::Rational;
use solvent_poly::to_poly;

/// Asymptotic comparison result between two expressions as x → ∞.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparisonClass {
    /// f(x) / g(x) → 0 (f grows slower than g)
    LessThan,
    /// f(x) / g(x) → c ≠ 0, ∞ (f and g grow at the same rate)
    Comparable,
    /// f(x) / g(x) → ∞ (f grows faster than g)
    GreaterThan,
}

impl ComparisonClass {
    /// Reverses the comparison (swaps the two expressions).
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            ComparisonClass::LessThan => ComparisonClass::GreaterThan,
            ComparisonClass::GreaterThan => ComparisonClass::LessThan,
            ComparisonClass::Comparable => ComparisonClass::Comparable,
        }
    }
}

impl From<Ordering> for ComparisonClass {
    fn from(ord: Ordering) -> Self {
        match ord {
            Ordering::Less => ComparisonClass::LessThan,
            Ordering::Equal => ComparisonClass::Comparable,
            Ordering::Greater => ComparisonClass::GreaterThan,
        }
    }
}

/// Magnitude of an expression as x → ∞.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Growth {
    /// Coefficients of the exponent polynomial, lowest first; index 0 is
    /// always zero and trailing zeros are trimmed.
    exp: Vec<Rational>,
    /// Power of `x`.
    poly: Rational,
    /// Power of `log(x)`.
    log: Rational,
}

impl Growth {
    /// A bounded, nonzero magnitude.
    #[must_use]
    pub fn constant() -> Self {
        Self::default()
    }

    /// `x^p`.
    #[must_use]
    pub fn power(p: Rational) -> Self {
        Self {
            poly: p,
            ..Self::default()
        }
    }

    /// `log(x)^q`.
    #[must_use]
    pub fn logarithmic(q: Rational) -> Self {
        Self {
            log: q,
            ..Self::default()
        }
    }

    /// `exp(P(x))` for a polynomial given lowest coefficient first.
    #[must_use]
    pub fn exponential(coeffs: &[Rational]) -> Self {
        let mut exp: Vec<Rational> = coeffs.to_vec();
        if let Some(c0) = exp.first_mut() {
            *c0 = Rational::zero();
        }
        trim(&mut exp);
        Self {
            exp,
            ..Self::default()
        }
    }

    /// True for a bounded, nonzero magnitude.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.exp.is_empty() && self.poly.is_zero() && self.log.is_zero()
    }

    /// The magnitude of a product.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let n = self.exp.len().max(other.exp.len());
        let mut exp: Vec<Rational> = (0..n)
            .map(|i| {
                let a = self.exp.get(i).cloned().unwrap_or_default();
                let b = other.exp.get(i).cloned().unwrap_or_default();
                &a + &b
            })
            .collect();
        trim(&mut exp);
        Self {
            exp,
            poly: &self.poly + &other.poly,
            log: &self.log + &other.log,
        }
    }

    /// The magnitude of a power with constant exponent `k`.
    #[must_use]
    pub fn scale(&self, k: &Rational) -> Self {
        let mut exp: Vec<Rational> = self.exp.iter().map(|c| c * k).collect();
        trim(&mut exp);
        Self {
            exp,
            poly: &self.poly * k,
            log: &self.log * k,
        }
    }

    /// The magnitude of `1/f`.
    #[must_use]
    pub fn recip(&self) -> Self {
        self.scale(&Rational::from(-1))
    }

    /// Compares two magnitudes.
    #[must_use]
    pub fn compare(&self, other: &Self) -> ComparisonClass {
        let ratio = self.mul(&other.recip());
        if let Some(lead) = ratio.exp.last() {
            return lead.cmp(&Rational::zero()).into();
        }
        match ratio.poly.cmp(&Rational::zero()) {
            Ordering::Equal => ratio.log.cmp(&Rational::zero()).into(),
            ord => ord.into(),
        }
    }

    /// Leading term `(degree, coefficient)` of the exponent polynomial.
    fn exp_lead(&self) -> Option<(usize, &Rational)> {
        self.exp.last().map(|c| (self.exp.len() - 1, c))
    }
}

fn trim(coeffs: &mut Vec<Rational>) {
    while coeffs.last().is_some_and(Zero::is_zero) {
        coeffs.pop();
    }
}

/// Estimates the magnitude of `h` as `var → ∞`.
///
/// Returns `None` when the expression oscillates, when leading terms of a
/// sum could cancel, or when a subterm falls outside the
/// exp/power/log scale.
#[must_use]
pub fn growth(arena: &ExprArena, h: ExprHandle, var: ExprHandle) -> Option<Growth> {
    if !arena.contains(h, var) {
        return (!arena.is_zero(h)).then(Growth::constant);
    }
    if h == var {
        return Some(Growth::power(Rational::from(1)));
    }
    match arena.get(h) {
        ExprNode::Add(args) => {
            let mut best: Option<Growth> = None;
            let mut tied = false;
            for &a in args {
                let g = growth(arena, a, var)?;
                match best.as_ref().map(|b| g.compare(b)) {
                    None | Some(ComparisonClass::GreaterThan) => {
                        best = Some(g);
                        tied = false;
                    }
                    Some(ComparisonClass::Comparable) => tied = true,
                    Some(ComparisonClass::LessThan) => {}
                }
            }
            if tied {
                None
            } else {
                best
            }
        }
        ExprNode::Mul(args) => args.iter().try_fold(Growth::constant(), |acc, &a| {
            Some(acc.mul(&growth(arena, a, var)?))
        }),
        &ExprNode::Pow { base, exp } => {
            // b^u has no rational exponent polynomial unless b = E,
            // which canonical form already writes as exp(u).
            if arena.contains(exp, var) {
                return None;
            }
            let k = arena.as_rational(exp)?;
            Some(growth(arena, base, var)?.scale(k))
        }
        &ExprNode::Function { func, arg } => function_growth(arena, func, arg, var),
        _ => None,
    }
}

fn function_growth(
    arena: &ExprArena,
    func: Func,
    arg: ExprHandle,
    var: ExprHandle,
) -> Option<Growth> {
    match func {
        Func::Exp | Func::Sinh | Func::Cosh => {
            let Some(p) = to_poly(arena, arg, var) else {
                // exp(u) with u → 0 stays near 1.
                let g = growth(arena, arg, var)?;
                return (g.compare(&Growth::constant()) == ComparisonClass::LessThan
                    && func != Func::Sinh)
                    .then(Growth::constant);
            };
            let mut coeffs = p.coeffs().to_vec();
            if func != Func::Exp && p.leading_coeff().is_negative() {
                coeffs = coeffs.iter().map(|c| -c.clone()).collect();
            }
            let g = Growth::exponential(&coeffs);
            (func == Func::Exp || !g.exp.is_empty()).then_some(g)
        }
        Func::Log => {
            let g = growth(arena, arg, var)?;
            if let Some((d, _)) = g.exp_lead() {
                return Some(Growth::power(Rational::from(i64::try_from(d).ok()?)));
            }
            (!g.poly.is_zero()).then(|| Growth::logarithmic(Rational::from(1)))
        }
        Func::Atan | Func::Tanh => {
            let g = growth(arena, arg, var)?;
            (g.compare(&Growth::constant()) == ComparisonClass::GreaterThan)
                .then(Growth::constant)
        }
        Func::Abs => growth(arena, arg, var),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvent_core::parse;

    fn growth_of(arena: &mut ExprArena, s: &str) -> Option<Growth> {
        let raw = parse(arena, s).unwrap();
        let h = arena.canonicalize(raw).unwrap();
        let x = arena.symbol("x");
        growth(arena, h, x)
    }

    fn compare(a: &str, b: &str) -> ComparisonClass {
        let mut arena = ExprArena::new();
        let ga = growth_of(&mut arena, a).unwrap();
        let gb = growth_of(&mut arena, b).unwrap();
        ga.compare(&gb)
    }

    #[test]
    fn test_polynomial_growth() {
        let mut arena = ExprArena::new();
        assert_eq!(
            growth_of(&mut arena, "3*x^2 + x"),
            Some(Growth::power(Rational::from(2)))
        );
        assert_eq!(
            growth_of(&mut arena, "sqrt(x)"),
            Some(Growth::power(Rational::from_i64(1, 2)))
        );
    }

    #[test]
    fn test_scale_ordering() {
        assert_eq!(compare("log(x)", "x"), ComparisonClass::LessThan);
        assert_eq!(compare("x^100", "exp(x)"), ComparisonClass::LessThan);
        assert_eq!(compare("exp(2*x)", "exp(x)"), ComparisonClass::GreaterThan);
        assert_eq!(compare("exp(x^2 - x)", "exp(x^2)"), ComparisonClass::LessThan);
        assert_eq!(compare("x*exp(-x)", "1"), ComparisonClass::LessThan);
        assert_eq!(compare("2*x^2", "x^2 + 1"), ComparisonClass::Comparable);
    }

    #[test]
    fn test_log_of_exponential() {
        assert_eq!(compare("log(exp(x) + x)", "x"), ComparisonClass::Comparable);
        assert_eq!(compare("log(x^3)", "log(x)"), ComparisonClass::Comparable);
    }

    #[test]
    fn test_unknown() {
        let mut arena = ExprArena::new();
        assert_eq!(growth_of(&mut arena, "sin(x)"), None);
        assert_eq!(growth_of(&mut arena, "x + sin(x)"), None);
        assert_eq!(growth_of(&mut arena, "sqrt(x^2 + 1) - x"), None);
    }

    #[test]
    fn test_reverse() {
        assert_eq!(
            ComparisonClass::LessThan.reverse(),
            ComparisonClass::GreaterThan
        );
        assert_eq!(
            ComparisonClass::Comparable.reverse(),
            ComparisonClass::Comparable
        );
    }
}
