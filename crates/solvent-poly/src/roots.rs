//! Rational roots of polynomials over Q.

use num_traits::Zero;
use solvent_integers::{Integer, Rational};

use crate::dense::DensePoly;
use crate::gcd::exact_div;

/// Largest coefficient magnitude whose divisors are enumerated.
const DIVISOR_SEARCH_LIMIT: i64 = 1_000_000;

/// A rational root with its multiplicity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RationalRoot {
    /// The root.
    pub value: Rational,
    /// How many times `x - value` divides the polynomial.
    pub multiplicity: usize,
}

fn divisors(n: i64) -> Vec<i64> {
    let n = n.abs();
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1;
    while d * d <= n {
        if n % d == 0 {
            small.push(d);
            if d != n / d {
                large.push(n / d);
            }
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    small
}

/// Finds every rational root of `p` and the polynomial left after dividing
/// them all out.
///
/// Candidates come from the rational root theorem applied to the primitive
/// integer form of `p`. Returns `None` for the zero polynomial or when a
/// constant or leading coefficient is too large to enumerate divisors.
#[must_use]
pub fn rational_roots(p: &DensePoly) -> Option<(Vec<RationalRoot>, DensePoly)> {
    if p.is_zero() {
        return None;
    }

    let mut roots = Vec::new();
    let zeros = p.zero_root_multiplicity();
    if zeros > 0 {
        roots.push(RationalRoot {
            value: Rational::zero(),
            multiplicity: zeros,
        });
    }
    let mut rest = p.unshift(zeros);
    if rest.degree() == 0 {
        return Some((roots, rest));
    }

    let (_, primitive) = rest.content_primitive();
    let constant = primitive.coeff(0).to_i64()?;
    let leading = primitive.leading_coeff().to_i64()?;
    if constant.abs() > DIVISOR_SEARCH_LIMIT || leading.abs() > DIVISOR_SEARCH_LIMIT {
        return None;
    }

    let mut candidates: Vec<Rational> = Vec::new();
    for num in divisors(constant) {
        for den in divisors(leading) {
            for sign in [1, -1] {
                let c = Rational::new(Integer::new(sign * num), Integer::new(den));
                if !candidates.contains(&c) {
                    candidates.push(c);
                }
            }
        }
    }
    candidates.sort();

    for c in candidates {
        if rest.degree() == 0 {
            break;
        }
        let factor = DensePoly::linear_factor(&c);
        let mut multiplicity = 0;
        while rest.degree() > 0 && rest.eval(&c).is_zero() {
            match exact_div(&rest, &factor) {
                Some(q) => rest = q,
                None => break,
            }
            multiplicity += 1;
        }
        if multiplicity > 0 {
            roots.push(RationalRoot {
                value: c,
                multiplicity,
            });
        }
    }

    roots.sort_by(|a, b| a.value.cmp(&b.value));
    Some((roots, rest))
}
