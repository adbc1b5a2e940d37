//! Polynomial division and GCD over Q.

use num_traits::Zero;

use crate::dense::DensePoly;

/// Divides polynomial `a` by `b`, returning (quotient, remainder).
///
/// # Panics
///
/// Panics if `b` is the zero polynomial.
#[must_use]
pub fn poly_div_rem(a: &DensePoly, b: &DensePoly) -> (DensePoly, DensePoly) {
    assert!(!b.is_zero(), "division by zero polynomial");

    if a.degree() < b.degree() {
        return (DensePoly::zero(), a.clone());
    }

    let b_lead_inv = b.leading_coeff().recip();
    let mut quotient = vec![Zero::zero(); a.degree() - b.degree() + 1];
    let mut remainder = a.coeffs().to_vec();

    while remainder.len() >= b.coeffs().len() {
        let deg_diff = remainder.len() - b.coeffs().len();
        let coeff = &remainder[remainder.len() - 1] * &b_lead_inv;

        for (i, bc) in b.coeffs().iter().enumerate() {
            remainder[deg_diff + i] = &remainder[deg_diff + i] - &(&coeff * bc);
        }
        quotient[deg_diff] = coeff;

        // The leading term cancels exactly.
        remainder.pop();
        while remainder.len() > 1 && remainder.last().is_some_and(Zero::is_zero) {
            remainder.pop();
        }
        if remainder.is_empty() || (remainder.len() == 1 && remainder[0].is_zero()) {
            break;
        }
    }

    (DensePoly::new(quotient), DensePoly::new(remainder))
}

/// Returns the quotient if `b` divides `a` exactly.
#[must_use]
pub fn exact_div(a: &DensePoly, b: &DensePoly) -> Option<DensePoly> {
    if b.is_zero() {
        return None;
    }
    let (q, r) = poly_div_rem(a, b);
    r.is_zero().then_some(q)
}

/// Makes a polynomial monic (leading coefficient = 1).
#[must_use]
pub fn make_monic(p: &DensePoly) -> DensePoly {
    if p.is_zero() {
        return p.clone();
    }
    p.scale(&p.leading_coeff().recip())
}

/// Computes the monic GCD of two polynomials with the Euclidean algorithm.
#[must_use]
pub fn poly_gcd(a: &DensePoly, b: &DensePoly) -> DensePoly {
    if a.is_zero() {
        return make_monic(b);
    }
    if b.is_zero() {
        return make_monic(a);
    }

    let mut p = a.clone();
    let mut q = b.clone();

    while !q.is_zero() {
        let (_, r) = poly_div_rem(&p, &q);
        p = q;
        q = r;
    }

    make_monic(&p)
}

/// Square-free part: `p / gcd(p, p')`, monic.
#[must_use]
pub fn square_free(p: &DensePoly) -> DensePoly {
    if p.degree() < 2 {
        return make_monic(p);
    }
    let g = poly_gcd(p, &p.derivative());
    make_monic(&poly_div_rem(p, &g).0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poly_div_rem() {
        // (x^2 + 2x + 1) / (x + 1) = (x + 1), remainder 0
        let a = DensePoly::from_i64s(&[1, 2, 1]);
        let b = DensePoly::from_i64s(&[1, 1]);

        let (q, r) = poly_div_rem(&a, &b);
        assert_eq!(q, b);
        assert!(r.is_zero());
    }

    #[test]
    fn test_div_with_remainder() {
        // x^3 + 2 = (x - 1)(x^2 + x + 1) + 3
        let a = DensePoly::from_i64s(&[2, 0, 0, 1]);
        let b = DensePoly::from_i64s(&[-1, 1]);
        let (q, r) = poly_div_rem(&a, &b);
        assert_eq!(q, DensePoly::from_i64s(&[1, 1, 1]));
        assert_eq!(r, DensePoly::from_i64s(&[3]));
        assert!(exact_div(&a, &b).is_none());
    }

    #[test]
    fn test_poly_gcd() {
        // gcd((x-1)(x+2), (x-1)(x+3)) = x - 1
        let a = DensePoly::from_i64s(&[-2, 1, 1]);
        let b = DensePoly::from_i64s(&[-3, 2, 1]);
        assert_eq!(poly_gcd(&a, &b), DensePoly::from_i64s(&[-1, 1]));
    }

    #[test]
    fn test_square_free() {
        // (x - 1)^2 (x + 1) -> (x - 1)(x + 1)
        let p = DensePoly::from_i64s(&[-1, 1])
            .pow(2)
            .mul(&DensePoly::from_i64s(&[1, 1]));
        assert_eq!(square_free(&p), DensePoly::from_i64s(&[-1, 0, 1]));
    }
}
