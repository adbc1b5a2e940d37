//! Property-based tests for polynomial arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use solvent_integers::Rational;

    use crate::dense::DensePoly;
    use crate::gcd::{poly_div_rem, poly_gcd};
    use crate::roots::rational_roots;

    fn small_coeff() -> impl Strategy<Value = Rational> {
        (-50i64..50i64).prop_map(Rational::from)
    }

    // Degree 0-4
    fn small_poly() -> impl Strategy<Value = DensePoly> {
        proptest::collection::vec(small_coeff(), 1..=5).prop_map(DensePoly::new)
    }

    fn nonzero_poly() -> impl Strategy<Value = DensePoly> {
        small_poly().prop_filter("polynomial must be non-zero", |p| !p.is_zero())
    }

    proptest! {
        #[test]
        fn poly_mul_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        #[test]
        fn poly_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
            let left = a.mul(&b.add(&c));
            let right = a.mul(&b).add(&a.mul(&c));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn div_rem_reconstructs(a in small_poly(), b in nonzero_poly()) {
            let (q, r) = poly_div_rem(&a, &b);
            prop_assert_eq!(q.mul(&b).add(&r), a);
            prop_assert!(r.is_zero() || r.degree() < b.degree());
        }

        #[test]
        fn gcd_divides_both(a in nonzero_poly(), b in nonzero_poly()) {
            let g = poly_gcd(&a, &b);
            prop_assert!(poly_div_rem(&a, &g).1.is_zero());
            prop_assert!(poly_div_rem(&b, &g).1.is_zero());
        }

        #[test]
        fn planted_roots_are_found(
            roots in proptest::collection::vec(-6i64..6, 1..4),
            extra in nonzero_poly(),
        ) {
            let mut p = extra;
            for &r in &roots {
                p = p.mul(&DensePoly::linear_factor(&Rational::from(r)));
            }
            let (found, rest) = rational_roots(&p).unwrap();
            for &r in &roots {
                let r = Rational::from(r);
                prop_assert!(found.iter().any(|f| f.value == r));
            }
            let total: usize = found.iter().map(|f| f.multiplicity).sum();
            prop_assert_eq!(total + rest.degree(), p.degree());
        }
    }
}
