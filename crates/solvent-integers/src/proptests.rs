//! Property-based tests for arbitrary precision arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{Integer, Rational};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    proptest! {
        #[test]
        fn integer_add_commutative(a in small_int(), b in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn integer_distributive(a in small_int(), b in small_int(), c in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let c = Integer::new(c);
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }

        #[test]
        fn integer_gcd_divides_both(a in non_zero_int(), b in non_zero_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let g = a.gcd(&b);
            prop_assert!((&a % &g).is_zero());
            prop_assert!((&b % &g).is_zero());
        }

        #[test]
        fn integer_exact_root_of_power(a in -100i64..100i64, n in 2u32..5u32) {
            let value = Integer::new(a).pow(n);
            let root = value.exact_root(n);
            if n % 2 == 0 {
                prop_assert_eq!(root, Some(Integer::new(a.abs())));
            } else {
                prop_assert_eq!(root, Some(Integer::new(a)));
            }
        }

        #[test]
        fn integer_extract_power_reconstructs(a in 2i64..100_000i64) {
            let n = Integer::new(a);
            if let Some((outside, inside)) = n.extract_power(2) {
                prop_assert_eq!(&(&outside * &outside) * &inside, n);
                prop_assert!(!outside.is_one());
            }
        }

        #[test]
        fn rational_add_sub_inverse(a in small_int(), b in non_zero_int(), c in small_int(), d in non_zero_int()) {
            let x = Rational::from_i64(a, b);
            let y = Rational::from_i64(c, d);
            prop_assert_eq!(&(&x + &y) - &y, x);
        }

        #[test]
        fn rational_mul_recip(a in non_zero_int(), b in non_zero_int()) {
            let x = Rational::from_i64(a, b);
            prop_assert!((&x * &x.recip()).is_one());
        }

        #[test]
        fn rational_denominator_positive(a in small_int(), b in non_zero_int()) {
            let x = Rational::from_i64(a, b);
            prop_assert!(!x.denominator().is_negative());
            prop_assert!(!x.denominator().is_zero());
        }

        #[test]
        fn rational_lowest_terms(a in small_int(), b in non_zero_int()) {
            let x = Rational::from_i64(a, b);
            let g = x.numerator().gcd(&x.denominator());
            prop_assert!(g.is_one() || x.is_zero());
        }
    }
}
