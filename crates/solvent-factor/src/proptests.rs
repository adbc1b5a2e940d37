//! Property-based tests for factorization.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use solvent_integers::Rational;
    use solvent_poly::DensePoly;

    use crate::{factor, factor_univariate, squarefree_decomposition};
    use solvent_core::ExprArena;

    /// Linear factors `a*x + b` with `a > 0`.
    fn linears() -> impl Strategy<Value = Vec<(i64, i64)>> {
        prop::collection::vec((1i64..4, -6i64..6), 1..5)
    }

    fn product(factors: &[(i64, i64)], scale: i64) -> DensePoly {
        factors
            .iter()
            .fold(DensePoly::from_i64s(&[scale]), |acc, &(a, b)| {
                acc.mul(&DensePoly::from_i64s(&[b, a]))
            })
    }

    proptest! {
        #[test]
        fn factorization_reconstructs(factors in linears(), scale in -5i64..5) {
            prop_assume!(scale != 0);
            let p = product(&factors, scale);
            let f = factor_univariate(&p);
            prop_assert_eq!(f.to_polynomial(), p);
            for u in &f.factors {
                prop_assert_eq!(u.poly.degree(), 1);
                prop_assert!(u.poly.leading_coeff() > &Rational::from(0));
            }
        }

        #[test]
        fn squarefree_parts_reconstruct(factors in linears()) {
            let p = product(&factors, 1);
            let parts = squarefree_decomposition(&p);
            let rebuilt = parts.iter().fold(DensePoly::one(), |acc, (q, m)| {
                acc.mul(&q.pow(u32::try_from(*m).unwrap()))
            });
            prop_assert_eq!(rebuilt, solvent_poly::make_monic(&p));
        }

        #[test]
        fn factored_expression_expands_back(factors in linears()) {
            let mut arena = ExprArena::new();
            let x = arena.symbol("x");
            let p = product(&factors, 1);
            let h = solvent_poly::from_poly(&mut arena, &p, x).unwrap();
            let f = factor(&mut arena, h).unwrap();
            let text = arena.render(f);
            let raw = solvent_core::parse(&mut arena, &text).unwrap();
            let back = arena.canonicalize(raw).unwrap();
            prop_assert_eq!(arena.expand(back).unwrap(), h);
        }
    }
}
