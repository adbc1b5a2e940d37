//! Property-based tests for limits.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use solvent_core::{parse, ExprArena, ExprHandle};

    use crate::{limit, Point};

    fn expr(arena: &mut ExprArena, s: &str) -> ExprHandle {
        let raw = parse(arena, s).unwrap();
        arena.canonicalize(raw).unwrap()
    }

    proptest! {
        #[test]
        fn polynomial_limit_is_substitution(
            a in -9i64..9,
            b in -9i64..9,
            c in -9i64..9,
            p in -6i64..6,
        ) {
            let mut arena = ExprArena::new();
            let h = expr(&mut arena, &format!("({a})*x^2 + ({b})*x + ({c})"));
            let at = arena.integer(p);
            let x = arena.symbol("x");
            let value = limit(&mut arena, h, x, Point::Finite(at)).unwrap();
            prop_assert_eq!(arena.as_i64(value), Some(a * p * p + b * p + c));
        }

        #[test]
        fn removable_singularity(a in -20i64..20) {
            let mut arena = ExprArena::new();
            let h = expr(&mut arena, &format!("(x^2 - ({a})^2)/(x - ({a}))"));
            let at = arena.integer(a);
            let x = arena.symbol("x");
            let value = limit(&mut arena, h, x, Point::Finite(at)).unwrap();
            prop_assert_eq!(arena.as_i64(value), Some(2 * a));
        }

        #[test]
        fn rational_function_at_infinity(a in 1i64..9, b in -9i64..9, c in 1i64..9) {
            let mut arena = ExprArena::new();
            let h = expr(&mut arena, &format!("({a})*x^2 + ({b})*x"));
            let d = expr(&mut arena, &format!("({c})*x^2 + 1"));
            let q = arena.div(h, d).unwrap();
            let x = arena.symbol("x");
            let value = limit(&mut arena, q, x, Point::PosInfinity).unwrap();
            let expected = solvent_integers::Rational::from_i64(a, c);
            prop_assert_eq!(arena.as_rational(value), Some(&expected));
        }
    }
}
