//! Property-based tests for equation solving.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use solvent_core::{parse, ExprArena};
    use solvent_integers::Rational;

    use crate::solve;

    fn solve_str(lhs: &str, rhs: &str) -> (ExprArena, Vec<solvent_core::ExprHandle>) {
        let mut arena = ExprArena::new();
        let l = parse(&mut arena, lhs).unwrap();
        let l = arena.canonicalize(l).unwrap();
        let r = parse(&mut arena, rhs).unwrap();
        let r = arena.canonicalize(r).unwrap();
        let x = arena.symbol("x");
        let roots = solve(&mut arena, l, r, x).unwrap();
        (arena, roots)
    }

    proptest! {
        #[test]
        fn linear_root_is_exact(a in 1i64..20, b in -50i64..50, c in -50i64..50) {
            let (arena, roots) = solve_str(&format!("{a}*x + ({b})"), &format!("{c}"));
            prop_assert_eq!(roots.len(), 1);
            prop_assert_eq!(arena.as_rational(roots[0]), Some(&Rational::from_i64(c - b, a)));
        }

        #[test]
        fn integer_roots_come_back_sorted(r1 in -12i64..12, r2 in -12i64..12) {
            let (arena, roots) = solve_str(&format!("(x - ({r1}))*(x - ({r2}))"), "0");
            let mut expected = vec![r1.min(r2), r1.max(r2)];
            expected.dedup();
            let got: Vec<i64> = roots.iter().filter_map(|&r| arena.as_i64(r)).collect();
            prop_assert_eq!(got, expected);
        }

        #[test]
        fn roots_satisfy_quadratic(b in -10i64..10, c in -10i64..10) {
            let (arena, roots) = solve_str(&format!("x^2 + ({b})*x + ({c})"), "0");
            prop_assert!(!roots.is_empty());
            for r in roots {
                let z = arena.eval_complex(r).unwrap();
                // z**2 + b*z + c
                let re = z.re * z.re - z.im * z.im + b as f64 * z.re + c as f64;
                let im = 2.0 * z.re * z.im + b as f64 * z.im;
                prop_assert!(re.abs() < 1e-9 && im.abs() < 1e-9);
            }
        }
    }
}
