//! Property-based tests for integration.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use solvent_core::{parse, ExprArena};
    use solvent_diff::diff;

    use crate::integrate;

    fn integrands() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec![
            "x^3 - 4x + 1", "x*exp(3x)", "x^2*cos(x)", "sin(2x + 1)", "1/(3x + 2)",
            "sqrt(2x + 1)", "x*exp(x^2)", "tan(x)", "5^x", "x*cosh(x)",
            "1/(x^2 + 4)", "x^3/(x + 1)", "1/(x*(x + 1))", "sin(x)^2", "cos(2x)^2",
        ])
    }

    proptest! {
        #[test]
        fn derivative_of_integral_is_integrand(f in integrands(), v in 0.1f64..1.2) {
            let mut arena = ExprArena::new();
            let raw = parse(&mut arena, f).unwrap();
            let h = arena.canonicalize(raw).unwrap();
            let x = arena.symbol("x");
            let big = integrate(&mut arena, h, x).unwrap();
            let back = diff(&mut arena, big, x).unwrap();

            let id = arena.symbol_id("x").unwrap();
            let want = arena.eval_f64(h, &[(id, v)]).unwrap();
            let got = arena.eval_f64(back, &[(id, v)]).unwrap();
            prop_assert!((want - got).abs() <= 1e-9 * want.abs().max(1.0),
                "{}: {} vs {}", f, want, got);
        }

        #[test]
        fn polynomial_integral_is_exact(a in -9i64..9, b in -9i64..9, c in -9i64..9) {
            let mut arena = ExprArena::new();
            let raw = parse(&mut arena, &format!("({a})*x^2 + ({b})*x + ({c})")).unwrap();
            let h = arena.canonicalize(raw).unwrap();
            let x = arena.symbol("x");
            let big = integrate(&mut arena, h, x).unwrap();
            let back = diff(&mut arena, big, x).unwrap();
            prop_assert_eq!(back, h);
        }
    }
}
