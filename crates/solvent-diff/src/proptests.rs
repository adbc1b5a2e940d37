//! Property-based tests for differentiation.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use solvent_core::{parse, ExprArena};

    use crate::diff;

    fn functions() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec![
            "x^3 - 2x", "sin(x)*x", "exp(x^2)", "log(x^2 + 1)", "atan(2x)",
            "cosh(x)/x", "sqrt(x^2 + 4)", "x^x",
        ])
    }

    proptest! {
        #[test]
        fn derivative_matches_difference_quotient(f in functions(), v in 0.5f64..2.0) {
            let mut arena = ExprArena::new();
            let raw = parse(&mut arena, f).unwrap();
            let h = arena.canonicalize(raw).unwrap();
            let x = arena.symbol("x");
            let d = diff(&mut arena, h, x).unwrap();

            let id = arena.symbol_id("x").unwrap();
            let step = 1e-6;
            let hi = arena.eval_f64(h, &[(id, v + step)]).unwrap();
            let lo = arena.eval_f64(h, &[(id, v - step)]).unwrap();
            let numeric = (hi - lo) / (2.0 * step);
            let exact = arena.eval_f64(d, &[(id, v)]).unwrap();
            prop_assert!((numeric - exact).abs() <= 1e-4 * exact.abs().max(1.0),
                "{}: {} vs {}", f, numeric, exact);
        }

        #[test]
        fn derivative_is_linear(a in -5i64..5, b in -5i64..5) {
            let mut arena = ExprArena::new();
            let raw = parse(&mut arena, &format!("({a})*sin(x) + ({b})*x^2")).unwrap();
            let h = arena.canonicalize(raw).unwrap();
            let x = arena.symbol("x");
            let d = diff(&mut arena, h, x).unwrap();
            let raw = parse(&mut arena, &format!("({a})*cos(x) + 2*({b})*x")).unwrap();
            let expected = arena.canonicalize(raw).unwrap();
            prop_assert_eq!(d, expected);
        }
    }
}
