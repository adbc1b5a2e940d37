//! Property-based tests for cancellation and simplification.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{cancel, simplify, Simplifier};
    use solvent_core::{ExprArena, ExprHandle};

    /// Integer roots of a factored polynomial.
    fn roots() -> impl Strategy<Value = Vec<i64>> {
        prop::collection::vec(-5i64..5, 1..4)
    }

    fn factored(arena: &mut ExprArena, roots: &[i64]) -> ExprHandle {
        let x = arena.symbol("x");
        let mut factors = Vec::with_capacity(roots.len());
        for &r in roots {
            let c = arena.integer(-r);
            factors.push(arena.add(&[x, c]).unwrap());
        }
        let product = arena.mul(&factors).unwrap();
        arena.expand(product).unwrap()
    }

    proptest! {
        #[test]
        fn cancel_removes_shared_factor(common in roots(), num in roots(), den in roots()) {
            let mut arena = ExprArena::new();
            let mut top = common.clone();
            top.extend(&num);
            let mut bottom = common;
            bottom.extend(&den);
            let n = factored(&mut arena, &top);
            let d = factored(&mut arena, &bottom);
            let q = arena.div(n, d).unwrap();
            let c = cancel(&mut arena, q).unwrap();

            let id = arena.symbol_id("x").unwrap();
            for v in [7.5f64, -9.25] {
                let before = arena.eval_f64(q, &[(id, v)]).unwrap();
                let after = arena.eval_f64(c, &[(id, v)]).unwrap();
                prop_assert!((before - after).abs() <= 1e-6 * before.abs().max(1.0));
            }
        }

        #[test]
        fn simplify_preserves_value(num in roots(), den in roots(), v in 6.0f64..9.0) {
            let mut arena = ExprArena::new();
            let n = factored(&mut arena, &num);
            let d = factored(&mut arena, &den);
            let q = arena.div(n, d).unwrap();
            let out = simplify(&mut arena, q, &Simplifier::new());

            let id = arena.symbol_id("x").unwrap();
            let before = arena.eval_f64(q, &[(id, v)]).unwrap();
            let after = arena.eval_f64(out, &[(id, v)]).unwrap();
            prop_assert!((before - after).abs() <= 1e-6 * before.abs().max(1.0));
            prop_assert!(arena.tree_size(out) <= arena.tree_size(q));
        }
    }
}
