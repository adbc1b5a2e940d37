//! Property-based tests for canonical form.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{parse, ExprArena, ExprHandle};

    /// Terms `c * x**e`.
    fn poly_terms() -> impl Strategy<Value = Vec<(i64, i64)>> {
        prop::collection::vec((-20i64..20, 0i64..5), 1..6)
    }

    fn build(arena: &mut ExprArena, terms: &[(i64, i64)]) -> ExprHandle {
        let x = arena.symbol("x");
        let mut out = Vec::with_capacity(terms.len());
        for &(c, e) in terms {
            let c = arena.integer(c);
            let p = arena.powi(x, e).unwrap();
            out.push(arena.mul(&[c, p]).unwrap());
        }
        arena.add(&out).unwrap()
    }

    proptest! {
        #[test]
        fn sum_independent_of_order(terms in poly_terms()) {
            let mut arena = ExprArena::new();
            let forward = build(&mut arena, &terms);
            let mut reversed = terms.clone();
            reversed.reverse();
            let backward = build(&mut arena, &reversed);
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn difference_with_self_is_zero(terms in poly_terms()) {
            let mut arena = ExprArena::new();
            let p = build(&mut arena, &terms);
            let d = arena.sub(p, p).unwrap();
            prop_assert!(arena.is_zero(d));
        }

        #[test]
        fn expansion_preserves_value(a in poly_terms(), b in poly_terms(), v in -3i64..3) {
            let mut arena = ExprArena::new();
            let pa = build(&mut arena, &a);
            let pb = build(&mut arena, &b);
            let product = arena.mul(&[pa, pb]).unwrap();
            let expanded = arena.expand(product).unwrap();

            let x = arena.symbol("x");
            let value = arena.integer(v);
            let lhs = arena.substitute(product, x, value).unwrap();
            let rhs = arena.substitute(expanded, x, value).unwrap();
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn printed_form_reparses(terms in poly_terms()) {
            let mut arena = ExprArena::new();
            let p = build(&mut arena, &terms);
            let text = arena.render(p);
            let raw = parse(&mut arena, &text).unwrap();
            let back = arena.canonicalize(raw).unwrap();
            prop_assert_eq!(back, p, "printed as {}", text);
        }
    }
}
