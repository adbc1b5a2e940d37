//! Property-based tests for the router.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{solve, Category, Outcome, Solver};

    fn gcd(a: i64, b: i64) -> i64 {
        if b == 0 {
            a.abs()
        } else {
            gcd(b, a % b)
        }
    }

    fn fraction(n: i64, d: i64) -> String {
        let g = gcd(n, d);
        let (n, d) = if d < 0 { (-n / g, -d / g) } else { (n / g, d / g) };
        if d == 1 {
            n.to_string()
        } else {
            format!("{n}/{d}")
        }
    }

    proptest! {
        #[test]
        fn linear_equation_has_exact_root(
            a in (-12i64..12).prop_filter("nonzero", |a| *a != 0),
            b in -50i64..50,
            c in -50i64..50,
        ) {
            let answer = solve(&format!("Solve for x: {a}x + {b} = {c}"), "algebra");
            prop_assert_eq!(answer, format!("x = {}", fraction(c - b, a)));
        }

        #[test]
        fn integer_arithmetic(a in -1000i64..1000, b in -1000i64..1000) {
            let answer = solve(&format!("what is {a} * {b} + {a}"), "general");
            prop_assert_eq!(answer, format!("Result: {}", a * b + a));
        }

        #[test]
        fn identical_input_identical_output(text in "[a-z0-9 =+*/^().x-]{0,24}") {
            let solver = Solver::default();
            let first = solver.solve_detailed(&text, Category::General);
            let second = solver.solve_detailed(&text, Category::General);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn every_failure_is_an_apology(text in "(simplify|factor|expand|what is) [a-z0-9+*/^()-]{0,12}") {
            let outcome = Solver::default().solve_detailed(&text, Category::General);
            if let Outcome::Failed(message) = outcome {
                prop_assert!(message.starts_with(crate::outcome::APOLOGY));
            }
        }
    }
}
