//! Trigonometric and hyperbolic simplification rules.
//!
//! The arena keeps `a - b` as `a + (-1)*b`, so identities involving a
//! difference are written with an explicit `-1` coefficient.

use egg::{rewrite, Rewrite};

use crate::language::SolventLang;

/// Returns trigonometric rewrite rules.
#[must_use]
pub fn rules() -> Vec<Rewrite<SolventLang, ()>> {
    vec![
        // Pythagorean identity: sin²(x) + cos²(x) = 1
        rewrite!("pythag"; "(+ (^ (sin ?x) 2) (^ (cos ?x) 2))" => "1"),
        rewrite!("pythag-cos"; "(+ 1 (* -1 (^ (sin ?x) 2)))" => "(^ (cos ?x) 2)"),
        rewrite!("pythag-sin"; "(+ 1 (* -1 (^ (cos ?x) 2)))" => "(^ (sin ?x) 2)"),

        // tan = sin/cos
        rewrite!("tan-def"; "(tan ?x)" => "(* (sin ?x) (^ (cos ?x) -1))"),
        rewrite!("tan-fold"; "(* (sin ?x) (^ (cos ?x) -1))" => "(tan ?x)"),

        // Double angle formulas, folded
        rewrite!("sin-double"; "(* 2 (* (sin ?x) (cos ?x)))" => "(sin (* 2 ?x))"),
        rewrite!("cos-double"; "(+ (^ (cos ?x) 2) (* -1 (^ (sin ?x) 2)))" => "(cos (* 2 ?x))"),

        // Inverse function compositions
        rewrite!("sin-asin"; "(sin (asin ?x))" => "?x"),
        rewrite!("cos-acos"; "(cos (acos ?x))" => "?x"),
        rewrite!("tan-atan"; "(tan (atan ?x))" => "?x"),

        // cosh²(x) - sinh²(x) = 1
        rewrite!("hyperbolic-pythag"; "(+ (^ (cosh ?x) 2) (* -1 (^ (sinh ?x) 2)))" => "1"),
        rewrite!("tanh-def"; "(tanh ?x)" => "(* (sinh ?x) (^ (cosh ?x) -1))"),
        rewrite!("tanh-fold"; "(* (sinh ?x) (^ (cosh ?x) -1))" => "(tanh ?x)"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{arithmetic, run_to_best};

    fn with_arithmetic() -> Vec<Rewrite<SolventLang, ()>> {
        let mut all = rules();
        all.extend(arithmetic::rules());
        all
    }

    #[test]
    fn test_pythag() {
        let rules = rules();
        assert_eq!(run_to_best(&rules, "(+ (^ (sin x) 2) (^ (cos x) 2))"), "1");
    }

    #[test]
    fn test_pythag_reordered() {
        let rules = with_arithmetic();
        let best = run_to_best(&rules, "(+ (^ (cos y) 2) (+ 3 (^ (sin y) 2)))");
        assert!(best == "(+ 3 1)" || best == "(+ 1 3)", "{best}");
    }

    #[test]
    fn test_double_angle() {
        let rules = with_arithmetic();
        let best = run_to_best(&rules, "(* 2 (* (cos x) (sin x)))");
        assert!(best == "(sin (* 2 x))" || best == "(sin (* x 2))", "{best}");
    }

    #[test]
    fn test_hyperbolic() {
        let rules = rules();
        assert_eq!(
            run_to_best(&rules, "(+ (^ (cosh x) 2) (* -1 (^ (sinh x) 2)))"),
            "1"
        );
    }
}
