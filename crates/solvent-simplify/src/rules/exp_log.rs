//! Exponential and logarithmic simplification rules.
//!
//! Only identities that hold for every complex argument are used, so
//! `log(exp(x))` and `log(x*y)` stay as they are.

use egg::{rewrite, Rewrite};

use crate::language::SolventLang;

/// Returns exponential and logarithmic rewrite rules.
#[must_use]
pub fn rules() -> Vec<Rewrite<SolventLang, ()>> {
    vec![
        rewrite!("exp-zero"; "(exp 0)" => "1"),
        rewrite!("log-one"; "(log 1)" => "0"),
        rewrite!("exp-log"; "(exp (log ?x))" => "?x"),

        // exp(a) * exp(b) = exp(a + b)
        rewrite!("exp-add-fold"; "(* (exp ?a) (exp ?b))" => "(exp (+ ?a ?b))"),
        rewrite!("exp-pow"; "(^ (exp ?a) ?n)" => "(exp (* ?n ?a))"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::run_to_best;

    #[test]
    fn test_exp_log() {
        let rules = rules();
        assert_eq!(run_to_best(&rules, "(exp (log (+ x 1)))"), "(+ x 1)");
    }

    #[test]
    fn test_exp_product() {
        let rules = rules();
        assert_eq!(run_to_best(&rules, "(* (exp x) (exp y))"), "(exp (+ x y))");
    }

    #[test]
    fn test_log_exp_untouched() {
        let rules = rules();
        assert_eq!(run_to_best(&rules, "(log (exp x))"), "(log (exp x))");
    }
}
