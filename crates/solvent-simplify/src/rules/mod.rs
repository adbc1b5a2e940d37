//! Simplification rules organized by category.

pub mod arithmetic;
pub mod exp_log;
pub mod trig;

use egg::Rewrite;

use crate::language::SolventLang;

/// Collects all simplification rules.
#[must_use]
pub fn all_rules() -> Vec<Rewrite<SolventLang, ()>> {
    let mut rules = Vec::new();
    rules.extend(arithmetic::rules());
    rules.extend(trig::rules());
    rules.extend(exp_log::rules());
    rules
}

#[cfg(test)]
pub(crate) fn run_to_best(rules: &[Rewrite<SolventLang, ()>], start: &str) -> String {
    use egg::{Extractor, RecExpr, Runner};

    let start: RecExpr<SolventLang> = start.parse().unwrap();
    let runner = Runner::default()
        .with_expr(&start)
        .with_iter_limit(20)
        .with_node_limit(20_000)
        .run(rules);
    let extractor = Extractor::new(&runner.egraph, crate::cost::AstSizeCost);
    let (_, best) = extractor.find_best(runner.roots[0]);
    best.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_names_unique() {
        let rules = all_rules();
        let mut names: Vec<_> = rules.iter().map(|r| r.name.to_string()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_combined_identity() {
        let rules = all_rules();
        let best = run_to_best(&rules, "(* (tan x) (cos x))");
        assert_eq!(best, "(sin x)");
    }
}
