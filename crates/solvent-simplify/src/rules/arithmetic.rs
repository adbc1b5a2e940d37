//! Basic algebraic simplification rules.
//!
//! Distribution and factoring are left out: with a size-based cost they
//! trade a collected polynomial for a nested one of equal meaning.

use egg::{rewrite, Rewrite};

use crate::language::SolventLang;

/// Returns basic arithmetic rewrite rules.
#[must_use]
pub fn rules() -> Vec<Rewrite<SolventLang, ()>> {
    vec![
        // Identities
        rewrite!("add-zero"; "(+ 0 ?a)" => "?a"),
        rewrite!("mul-one"; "(* 1 ?a)" => "?a"),
        rewrite!("mul-zero"; "(* 0 ?a)" => "0"),

        // Commutativity
        rewrite!("add-comm"; "(+ ?a ?b)" => "(+ ?b ?a)"),
        rewrite!("mul-comm"; "(* ?a ?b)" => "(* ?b ?a)"),

        // Associativity
        rewrite!("add-assoc-l"; "(+ (+ ?a ?b) ?c)" => "(+ ?a (+ ?b ?c))"),
        rewrite!("add-assoc-r"; "(+ ?a (+ ?b ?c))" => "(+ (+ ?a ?b) ?c)"),
        rewrite!("mul-assoc-l"; "(* (* ?a ?b) ?c)" => "(* ?a (* ?b ?c))"),
        rewrite!("mul-assoc-r"; "(* ?a (* ?b ?c))" => "(* (* ?a ?b) ?c)"),

        // Cancellation
        rewrite!("add-inverse"; "(+ ?a (* -1 ?a))" => "0"),
        rewrite!("mul-inverse"; "(* ?a (^ ?a -1))" => "1"),

        // Power rules
        rewrite!("pow-zero"; "(^ ?a 0)" => "1"),
        rewrite!("pow-one"; "(^ ?a 1)" => "?a"),
        rewrite!("mul-same"; "(* ?a ?a)" => "(^ ?a 2)"),
        rewrite!("mul-pow"; "(* (^ ?a ?m) (^ ?a ?n))" => "(^ ?a (+ ?m ?n))"),
        rewrite!("mul-pow-base"; "(* ?a (^ ?a ?n))" => "(^ ?a (+ ?n 1))"),
        rewrite!("pow-pow-int"; "(^ (^ ?a ?m) -1)" => "(^ ?a (* -1 ?m))"),
    ]
}
