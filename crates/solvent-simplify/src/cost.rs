//! Cost functions for expression extraction.
//!
//! After equality saturation, we need to pick the "best" expression
//! from each equivalence class. Cost functions define what "best" means.

use egg::{CostFunction, Id, Language};

use crate::language::SolventLang;

/// A cost function that minimizes AST size.
///
/// Function applications weigh one more than arithmetic nodes, so
/// `sin(x)/cos(x)` and `tan(x)` tie only when nothing else separates them.
#[derive(Default)]
pub struct AstSizeCost;

impl CostFunction<SolventLang> for AstSizeCost {
    type Cost = usize;

    fn cost<C>(&mut self, enode: &SolventLang, mut costs: C) -> Self::Cost
    where
        C: FnMut(Id) -> Self::Cost,
    {
        let base_cost = match enode {
            SolventLang::Num(_)
            | SolventLang::Symbol(_)
            | SolventLang::Add(_)
            | SolventLang::Mul(_)
            | SolventLang::Pow(_) => 1,
            _ => 2,
        };

        enode.fold(base_cost, |sum, id| sum + costs(id))
    }
}
