//! Read-only traversals.

use hashbrown::HashSet;

use crate::arena::ExprArena;
use crate::expr::{ExprNode, Func, SymbolId};
use crate::handle::ExprHandle;

impl ExprArena {
    /// True if some node reachable from `h` (including `h`) satisfies
    /// `pred`. Shared subexpressions are visited once.
    fn any_node(&self, h: ExprHandle, mut pred: impl FnMut(ExprHandle, &ExprNode) -> bool) -> bool {
        let mut seen = HashSet::new();
        let mut stack = vec![h];
        while let Some(e) = stack.pop() {
            if !seen.insert(e) {
                continue;
            }
            let node = self.get(e);
            if pred(e, node) {
                return true;
            }
            stack.extend(node.children());
        }
        false
    }

    /// True if `needle` occurs anywhere inside `h` (including `h` itself).
    #[must_use]
    pub fn contains(&self, h: ExprHandle, needle: ExprHandle) -> bool {
        h == needle || self.any_node(h, |e, _| e == needle)
    }

    /// True if the expression contains any symbol.
    #[must_use]
    pub fn has_symbols(&self, h: ExprHandle) -> bool {
        self.any_node(h, |_, node| matches!(node, ExprNode::Symbol(_)))
    }

    /// True if the expression applies `func` anywhere.
    #[must_use]
    pub fn has_function(&self, h: ExprHandle, func: Func) -> bool {
        match self.get(h) {
            ExprNode::Function { func: f, .. } if *f == func => true,
            node => node.children().into_iter().any(|c| self.has_function(c, func)),
        }
    }

    /// Returns the free symbols of an expression, sorted by name.
    #[must_use]
    pub fn free_symbols(&self, h: ExprHandle) -> Vec<SymbolId> {
        let mut seen = HashSet::new();
        let mut stack = vec![h];
        while let Some(e) = stack.pop() {
            match self.get(e) {
                ExprNode::Symbol(id) => {
                    seen.insert(*id);
                }
                node => stack.extend(node.children()),
            }
        }
        let mut symbols: Vec<SymbolId> = seen.into_iter().collect();
        symbols.sort_by(|a, b| self.symbol_name(*a).cmp(self.symbol_name(*b)));
        symbols
    }

    /// Number of nodes in the expression tree (shared subtrees counted each
    /// time they occur).
    #[must_use]
    pub fn tree_size(&self, h: ExprHandle) -> usize {
        1 + self
            .get(h)
            .children()
            .into_iter()
            .map(|c| self.tree_size(c))
            .sum::<usize>()
    }

    /// Number of occurrences of `needle` inside `h`.
    #[must_use]
    pub fn count_occurrences(&self, h: ExprHandle, needle: ExprHandle) -> usize {
        if h == needle {
            return 1;
        }
        self.get(h)
            .children()
            .into_iter()
            .map(|c| self.count_occurrences(c, needle))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_free_symbols_sorted() {
        let mut arena = ExprArena::new();
        let y = arena.symbol("y");
        let x = arena.symbol("x");
        let sum = arena.raw_add(smallvec![y, x]);
        let sin = arena.raw_func(Func::Sin, sum);

        let names: Vec<&str> = arena
            .free_symbols(sin)
            .into_iter()
            .map(|id| arena.symbol_name(id))
            .collect();
        assert_eq!(names, vec!["x", "y"]);
        assert!(arena.has_function(sin, Func::Sin));
        assert!(!arena.has_function(sin, Func::Cos));
    }

    #[test]
    fn test_shared_dag_walks() {
        // Each level uses the previous one twice, so the tree has 2^60
        // leaves while the DAG has 61 nodes.
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let y = arena.symbol("y");
        let mut h = x;
        for _ in 0..60 {
            h = arena.raw_add(smallvec![h, h]);
        }
        assert!(arena.contains(h, x));
        assert!(!arena.contains(h, y));
        assert!(arena.has_symbols(h));
    }

    #[test]
    fn test_occurrences() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let two = arena.integer(2);
        let sq = arena.raw_pow(x, two);
        let sum = arena.raw_add(smallvec![sq, x]);

        assert_eq!(arena.count_occurrences(sum, x), 2);
        assert!(arena.contains(sum, sq));
        assert!(!arena.has_symbols(two));
        assert_eq!(arena.tree_size(sum), 5);
    }
}
