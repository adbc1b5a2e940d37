//! Conversion between arena expressions and e-graph terms.

use egg::{Id, RecExpr, Symbol};
use hashbrown::HashMap;
use solvent_core::{ExprArena, ExprHandle, ExprNode, MathResult};

use crate::language::SolventLang;

/// Leaves that were replaced by opaque symbols on the way into the e-graph.
#[derive(Debug, Default)]
pub struct Leaves {
    by_symbol: HashMap<Symbol, ExprHandle>,
    by_handle: HashMap<ExprHandle, Symbol>,
}

impl Leaves {
    fn symbol_for(&mut self, h: ExprHandle) -> Symbol {
        if let Some(&s) = self.by_handle.get(&h) {
            return s;
        }
        let s = Symbol::from(format!("v{}", self.by_handle.len()));
        self.by_handle.insert(h, s);
        self.by_symbol.insert(s, h);
        s
    }

    /// The arena expression a leaf symbol stands for.
    #[must_use]
    pub fn resolve(&self, s: Symbol) -> Option<ExprHandle> {
        self.by_symbol.get(&s).copied()
    }

    /// Number of distinct leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_handle.len()
    }

    /// True if no leaf has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_handle.is_empty()
    }
}

struct Encoder<'a> {
    arena: &'a ExprArena,
    expr: RecExpr<SolventLang>,
    leaves: Leaves,
    memo: HashMap<ExprHandle, Id>,
}

impl Encoder<'_> {
    fn leaf(&mut self, h: ExprHandle) -> Id {
        let s = self.leaves.symbol_for(h);
        self.expr.add(SolventLang::Symbol(s))
    }

    fn fold(&mut self, args: &[ExprHandle], make: fn([Id; 2]) -> SolventLang) -> Id {
        let mut ids: Vec<Id> = args.iter().map(|&a| self.encode(a)).collect();
        let mut acc = ids.pop().unwrap_or_else(|| self.expr.add(SolventLang::Num(0)));
        while let Some(prev) = ids.pop() {
            acc = self.expr.add(make([prev, acc]));
        }
        acc
    }

    fn encode(&mut self, h: ExprHandle) -> Id {
        if let Some(&id) = self.memo.get(&h) {
            return id;
        }
        let arena = self.arena;
        let id = match arena.get(h) {
            ExprNode::Number(r) => {
                match (r.numerator().to_i64(), r.denominator().to_i64()) {
                    (Some(n), Some(1)) => self.expr.add(SolventLang::Num(n)),
                    (Some(n), Some(d)) => {
                        let d = self.expr.add(SolventLang::Num(d));
                        let m1 = self.expr.add(SolventLang::Num(-1));
                        let inv = self.expr.add(SolventLang::Pow([d, m1]));
                        if n == 1 {
                            inv
                        } else {
                            let n = self.expr.add(SolventLang::Num(n));
                            self.expr.add(SolventLang::Mul([n, inv]))
                        }
                    }
                    _ => self.leaf(h),
                }
            }
            ExprNode::Float(_) | ExprNode::Constant(_) | ExprNode::Symbol(_) => self.leaf(h),
            ExprNode::Add(args) => self.fold(args, SolventLang::Add),
            ExprNode::Mul(args) => self.fold(args, SolventLang::Mul),
            &ExprNode::Pow { base, exp } => {
                let b = self.encode(base);
                let e = self.encode(exp);
                self.expr.add(SolventLang::Pow([b, e]))
            }
            &ExprNode::Function { func, arg } => {
                let a = self.encode(arg);
                self.expr.add(SolventLang::apply(func, a))
            }
        };
        self.memo.insert(h, id);
        id
    }
}

/// Encodes an arena expression as an e-graph term.
///
/// Symbols, constants, floats and numbers too large for `i64` become leaf
/// symbols recorded in the returned [`Leaves`].
#[must_use]
pub fn to_rec_expr(arena: &ExprArena, h: ExprHandle) -> (RecExpr<SolventLang>, Leaves) {
    let mut enc = Encoder {
        arena,
        expr: RecExpr::default(),
        leaves: Leaves::default(),
        memo: HashMap::new(),
    };
    enc.encode(h);
    (enc.expr, enc.leaves)
}

/// Rebuilds an e-graph term in the arena through the canonical constructors.
///
/// Returns `Ok(None)` if the term mentions a symbol that is not one of the
/// recorded leaves.
///
/// # Errors
///
/// Propagates construction errors from canonicalization.
pub fn from_rec_expr(
    arena: &mut ExprArena,
    expr: &RecExpr<SolventLang>,
    leaves: &Leaves,
) -> MathResult<Option<ExprHandle>> {
    let nodes = expr.as_ref();
    let mut built: Vec<ExprHandle> = Vec::with_capacity(nodes.len());
    for node in nodes {
        let at = |id: Id| built[usize::from(id)];
        let h = match node {
            SolventLang::Num(n) => arena.integer(*n),
            SolventLang::Symbol(s) => match leaves.resolve(*s) {
                Some(h) => h,
                None => return Ok(None),
            },
            SolventLang::Add([a, b]) => {
                let (a, b) = (at(*a), at(*b));
                arena.add(&[a, b])?
            }
            SolventLang::Mul([a, b]) => {
                let (a, b) = (at(*a), at(*b));
                arena.mul(&[a, b])?
            }
            SolventLang::Pow([a, b]) => {
                let (a, b) = (at(*a), at(*b));
                arena.pow(a, b)?
            }
            other => match other.as_function() {
                Some((func, arg)) => {
                    let arg = at(arg);
                    arena.func(func, arg)?
                }
                None => return Ok(None),
            },
        };
        built.push(h);
    }
    Ok(built.last().copied())
}
