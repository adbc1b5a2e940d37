//! Canonical ordering of expressions.
//!
//! Arguments of canonical sums and products are kept sorted by
//! [`compare`], so permutations of the same arguments intern to the same
//! handle. The key compares, in order: the kind of the expression's base,
//! the base's arguments, the exponent and finally the numeric coefficient.
//! Numbers sort before constants, constants before symbols, symbols before
//! compound expressions and those before function applications.
//!
//! [`ordered_terms`] is the separate, print-oriented order of the terms of a
//! sum: lexicographic in the exponents of its generators, highest first.
//!
//! Keys are built through a [`KeyCache`] so a subexpression shared many
//! times in the DAG gets its key computed once.

use std::cmp::Ordering;
use std::rc::Rc;

use hashbrown::HashMap;

use crate::arena::ExprArena;
use crate::eval::Complex;
use crate::expr::{Constant, ExprNode, Func};
use crate::handle::ExprHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct ClassKey {
    major: u8,
    minor: u16,
    name: &'static str,
}

const NUMBER: ClassKey = ClassKey {
    major: 1,
    minor: 0,
    name: "Number",
};
const SYMBOL: ClassKey = ClassKey {
    major: 2,
    minor: 0,
    name: "Symbol",
};
const MUL: ClassKey = ClassKey {
    major: 3,
    minor: 0,
    name: "Mul",
};
const ADD: ClassKey = ClassKey {
    major: 3,
    minor: 1,
    name: "Add",
};
const POW: ClassKey = ClassKey {
    major: 3,
    minor: 2,
    name: "Pow",
};

fn constant_class(c: Constant) -> ClassKey {
    let name = match c {
        Constant::E => "Exp1",
        Constant::I => "ImaginaryUnit",
        Constant::Pi => "Pi",
        Constant::Infinity | Constant::NegInfinity => return NUMBER,
    };
    ClassKey {
        major: 2,
        minor: 0,
        name,
    }
}

fn function_class(func: Func) -> ClassKey {
    let minor = match func {
        Func::Exp => 10,
        Func::Log => 11,
        Func::Sin => 20,
        Func::Cos => 21,
        Func::Tan => 22,
        Func::Sinh => 30,
        Func::Cosh => 31,
        Func::Tanh => 32,
        Func::Asin | Func::Acos | Func::Atan | Func::Abs => 10_000,
    };
    ClassKey {
        major: 4,
        minor,
        name: func.name(),
    }
}

#[derive(Debug, Clone)]
enum KeyArg {
    Name(String),
    Key(Rc<SortKey>),
}

/// Sort key of a single expression.
#[derive(Debug, Clone)]
pub struct SortKey {
    class: ClassKey,
    args: Vec<KeyArg>,
    exp: Option<Rc<SortKey>>,
    coeff: f64,
}

impl SortKey {
    fn number(value: f64) -> Self {
        Self {
            class: NUMBER,
            args: Vec::new(),
            exp: None,
            coeff: value,
        }
    }
}

fn cmp_shared(a: &Rc<SortKey>, b: &Rc<SortKey>) -> Ordering {
    if Rc::ptr_eq(a, b) {
        Ordering::Equal
    } else {
        a.as_ref().cmp(b.as_ref())
    }
}

fn cmp_arg(a: &KeyArg, b: &KeyArg) -> Ordering {
    match (a, b) {
        (KeyArg::Name(x), KeyArg::Name(y)) => x.cmp(y),
        (KeyArg::Key(x), KeyArg::Key(y)) => cmp_shared(x, y),
        (KeyArg::Name(_), KeyArg::Key(_)) => Ordering::Less,
        (KeyArg::Key(_), KeyArg::Name(_)) => Ordering::Greater,
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.class
            .cmp(&other.class)
            .then_with(|| self.args.len().cmp(&other.args.len()))
            .then_with(|| {
                self.args
                    .iter()
                    .zip(&other.args)
                    .map(|(a, b)| cmp_arg(a, b))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| match (&self.exp, &other.exp) {
                (Some(a), Some(b)) => cmp_shared(a, b),
                (a, b) => a.is_some().cmp(&b.is_some()),
            })
            .then_with(|| self.coeff.total_cmp(&other.coeff))
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Memoized sort keys for one arena.
///
/// Handles never change meaning, so a cache stays valid for as long as the
/// arena it was built from.
pub struct KeyCache<'a> {
    arena: &'a ExprArena,
    keys: HashMap<ExprHandle, Rc<SortKey>>,
    bases: HashMap<ExprHandle, Rc<SortKey>>,
}

impl<'a> KeyCache<'a> {
    /// Creates an empty cache over `arena`.
    #[must_use]
    pub fn new(arena: &'a ExprArena) -> Self {
        Self {
            arena,
            keys: HashMap::new(),
            bases: HashMap::new(),
        }
    }

    /// The sort key of `h`.
    pub fn key(&mut self, h: ExprHandle) -> Rc<SortKey> {
        if let Some(k) = self.keys.get(&h) {
            return Rc::clone(k);
        }
        let k = Rc::new(self.compute_key(h));
        self.keys.insert(h, Rc::clone(&k));
        k
    }

    fn compute_key(&mut self, h: ExprHandle) -> SortKey {
        let arena = self.arena;
        match arena.get(h) {
            ExprNode::Number(r) => return SortKey::number(r.to_f64()),
            ExprNode::Float(f) => return SortKey::number(f.value()),
            ExprNode::Constant(Constant::Infinity) => return SortKey::number(f64::INFINITY),
            ExprNode::Constant(Constant::NegInfinity) => {
                return SortKey::number(f64::NEG_INFINITY)
            }
            _ => {}
        }

        let (coeff, rest) = arena.coeff_factors(h);
        let mut key = if rest.len() == 1 {
            let (base, exp) = arena.base_exp(rest[0]);
            let mut key = self.base_key(base).as_ref().clone();
            key.exp = Some(if base == rest[0] {
                Rc::new(SortKey::number(1.0))
            } else {
                self.key(exp)
            });
            key
        } else {
            SortKey {
                class: MUL,
                args: self.factor_keys(&rest),
                exp: Some(Rc::new(SortKey::number(1.0))),
                coeff: 1.0,
            }
        };
        key.coeff = coeff.to_f64();
        key
    }

    /// Key of the base of an expression: its class and arguments only.
    fn base_key(&mut self, h: ExprHandle) -> Rc<SortKey> {
        if let Some(k) = self.bases.get(&h) {
            return Rc::clone(k);
        }
        let arena = self.arena;
        let (class, args) = match arena.get(h) {
            ExprNode::Number(r) => (NUMBER, vec![KeyArg::Name(r.to_string())]),
            ExprNode::Float(f) => (NUMBER, vec![KeyArg::Name(f.value().to_string())]),
            ExprNode::Constant(c) => {
                (constant_class(*c), vec![KeyArg::Name(c.name().to_string())])
            }
            ExprNode::Symbol(id) => {
                (SYMBOL, vec![KeyArg::Name(arena.symbol_name(*id).to_string())])
            }
            ExprNode::Add(_) => (
                ADD,
                self.ordered_terms(h)
                    .into_iter()
                    .map(|t| KeyArg::Key(self.key(t)))
                    .collect(),
            ),
            ExprNode::Mul(args) => (MUL, self.factor_keys(args)),
            ExprNode::Pow { base, exp } => (
                POW,
                vec![KeyArg::Key(self.key(*base)), KeyArg::Key(self.key(*exp))],
            ),
            ExprNode::Function { func, arg } => {
                (function_class(*func), vec![KeyArg::Key(self.key(*arg))])
            }
        };
        let k = Rc::new(SortKey {
            class,
            args,
            exp: None,
            coeff: 1.0,
        });
        self.bases.insert(h, Rc::clone(&k));
        k
    }

    fn factor_keys(&mut self, factors: &[ExprHandle]) -> Vec<KeyArg> {
        let mut keys: Vec<Rc<SortKey>> = factors.iter().map(|&f| self.key(f)).collect();
        keys.sort_by(cmp_shared);
        keys.into_iter().map(KeyArg::Key).collect()
    }

    fn generator_key(&mut self, g: Generator) -> Rc<SortKey> {
        if g.root == 1 {
            return self.key(g.base);
        }
        let mut key = self.base_key(g.base).as_ref().clone();
        #[allow(clippy::cast_precision_loss)]
        let inv = 1.0 / g.root as f64;
        key.exp = Some(Rc::new(SortKey::number(inv)));
        Rc::new(key)
    }
}

/// Total order used for the arguments of canonical sums and products.
#[must_use]
pub fn compare(arena: &ExprArena, a: ExprHandle, b: ExprHandle) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    let mut cache = KeyCache::new(arena);
    let (ka, kb) = (cache.key(a), cache.key(b));
    cmp_shared(&ka, &kb).then_with(|| a.cmp(&b))
}

/// Sorts handles into canonical order.
pub fn sort_args(arena: &ExprArena, args: &mut [ExprHandle]) {
    let mut cache = KeyCache::new(arena);
    args.sort_by_cached_key(|&h| (cache.key(h), h));
}

/// A generator of a monomial: a base raised to `1/root` before the integer
/// exponent is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Generator {
    base: ExprHandle,
    root: i64,
}

fn decompose_power(arena: &ExprArena, factor: ExprHandle) -> (Generator, i64) {
    if let ExprNode::Pow { base, exp } = arena.get(factor) {
        if let Some(r) = arena.as_rational(*exp) {
            if let (Some(p), Some(q)) = (r.numerator().to_i64(), r.denominator().to_i64()) {
                return (Generator { base: *base, root: q }, p);
            }
        }
    }
    (
        Generator {
            base: factor,
            root: 1,
        },
        1,
    )
}

struct TermShape {
    handle: ExprHandle,
    coeff: Complex,
    powers: Vec<(Generator, i64)>,
}

fn is_number_like(arena: &ExprArena, h: ExprHandle) -> bool {
    matches!(arena.get(h), ExprNode::Number(_) | ExprNode::Float(_))
        || matches!(
            arena.get(h),
            ExprNode::Constant(Constant::Pi | Constant::E | Constant::Infinity)
        )
}

/// Terms `c + n*t` with `c > 0` and `n < 0` keep the positive number first
/// (`1 - x`, `1 - sqrt(2)`).
fn positive_number_first(arena: &ExprArena, terms: &[ExprHandle]) -> Option<Vec<ExprHandle>> {
    if terms.len() != 2 {
        return None;
    }
    let (num, other) = if is_number_like(arena, terms[0]) {
        (terms[0], terms[1])
    } else if is_number_like(arena, terms[1]) {
        (terms[1], terms[0])
    } else {
        return None;
    };
    let ExprNode::Mul(args) = arena.get(other) else {
        return None;
    };
    if args.len() != 2 {
        return None;
    }
    let positive = arena.eval_f64(num, &[]).is_some_and(|v| v > 0.0);
    let negative_coeff = arena.as_num(args[0]).is_some_and(|c| c.is_negative());
    (positive && negative_coeff).then(|| vec![num, other])
}

/// Returns the terms of a sum in printing order.
///
/// Each term is split into a numeric coefficient and powers of generators;
/// terms are ordered by the exponent vector over the sorted generators,
/// highest first, then by coefficient (real before imaginary, ascending).
#[must_use]
pub fn ordered_terms(arena: &ExprArena, h: ExprHandle) -> Vec<ExprHandle> {
    KeyCache::new(arena).ordered_terms(h)
}

impl KeyCache<'_> {
    /// [`ordered_terms`] sharing this cache.
    pub fn ordered_terms(&mut self, h: ExprHandle) -> Vec<ExprHandle> {
        let arena = self.arena;
        let terms = arena.terms(h);
        if let Some(special) = positive_number_first(arena, &terms) {
            return special;
        }

        let mut generators: Vec<Generator> = Vec::new();
        let mut shapes: Vec<TermShape> = Vec::with_capacity(terms.len());
        for &term in &terms {
            let (c, rest) = arena.coeff_factors(term);
            let mut coeff = Complex::real(c.to_f64());
            let mut powers = Vec::new();
            for &factor in &rest {
                if !arena.has_symbols(factor) {
                    if let Some(v) = arena.eval_complex(factor) {
                        coeff = Complex {
                            re: coeff.re * v.re - coeff.im * v.im,
                            im: coeff.re * v.im + coeff.im * v.re,
                        };
                        continue;
                    }
                }
                let (g, e) = decompose_power(arena, factor);
                if !generators.contains(&g) {
                    generators.push(g);
                }
                powers.push((g, e));
            }
            shapes.push(TermShape {
                handle: term,
                coeff,
                powers,
            });
        }

        generators.sort_by_cached_key(|&g| self.generator_key(g));
        let monomial = |shape: &TermShape| -> Vec<i64> {
            generators
                .iter()
                .map(|g| {
                    shape
                        .powers
                        .iter()
                        .filter(|(pg, _)| pg == g)
                        .map(|(_, e)| *e)
                        .sum()
                })
                .collect()
        };

        let mut keyed: Vec<(Vec<i64>, &TermShape)> =
            shapes.iter().map(|s| (monomial(s), s)).collect();
        keyed.sort_by(|(ma, a), (mb, b)| {
            mb.cmp(ma)
                .then_with(|| (a.coeff.im != 0.0).cmp(&(b.coeff.im != 0.0)))
                .then_with(|| a.coeff.im.total_cmp(&b.coeff.im))
                .then_with(|| a.coeff.re.total_cmp(&b.coeff.re))
        });
        keyed.into_iter().map(|(_, s)| s.handle).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_numbers_before_symbols() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let two = arena.integer(2);
        assert_eq!(compare(&arena, two, x), Ordering::Less);
    }

    #[test]
    fn test_symbols_by_name() {
        let mut arena = ExprArena::new();
        let y = arena.symbol("y");
        let x = arena.symbol("x");
        assert_eq!(compare(&arena, x, y), Ordering::Less);
    }

    #[test]
    fn test_power_after_base() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let two = arena.integer(2);
        let sq = arena.raw_pow(x, two);
        assert_eq!(compare(&arena, x, sq), Ordering::Less);
    }

    #[test]
    fn test_ordered_terms_descending_degree() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let two = arena.integer(2);
        let sq = arena.raw_pow(x, two);
        let three = arena.integer(3);
        let tx = arena.raw_mul(smallvec![three, x]);
        let m2 = arena.integer(-2);
        let sum = arena.raw_add(smallvec![m2, tx, sq]);

        assert_eq!(ordered_terms(&arena, sum), vec![sq, tx, m2]);
    }

    #[test]
    fn test_positive_number_first() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let one = arena.one();
        let m1 = arena.neg_one();
        let neg_x = arena.raw_mul(smallvec![m1, x]);
        let sum = arena.raw_add(smallvec![neg_x, one]);

        assert_eq!(ordered_terms(&arena, sum), vec![one, neg_x]);
    }

    #[test]
    fn test_deeply_shared_keys() {
        let mut arena = ExprArena::new();
        let two = arena.integer(2);
        let mut chains = Vec::new();
        for name in ["x", "y"] {
            let mut h = arena.symbol(name);
            for _ in 0..64 {
                let twice = arena.raw_mul(smallvec![two, h]);
                let sq = arena.raw_pow(h, two);
                h = arena.raw_add(smallvec![h, twice, sq]);
            }
            chains.push(h);
        }
        let (a, b) = (chains[0], chains[1]);
        assert_eq!(compare(&arena, a, b), compare(&arena, b, a).reverse());
        assert_eq!(ordered_terms(&arena, a).len(), 3);
    }
}
