//! Arena allocator for expression storage.
//!
//! All expressions are stored contiguously in a `Vec`, with hash-consing
//! ensuring each unique expression is stored exactly once. An arena lives for
//! a single computation and is dropped as a whole.
//!
//! The `raw_*` constructors intern exactly the node they are given. The
//! auto-evaluating constructors (`add`, `mul`, `pow`, ...) live in
//! [`crate::canonical`].

use hashbrown::HashMap;
use num_traits::{One, Zero};
use smallvec::SmallVec;
use solvent_integers::Rational;

use crate::expr::{Args, Constant, ExprNode, Float, Func, SymbolId};
use crate::handle::ExprHandle;
use crate::intern::InternTable;
use crate::limits::Limits;
use crate::number::Num;

/// The main arena for storing expressions.
#[derive(Debug, Clone)]
pub struct ExprArena {
    /// Storage for all expression nodes.
    nodes: Vec<ExprNode>,
    /// Interning table: maps node content to its handle.
    intern_map: HashMap<ExprNode, ExprHandle>,
    /// Symbol names.
    symbols: InternTable<String>,
    /// Resource bounds for algorithms running on this arena.
    limits: Limits,
    zero: ExprHandle,
    one: ExprHandle,
    neg_one: ExprHandle,
    half: ExprHandle,
}

impl Default for ExprArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ExprArena {
    /// Creates a new arena with default [`Limits`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Creates a new arena with the given limits.
    #[must_use]
    pub fn with_limits(limits: Limits) -> Self {
        let placeholder = ExprHandle::new(0);
        let mut arena = Self {
            nodes: Vec::with_capacity(64),
            intern_map: HashMap::with_capacity(64),
            symbols: InternTable::new(),
            limits,
            zero: placeholder,
            one: placeholder,
            neg_one: placeholder,
            half: placeholder,
        };
        arena.zero = arena.intern(ExprNode::Number(Rational::zero()));
        arena.one = arena.intern(ExprNode::Number(Rational::one()));
        arena.neg_one = arena.intern(ExprNode::Number(Rational::from(-1)));
        arena.half = arena.intern(ExprNode::Number(Rational::from_i64(1, 2)));
        arena
    }

    /// Returns the limits this arena was created with.
    #[must_use]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Interns an expression node, returning its handle.
    ///
    /// If an identical node already exists, returns the existing handle.
    ///
    /// # Panics
    ///
    /// Panics if the arena holds `u32::MAX` nodes.
    #[allow(clippy::cast_possible_truncation)]
    pub fn intern(&mut self, node: ExprNode) -> ExprHandle {
        if let Some(&handle) = self.intern_map.get(&node) {
            return handle;
        }

        let index = self.nodes.len();
        assert!(index < u32::MAX as usize, "Arena capacity exceeded");

        let handle = ExprHandle::new(index as u32);
        self.nodes.push(node.clone());
        self.intern_map.insert(node, handle);
        handle
    }

    /// Gets the node at the given handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle belongs to another arena.
    #[must_use]
    pub fn get(&self, handle: ExprHandle) -> &ExprNode {
        &self.nodes[handle.slot()]
    }

    /// Returns the number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // === Symbols ===

    /// Interns a symbol name, returning its id.
    pub fn intern_symbol(&mut self, name: &str) -> SymbolId {
        self.symbols.intern(name.to_string())
    }

    /// Gets the name of a symbol by its id.
    #[must_use]
    pub fn symbol_name(&self, id: SymbolId) -> &str {
        self.symbols.get(id).map_or("?", String::as_str)
    }

    /// Looks up a symbol id without interning.
    #[must_use]
    pub fn symbol_id(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get_id(&name.to_string())
    }

    // === Atoms ===

    /// The number 0.
    #[must_use]
    pub fn zero(&self) -> ExprHandle {
        self.zero
    }

    /// The number 1.
    #[must_use]
    pub fn one(&self) -> ExprHandle {
        self.one
    }

    /// The number -1.
    #[must_use]
    pub fn neg_one(&self) -> ExprHandle {
        self.neg_one
    }

    /// The number 1/2.
    #[must_use]
    pub fn half(&self) -> ExprHandle {
        self.half
    }

    /// Creates an integer expression.
    pub fn integer(&mut self, value: i64) -> ExprHandle {
        self.intern(ExprNode::Number(Rational::from(value)))
    }

    /// Creates an exact rational expression.
    pub fn rational(&mut self, value: Rational) -> ExprHandle {
        self.intern(ExprNode::Number(value))
    }

    /// Creates a floating-point expression.
    pub fn float(&mut self, value: f64) -> ExprHandle {
        self.intern(ExprNode::Float(Float::new(value)))
    }

    /// Creates a numeric expression from a [`Num`].
    pub fn num(&mut self, value: Num) -> ExprHandle {
        match value {
            Num::Exact(r) => self.rational(r),
            Num::Approx(f) => self.float(f),
        }
    }

    /// Creates a constant expression.
    pub fn constant(&mut self, c: Constant) -> ExprHandle {
        self.intern(ExprNode::Constant(c))
    }

    /// Creates a symbol expression.
    pub fn symbol(&mut self, name: &str) -> ExprHandle {
        let id = self.intern_symbol(name);
        self.intern(ExprNode::Symbol(id))
    }

    // === Raw compound constructors ===

    /// Interns a sum exactly as given.
    pub fn raw_add(&mut self, args: impl Into<Args>) -> ExprHandle {
        let args = args.into();
        match args.len() {
            0 => self.zero,
            1 => args[0],
            _ => self.intern(ExprNode::Add(args)),
        }
    }

    /// Interns a product exactly as given.
    pub fn raw_mul(&mut self, args: impl Into<Args>) -> ExprHandle {
        let args = args.into();
        match args.len() {
            0 => self.one,
            1 => args[0],
            _ => self.intern(ExprNode::Mul(args)),
        }
    }

    /// Interns a power exactly as given.
    pub fn raw_pow(&mut self, base: ExprHandle, exp: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Pow { base, exp })
    }

    /// Interns a function application exactly as given.
    pub fn raw_func(&mut self, func: Func, arg: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Function { func, arg })
    }

    // === Queries ===

    /// Returns the exact value of a numeric node.
    #[must_use]
    pub fn as_rational(&self, h: ExprHandle) -> Option<&Rational> {
        match self.get(h) {
            ExprNode::Number(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the value of an exact integer node that fits in an i64.
    #[must_use]
    pub fn as_i64(&self, h: ExprHandle) -> Option<i64> {
        self.as_rational(h).and_then(Rational::to_i64)
    }

    /// Returns the value of any numeric node.
    #[must_use]
    pub fn as_num(&self, h: ExprHandle) -> Option<Num> {
        match self.get(h) {
            ExprNode::Number(r) => Some(Num::Exact(r.clone())),
            ExprNode::Float(f) => Some(Num::Approx(f.value())),
            _ => None,
        }
    }

    /// Returns the symbol id of a symbol node.
    #[must_use]
    pub fn as_symbol(&self, h: ExprHandle) -> Option<SymbolId> {
        match self.get(h) {
            ExprNode::Symbol(id) => Some(*id),
            _ => None,
        }
    }

    /// True for exact zero.
    #[must_use]
    pub fn is_zero(&self, h: ExprHandle) -> bool {
        h == self.zero
    }

    /// True for exact one.
    #[must_use]
    pub fn is_one(&self, h: ExprHandle) -> bool {
        h == self.one
    }

    /// True for numeric literals.
    #[must_use]
    pub fn is_number(&self, h: ExprHandle) -> bool {
        self.get(h).is_number()
    }

    /// True for `oo` or `-oo`.
    #[must_use]
    pub fn is_infinite(&self, h: ExprHandle) -> bool {
        matches!(self.get(h), ExprNode::Constant(c) if c.is_infinite())
    }

    /// Splits a term into its numeric coefficient and the remaining factors.
    ///
    /// `3*x*y` gives `(3, [x, y])`, `x` gives `(1, [x])` and `5` gives
    /// `(5, [])`.
    #[must_use]
    pub fn coeff_factors(&self, h: ExprHandle) -> (Num, SmallVec<[ExprHandle; 4]>) {
        match self.get(h) {
            ExprNode::Number(_) | ExprNode::Float(_) => {
                (self.as_num(h).unwrap_or_else(Num::one), SmallVec::new())
            }
            ExprNode::Mul(args) => match self.as_num(args[0]) {
                Some(c) => (c, args[1..].iter().copied().collect()),
                None => (Num::one(), args.clone()),
            },
            _ => (Num::one(), smallvec::smallvec![h]),
        }
    }

    /// Returns `(base, exponent)`; non-powers have exponent one.
    #[must_use]
    pub fn base_exp(&self, h: ExprHandle) -> (ExprHandle, ExprHandle) {
        match self.get(h) {
            ExprNode::Pow { base, exp } => (*base, *exp),
            _ => (h, self.one),
        }
    }

    /// Returns the arguments of a sum, or the expression itself as a single
    /// term.
    #[must_use]
    pub fn terms(&self, h: ExprHandle) -> Args {
        match self.get(h) {
            ExprNode::Add(args) => args.clone(),
            _ => smallvec::smallvec![h],
        }
    }

    /// Returns the arguments of a product, or the expression itself as a
    /// single factor.
    #[must_use]
    pub fn factors(&self, h: ExprHandle) -> Args {
        match self.get(h) {
            ExprNode::Mul(args) => args.clone(),
            _ => smallvec::smallvec![h],
        }
    }
}
