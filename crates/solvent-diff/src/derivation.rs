//! The derivation d/dx on expressions.
//!
//! For θ = log(u), D(θ) = D(u)/u; for θ = exp(u), D(θ) = D(u)·θ. The
//! remaining elementary functions follow the same chain-rule shape with
//! their own outer derivative.

use hashbrown::HashMap;
use solvent_core::{ExprArena, ExprHandle, ExprNode, Func};

use crate::error::DiffError;

/// The standard derivation with respect to one symbol.
///
/// Derivatives of shared subexpressions are computed once.
#[derive(Clone, Debug)]
pub struct Derivation {
    var: ExprHandle,
    memo: HashMap<ExprHandle, ExprHandle>,
}

impl Derivation {
    /// Creates the derivation d/d`var`.
    #[must_use]
    pub fn new(var: ExprHandle) -> Self {
        Self {
            var,
            memo: HashMap::new(),
        }
    }

    /// The variable of differentiation.
    #[must_use]
    pub fn var(&self) -> ExprHandle {
        self.var
    }

    /// Checks if an expression is a constant (derivative is zero).
    #[must_use]
    pub fn is_constant(&self, arena: &ExprArena, h: ExprHandle) -> bool {
        !arena.contains(h, self.var)
    }

    /// Computes the derivative of an expression.
    ///
    /// # Errors
    ///
    /// Fails with [`DiffError::Unsupported`] for `Abs` and propagates
    /// construction errors.
    pub fn derive(&mut self, arena: &mut ExprArena, h: ExprHandle) -> Result<ExprHandle, DiffError> {
        if let Some(&d) = self.memo.get(&h) {
            return Ok(d);
        }
        if self.is_constant(arena, h) {
            return Ok(arena.zero());
        }

        let d = match arena.get(h).clone() {
            ExprNode::Add(args) => {
                let mut terms = Vec::with_capacity(args.len());
                for a in args {
                    terms.push(self.derive(arena, a)?);
                }
                arena.add(&terms)?
            }
            ExprNode::Mul(args) => {
                let mut terms = Vec::with_capacity(args.len());
                for (i, &a) in args.iter().enumerate() {
                    let da = self.derive(arena, a)?;
                    if arena.is_zero(da) {
                        continue;
                    }
                    let mut factors: Vec<ExprHandle> = args
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(_, &f)| f)
                        .collect();
                    factors.push(da);
                    terms.push(arena.mul(&factors)?);
                }
                arena.add(&terms)?
            }
            ExprNode::Pow { base, exp } => self.derive_pow(arena, h, base, exp)?,
            ExprNode::Function { func, arg } => {
                let outer = outer_derivative(arena, func, arg)?;
                let inner = self.derive(arena, arg)?;
                arena.mul(&[outer, inner])?
            }
            ExprNode::Symbol(_) => arena.one(),
            ExprNode::Number(_) | ExprNode::Float(_) | ExprNode::Constant(_) => arena.zero(),
        };
        self.memo.insert(h, d);
        Ok(d)
    }

    fn derive_pow(
        &mut self,
        arena: &mut ExprArena,
        h: ExprHandle,
        base: ExprHandle,
        exp: ExprHandle,
    ) -> Result<ExprHandle, DiffError> {
        if self.is_constant(arena, exp) {
            // D(b**e) = e * b**(e - 1) * D(b)
            let one = arena.one();
            let lowered = arena.sub(exp, one)?;
            let p = arena.pow(base, lowered)?;
            let db = self.derive(arena, base)?;
            return Ok(arena.mul(&[exp, p, db])?);
        }

        let log_base = arena.func(Func::Log, base)?;
        let de = self.derive(arena, exp)?;
        if self.is_constant(arena, base) {
            // D(b**e) = b**e * log(b) * D(e)
            return Ok(arena.mul(&[h, log_base, de])?);
        }

        // D(b**e) = b**e * (D(e)*log(b) + e*D(b)/b)
        let db = self.derive(arena, base)?;
        let first = arena.mul(&[de, log_base])?;
        let ratio = arena.div(db, base)?;
        let second = arena.mul(&[exp, ratio])?;
        let sum = arena.add(&[first, second])?;
        Ok(arena.mul(&[h, sum])?)
    }
}

/// `f'(u)` for a built-in function.
fn outer_derivative(arena: &mut ExprArena, func: Func, u: ExprHandle) -> Result<ExprHandle, DiffError> {
    let one = arena.one();
    let d = match func {
        Func::Sin => arena.func(Func::Cos, u)?,
        Func::Cos => {
            let s = arena.func(Func::Sin, u)?;
            arena.neg(s)?
        }
        Func::Tan => {
            let t = arena.func(Func::Tan, u)?;
            let t2 = arena.powi(t, 2)?;
            arena.add(&[t2, one])?
        }
        Func::Asin | Func::Acos => {
            let u2 = arena.powi(u, 2)?;
            let rest = arena.sub(one, u2)?;
            let half = arena.half();
            let neg_half = arena.neg(half)?;
            let d = arena.pow(rest, neg_half)?;
            if func == Func::Acos {
                arena.neg(d)?
            } else {
                d
            }
        }
        Func::Atan => {
            let u2 = arena.powi(u, 2)?;
            let rest = arena.add(&[u2, one])?;
            arena.powi(rest, -1)?
        }
        Func::Sinh => arena.func(Func::Cosh, u)?,
        Func::Cosh => arena.func(Func::Sinh, u)?,
        Func::Tanh => {
            let t = arena.func(Func::Tanh, u)?;
            let t2 = arena.powi(t, 2)?;
            arena.sub(one, t2)?
        }
        Func::Exp => arena.func(Func::Exp, u)?,
        Func::Log => arena.powi(u, -1)?,
        Func::Abs => return Err(DiffError::Unsupported(func)),
    };
    Ok(d)
}

/// Differentiates `h` with respect to `var`.
///
/// # Errors
///
/// See [`Derivation::derive`].
pub fn diff(arena: &mut ExprArena, h: ExprHandle, var: ExprHandle) -> Result<ExprHandle, DiffError> {
    Derivation::new(var).derive(arena, h)
}

/// The `n`-th derivative of `h` with respect to `var`.
///
/// # Errors
///
/// See [`Derivation::derive`].
pub fn diff_n(
    arena: &mut ExprArena,
    h: ExprHandle,
    var: ExprHandle,
    n: usize,
) -> Result<ExprHandle, DiffError> {
    let mut d = Derivation::new(var);
    let mut current = h;
    for _ in 0..n {
        current = d.derive(arena, current)?;
    }
    Ok(current)
}
