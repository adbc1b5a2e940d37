//! Rule dispatch for indefinite integrals.

use solvent_core::{ExprArena, ExprHandle, ExprNode, Func};
use solvent_diff::diff;
use solvent_simplify::cancel;
use tracing::trace;

use crate::error::IntegrateError;
use crate::linear::linear_parts;
use crate::parts::polynomial_times;
use crate::rational::rational_antiderivative;
use crate::table::{function_antiderivative, power_antiderivative};

type Step = Result<Option<ExprHandle>, IntegrateError>;

/// Indefinite integration with respect to one symbol.
///
/// Rules are tried in a fixed order and the first one that applies wins.
/// Recursion through sums, products and expansion is bounded by the
/// arena's depth limit.
#[derive(Clone, Copy, Debug)]
pub struct Integrator {
    var: ExprHandle,
    max_depth: usize,
}

impl Integrator {
    /// Creates an integrator for `var`, bounded by the arena's limits.
    #[must_use]
    pub fn new(arena: &ExprArena, var: ExprHandle) -> Self {
        Self {
            var,
            max_depth: arena.limits().max_depth,
        }
    }

    /// The variable of integration.
    #[must_use]
    pub fn var(&self) -> ExprHandle {
        self.var
    }

    /// An antiderivative of `h`, without the constant of integration.
    ///
    /// # Errors
    ///
    /// Fails with [`IntegrateError::NoClosedForm`] naming `h` when no rule
    /// applies to some part of it.
    pub fn integrate(&self, arena: &mut ExprArena, h: ExprHandle) -> Result<ExprHandle, IntegrateError> {
        match self.antiderivative(arena, h, 0)? {
            Some(r) => Ok(r),
            None => Err(IntegrateError::NoClosedForm(arena.render(h))),
        }
    }

    fn antiderivative(&self, arena: &mut ExprArena, h: ExprHandle, depth: usize) -> Step {
        if depth > self.max_depth {
            return Ok(None);
        }
        if !arena.contains(h, self.var) {
            return Ok(Some(arena.mul(&[h, self.var])?));
        }

        let found = match arena.get(h).clone() {
            ExprNode::Symbol(_) => {
                let one = arena.one();
                Some(power_antiderivative(arena, h, one, one)?)
            }
            ExprNode::Add(args) => self.sum(arena, &args, depth)?,
            ExprNode::Mul(args) => self.product(arena, &args, depth)?,
            ExprNode::Pow { base, exp } => self.power(arena, h, base, exp)?,
            ExprNode::Function { func, arg } => match linear_parts(arena, arg, self.var)? {
                Some((a, _)) => function_antiderivative(arena, func, arg, a)?,
                None => None,
            },
            _ => None,
        };
        if found.is_some() {
            return Ok(found);
        }
        if let Some(r) = rational_antiderivative(arena, h, self.var)? {
            return Ok(Some(r));
        }

        let expanded = arena.expand(h)?;
        if expanded == h {
            return Ok(None);
        }
        trace!(integrand = %arena.display(h), "integrating the expanded form");
        self.antiderivative(arena, expanded, depth + 1)
    }

    fn sum(&self, arena: &mut ExprArena, args: &[ExprHandle], depth: usize) -> Step {
        let mut parts = Vec::with_capacity(args.len());
        for &t in args {
            match self.antiderivative(arena, t, depth + 1)? {
                Some(r) => parts.push(r),
                None => return Ok(None),
            }
        }
        Ok(Some(arena.add(&parts)?))
    }

    fn product(&self, arena: &mut ExprArena, args: &[ExprHandle], depth: usize) -> Step {
        let (constant, varying): (Vec<ExprHandle>, Vec<ExprHandle>) =
            args.iter().copied().partition(|&f| !arena.contains(f, self.var));
        if !constant.is_empty() {
            let c = arena.mul(&constant)?;
            let rest = arena.mul(&varying)?;
            return Ok(match self.antiderivative(arena, rest, depth + 1)? {
                Some(r) => Some(arena.mul(&[c, r])?),
                None => None,
            });
        }

        if let Some(r) = self.by_parts(arena, args)? {
            trace!("integrated by parts");
            return Ok(Some(r));
        }
        if let Some(r) = self.substitution(arena, args)? {
            trace!("integrated by substitution");
            return Ok(Some(r));
        }
        Ok(None)
    }

    /// A polynomial cofactor times `exp`, `sin`, `cos`, `sinh` or `cosh` of
    /// a linear argument.
    fn by_parts(&self, arena: &mut ExprArena, args: &[ExprHandle]) -> Step {
        for (i, &f) in args.iter().enumerate() {
            let ExprNode::Function { func, arg } = *arena.get(f) else {
                continue;
            };
            if !matches!(func, Func::Exp | Func::Sin | Func::Cos | Func::Sinh | Func::Cosh) {
                continue;
            }
            let Some((a, _)) = linear_parts(arena, arg, self.var)? else {
                continue;
            };
            let rest: Vec<ExprHandle> = args
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &g)| g)
                .collect();
            let p = arena.mul(&rest)?;
            if let Some(r) = polynomial_times(arena, p, func, arg, a, self.var)? {
                return Ok(Some(r));
            }
        }
        Ok(None)
    }

    /// `∫F(g)·c·g' dx = c·∫F(u) du` where one factor is `F(g)` or `g**n`
    /// and the remaining factors are a constant multiple of `g'`.
    fn substitution(&self, arena: &mut ExprArena, args: &[ExprHandle]) -> Step {
        for (i, &f) in args.iter().enumerate() {
            let rest: Vec<ExprHandle> = args
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, &g)| g)
                .collect();
            let cofactor = arena.mul(&rest)?;

            if let ExprNode::Function { func, arg } = *arena.get(f) {
                if let Some(c) = self.constant_ratio(arena, cofactor, arg)? {
                    let one = arena.one();
                    if let Some(r) = function_antiderivative(arena, func, arg, one)? {
                        return Ok(Some(arena.mul(&[c, r])?));
                    }
                }
            }

            let (g, n) = arena.base_exp(f);
            if arena.contains(n, self.var) {
                continue;
            }
            if let Some(c) = self.constant_ratio(arena, cofactor, g)? {
                let one = arena.one();
                let r = power_antiderivative(arena, g, n, one)?;
                return Ok(Some(arena.mul(&[c, r])?));
            }
        }
        Ok(None)
    }

    /// `cofactor / g'` when it is free of the variable.
    fn constant_ratio(
        &self,
        arena: &mut ExprArena,
        cofactor: ExprHandle,
        g: ExprHandle,
    ) -> Step {
        let Ok(dg) = diff(arena, g, self.var) else {
            return Ok(None);
        };
        if arena.is_zero(dg) {
            return Ok(None);
        }
        let ratio = arena.div(cofactor, dg)?;
        let ratio = cancel(arena, ratio)?;
        Ok((!arena.contains(ratio, self.var)).then_some(ratio))
    }

    fn power(
        &self,
        arena: &mut ExprArena,
        h: ExprHandle,
        base: ExprHandle,
        exp: ExprHandle,
    ) -> Step {
        if !arena.contains(exp, self.var) {
            if let Some(r) = self.inverse_trig_form(arena, base, exp)? {
                return Ok(Some(r));
            }
            if let Some(r) = self.trig_square(arena, base, exp)? {
                return Ok(Some(r));
            }
            let positive_integer = arena.as_i64(exp).is_some_and(|n| n > 0);
            if positive_integer && base != self.var {
                return Ok(None);
            }
            return Ok(match linear_parts(arena, base, self.var)? {
                Some((a, _)) => Some(power_antiderivative(arena, base, exp, a)?),
                None => None,
            });
        }
        if !arena.contains(base, self.var) {
            // c**(a*x + b) / (a*log(c))
            let Some((a, _)) = linear_parts(arena, exp, self.var)? else {
                return Ok(None);
            };
            let log = arena.func(Func::Log, base)?;
            let scale = arena.mul(&[a, log])?;
            return Ok(Some(arena.div(h, scale)?));
        }
        Ok(None)
    }

    /// `sin(u)**2` and `cos(u)**2` for linear `u = a*x + b`, by
    /// `x/2 ∓ sin(2*u)/(4*a)`.
    fn trig_square(
        &self,
        arena: &mut ExprArena,
        base: ExprHandle,
        exp: ExprHandle,
    ) -> Step {
        if arena.as_i64(exp) != Some(2) {
            return Ok(None);
        }
        let ExprNode::Function { func, arg } = *arena.get(base) else {
            return Ok(None);
        };
        if !matches!(func, Func::Sin | Func::Cos) {
            return Ok(None);
        }
        let Some((a, _)) = linear_parts(arena, arg, self.var)? else {
            return Ok(None);
        };
        let two = arena.integer(2);
        let four = arena.integer(4);
        let half = arena.half();
        let double = arena.mul(&[two, arg])?;
        let sin = arena.func(Func::Sin, double)?;
        let scale = arena.mul(&[four, a])?;
        let oscillating = arena.div(sin, scale)?;
        let mean = arena.mul(&[half, self.var])?;
        Ok(Some(if func == Func::Sin {
            arena.sub(mean, oscillating)?
        } else {
            arena.add(&[mean, oscillating])?
        }))
    }

    /// `1/(x**2 + 1)` and `1/sqrt(1 - x**2)`.
    fn inverse_trig_form(
        &self,
        arena: &mut ExprArena,
        base: ExprHandle,
        exp: ExprHandle,
    ) -> Step {
        let one = arena.one();
        let x2 = arena.powi(self.var, 2)?;
        if exp == arena.neg_one() && base == arena.add(&[x2, one])? {
            return Ok(Some(arena.func(Func::Atan, self.var)?));
        }
        let half = arena.half();
        if exp == arena.neg(half)? && base == arena.sub(one, x2)? {
            return Ok(Some(arena.func(Func::Asin, self.var)?));
        }
        Ok(None)
    }
}

/// Integrates `h` with respect to `var`.
///
/// # Errors
///
/// See [`Integrator::integrate`].
pub fn integrate(arena: &mut ExprArena, h: ExprHandle, var: ExprHandle) -> Result<ExprHandle, IntegrateError> {
    Integrator::new(arena, var).integrate(arena, h)
}
