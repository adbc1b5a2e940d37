//! Antiderivatives of elementary functions and powers of a linear argument.
//!
//! For `u = a*x + b`, `∫f(u) dx = F(u)/a` where `F' = f`.

use solvent_core::{ExprArena, ExprHandle, Func, MathResult};

/// `∫base**exp dx` for `base = a*x + b` and constant `exp`.
///
/// # Errors
///
/// Propagates construction errors.
pub fn power_antiderivative(
    arena: &mut ExprArena,
    base: ExprHandle,
    exp: ExprHandle,
    a: ExprHandle,
) -> MathResult<ExprHandle> {
    if arena.as_i64(exp) == Some(-1) {
        let log = arena.func(Func::Log, base)?;
        return arena.div(log, a);
    }
    let one = arena.one();
    let raised = arena.add(&[exp, one])?;
    let p = arena.pow(base, raised)?;
    let scale = arena.mul(&[a, raised])?;
    arena.div(p, scale)
}

/// `∫func(u) dx` for `u = a*x + b`.
///
/// Returns `Ok(None)` for functions without a table entry.
///
/// # Errors
///
/// Propagates construction errors.
pub fn function_antiderivative(
    arena: &mut ExprArena,
    func: Func,
    u: ExprHandle,
    a: ExprHandle,
) -> MathResult<Option<ExprHandle>> {
    let one = arena.one();
    let f = match func {
        Func::Sin => {
            let c = arena.func(Func::Cos, u)?;
            arena.neg(c)?
        }
        Func::Cos => arena.func(Func::Sin, u)?,
        Func::Exp => arena.func(Func::Exp, u)?,
        Func::Sinh => arena.func(Func::Cosh, u)?,
        Func::Cosh => arena.func(Func::Sinh, u)?,
        Func::Tan => {
            let c = arena.func(Func::Cos, u)?;
            let l = arena.func(Func::Log, c)?;
            arena.neg(l)?
        }
        Func::Tanh => {
            let c = arena.func(Func::Cosh, u)?;
            arena.func(Func::Log, c)?
        }
        Func::Log => {
            // u*log(u) - u
            let l = arena.func(Func::Log, u)?;
            let ul = arena.mul(&[u, l])?;
            arena.sub(ul, u)?
        }
        Func::Atan => {
            // u*atan(u) - log(u**2 + 1)/2
            let t = arena.func(Func::Atan, u)?;
            let ut = arena.mul(&[u, t])?;
            let u2 = arena.powi(u, 2)?;
            let s = arena.add(&[u2, one])?;
            let l = arena.func(Func::Log, s)?;
            let half = arena.half();
            let hl = arena.mul(&[half, l])?;
            arena.sub(ut, hl)?
        }
        Func::Asin | Func::Acos => {
            // u*asin(u) + sqrt(1 - u**2), u*acos(u) - sqrt(1 - u**2)
            let t = arena.func(func, u)?;
            let ut = arena.mul(&[u, t])?;
            let u2 = arena.powi(u, 2)?;
            let s = arena.sub(one, u2)?;
            let r = arena.sqrt(s)?;
            if func == Func::Asin {
                arena.add(&[ut, r])?
            } else {
                arena.sub(ut, r)?
            }
        }
        Func::Abs => return Ok(None),
    };
    arena.div(f, a).map(Some)
}
