//! Common denominators and rational-function cancellation.

use solvent_core::{ExprArena, ExprHandle, ExprNode, MathError, MathResult};
use solvent_integers::Rational;
use solvent_poly::{from_poly, make_monic, poly_div_rem, poly_gcd, to_poly};

/// Splits an expression into numerator and denominator.
///
/// Negative numeric powers move to the denominator, and the terms of a sum
/// are brought over the product of their distinct denominators:
/// `1/x + 1/y` gives `(x + y, x*y)`.
///
/// # Errors
///
/// Propagates construction errors.
pub fn numer_denom(arena: &mut ExprArena, h: ExprHandle) -> MathResult<(ExprHandle, ExprHandle)> {
    let one = arena.one();
    match arena.get(h).clone() {
        ExprNode::Number(r) if !r.is_integer() => {
            let n = arena.rational(Rational::from_integer(r.numerator()));
            let d = arena.rational(Rational::from_integer(r.denominator()));
            Ok((n, d))
        }
        ExprNode::Pow { base, exp } if arena.as_num(exp).is_some_and(|e| e.is_negative()) => {
            let positive = arena.neg(exp)?;
            let d = arena.pow(base, positive)?;
            Ok((one, d))
        }
        ExprNode::Mul(args) => {
            let mut numers = Vec::with_capacity(args.len());
            let mut denoms = Vec::with_capacity(args.len());
            for a in args {
                let (n, d) = numer_denom(arena, a)?;
                numers.push(n);
                denoms.push(d);
            }
            Ok((arena.mul(&numers)?, arena.mul(&denoms)?))
        }
        ExprNode::Add(args) => {
            let mut parts = Vec::with_capacity(args.len());
            for a in args {
                parts.push(numer_denom(arena, a)?);
            }
            let mut denoms: Vec<ExprHandle> = Vec::new();
            for &(_, d) in &parts {
                if !arena.is_one(d) && !denoms.contains(&d) {
                    denoms.push(d);
                }
            }
            if denoms.is_empty() {
                return Ok((h, one));
            }

            let mut terms = Vec::with_capacity(parts.len());
            for (n, d) in parts {
                let mut factors = vec![n];
                factors.extend(denoms.iter().copied().filter(|&other| other != d));
                terms.push(arena.mul(&factors)?);
            }
            Ok((arena.add(&terms)?, arena.mul(&denoms)?))
        }
        _ => Ok((h, one)),
    }
}

/// Rewrites an expression as a single fraction.
///
/// # Errors
///
/// Propagates construction errors.
pub fn together(arena: &mut ExprArena, h: ExprHandle) -> MathResult<ExprHandle> {
    let (n, d) = numer_denom(arena, h)?;
    if arena.is_one(d) {
        return Ok(h);
    }
    arena.div(n, d)
}

/// Cancels common polynomial factors between numerator and denominator.
///
/// Applies to rational functions over Q in a single symbol; the result has
/// a monic denominator. Anything else comes back as one expanded fraction.
///
/// # Errors
///
/// Propagates construction and expansion errors.
pub fn cancel(arena: &mut ExprArena, h: ExprHandle) -> MathResult<ExprHandle> {
    let (n, d) = numer_denom(arena, h)?;
    if arena.is_one(d) {
        return Ok(h);
    }
    let n = arena.expand(n)?;
    let d = arena.expand(d)?;

    let mut symbols = arena.free_symbols(n);
    symbols.extend(arena.free_symbols(d));
    symbols.sort_unstable();
    symbols.dedup();
    let [var] = symbols[..] else {
        return arena.div(n, d);
    };
    let var = arena.intern(ExprNode::Symbol(var));

    let (Some(pn), Some(pd)) = (to_poly(arena, n, var), to_poly(arena, d, var)) else {
        return arena.div(n, d);
    };
    if pd.is_zero() {
        return Err(MathError::DivisionByZero);
    }

    let g = poly_gcd(&pn, &pd);
    let pn = poly_div_rem(&pn, &g).0;
    let pd = poly_div_rem(&pd, &g).0;
    let scale = pd.leading_coeff().recip();
    let pn = pn.scale(&scale);
    let pd = make_monic(&pd);

    let numer = from_poly(arena, &pn, var)?;
    let denom = from_poly(arena, &pd, var)?;
    arena.div(numer, denom)
}
