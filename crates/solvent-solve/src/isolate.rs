//! Solving by isolating a single occurrence of the unknown.

use std::collections::VecDeque;

use num_traits::One;
use solvent_core::{Constant, ExprArena, ExprHandle, ExprNode, Func, MathResult};

use crate::error::SolveError;

/// Splits the arguments of a sum or product into the one containing `var`
/// and the rest.
fn split_args(
    arena: &ExprArena,
    args: &[ExprHandle],
    var: ExprHandle,
) -> Option<(ExprHandle, Vec<ExprHandle>)> {
    let mut inner = None;
    let mut rest = Vec::with_capacity(args.len());
    for &a in args {
        if arena.contains(a, var) {
            if inner.is_some() {
                return None;
            }
            inner = Some(a);
        } else {
            rest.push(a);
        }
    }
    inner.map(|i| (i, rest))
}

/// The integer `k` with `base**k = value` for positive rationals.
fn exact_log(arena: &ExprArena, base: ExprHandle, value: ExprHandle) -> Option<i64> {
    let b = arena.as_rational(base)?;
    let v = arena.as_rational(value)?;
    if !b.is_positive() || b.is_one() || !v.is_positive() {
        return None;
    }
    (-64..=64).find(|&k| b.powi(k).as_ref() == Some(v))
}

fn is_nonpositive_number(arena: &ExprArena, h: ExprHandle) -> bool {
    arena
        .as_num(h)
        .is_some_and(|n| n.is_zero() || n.is_negative())
}

fn outside_unit_interval(arena: &ExprArena, h: ExprHandle) -> bool {
    arena
        .as_num(h)
        .is_some_and(|n| n.to_f64().abs() > 1.0)
}

/// Values of `u` with `func(u) = value`.
fn inverse(arena: &mut ExprArena, func: Func, value: ExprHandle) -> MathResult<Vec<ExprHandle>> {
    let pi = arena.constant(Constant::Pi);
    let one = arena.one();
    let out = match func {
        Func::Exp if is_nonpositive_number(arena, value) => Vec::new(),
        Func::Exp => vec![arena.func(Func::Log, value)?],
        Func::Log => vec![arena.func(Func::Exp, value)?],
        Func::Sin | Func::Cos if outside_unit_interval(arena, value) => Vec::new(),
        Func::Sin => {
            let a = arena.func(Func::Asin, value)?;
            let b = arena.sub(pi, a)?;
            vec![a, b]
        }
        Func::Cos => {
            let a = arena.func(Func::Acos, value)?;
            let two = arena.integer(2);
            let full = arena.mul(&[two, pi])?;
            let b = arena.sub(full, a)?;
            vec![a, b]
        }
        Func::Tan => vec![arena.func(Func::Atan, value)?],
        Func::Asin => vec![arena.func(Func::Sin, value)?],
        Func::Acos => vec![arena.func(Func::Cos, value)?],
        Func::Atan => vec![arena.func(Func::Tan, value)?],
        Func::Sinh => {
            // log(v + sqrt(v**2 + 1))
            let v2 = arena.powi(value, 2)?;
            let s = arena.add(&[v2, one])?;
            let r = arena.sqrt(s)?;
            let arg = arena.add(&[value, r])?;
            vec![arena.func(Func::Log, arg)?]
        }
        Func::Cosh => {
            // log(v -+ sqrt(v**2 - 1))
            let v2 = arena.powi(value, 2)?;
            let s = arena.sub(v2, one)?;
            let r = arena.sqrt(s)?;
            let lo = arena.sub(value, r)?;
            let hi = arena.add(&[value, r])?;
            vec![arena.func(Func::Log, lo)?, arena.func(Func::Log, hi)?]
        }
        Func::Tanh => {
            // log((1 + v)/(1 - v))/2
            let top = arena.add(&[one, value])?;
            let bottom = arena.sub(one, value)?;
            let ratio = arena.div(top, bottom)?;
            let log = arena.func(Func::Log, ratio)?;
            let half = arena.half();
            vec![arena.mul(&[half, log])?]
        }
        Func::Abs if arena.as_num(value).is_some_and(|n| n.is_negative()) => Vec::new(),
        Func::Abs => {
            let neg = arena.neg(value)?;
            if neg == value {
                vec![value]
            } else {
                vec![value, neg]
            }
        }
    };
    let mut distinct = Vec::with_capacity(out.len());
    for h in out {
        if !distinct.contains(&h) {
            distinct.push(h);
        }
    }
    Ok(distinct)
}

/// Solves `h = 0` where `var` occurs exactly once in `h`.
///
/// Each step peels the outermost operation around the occurrence and
/// applies its inverse to the other side. Inverses with several branches
/// (`sin`, `cos`, `cosh`, `Abs` and even powers) fork the work list.
/// Candidates are not checked against `h`; the caller verifies them.
///
/// # Errors
///
/// Fails with [`SolveError::Unsupported`] when `var` occurs more than once
/// below some node or the path exceeds the arena's depth limit.
pub fn isolate(
    arena: &mut ExprArena,
    h: ExprHandle,
    var: ExprHandle,
) -> Result<Vec<ExprHandle>, SolveError> {
    let unsupported = |arena: &ExprArena| SolveError::Unsupported(arena.render(h));
    let max_steps = arena.limits().max_depth;
    let zero = arena.zero();

    let mut work = VecDeque::from([(h, zero, 0usize)]);
    let mut out = Vec::new();
    while let Some((lhs, rhs, depth)) = work.pop_front() {
        if lhs == var {
            out.push(rhs);
            continue;
        }
        if depth >= max_steps {
            return Err(unsupported(arena));
        }
        let next = depth + 1;

        match arena.get(lhs).clone() {
            ExprNode::Add(args) => {
                let (inner, rest) = split_args(arena, &args, var).ok_or_else(|| unsupported(arena))?;
                let sum = arena.add(&rest)?;
                let v = arena.sub(rhs, sum)?;
                work.push_back((inner, v, next));
            }
            ExprNode::Mul(args) => {
                let (inner, rest) = split_args(arena, &args, var).ok_or_else(|| unsupported(arena))?;
                let prod = arena.mul(&rest)?;
                let v = arena.div(rhs, prod)?;
                work.push_back((inner, v, next));
            }
            ExprNode::Pow { base, exp } if !arena.contains(exp, var) => {
                let negative = arena.as_num(exp).is_some_and(|n| n.is_negative());
                if negative && arena.is_zero(rhs) {
                    continue;
                }
                let inv = arena.powi(exp, -1)?;
                let root = arena.pow(rhs, inv)?;
                work.push_back((base, root, next));
                if arena.as_i64(exp).is_some_and(|n| n % 2 == 0) {
                    let other = arena.neg(root)?;
                    if other != root {
                        work.push_back((base, other, next));
                    }
                }
            }
            ExprNode::Pow { base, exp } if !arena.contains(base, var) => {
                if is_nonpositive_number(arena, rhs) {
                    continue;
                }
                let v = match exact_log(arena, base, rhs) {
                    Some(k) => arena.integer(k),
                    None => {
                        let top = arena.func(Func::Log, rhs)?;
                        let bottom = arena.func(Func::Log, base)?;
                        arena.div(top, bottom)?
                    }
                };
                work.push_back((exp, v, next));
            }
            ExprNode::Function { func, arg } => {
                for v in inverse(arena, func, rhs)? {
                    work.push_back((arg, v, next));
                }
            }
            _ => return Err(unsupported(arena)),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvent_core::parse;

    fn isolated(s: &str) -> Result<Vec<String>, SolveError> {
        let mut arena = ExprArena::new();
        let raw = parse(&mut arena, s).unwrap();
        let h = arena.canonicalize(raw).unwrap();
        let x = arena.symbol("x");
        let found = isolate(&mut arena, h, x)?;
        Ok(found.into_iter().map(|r| arena.render(r)).collect())
    }

    #[test]
    fn test_exp_and_log() {
        assert_eq!(isolated("exp(x) - 2").unwrap(), vec!["log(2)"]);
        assert_eq!(isolated("log(x) - 1").unwrap(), vec!["E"]);
        assert!(isolated("exp(x) + 2").unwrap().is_empty());
    }

    #[test]
    fn test_root() {
        assert_eq!(isolated("sqrt(x) - 3").unwrap(), vec!["9"]);
        assert_eq!(isolated("sqrt(x + 1) - 2").unwrap(), vec!["3"]);
    }

    #[test]
    fn test_trig_branches() {
        assert_eq!(isolated("2*sin(x) - 1").unwrap(), vec!["pi/6", "5*pi/6"]);
        assert_eq!(isolated("tan(x) - 1").unwrap(), vec!["pi/4"]);
        assert!(isolated("sin(x) - 2").unwrap().is_empty());
    }

    #[test]
    fn test_exponential_base() {
        assert_eq!(isolated("2^x - 8").unwrap(), vec!["3"]);
        assert_eq!(isolated("2^x - 1/4").unwrap(), vec!["-2"]);
        assert_eq!(isolated("3^x - 2").unwrap(), vec!["log(2)/log(3)"]);
    }

    #[test]
    fn test_two_occurrences() {
        assert!(matches!(
            isolated("x*exp(x) - 1"),
            Err(SolveError::Unsupported(_))
        ));
    }
}
