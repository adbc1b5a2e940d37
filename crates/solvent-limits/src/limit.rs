//! Limit computation.
//!
//! A limit is evaluated bottom-up. Every subexpression gets a [`Value`]:
//! a finite expression, a signed infinity, or "bounded but oscillating".
//! Sums and products combine values directly; only the indeterminate forms
//! `∞ - ∞`, `0·∞`, `0/0` and `∞/∞` need more work:
//!
//! - rational functions over Q are cancelled (finite point) or compared by
//!   degree (at infinity)
//! - at infinity, terms are compared on the exp/power/log scale
//! - otherwise a quotient goes through L'Hôpital's rule
//!
//! A limit at `-∞` is the limit at `+∞` of `f(-x)`.

use solvent_core::{Constant, ExprArena, ExprHandle, ExprNode, Func};
use solvent_diff::diff;
use solvent_poly::to_poly;
use solvent_simplify::{cancel, numer_denom, together};
use tracing::trace;

use crate::comparison::{growth, ComparisonClass, Growth};
use crate::error::LimitError;

/// The point a limit is taken at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Point {
    /// A finite point.
    Finite(ExprHandle),
    /// x → +∞
    PosInfinity,
    /// x → -∞
    NegInfinity,
}

impl Point {
    /// Reads a point from an expression, mapping `oo` and `-oo` to the
    /// infinite points.
    #[must_use]
    pub fn from_expr(arena: &ExprArena, h: ExprHandle) -> Self {
        match arena.get(h) {
            ExprNode::Constant(Constant::Infinity) => Point::PosInfinity,
            ExprNode::Constant(Constant::NegInfinity) => Point::NegInfinity,
            _ => Point::Finite(h),
        }
    }
}

/// Side of approach for a finite point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// x → a+
    #[default]
    Right,
    /// x → a-
    Left,
}

/// Limit of a subexpression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Value {
    Finite(ExprHandle),
    PosInf,
    NegInf,
    /// No limit, but the values stay bounded (`sin(x)` at infinity).
    Bounded,
}

impl Value {
    fn infinity(positive: bool) -> Self {
        if positive {
            Value::PosInf
        } else {
            Value::NegInf
        }
    }

    fn is_infinite(self) -> bool {
        matches!(self, Value::PosInf | Value::NegInf)
    }
}

/// Context for computing one limit.
pub struct LimitContext<'a> {
    arena: &'a mut ExprArena,
    var: ExprHandle,
    point: Point,
    direction: Direction,
    depth: usize,
    max_depth: usize,
    lhopital: usize,
    max_lhopital: usize,
    infinities: [ExprHandle; 2],
}

impl<'a> LimitContext<'a> {
    /// Creates a context for limits of expressions in `var` at `point`.
    ///
    /// Recursion bounds come from the arena's [`solvent_core::Limits`].
    pub fn new(arena: &'a mut ExprArena, var: ExprHandle, point: Point, direction: Direction) -> Self {
        let limits = arena.limits();
        let max_depth = limits.max_depth;
        let max_lhopital = limits.lhopital_depth;
        let infinities = [
            arena.constant(Constant::Infinity),
            arena.constant(Constant::NegInfinity),
        ];
        Self {
            arena,
            var,
            point,
            direction,
            depth: 0,
            max_depth,
            lhopital: 0,
            max_lhopital,
            infinities,
        }
    }

    /// Computes the limit of `h`.
    ///
    /// Infinite limits are returned as the `oo` and `-oo` constants.
    ///
    /// # Errors
    ///
    /// - [`LimitError::DoesNotExist`] for oscillating expressions and
    ///   functions taken outside their domain
    /// - [`LimitError::Undetermined`] when no method settles the limit
    pub fn compute(&mut self, h: ExprHandle) -> Result<ExprHandle, LimitError> {
        let expr = if self.point == Point::NegInfinity {
            let reflected = self.arena.neg(self.var)?;
            self.point = Point::PosInfinity;
            self.arena.substitute(h, self.var, reflected)?
        } else {
            h
        };

        let value = match self.eval(expr) {
            Ok(v) => v,
            Err(LimitError::DoesNotExist(_)) => {
                return Err(LimitError::DoesNotExist(self.arena.render(h)))
            }
            Err(LimitError::Undetermined(_)) => {
                return Err(LimitError::Undetermined(self.arena.render(h)))
            }
            Err(e) => return Err(e),
        };
        match value {
            Value::Finite(v) => Ok(v),
            Value::PosInf => Ok(self.arena.constant(Constant::Infinity)),
            Value::NegInf => Ok(self.arena.constant(Constant::NegInfinity)),
            Value::Bounded => Err(LimitError::DoesNotExist(self.arena.render(h))),
        }
    }

    fn undetermined(&self, h: ExprHandle) -> LimitError {
        LimitError::Undetermined(self.arena.render(h))
    }

    fn eval(&mut self, h: ExprHandle) -> Result<Value, LimitError> {
        if self.depth >= self.max_depth {
            return Err(self.undetermined(h));
        }
        self.depth += 1;
        let result = self.eval_inner(h);
        self.depth -= 1;
        trace!(expr = %self.arena.display(h), ?result, "limit");
        result
    }

    fn eval_inner(&mut self, h: ExprHandle) -> Result<Value, LimitError> {
        if !self.arena.contains(h, self.var) {
            return Ok(match self.arena.get(h) {
                ExprNode::Constant(Constant::Infinity) => Value::PosInf,
                ExprNode::Constant(Constant::NegInfinity) => Value::NegInf,
                _ => Value::Finite(h),
            });
        }
        if h == self.var {
            return Ok(match self.point {
                Point::Finite(p) => Value::Finite(p),
                Point::PosInfinity => Value::PosInf,
                Point::NegInfinity => Value::NegInf,
            });
        }
        if let Point::Finite(p) = self.point {
            if let Ok(v) = self.arena.substitute(h, self.var, p) {
                if !self.has_infinity(v) {
                    return Ok(Value::Finite(v));
                }
            }
        }

        let (n, d) = numer_denom(self.arena, h)?;
        if !self.arena.is_one(d) && self.arena.contains(d, self.var) {
            return self.quotient(n, d);
        }

        match self.arena.get(h).clone() {
            ExprNode::Add(args) => self.sum(h, &args),
            ExprNode::Mul(args) => self.product(h, &args),
            ExprNode::Pow { base, exp } => self.power(h, base, exp),
            ExprNode::Function { func, arg } => self.function(h, func, arg),
            _ => Ok(Value::Finite(h)),
        }
    }

    fn has_infinity(&self, h: ExprHandle) -> bool {
        self.infinities.iter().any(|&inf| self.arena.contains(h, inf))
    }

    fn sum(&mut self, h: ExprHandle, args: &[ExprHandle]) -> Result<Value, LimitError> {
        let mut finite = Vec::with_capacity(args.len());
        let (mut pos, mut neg, mut bounded) = (false, false, false);
        for &a in args {
            match self.eval(a)? {
                Value::Finite(v) => finite.push(v),
                Value::PosInf => pos = true,
                Value::NegInf => neg = true,
                Value::Bounded => bounded = true,
            }
        }
        match (pos, neg) {
            (true, true) => self.infinite_difference(h, args),
            (true, false) => Ok(Value::PosInf),
            (false, true) => Ok(Value::NegInf),
            (false, false) if bounded => Ok(Value::Bounded),
            (false, false) => Ok(Value::Finite(self.arena.add(&finite)?)),
        }
    }

    /// `∞ - ∞`: the fastest-growing term decides, otherwise the sum is
    /// brought over a common denominator.
    fn infinite_difference(&mut self, h: ExprHandle, args: &[ExprHandle]) -> Result<Value, LimitError> {
        if self.point == Point::PosInfinity {
            if let Some(dominant) = self.dominant_term(args) {
                return self.eval(dominant);
            }
        }
        let combined = together(self.arena, h)?;
        if combined != h {
            return self.eval(combined);
        }
        let expanded = self.arena.expand(h)?;
        if expanded != h {
            return self.eval(expanded);
        }
        Err(self.undetermined(h))
    }

    fn dominant_term(&self, args: &[ExprHandle]) -> Option<ExprHandle> {
        let rates: Vec<_> = args
            .iter()
            .map(|&a| growth(self.arena, a, self.var))
            .collect::<Option<_>>()?;
        let (best, rate) = rates.iter().enumerate().max_by(|a, b| match a.1.compare(b.1) {
            ComparisonClass::LessThan => std::cmp::Ordering::Less,
            ComparisonClass::Comparable => std::cmp::Ordering::Equal,
            ComparisonClass::GreaterThan => std::cmp::Ordering::Greater,
        })?;
        let unique = rates
            .iter()
            .enumerate()
            .all(|(i, r)| i == best || r.compare(rate) == ComparisonClass::LessThan);
        unique.then_some(args[best])
    }

    fn product(&mut self, h: ExprHandle, args: &[ExprHandle]) -> Result<Value, LimitError> {
        let mut finite = Vec::with_capacity(args.len());
        let mut zeros = Vec::new();
        let mut rest = Vec::new();
        let mut infinite_sign: Option<bool> = None;
        let mut bounded = false;
        for &a in args {
            let v = self.eval(a)?;
            match v {
                Value::Finite(c) if self.arena.is_zero(c) => zeros.push(a),
                Value::Finite(c) => {
                    finite.push(c);
                    rest.push(a);
                }
                Value::PosInf | Value::NegInf => {
                    let positive = v == Value::PosInf;
                    infinite_sign = Some(infinite_sign.map_or(positive, |s| s == positive));
                    rest.push(a);
                }
                Value::Bounded => {
                    bounded = true;
                    rest.push(a);
                }
            }
        }

        match (zeros.is_empty(), infinite_sign) {
            (false, None) => Ok(Value::Finite(self.arena.zero())),
            (true, None) if bounded => Ok(Value::Bounded),
            (true, None) => Ok(Value::Finite(self.arena.mul(&finite)?)),
            (true, Some(_)) if bounded => Err(LimitError::DoesNotExist(self.arena.render(h))),
            (true, Some(positive)) => {
                let c = self.arena.mul(&finite)?;
                match self.sign_of(c) {
                    Some(s) => Ok(Value::infinity(positive == (s > 0))),
                    None => Err(self.undetermined(h)),
                }
            }
            (false, Some(_)) => self.zero_times_infinity(h, &zeros, &rest),
        }
    }

    /// `0·∞`: compared on the growth scale at infinity, otherwise rewritten
    /// as a quotient. The factor with the smaller tree is moved into the
    /// denominator first.
    fn zero_times_infinity(
        &mut self,
        h: ExprHandle,
        zeros: &[ExprHandle],
        rest: &[ExprHandle],
    ) -> Result<Value, LimitError> {
        if self.point == Point::PosInfinity {
            if let Some(g) = growth(self.arena, h, self.var) {
                match g.compare(&Growth::constant()) {
                    ComparisonClass::LessThan => return Ok(Value::Finite(self.arena.zero())),
                    ComparisonClass::GreaterThan => return self.infinity_near(h),
                    ComparisonClass::Comparable => {}
                }
            }
        }

        let z = self.arena.mul(zeros)?;
        let r = self.arena.mul(rest)?;
        let z_inv = self.arena.powi(z, -1)?;
        let r_inv = self.arena.powi(r, -1)?;
        let mut orders = [(r, z_inv), (z, r_inv)];
        if self.arena.tree_size(r) < self.arena.tree_size(z) {
            orders.swap(0, 1);
        }

        let mut last = self.undetermined(h);
        for (n, d) in orders {
            match self.quotient(n, d) {
                Err(LimitError::Undetermined(msg)) => last = LimitError::Undetermined(msg),
                other => return other,
            }
        }
        Err(last)
    }

    fn power(&mut self, h: ExprHandle, base: ExprHandle, exp: ExprHandle) -> Result<Value, LimitError> {
        if self.arena.contains(exp, self.var) {
            // b^e = exp(e*log(b))
            let log = self.arena.func(Func::Log, base)?;
            let product = self.arena.mul(&[exp, log])?;
            return self.function(h, Func::Exp, product);
        }

        let k = self.arena.as_num(exp);
        match self.eval(base)? {
            Value::Finite(b) => match self.arena.pow(b, exp) {
                Ok(v) if !self.has_infinity(v) => Ok(Value::Finite(v)),
                _ => Err(self.undetermined(h)),
            },
            Value::PosInf => match k {
                Some(k) if k.is_zero() => Ok(Value::Finite(self.arena.one())),
                Some(k) if k.is_negative() => Ok(Value::Finite(self.arena.zero())),
                Some(_) => Ok(Value::PosInf),
                None => Err(self.undetermined(h)),
            },
            Value::NegInf => {
                let parity = self.arena.as_i64(exp);
                match (k, parity) {
                    (Some(k), _) if k.is_negative() => Ok(Value::Finite(self.arena.zero())),
                    (_, Some(n)) if n % 2 == 0 => Ok(Value::PosInf),
                    (_, Some(_)) => Ok(Value::NegInf),
                    _ => Err(LimitError::DoesNotExist(self.arena.render(h))),
                }
            }
            Value::Bounded => match self.arena.as_i64(exp) {
                Some(n) if n > 0 => Ok(Value::Bounded),
                _ => Err(LimitError::DoesNotExist(self.arena.render(h))),
            },
        }
    }

    fn function(&mut self, h: ExprHandle, func: Func, arg: ExprHandle) -> Result<Value, LimitError> {
        let does_not_exist = |ctx: &Self| LimitError::DoesNotExist(ctx.arena.render(h));
        match self.eval(arg)? {
            Value::Finite(a) => {
                if func == Func::Log && self.arena.is_zero(a) {
                    return match self.sign_near(arg) {
                        Some(s) if s > 0 => Ok(Value::NegInf),
                        _ => Err(does_not_exist(self)),
                    };
                }
                match self.arena.func(func, a) {
                    Ok(v) if !self.has_infinity(v) => Ok(Value::Finite(v)),
                    _ if func == Func::Tan => {
                        let sin = self.arena.func(Func::Sin, arg)?;
                        let cos = self.arena.func(Func::Cos, arg)?;
                        self.quotient(sin, cos)
                    }
                    _ => Err(self.undetermined(h)),
                }
            }
            Value::PosInf => match func {
                Func::Exp | Func::Log | Func::Sinh | Func::Cosh | Func::Abs => Ok(Value::PosInf),
                Func::Atan => {
                    let pi = self.arena.constant(Constant::Pi);
                    let half = self.arena.half();
                    Ok(Value::Finite(self.arena.mul(&[half, pi])?))
                }
                Func::Tanh => Ok(Value::Finite(self.arena.one())),
                Func::Sin | Func::Cos => Ok(Value::Bounded),
                Func::Tan | Func::Asin | Func::Acos => Err(does_not_exist(self)),
            },
            Value::NegInf => match func {
                Func::Exp => Ok(Value::Finite(self.arena.zero())),
                Func::Sinh => Ok(Value::NegInf),
                Func::Cosh | Func::Abs => Ok(Value::PosInf),
                Func::Atan => {
                    let pi = self.arena.constant(Constant::Pi);
                    let half = self.arena.half();
                    let neg_half = self.arena.neg(half)?;
                    Ok(Value::Finite(self.arena.mul(&[neg_half, pi])?))
                }
                Func::Tanh => Ok(Value::Finite(self.arena.neg_one())),
                Func::Sin | Func::Cos => Ok(Value::Bounded),
                Func::Tan | Func::Asin | Func::Acos | Func::Log => Err(does_not_exist(self)),
            },
            Value::Bounded => match func {
                Func::Sin | Func::Cos | Func::Atan | Func::Tanh | Func::Exp | Func::Abs => {
                    Ok(Value::Bounded)
                }
                _ => Err(does_not_exist(self)),
            },
        }
    }

    fn quotient(&mut self, n: ExprHandle, d: ExprHandle) -> Result<Value, LimitError> {
        let nv = self.eval(n)?;
        let dv = self.eval(d)?;
        match (nv, dv) {
            (Value::Finite(a), Value::Finite(b)) if !self.arena.is_zero(b) => {
                Ok(Value::Finite(self.arena.div(a, b)?))
            }
            (Value::Finite(a), Value::Finite(_)) if !self.arena.is_zero(a) => {
                self.signed_infinity(a, d)
            }
            (Value::Finite(_) | Value::Bounded, Value::PosInf | Value::NegInf) => {
                Ok(Value::Finite(self.arena.zero()))
            }
            (Value::PosInf | Value::NegInf, Value::Finite(b)) => {
                let positive = nv == Value::PosInf;
                if self.arena.is_zero(b) {
                    let s = self.sign_near(d).ok_or_else(|| self.undetermined(d))?;
                    Ok(Value::infinity(positive == (s > 0)))
                } else {
                    let s = self.sign_of(b).ok_or_else(|| self.undetermined(b))?;
                    Ok(Value::infinity(positive == (s > 0)))
                }
            }
            (Value::Bounded, Value::Finite(b)) if !self.arena.is_zero(b) => Ok(Value::Bounded),
            (Value::Finite(_), Value::Finite(_)) => self.indeterminate(n, d),
            (a, b) if a.is_infinite() && b.is_infinite() => self.indeterminate(n, d),
            _ => {
                let q = self.arena.div(n, d)?;
                Err(LimitError::DoesNotExist(self.arena.render(q)))
            }
        }
    }

    /// `c/d` where `c` is the nonzero limit of the numerator and `d → 0`.
    fn signed_infinity(&self, c: ExprHandle, d: ExprHandle) -> Result<Value, LimitError> {
        match (self.sign_of(c), self.sign_near(d)) {
            (Some(a), Some(b)) => Ok(Value::infinity(a == b)),
            _ => Err(self.undetermined(d)),
        }
    }

    /// An infinite limit whose sign is the sign of `h` near the point.
    fn infinity_near(&self, h: ExprHandle) -> Result<Value, LimitError> {
        match self.sign_near(h) {
            Some(s) => Ok(Value::infinity(s > 0)),
            None => Err(self.undetermined(h)),
        }
    }

    /// `0/0` or `∞/∞`.
    fn indeterminate(&mut self, n: ExprHandle, d: ExprHandle) -> Result<Value, LimitError> {
        let en = self.arena.expand(n)?;
        let ed = self.arena.expand(d)?;
        if let (Some(pn), Some(pd)) = (
            to_poly(self.arena, en, self.var),
            to_poly(self.arena, ed, self.var),
        ) {
            if self.point == Point::PosInfinity {
                let ratio = pn.leading_coeff() / pd.leading_coeff();
                return Ok(match pn.degree().cmp(&pd.degree()) {
                    std::cmp::Ordering::Less => Value::Finite(self.arena.zero()),
                    std::cmp::Ordering::Equal => Value::Finite(self.arena.rational(ratio)),
                    std::cmp::Ordering::Greater => Value::infinity(ratio.is_positive()),
                });
            }
            let q = self.arena.div(en, ed)?;
            let reduced = cancel(self.arena, q)?;
            let (rn, rd) = numer_denom(self.arena, reduced)?;
            if rd != ed {
                return self.quotient(rn, rd);
            }
        }

        if self.point == Point::PosInfinity {
            if let (Some(gn), Some(gd)) = (
                growth(self.arena, n, self.var),
                growth(self.arena, d, self.var),
            ) {
                match gn.compare(&gd) {
                    ComparisonClass::LessThan => return Ok(Value::Finite(self.arena.zero())),
                    ComparisonClass::GreaterThan => {
                        let q = self.arena.div(n, d)?;
                        return self.infinity_near(q);
                    }
                    ComparisonClass::Comparable => {}
                }
            }
        }

        self.lhopital(n, d)
    }

    fn lhopital(&mut self, n: ExprHandle, d: ExprHandle) -> Result<Value, LimitError> {
        if self.lhopital >= self.max_lhopital {
            let q = self.arena.div(n, d)?;
            return Err(self.undetermined(q));
        }
        let dn = diff(self.arena, n, self.var)?;
        let dd = diff(self.arena, d, self.var)?;
        if self.arena.is_zero(dd) {
            let q = self.arena.div(n, d)?;
            return Err(self.undetermined(q));
        }
        let q = self.arena.div(dn, dd)?;
        trace!(
            numer = %self.arena.display(dn),
            denom = %self.arena.display(dd),
            "applying L'Hôpital's rule"
        );
        self.lhopital += 1;
        let result = self.eval(q);
        self.lhopital -= 1;
        result
    }

    /// Sign of a closed real expression.
    fn sign_of(&self, h: ExprHandle) -> Option<i8> {
        let z = self.arena.eval_complex(h)?;
        if z.im != 0.0 || z.re == 0.0 || z.re.is_nan() {
            return None;
        }
        Some(if z.re > 0.0 { 1 } else { -1 })
    }

    /// Sign of `h` just beside the point, on the side of approach.
    fn sign_near(&self, h: ExprHandle) -> Option<i8> {
        let id = self.arena.as_symbol(self.var)?;
        let samples: Vec<f64> = match self.point {
            Point::Finite(p) => {
                let p = self.arena.eval_f64(p, &[])?;
                let side = match self.direction {
                    Direction::Right => 1.0,
                    Direction::Left => -1.0,
                };
                [1e-6, 1e-9]
                    .iter()
                    .map(|eps| p + side * eps * p.abs().max(1.0))
                    .collect()
            }
            Point::PosInfinity => vec![1e3, 1e2, 30.0],
            Point::NegInfinity => vec![-1e3, -1e2, -30.0],
        };
        samples.into_iter().find_map(|x| {
            let v = self.arena.eval_f64(h, &[(id, x)])?;
            if v.is_nan() || v == 0.0 {
                None
            } else {
                Some(if v > 0.0 { 1 } else { -1 })
            }
        })
    }
}

/// Computes the limit of `h` as `var` approaches `point`, from the right
/// at a finite point.
///
/// # Errors
///
/// See [`LimitContext::compute`].
pub fn limit(
    arena: &mut ExprArena,
    h: ExprHandle,
    var: ExprHandle,
    point: Point,
) -> Result<ExprHandle, LimitError> {
    limit_with_direction(arena, h, var, point, Direction::Right)
}

/// Computes a one-sided limit.
///
/// The direction is ignored at infinite points.
///
/// # Errors
///
/// See [`LimitContext::compute`].
pub fn limit_with_direction(
    arena: &mut ExprArena,
    h: ExprHandle,
    var: ExprHandle,
    point: Point,
    direction: Direction,
) -> Result<ExprHandle, LimitError> {
    LimitContext::new(arena, var, point, direction).compute(h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvent_core::parse;

    fn expr(arena: &mut ExprArena, s: &str) -> ExprHandle {
        let raw = parse(arena, s).unwrap();
        arena.canonicalize(raw).unwrap()
    }

    fn lim_dir(s: &str, at: &str, direction: Direction) -> Result<String, LimitError> {
        let mut arena = ExprArena::new();
        let h = expr(&mut arena, s);
        let p = expr(&mut arena, at);
        let point = Point::from_expr(&arena, p);
        let x = arena.symbol("x");
        let v = limit_with_direction(&mut arena, h, x, point, direction)?;
        Ok(arena.render(v))
    }

    fn lim(s: &str, at: &str) -> String {
        lim_dir(s, at, Direction::Right).unwrap()
    }

    #[test]
    fn test_direct_substitution() {
        assert_eq!(lim("x^2 + 1", "3"), "10");
        assert_eq!(lim("sin(x)", "pi/2"), "1");
        assert_eq!(lim("exp(x)", "0"), "1");
    }

    #[test]
    fn test_removable_singularity() {
        assert_eq!(lim("(x^2 - 4)/(x - 2)", "2"), "4");
        assert_eq!(lim("(x^3 - 1)/(x - 1)", "1"), "3");
    }

    #[test]
    fn test_lhopital() {
        assert_eq!(lim("sin(x)/x", "0"), "1");
        assert_eq!(lim("(1 - cos(x))/x^2", "0"), "1/2");
        assert_eq!(lim("(exp(x) - 1)/x", "0"), "1");
    }

    #[test]
    fn test_pole() {
        assert_eq!(lim("1/x", "0"), "oo");
        assert_eq!(lim_dir("1/x", "0", Direction::Left).unwrap(), "-oo");
        assert_eq!(lim("-2/x^2", "0"), "-oo");
    }

    #[test]
    fn test_at_infinity() {
        assert_eq!(lim("1/x", "oo"), "0");
        assert_eq!(lim("(3x^2 + 1)/(x^2 - 5)", "oo"), "3");
        assert_eq!(lim("(x^3 + 1)/(x^2 - 5)", "oo"), "oo");
        assert_eq!(lim("x^2 - x", "oo"), "oo");
        assert_eq!(lim("exp(x)", "-oo"), "0");
        assert_eq!(lim("x^3", "-oo"), "-oo");
        assert_eq!(lim("atan(x)", "oo"), "pi/2");
    }

    #[test]
    fn test_growth_comparison() {
        assert_eq!(lim("x*exp(-x)", "oo"), "0");
        assert_eq!(lim("log(x)/x", "oo"), "0");
        assert_eq!(lim("exp(x)/x^5", "oo"), "oo");
        assert_eq!(lim("exp(x) - x^10", "oo"), "oo");
    }

    #[test]
    fn test_zero_times_infinity() {
        assert_eq!(lim("x*log(x)", "0"), "0");
        assert_eq!(lim("(1 + 1/x)^x", "oo"), "E");
    }

    #[test]
    fn test_bounded_oscillation() {
        assert_eq!(lim("sin(x)/x", "oo"), "0");
        assert_eq!(lim("x + sin(x)", "oo"), "oo");
    }

    #[test]
    fn test_does_not_exist() {
        assert_eq!(
            lim_dir("sin(x)", "oo", Direction::Right),
            Err(LimitError::DoesNotExist("sin(x)".to_string()))
        );
        assert!(matches!(
            lim_dir("cos(x)", "-oo", Direction::Right),
            Err(LimitError::DoesNotExist(_))
        ));
    }

    #[test]
    fn test_log_at_zero() {
        assert_eq!(lim("log(x)", "0"), "-oo");
    }
}
