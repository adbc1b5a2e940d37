//! Auto-evaluating constructors.
//!
//! Every expression handed out by these constructors is in canonical form:
//!
//! - sums and products are flattened and their arguments sorted;
//! - numbers are folded (a float anywhere makes the folded value a float);
//! - like terms are collected (`x + 2*x -> 3*x`) and so are powers of the
//!   same base (`x*x**2 -> x**3`);
//! - a numeric factor multiplying a single sum is distributed;
//! - exact powers of rationals are evaluated and perfect powers are pulled
//!   out of roots (`sqrt(8) -> 2*sqrt(2)`, `sqrt(-4) -> 2*I`);
//! - `E**x` is `exp(x)`, and functions at special points are evaluated.
//!
//! Constructors return [`MathError`] for operations without a value
//! (`0**-1`, `log(0)`) and for exponents beyond the arena's limits.

use hashbrown::HashMap;
use num_traits::{One, Zero};
use smallvec::SmallVec;
use solvent_integers::{Integer, Rational};

use crate::arena::ExprArena;
use crate::error::{MathError, MathResult};
use crate::eval::apply_real;
use crate::expr::{Args, Constant, ExprNode, Func};
use crate::handle::ExprHandle;
use crate::number::Num;
use crate::order::sort_args;

/// Sign of an accumulated infinity.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Infinity {
    Positive,
    Negative,
}

impl ExprArena {
    /// Canonical sum of `terms`.
    ///
    /// # Errors
    ///
    /// Fails on `oo - oo` or when the sum exceeds the term limit.
    pub fn add(&mut self, terms: &[ExprHandle]) -> MathResult<ExprHandle> {
        let mut constant = Num::zero();
        let mut pos_inf = false;
        let mut neg_inf = false;
        let mut collected: Vec<(Num, Args)> = Vec::with_capacity(terms.len());

        let mut stack: Vec<ExprHandle> = terms.iter().rev().copied().collect();
        while let Some(t) = stack.pop() {
            match self.get(t) {
                ExprNode::Number(_) | ExprNode::Float(_) => {
                    if let Some(n) = self.as_num(t) {
                        constant = constant.add(&n);
                    }
                }
                ExprNode::Constant(Constant::Infinity) => pos_inf = true,
                ExprNode::Constant(Constant::NegInfinity) => neg_inf = true,
                ExprNode::Add(args) => stack.extend(args.iter().rev().copied()),
                _ => collected.push(self.coeff_factors(t)),
            }
        }

        if pos_inf && neg_inf {
            return Err(MathError::Indeterminate("oo - oo".to_string()));
        }

        let mut order: Vec<ExprHandle> = Vec::new();
        let mut coeffs: HashMap<ExprHandle, Num> = HashMap::new();
        for (c, rest) in collected {
            let key = self.raw_mul(rest);
            match coeffs.get_mut(&key) {
                Some(acc) => *acc = acc.add(&c),
                None => {
                    order.push(key);
                    coeffs.insert(key, c);
                }
            }
        }

        let mut out: Vec<ExprHandle> = Vec::with_capacity(order.len() + 1);
        for key in order {
            let c = coeffs.remove(&key).unwrap_or_else(Num::zero);
            if c.is_zero() {
                continue;
            }
            out.push(self.scale(c, key));
        }

        if pos_inf {
            out.push(self.constant(Constant::Infinity));
        } else if neg_inf {
            out.push(self.constant(Constant::NegInfinity));
        } else if !constant.is_zero() {
            out.push(self.num(constant));
        }

        if out.len() > self.limits().max_terms {
            return Err(MathError::TooManyTerms {
                limit: self.limits().max_terms,
            });
        }

        match out.len() {
            0 => Ok(self.zero()),
            1 => Ok(out[0]),
            _ => {
                sort_args(self, &mut out);
                Ok(self.intern(ExprNode::Add(out.into_iter().collect())))
            }
        }
    }

    /// `c * key` where `key` is a coefficient-free canonical term.
    fn scale(&mut self, c: Num, key: ExprHandle) -> ExprHandle {
        if c.is_one() {
            return key;
        }
        let mut args: Args = SmallVec::new();
        args.push(self.num(c));
        args.extend(self.factors(key));
        self.raw_mul(args)
    }

    /// Canonical product of `factors`.
    ///
    /// # Errors
    ///
    /// Propagates errors from combining powers, and fails on `0*oo`.
    pub fn mul(&mut self, factors: &[ExprHandle]) -> MathResult<ExprHandle> {
        let mut coeff = Num::one();
        let mut infinity: Option<Infinity> = None;
        let mut groups: Vec<(ExprHandle, SmallVec<[ExprHandle; 2]>)> = Vec::new();

        let mut stack: Vec<ExprHandle> = factors.iter().rev().copied().collect();
        while let Some(f) = stack.pop() {
            match self.get(f) {
                ExprNode::Number(_) | ExprNode::Float(_) => {
                    if let Some(n) = self.as_num(f) {
                        coeff = coeff.mul(&n);
                    }
                }
                ExprNode::Constant(Constant::Infinity) => {
                    infinity = Some(flip_if(infinity, false));
                }
                ExprNode::Constant(Constant::NegInfinity) => {
                    infinity = Some(flip_if(infinity, true));
                }
                ExprNode::Mul(args) => stack.extend(args.iter().rev().copied()),
                _ => {
                    let (base, exp) = self.base_exp(f);
                    match groups.iter_mut().find(|(b, _)| *b == base) {
                        Some((_, exps)) => exps.push(exp),
                        None => groups.push((base, smallvec::smallvec![exp])),
                    }
                }
            }
        }

        if coeff.is_zero() {
            if infinity.is_some() {
                return Err(MathError::Indeterminate("0*oo".to_string()));
            }
            return Ok(self.zero());
        }

        let mut rest: Vec<ExprHandle> = Vec::new();
        let mut surds: Vec<(Rational, Rational)> = Vec::new();
        for (base, exps) in groups {
            let exp = if exps.len() == 1 {
                exps[0]
            } else {
                self.add(&exps)?
            };
            if let (Some(b), Some(e)) = (self.as_rational(base), self.as_rational(exp)) {
                if b.is_positive() && !e.is_integer() {
                    surds.push((e.clone(), b.clone()));
                    continue;
                }
            }
            let p = self.pow(base, exp)?;
            self.absorb(p, &mut coeff, &mut infinity, &mut rest);
        }

        let mut merged: Vec<(Rational, Rational)> = Vec::new();
        for (e, b) in surds {
            match merged.iter_mut().find(|(me, _)| *me == e) {
                Some((_, mb)) => *mb = &*mb * &b,
                None => merged.push((e, b)),
            }
        }
        for (e, b) in merged {
            let p = self.pow_rational(&b, &e)?;
            self.absorb(p, &mut coeff, &mut infinity, &mut rest);
        }

        let exps: Vec<usize> = rest
            .iter()
            .enumerate()
            .filter(|&(_, &h)| matches!(self.get(h), ExprNode::Function { func: Func::Exp, .. }))
            .map(|(i, _)| i)
            .collect();
        if exps.len() > 1 {
            let mut args = Vec::with_capacity(exps.len());
            for &i in exps.iter().rev() {
                if let ExprNode::Function { arg, .. } = self.get(rest[i]) {
                    args.push(*arg);
                }
                rest.remove(i);
            }
            let sum = self.add(&args)?;
            let e = self.func(Func::Exp, sum)?;
            self.absorb(e, &mut coeff, &mut infinity, &mut rest);
        }

        if coeff.is_zero() {
            return Ok(self.zero());
        }

        if let Some(sign) = infinity {
            let negative = (sign == Infinity::Negative) != coeff.is_negative();
            let c = if negative {
                Constant::NegInfinity
            } else {
                Constant::Infinity
            };
            coeff = Num::one();
            rest.push(self.constant(c));
        }

        if rest.is_empty() {
            return Ok(self.num(coeff));
        }
        sort_args(self, &mut rest);
        if coeff.is_one() {
            return Ok(self.raw_mul(rest));
        }
        if rest.len() == 1 {
            if let ExprNode::Add(terms) = self.get(rest[0]).clone() {
                let c = self.num(coeff);
                let mut scaled = Vec::with_capacity(terms.len());
                for t in terms {
                    scaled.push(self.mul(&[c, t])?);
                }
                return self.add(&scaled);
            }
        }
        let mut args: Args = SmallVec::with_capacity(rest.len() + 1);
        args.push(self.num(coeff));
        args.extend(rest);
        Ok(self.raw_mul(args))
    }

    fn absorb(
        &self,
        p: ExprHandle,
        coeff: &mut Num,
        infinity: &mut Option<Infinity>,
        rest: &mut Vec<ExprHandle>,
    ) {
        match self.get(p) {
            ExprNode::Number(_) | ExprNode::Float(_) => {
                if let Some(n) = self.as_num(p) {
                    *coeff = coeff.mul(&n);
                }
            }
            ExprNode::Constant(Constant::Infinity) => *infinity = Some(flip_if(*infinity, false)),
            ExprNode::Constant(Constant::NegInfinity) => {
                *infinity = Some(flip_if(*infinity, true));
            }
            ExprNode::Mul(args) => {
                for &a in args {
                    self.absorb(a, coeff, infinity, rest);
                }
            }
            _ => rest.push(p),
        }
    }

    /// Product of factors kept exactly as given apart from ordering.
    ///
    /// Used for factored output such as `2*(x + 3)`, which the
    /// auto-evaluating [`mul`](Self::mul) would distribute.
    pub fn mul_unevaluated(&mut self, factors: &[ExprHandle]) -> ExprHandle {
        let mut args: Vec<ExprHandle> = factors
            .iter()
            .copied()
            .filter(|&f| !self.is_one(f))
            .collect();
        sort_args(self, &mut args);
        self.raw_mul(args)
    }

    /// Canonical `-a`.
    ///
    /// # Errors
    ///
    /// See [`mul`](Self::mul).
    pub fn neg(&mut self, a: ExprHandle) -> MathResult<ExprHandle> {
        let m = self.neg_one();
        self.mul(&[m, a])
    }

    /// Canonical `a - b`.
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn sub(&mut self, a: ExprHandle, b: ExprHandle) -> MathResult<ExprHandle> {
        let nb = self.neg(b)?;
        self.add(&[a, nb])
    }

    /// Canonical `a / b`.
    ///
    /// # Errors
    ///
    /// Fails with [`MathError::DivisionByZero`] when `b` is zero.
    pub fn div(&mut self, a: ExprHandle, b: ExprHandle) -> MathResult<ExprHandle> {
        let m = self.neg_one();
        let inv = self.pow(b, m)?;
        self.mul(&[a, inv])
    }

    /// Canonical `base**n` for an integer exponent.
    ///
    /// # Errors
    ///
    /// See [`pow`](Self::pow).
    pub fn powi(&mut self, base: ExprHandle, n: i64) -> MathResult<ExprHandle> {
        let e = self.integer(n);
        self.pow(base, e)
    }

    /// Canonical `sqrt(a)`.
    ///
    /// # Errors
    ///
    /// See [`pow`](Self::pow).
    pub fn sqrt(&mut self, a: ExprHandle) -> MathResult<ExprHandle> {
        let half = self.half();
        self.pow(a, half)
    }

    /// Canonical `base**exp`.
    ///
    /// # Errors
    ///
    /// Fails for a negative power of zero and for integer exponents of
    /// numbers beyond [`Limits::max_exponent`](crate::Limits).
    pub fn pow(&mut self, base: ExprHandle, exp: ExprHandle) -> MathResult<ExprHandle> {
        if self.is_zero(exp) || self.is_one(base) {
            return Ok(self.one());
        }
        if self.is_one(exp) {
            return Ok(base);
        }
        let exp_num = self.as_num(exp);
        if self.as_num(base).is_some_and(|b| b.is_zero()) {
            return match exp_num {
                Some(n) if n.is_negative() => Err(MathError::DivisionByZero),
                Some(_) => Ok(self.zero()),
                None => Ok(self.raw_pow(base, exp)),
            };
        }

        match (self.get(base).clone(), exp_num) {
            (ExprNode::Number(b), Some(Num::Exact(e))) => self.pow_rational(&b, &e),
            (ExprNode::Number(_) | ExprNode::Float(_), Some(e)) => {
                let b = self.as_num(base).map_or(f64::NAN, |n| n.to_f64());
                let e = e.to_f64();
                if b < 0.0 && e.fract() != 0.0 {
                    Ok(self.raw_pow(base, exp))
                } else {
                    Ok(self.float(b.powf(e)))
                }
            }
            (ExprNode::Constant(Constant::I), Some(Num::Exact(e))) if e.is_integer() => {
                match e.numerator().to_i64() {
                    Some(n) => Ok(self.i_power(n)),
                    None => Ok(self.raw_pow(base, exp)),
                }
            }
            (ExprNode::Constant(Constant::E), _) => self.func(Func::Exp, exp),
            (ExprNode::Constant(Constant::Infinity), Some(e)) => Ok(if e.is_negative() {
                self.zero()
            } else {
                self.constant(Constant::Infinity)
            }),
            (ExprNode::Constant(Constant::NegInfinity), Some(Num::Exact(e))) if e.is_integer() => {
                Ok(if e.is_negative() {
                    self.zero()
                } else if e.numerator().is_even() {
                    self.constant(Constant::Infinity)
                } else {
                    self.constant(Constant::NegInfinity)
                })
            }
            (ExprNode::Pow { base: inner, exp: e1 }, _) if self.powers_combine(e1, exp) => {
                let e = self.mul(&[e1, exp])?;
                self.pow(inner, e)
            }
            (ExprNode::Mul(args), Some(Num::Exact(e))) => {
                if e.is_integer() {
                    let mut parts = Vec::with_capacity(args.len());
                    for a in args {
                        parts.push(self.pow(a, exp)?);
                    }
                    return self.mul(&parts);
                }
                match self.as_rational(args[0]).cloned() {
                    Some(c) if c.is_positive() => {
                        let rest = self.raw_mul(args[1..].iter().copied().collect::<Args>());
                        let c = self.rational(c);
                        let head = self.pow(c, exp)?;
                        let tail = self.pow(rest, exp)?;
                        self.mul(&[head, tail])
                    }
                    _ => Ok(self.raw_pow(base, exp)),
                }
            }
            (ExprNode::Function { func: Func::Exp, arg }, Some(Num::Exact(_))) => {
                let a = self.mul(&[arg, exp])?;
                self.func(Func::Exp, a)
            }
            _ => Ok(self.raw_pow(base, exp)),
        }
    }

    /// `(b**e1)**e2 = b**(e1*e2)` holds for integer `e2`, and for any `e2`
    /// when `|e1| < 1` or `e1 = -1`.
    fn powers_combine(&self, e1: ExprHandle, e2: ExprHandle) -> bool {
        if self.as_rational(e2).is_some_and(Rational::is_integer) {
            return true;
        }
        match self.as_rational(e1) {
            Some(r) => {
                let one = Rational::one();
                r.abs() < one || *r == -one
            }
            None => false,
        }
    }

    /// `I**n`.
    fn i_power(&mut self, n: i64) -> ExprHandle {
        let i = self.constant(Constant::I);
        match n.rem_euclid(4) {
            0 => self.one(),
            1 => i,
            2 => self.neg_one(),
            _ => {
                let m = self.neg_one();
                self.raw_mul(smallvec::smallvec![m, i])
            }
        }
    }

    /// Exact power of a rational with a rational exponent.
    fn pow_rational(&mut self, b: &Rational, e: &Rational) -> MathResult<ExprHandle> {
        let limit = self.limits().max_exponent;
        let too_large = || MathError::ExponentTooLarge {
            exponent: e.to_string(),
            limit,
        };

        if e.is_integer() {
            let n = e.to_i64().filter(|n| n.unsigned_abs() <= u64::from(limit));
            let n = n.ok_or_else(too_large)?;
            return b
                .powi(n)
                .map(|v| self.rational(v))
                .ok_or(MathError::DivisionByZero);
        }

        let (Some(p), Some(q)) = (e.numerator().to_i64(), e.denominator().to_i64()) else {
            let (bh, eh) = (self.rational(b.clone()), self.rational(e.clone()));
            return Ok(self.raw_pow(bh, eh));
        };

        if b.is_negative() {
            if q == 2 {
                let positive = self.pow_rational(&-b, e)?;
                let i = self.i_power(p);
                return self.mul(&[i, positive]);
            }
            let (bh, eh) = (self.rational(b.clone()), self.rational(e.clone()));
            return Ok(self.raw_pow(bh, eh));
        }

        let k = p.div_euclid(q);
        let r = p.rem_euclid(q);
        if k.unsigned_abs() > u64::from(limit) {
            return Err(too_large());
        }
        let (Ok(q32), Ok(r32)) = (u32::try_from(q), u32::try_from(r)) else {
            let (bh, eh) = (self.rational(b.clone()), self.rational(e.clone()));
            return Ok(self.raw_pow(bh, eh));
        };

        // (n/d)^(r/q) = (n * d^(q-1))^(r/q) / d^r
        let n = b.numerator();
        let d = b.denominator();
        let mut m: Integer = &n * &d.pow(q32 - 1);
        let mut coeff = b
            .powi(k)
            .ok_or(MathError::DivisionByZero)?
            * Rational::new(Integer::one(), d.pow(r32));

        if let Some(root) = m.exact_root(q32) {
            coeff = coeff * Rational::from_integer(root.pow(r32));
            return Ok(self.rational(coeff));
        }
        if let Some((outside, inside)) = m.extract_power(q32) {
            coeff = coeff * Rational::from_integer(outside.pow(r32));
            m = inside;
        }

        let base = self.rational(Rational::from_integer(m));
        let frac = self.rational(Rational::from_i64(r, q));
        let root = self.raw_pow(base, frac);
        if coeff.is_one() {
            Ok(root)
        } else {
            let c = self.rational(coeff);
            Ok(self.raw_mul(smallvec::smallvec![c, root]))
        }
    }

    /// If `a` carries an explicit minus sign, returns `-a`.
    fn extract_minus(&mut self, a: ExprHandle) -> MathResult<Option<ExprHandle>> {
        let negative = match self.get(a) {
            ExprNode::Number(_) | ExprNode::Float(_) => {
                self.as_num(a).is_some_and(|n| n.is_negative())
            }
            ExprNode::Constant(Constant::NegInfinity) => true,
            ExprNode::Mul(args) => self.as_num(args[0]).is_some_and(|n| n.is_negative()),
            _ => false,
        };
        if negative {
            Ok(Some(self.neg(a)?))
        } else {
            Ok(None)
        }
    }

    /// Canonical function application.
    ///
    /// # Errors
    ///
    /// Fails at poles such as `log(0)` and `tan(pi/2)`.
    pub fn func(&mut self, func: Func, arg: ExprHandle) -> MathResult<ExprHandle> {
        if let Some(Num::Approx(x)) = self.as_num(arg) {
            if let Some(v) = apply_real(func, x) {
                return Ok(self.float(v));
            }
        }

        if func.is_odd() || func.is_even() {
            if let Some(positive) = self.extract_minus(arg)? {
                let inner = self.func(func, positive)?;
                return if func.is_odd() {
                    self.neg(inner)
                } else {
                    Ok(inner)
                };
            }
        }

        let special = match func {
            Func::Exp => self.exp_special(arg)?,
            Func::Log => self.log_special(arg)?,
            Func::Sin | Func::Cos | Func::Tan => self.trig_special(func, arg)?,
            Func::Asin | Func::Acos | Func::Atan => self.inverse_trig_special(func, arg)?,
            Func::Sinh | Func::Tanh => self.is_zero(arg).then(|| self.zero()),
            Func::Cosh => self.is_zero(arg).then(|| self.one()),
            Func::Abs => self.abs_special(arg)?,
        };
        Ok(match special {
            Some(v) => v,
            None => self.raw_func(func, arg),
        })
    }

    fn exp_special(&mut self, arg: ExprHandle) -> MathResult<Option<ExprHandle>> {
        if self.is_zero(arg) {
            return Ok(Some(self.one()));
        }
        if self.is_one(arg) {
            return Ok(Some(self.constant(Constant::E)));
        }
        match self.get(arg).clone() {
            ExprNode::Constant(Constant::Infinity) => Ok(Some(arg)),
            ExprNode::Constant(Constant::NegInfinity) => Ok(Some(self.zero())),
            ExprNode::Function {
                func: Func::Log,
                arg: inner,
            } => Ok(Some(inner)),
            ExprNode::Mul(args) if args.len() == 2 => {
                if let ExprNode::Function {
                    func: Func::Log,
                    arg: inner,
                } = *self.get(args[1])
                {
                    if self.as_rational(args[0]).is_some() {
                        return self.pow(inner, args[0]).map(Some);
                    }
                }
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn log_special(&mut self, arg: ExprHandle) -> MathResult<Option<ExprHandle>> {
        if self.is_one(arg) {
            return Ok(Some(self.zero()));
        }
        if self.is_zero(arg) {
            return Err(MathError::Undefined("log(0)".to_string()));
        }
        match self.get(arg).clone() {
            ExprNode::Constant(Constant::E) => Ok(Some(self.one())),
            ExprNode::Constant(Constant::Infinity) => Ok(Some(arg)),
            ExprNode::Function {
                func: Func::Exp,
                arg: inner,
            } if self.is_number(inner) => Ok(Some(inner)),
            _ => Ok(None),
        }
    }

    /// Splits `c*pi` into `c`.
    fn pi_multiple(&self, arg: ExprHandle) -> Option<Rational> {
        match self.get(arg) {
            ExprNode::Constant(Constant::Pi) => Some(Rational::one()),
            ExprNode::Mul(args) if args.len() == 2 => {
                let c = self.as_rational(args[0])?;
                matches!(self.get(args[1]), ExprNode::Constant(Constant::Pi)).then(|| c.clone())
            }
            _ => None,
        }
    }

    /// `sqrt(n)/d` as a canonical expression.
    fn surd_over(&mut self, n: i64, d: i64) -> MathResult<ExprHandle> {
        let radicand = self.integer(n);
        let root = self.sqrt(radicand)?;
        let inv = self.rational(Rational::from_i64(1, d));
        self.mul(&[inv, root])
    }

    fn trig_special(&mut self, func: Func, arg: ExprHandle) -> MathResult<Option<ExprHandle>> {
        if self.is_zero(arg) {
            return Ok(Some(if func == Func::Cos {
                self.one()
            } else {
                self.zero()
            }));
        }
        let Some(c) = self.pi_multiple(arg) else {
            return Ok(None);
        };
        let (Some(p), Some(q)) = (c.numerator().to_i64(), c.denominator().to_i64()) else {
            return Ok(None);
        };
        if ![1, 2, 3, 4, 6].contains(&q) {
            return Ok(None);
        }
        // Work in units of pi/12.
        let twelfths = p * (12 / q);
        match func {
            Func::Sin => self.sin_twelfths(twelfths).map(Some),
            Func::Cos => self.sin_twelfths(twelfths + 6).map(Some),
            _ => self.tan_twelfths(twelfths).map(Some),
        }
    }

    /// `sin(k*pi/12)` for `k` a multiple of 2 or 3.
    fn sin_twelfths(&mut self, k: i64) -> MathResult<ExprHandle> {
        let k = k.rem_euclid(24);
        if k >= 12 {
            let v = self.sin_twelfths(k - 12)?;
            return self.neg(v);
        }
        let k = if k > 6 { 12 - k } else { k };
        match k {
            0 => Ok(self.zero()),
            2 => Ok(self.rational(Rational::from_i64(1, 2))),
            3 => self.surd_over(2, 2),
            4 => self.surd_over(3, 2),
            _ => Ok(self.one()),
        }
    }

    /// `tan(k*pi/12)` for `k` a multiple of 2 or 3.
    fn tan_twelfths(&mut self, k: i64) -> MathResult<ExprHandle> {
        let k = k.rem_euclid(12);
        if k > 6 {
            let v = self.tan_twelfths(12 - k)?;
            return self.neg(v);
        }
        match k {
            0 => Ok(self.zero()),
            2 => self.surd_over(3, 3),
            3 => Ok(self.one()),
            4 => {
                let three = self.integer(3);
                self.sqrt(three)
            }
            _ => Err(MathError::Undefined("tan(pi/2)".to_string())),
        }
    }

    fn pi_times(&mut self, p: i64, q: i64) -> MathResult<ExprHandle> {
        let c = self.rational(Rational::from_i64(p, q));
        let pi = self.constant(Constant::Pi);
        self.mul(&[c, pi])
    }

    fn inverse_trig_special(
        &mut self,
        func: Func,
        arg: ExprHandle,
    ) -> MathResult<Option<ExprHandle>> {
        let value = self.as_rational(arg).cloned();
        let half = Rational::from_i64(1, 2);
        let v = match (func, value) {
            (Func::Asin | Func::Atan, Some(r)) if r.is_zero() => Some(self.zero()),
            (Func::Asin, Some(r)) if r.is_one() => Some(self.pi_times(1, 2)?),
            (Func::Asin, Some(r)) if r == half => Some(self.pi_times(1, 6)?),
            (Func::Acos, Some(r)) if r.is_one() => Some(self.zero()),
            (Func::Acos, Some(r)) if r.is_zero() => Some(self.pi_times(1, 2)?),
            (Func::Acos, Some(r)) if r == half => Some(self.pi_times(1, 3)?),
            (Func::Acos, Some(r)) if r == -Rational::one() => Some(self.constant(Constant::Pi)),
            (Func::Acos, Some(r)) if r == -half.clone() => Some(self.pi_times(2, 3)?),
            (Func::Atan, Some(r)) if r.is_one() => Some(self.pi_times(1, 4)?),
            (Func::Atan, None) if matches!(self.get(arg), ExprNode::Constant(Constant::Infinity)) => {
                Some(self.pi_times(1, 2)?)
            }
            _ => None,
        };
        Ok(v)
    }

    fn abs_special(&mut self, arg: ExprHandle) -> MathResult<Option<ExprHandle>> {
        match self.get(arg).clone() {
            ExprNode::Number(r) => Ok(Some(self.rational(r.abs()))),
            ExprNode::Constant(Constant::I) => Ok(Some(self.one())),
            ExprNode::Constant(Constant::Pi | Constant::E | Constant::Infinity) => Ok(Some(arg)),
            ExprNode::Function {
                func: Func::Abs | Func::Exp,
                ..
            } => Ok(Some(arg)),
            ExprNode::Mul(args) => match self.as_num(args[0]) {
                Some(c) if !c.is_one() => {
                    let rest = self.raw_mul(args[1..].iter().copied().collect::<Args>());
                    let magnitude = if c.is_negative() { c.neg() } else { c };
                    let m = self.num(magnitude);
                    let inner = self.func(Func::Abs, rest)?;
                    self.mul(&[m, inner]).map(Some)
                }
                _ => Ok(None),
            },
            _ => Ok(None),
        }
    }

    /// Rebuilds an expression bottom-up through the canonical constructors.
    ///
    /// # Errors
    ///
    /// Propagates any construction error, e.g. division by zero.
    pub fn canonicalize(&mut self, h: ExprHandle) -> MathResult<ExprHandle> {
        let mut memo = HashMap::new();
        self.canonicalize_memo(h, &mut memo)
    }

    fn canonicalize_memo(
        &mut self,
        h: ExprHandle,
        memo: &mut HashMap<ExprHandle, ExprHandle>,
    ) -> MathResult<ExprHandle> {
        if let Some(&done) = memo.get(&h) {
            return Ok(done);
        }
        let result = match self.get(h).clone() {
            ExprNode::Number(_)
            | ExprNode::Float(_)
            | ExprNode::Constant(_)
            | ExprNode::Symbol(_) => h,
            ExprNode::Add(args) => {
                let mut terms = Vec::with_capacity(args.len());
                for a in args {
                    terms.push(self.canonicalize_memo(a, memo)?);
                }
                self.add(&terms)?
            }
            ExprNode::Mul(args) => {
                let mut factors = Vec::with_capacity(args.len());
                for a in args {
                    factors.push(self.canonicalize_memo(a, memo)?);
                }
                self.mul(&factors)?
            }
            ExprNode::Pow { base, exp } => {
                let b = self.canonicalize_memo(base, memo)?;
                let e = self.canonicalize_memo(exp, memo)?;
                self.pow(b, e)?
            }
            ExprNode::Function { func, arg } => {
                let a = self.canonicalize_memo(arg, memo)?;
                self.func(func, a)?
            }
        };
        memo.insert(h, result);
        Ok(result)
    }
}

fn flip_if(current: Option<Infinity>, negative: bool) -> Infinity {
    let base_negative = matches!(current, Some(Infinity::Negative));
    if base_negative == negative {
        Infinity::Positive
    } else {
        Infinity::Negative
    }
}
