//! Numeric evaluation of expressions.

use crate::arena::ExprArena;
use crate::expr::{Constant, ExprNode, Func, SymbolId};
use crate::handle::ExprHandle;

/// A complex number in rectangular form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Complex {
    /// Real part.
    pub re: f64,
    /// Imaginary part.
    pub im: f64,
}

impl Complex {
    /// A purely real value.
    #[must_use]
    pub const fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    fn add(self, other: Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }

    fn mul(self, other: Self) -> Self {
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }

    fn is_real(self) -> bool {
        self.im == 0.0
    }

    fn ln(self) -> Self {
        Self {
            re: self.re.hypot(self.im).ln(),
            im: self.im.atan2(self.re),
        }
    }

    fn exp(self) -> Self {
        let m = self.re.exp();
        Self {
            re: m * self.im.cos(),
            im: m * self.im.sin(),
        }
    }

    fn pow(self, exp: Self) -> Option<Self> {
        if self.re == 0.0 && self.im == 0.0 {
            return (exp.re > 0.0).then_some(Self::real(0.0));
        }
        if self.is_real() && exp.is_real() && (self.re > 0.0 || exp.re.fract() == 0.0) {
            return Some(Self::real(self.re.powf(exp.re)));
        }
        Some(exp.mul(self.ln()).exp())
    }
}

pub(crate) fn apply_real(func: Func, x: f64) -> Option<f64> {
    let value = match func {
        Func::Sin => x.sin(),
        Func::Cos => x.cos(),
        Func::Tan => x.tan(),
        Func::Asin if (-1.0..=1.0).contains(&x) => x.asin(),
        Func::Acos if (-1.0..=1.0).contains(&x) => x.acos(),
        Func::Asin | Func::Acos => return None,
        Func::Atan => x.atan(),
        Func::Sinh => x.sinh(),
        Func::Cosh => x.cosh(),
        Func::Tanh => x.tanh(),
        Func::Exp => x.exp(),
        Func::Log if x > 0.0 => x.ln(),
        Func::Log => return None,
        Func::Abs => x.abs(),
    };
    Some(value)
}

impl ExprArena {
    /// Evaluates an expression to a real `f64`.
    ///
    /// Symbols take their values from `bindings`. Returns `None` when a
    /// symbol is unbound or the value leaves the reals.
    #[must_use]
    pub fn eval_f64(&self, h: ExprHandle, bindings: &[(SymbolId, f64)]) -> Option<f64> {
        match self.get(h) {
            ExprNode::Number(r) => Some(r.to_f64()),
            ExprNode::Float(f) => Some(f.value()),
            ExprNode::Constant(c) => match c {
                Constant::Pi => Some(std::f64::consts::PI),
                Constant::E => Some(std::f64::consts::E),
                Constant::I => None,
                Constant::Infinity => Some(f64::INFINITY),
                Constant::NegInfinity => Some(f64::NEG_INFINITY),
            },
            ExprNode::Symbol(id) => bindings
                .iter()
                .find(|(sym, _)| sym == id)
                .map(|(_, v)| *v),
            ExprNode::Add(args) => args
                .iter()
                .try_fold(0.0, |acc, &a| Some(acc + self.eval_f64(a, bindings)?)),
            ExprNode::Mul(args) => args
                .iter()
                .try_fold(1.0, |acc, &a| Some(acc * self.eval_f64(a, bindings)?)),
            ExprNode::Pow { base, exp } => {
                let b = self.eval_f64(*base, bindings)?;
                let e = self.eval_f64(*exp, bindings)?;
                if b < 0.0 && e.fract() != 0.0 {
                    return None;
                }
                if b == 0.0 && e < 0.0 {
                    return None;
                }
                Some(b.powf(e))
            }
            ExprNode::Function { func, arg } => apply_real(*func, self.eval_f64(*arg, bindings)?),
        }
    }

    /// Evaluates a closed expression (no free symbols) to a complex value.
    #[must_use]
    pub fn eval_complex(&self, h: ExprHandle) -> Option<Complex> {
        match self.get(h) {
            ExprNode::Number(r) => Some(Complex::real(r.to_f64())),
            ExprNode::Float(f) => Some(Complex::real(f.value())),
            ExprNode::Constant(Constant::I) => Some(Complex { re: 0.0, im: 1.0 }),
            ExprNode::Constant(_) | ExprNode::Symbol(_) => {
                self.eval_f64(h, &[]).map(Complex::real)
            }
            ExprNode::Add(args) => args
                .iter()
                .try_fold(Complex::real(0.0), |acc, &a| Some(acc.add(self.eval_complex(a)?))),
            ExprNode::Mul(args) => args
                .iter()
                .try_fold(Complex::real(1.0), |acc, &a| Some(acc.mul(self.eval_complex(a)?))),
            ExprNode::Pow { base, exp } => {
                self.eval_complex(*base)?.pow(self.eval_complex(*exp)?)
            }
            ExprNode::Function { func, arg } => {
                let z = self.eval_complex(*arg)?;
                if z.is_real() {
                    apply_real(*func, z.re).map(Complex::real)
                } else if *func == Func::Exp {
                    Some(z.exp())
                } else {
                    None
                }
            }
        }
    }
}
