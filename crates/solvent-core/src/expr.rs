//! Expression node types.
//!
//! There are no dedicated subtraction, negation or division nodes:
//! `a - b` is `a + (-1)*b`, `a / b` is `a * b**-1` and `sqrt(a)` is
//! `a**(1/2)`. Keeping the node set small keeps every algorithm that walks
//! expressions small too.

use smallvec::SmallVec;
use solvent_integers::Rational;
use std::fmt;

use crate::handle::ExprHandle;

/// Unique identifier for a symbol within one arena.
pub type SymbolId = u32;

/// Argument storage for n-ary nodes.
pub type Args = SmallVec<[ExprHandle; 4]>;

/// Named mathematical constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constant {
    /// The circle constant.
    Pi,
    /// Euler's number.
    E,
    /// The imaginary unit.
    I,
    /// Positive infinity.
    Infinity,
    /// Negative infinity.
    NegInfinity,
}

impl Constant {
    /// Printed name of the constant.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "E",
            Constant::I => "I",
            Constant::Infinity => "oo",
            Constant::NegInfinity => "-oo",
        }
    }

    /// Returns true for either infinity.
    #[must_use]
    pub const fn is_infinite(self) -> bool {
        matches!(self, Constant::Infinity | Constant::NegInfinity)
    }
}

/// Built-in unary functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Func {
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Inverse sine.
    Asin,
    /// Inverse cosine.
    Acos,
    /// Inverse tangent.
    Atan,
    /// Hyperbolic sine.
    Sinh,
    /// Hyperbolic cosine.
    Cosh,
    /// Hyperbolic tangent.
    Tanh,
    /// Natural exponential.
    Exp,
    /// Natural logarithm.
    Log,
    /// Absolute value.
    Abs,
}

impl Func {
    /// All built-in functions.
    pub const ALL: [Func; 12] = [
        Func::Sin,
        Func::Cos,
        Func::Tan,
        Func::Asin,
        Func::Acos,
        Func::Atan,
        Func::Sinh,
        Func::Cosh,
        Func::Tanh,
        Func::Exp,
        Func::Log,
        Func::Abs,
    ];

    /// Printed name of the function.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
            Func::Tanh => "tanh",
            Func::Exp => "exp",
            Func::Log => "log",
            Func::Abs => "Abs",
        }
    }

    /// Looks up a function by the name a user would type.
    ///
    /// `ln` is an alias for `log`; `abs` and `Abs` both name the absolute
    /// value.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ln" => Some(Func::Log),
            "abs" => Some(Func::Abs),
            _ => Self::ALL.into_iter().find(|f| f.name() == name),
        }
    }

    /// `f(-x) = -f(x)`.
    #[must_use]
    pub const fn is_odd(self) -> bool {
        matches!(
            self,
            Func::Sin | Func::Tan | Func::Asin | Func::Atan | Func::Sinh | Func::Tanh
        )
    }

    /// `f(-x) = f(x)`.
    #[must_use]
    pub const fn is_even(self) -> bool {
        matches!(self, Func::Cos | Func::Cosh | Func::Abs)
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A floating-point literal.
///
/// Stored as raw bits so nodes can be hashed and compared for interning.
/// Negative zero is normalised to zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Float(u64);

impl Float {
    /// Wraps an `f64`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value == 0.0 {
            Self(0.0f64.to_bits())
        } else {
            Self(value.to_bits())
        }
    }

    /// Returns the wrapped value.
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl fmt::Debug for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Float({})", self.value())
    }
}

/// An expression node stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprNode {
    // === Atoms ===
    /// An exact rational number (integers have denominator one).
    Number(Rational),

    /// A floating-point number.
    Float(Float),

    /// A named constant.
    Constant(Constant),

    /// A symbolic variable.
    Symbol(SymbolId),

    // === Compound expressions ===
    /// Sum of expressions: a + b + c + ...
    ///
    /// Invariant: at least 2 arguments.
    Add(Args),

    /// Product of expressions: a * b * c * ...
    ///
    /// Invariant: at least 2 arguments. In canonical form a numeric
    /// coefficient, when present, comes first.
    Mul(Args),

    /// Power expression: base^exp.
    Pow {
        /// The base of the power.
        base: ExprHandle,
        /// The exponent.
        exp: ExprHandle,
    },

    /// A function application: f(arg).
    Function {
        /// The function.
        func: Func,
        /// The argument.
        arg: ExprHandle,
    },
}

impl ExprNode {
    /// Returns true if this node has no children.
    #[must_use]
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            ExprNode::Number(_) | ExprNode::Float(_) | ExprNode::Constant(_) | ExprNode::Symbol(_)
        )
    }

    /// Returns true if this node is a numeric literal.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, ExprNode::Number(_) | ExprNode::Float(_))
    }

    /// Returns the children of this node.
    #[must_use]
    pub fn children(&self) -> Args {
        match self {
            ExprNode::Number(_)
            | ExprNode::Float(_)
            | ExprNode::Constant(_)
            | ExprNode::Symbol(_) => SmallVec::new(),
            ExprNode::Add(args) | ExprNode::Mul(args) => args.clone(),
            ExprNode::Pow { base, exp } => smallvec::smallvec![*base, *exp],
            ExprNode::Function { arg, .. } => smallvec::smallvec![*arg],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_atom() {
        assert!(ExprNode::Number(Rational::from(42)).is_atom());
        assert!(ExprNode::Symbol(0).is_atom());
        assert!(ExprNode::Constant(Constant::Pi).is_atom());
        assert!(!ExprNode::Function {
            func: Func::Sin,
            arg: ExprHandle::new(0)
        }
        .is_atom());
    }

    #[test]
    fn test_func_names() {
        assert_eq!(Func::from_name("ln"), Some(Func::Log));
        assert_eq!(Func::from_name("abs"), Some(Func::Abs));
        assert_eq!(Func::from_name("tanh"), Some(Func::Tanh));
        assert_eq!(Func::from_name("sqrt"), None);
        assert_eq!(Func::Abs.to_string(), "Abs");
    }

    #[test]
    fn test_float_negative_zero() {
        assert_eq!(Float::new(-0.0), Float::new(0.0));
        assert!((Float::new(2.5).value() - 2.5).abs() < f64::EPSILON);
    }
}
