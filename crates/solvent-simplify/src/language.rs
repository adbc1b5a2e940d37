//! The expression language for egg-based simplification.
//!
//! Sums and products are binary here; the arena's n-ary nodes are folded
//! to the right on the way in. Numbers that fit in `i64` are literals and
//! a rational `p/q` is written `(* p (^ q -1))`. Everything else that has
//! no counterpart in the language becomes an opaque leaf symbol.

use egg::{define_language, Id, Symbol};
use solvent_core::Func;

define_language! {
    /// The symbolic expression language seen by the e-graph.
    pub enum SolventLang {
        // Numeric literals
        Num(i64),

        // Basic arithmetic
        "+" = Add([Id; 2]),
        "*" = Mul([Id; 2]),
        "^" = Pow([Id; 2]),

        // Trigonometric functions
        "sin" = Sin(Id),
        "cos" = Cos(Id),
        "tan" = Tan(Id),
        "asin" = Asin(Id),
        "acos" = Acos(Id),
        "atan" = Atan(Id),

        // Hyperbolic functions
        "sinh" = Sinh(Id),
        "cosh" = Cosh(Id),
        "tanh" = Tanh(Id),

        // Exponential and logarithmic
        "exp" = Exp(Id),
        "log" = Log(Id),

        "abs" = Abs(Id),

        // Leaves: symbols, constants and anything opaque
        Symbol(Symbol),
    }
}

impl SolventLang {
    /// Builds the node applying `func` to `arg`.
    #[must_use]
    pub fn apply(func: Func, arg: Id) -> Self {
        match func {
            Func::Sin => SolventLang::Sin(arg),
            Func::Cos => SolventLang::Cos(arg),
            Func::Tan => SolventLang::Tan(arg),
            Func::Asin => SolventLang::Asin(arg),
            Func::Acos => SolventLang::Acos(arg),
            Func::Atan => SolventLang::Atan(arg),
            Func::Sinh => SolventLang::Sinh(arg),
            Func::Cosh => SolventLang::Cosh(arg),
            Func::Tanh => SolventLang::Tanh(arg),
            Func::Exp => SolventLang::Exp(arg),
            Func::Log => SolventLang::Log(arg),
            Func::Abs => SolventLang::Abs(arg),
        }
    }

    /// Splits a function node into the function and its argument.
    #[must_use]
    pub fn as_function(&self) -> Option<(Func, Id)> {
        let pair = match *self {
            SolventLang::Sin(a) => (Func::Sin, a),
            SolventLang::Cos(a) => (Func::Cos, a),
            SolventLang::Tan(a) => (Func::Tan, a),
            SolventLang::Asin(a) => (Func::Asin, a),
            SolventLang::Acos(a) => (Func::Acos, a),
            SolventLang::Atan(a) => (Func::Atan, a),
            SolventLang::Sinh(a) => (Func::Sinh, a),
            SolventLang::Cosh(a) => (Func::Cosh, a),
            SolventLang::Tanh(a) => (Func::Tanh, a),
            SolventLang::Exp(a) => (Func::Exp, a),
            SolventLang::Log(a) => (Func::Log, a),
            SolventLang::Abs(a) => (Func::Abs, a),
            _ => return None,
        };
        Some(pair)
    }

    /// Extracts the numeric value if this is a number.
    #[must_use]
    pub fn as_num(&self) -> Option<i64> {
        match self {
            SolventLang::Num(n) => Some(*n),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egg::RecExpr;

    #[test]
    fn test_parse_expr() {
        let expr: RecExpr<SolventLang> = "(+ 1 2)".parse().unwrap();
        assert_eq!(expr.as_ref().len(), 3);
        assert_eq!(expr.as_ref()[0].as_num(), Some(1));
    }

    #[test]
    fn test_negative_literal() {
        let expr: RecExpr<SolventLang> = "(^ x -1)".parse().unwrap();
        assert_eq!(expr.as_ref()[1].as_num(), Some(-1));
    }

    #[test]
    fn test_function_round_trip() {
        let id = Id::from(0);
        for func in [Func::Sin, Func::Cosh, Func::Log, Func::Abs] {
            assert_eq!(SolventLang::apply(func, id).as_function(), Some((func, id)));
        }
        assert!(SolventLang::Num(3).as_function().is_none());
    }
}
