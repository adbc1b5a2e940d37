//! Infix printing.
//!
//! Output follows the usual CAS conventions: `**` for powers, `sqrt(..)`
//! for square roots, negative powers moved into a denominator (`x/(x + 1)`),
//! explicit `*` between factors and terms of a sum ordered by descending
//! degree (see [`ordered_terms`]).

use std::fmt::{self, Write};

use crate::arena::ExprArena;
use crate::expr::{Constant, ExprNode};
use crate::handle::ExprHandle;
use crate::number::Num;
use crate::order::ordered_terms;

const PREC_ADD: u32 = 40;
const PREC_MUL: u32 = 50;
const PREC_POW: u32 = 60;
const PREC_FUNC: u32 = 70;
const PREC_ATOM: u32 = 1000;

/// Significant digits printed for a float.
const FLOAT_DIGITS: usize = 15;

/// Formats a float with 15 significant digits, trailing zeros trimmed.
///
/// Integral values keep one decimal (`5.0`) so floats stay recognizable.
/// This is the form used for floats inside a larger expression.
#[must_use]
pub fn format_float(v: f64) -> String {
    float_text(v, true)
}

/// Formats a float with all 15 significant digits (`1.41421356237310`).
///
/// This is the form used when the whole expression is a single float.
#[must_use]
pub fn format_float_full(v: f64) -> String {
    float_text(v, false)
}

fn float_text(v: f64, strip_zeros: bool) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "oo" } else { "-oo" }.to_string();
    }
    if v == 0.0 {
        return "0.0".to_string();
    }

    // `d.dddddddddddddde<exp>`, correctly rounded.
    let precision = FLOAT_DIGITS - 1;
    let scientific = format!("{:.precision$e}", v.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let mut digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let fixed = -5 < exponent && exponent < 15;
    let split = if fixed && exponent < 0 {
        let zeros = usize::try_from(-exponent).unwrap_or(0);
        digits.insert_str(0, &"0".repeat(zeros));
        1
    } else if fixed {
        usize::try_from(exponent).unwrap_or(0) + 1
    } else {
        1
    };
    let mut s = format!("{}.{}", &digits[..split], &digits[split..]);
    if strip_zeros {
        let trimmed = s.trim_end_matches('0').len();
        s.truncate(trimmed);
        if s.ends_with('.') {
            s.push('0');
        }
    }
    if !fixed {
        let sign = if exponent >= 0 { "+" } else { "" };
        s = format!("{s}e{sign}{exponent}");
    }
    if v < 0.0 {
        s.insert(0, '-');
    }
    s
}

/// A displayable view of an expression.
pub struct ExprDisplay<'a> {
    arena: &'a ExprArena,
    handle: ExprHandle,
}

impl fmt::Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A lone float prints at full precision, nested ones trimmed.
        if let ExprNode::Float(v) = self.arena.get(self.handle) {
            return f.write_str(&format_float_full(v.value()));
        }
        Printer { arena: self.arena }.write(f, self.handle)
    }
}

impl ExprArena {
    /// Returns a value that prints `h` in infix notation.
    #[must_use]
    pub fn display(&self, h: ExprHandle) -> ExprDisplay<'_> {
        ExprDisplay {
            arena: self,
            handle: h,
        }
    }

    /// Renders `h` to a string.
    #[must_use]
    pub fn render(&self, h: ExprHandle) -> String {
        self.display(h).to_string()
    }
}

struct Printer<'a> {
    arena: &'a ExprArena,
}

impl Printer<'_> {
    fn precedence(&self, h: ExprHandle) -> u32 {
        match self.arena.get(h) {
            ExprNode::Number(r) if r.is_negative() => PREC_ADD,
            ExprNode::Number(r) if !r.is_integer() => PREC_MUL,
            ExprNode::Float(f) if f.value() < 0.0 => PREC_ADD,
            ExprNode::Constant(Constant::NegInfinity) | ExprNode::Add(_) => PREC_ADD,
            ExprNode::Mul(args) => {
                if self.arena.as_num(args[0]).is_some_and(|c| c.is_negative()) {
                    PREC_ADD
                } else {
                    PREC_MUL
                }
            }
            ExprNode::Pow { .. } => PREC_POW,
            ExprNode::Function { .. } => PREC_FUNC,
            _ => PREC_ATOM,
        }
    }

    fn text(&self, h: ExprHandle) -> String {
        let mut s = String::new();
        // Writing into a String cannot fail.
        let _ = self.write(&mut s, h);
        s
    }

    /// Prints `h`, in parentheses if it binds no tighter than `level`.
    fn paren(&self, h: ExprHandle, level: u32) -> String {
        let s = self.text(h);
        if self.precedence(h) <= level {
            format!("({s})")
        } else {
            s
        }
    }

    fn write<W: Write>(&self, out: &mut W, h: ExprHandle) -> fmt::Result {
        match self.arena.get(h) {
            ExprNode::Number(r) => write!(out, "{r}"),
            ExprNode::Float(f) => out.write_str(&format_float(f.value())),
            ExprNode::Constant(c) => out.write_str(c.name()),
            ExprNode::Symbol(id) => out.write_str(self.arena.symbol_name(*id)),
            ExprNode::Add(_) => self.write_add(out, h),
            ExprNode::Mul(args) => self.write_mul(out, args),
            ExprNode::Pow { base, exp } => self.write_pow(out, *base, *exp),
            ExprNode::Function { func, arg } => {
                write!(out, "{}(", func.name())?;
                self.write(out, *arg)?;
                out.write_char(')')
            }
        }
    }

    fn write_add<W: Write>(&self, out: &mut W, h: ExprHandle) -> fmt::Result {
        for (i, term) in ordered_terms(self.arena, h).into_iter().enumerate() {
            let s = self.text(term);
            let (negative, body) = match s.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, s.as_str()),
            };
            match (i, negative) {
                (0, true) => out.write_char('-')?,
                (0, false) => {}
                (_, true) => out.write_str(" - ")?,
                (_, false) => out.write_str(" + ")?,
            }
            out.write_str(body)?;
        }
        Ok(())
    }

    fn write_mul<W: Write>(&self, out: &mut W, args: &[ExprHandle]) -> fmt::Result {
        let prec = if self.arena.as_num(args[0]).is_some_and(|c| c.is_negative()) {
            PREC_ADD
        } else {
            PREC_MUL
        };

        let mut numer: Vec<String> = Vec::new();
        let mut denom: Vec<String> = Vec::new();
        let mut negative = false;

        for &factor in args {
            match self.arena.get(factor) {
                ExprNode::Number(_) | ExprNode::Float(_) => {
                    let mut c = self.arena.as_num(factor).unwrap_or_else(Num::one);
                    if c.is_negative() {
                        negative = !negative;
                        c = c.neg();
                    }
                    match c {
                        Num::Exact(r) => {
                            let (n, d) = (r.numerator(), r.denominator());
                            if !num_traits::One::is_one(&n) {
                                numer.push(n.to_string());
                            }
                            if !num_traits::One::is_one(&d) {
                                denom.push(d.to_string());
                            }
                        }
                        Num::Approx(v) => numer.push(format_float(v)),
                    }
                }
                ExprNode::Pow { base, exp } if self.has_negative_coeff(*exp) => {
                    let base = *base;
                    if self.arena.as_i64(*exp) == Some(-1) {
                        let s = self.paren(base, prec);
                        let forced = matches!(
                            self.arena.get(base),
                            ExprNode::Mul(_) | ExprNode::Pow { .. }
                        ) && !s.starts_with('(');
                        denom.push(if forced { format!("({s})") } else { s });
                    } else {
                        denom.push(self.flipped_pow(base, *exp));
                    }
                }
                _ => numer.push(self.paren(factor, prec)),
            }
        }

        if negative {
            out.write_char('-')?;
        }
        if numer.is_empty() {
            numer.push("1".to_string());
        }
        out.write_str(&numer.join("*"))?;
        match denom.len() {
            0 => Ok(()),
            1 => write!(out, "/{}", denom[0]),
            _ => write!(out, "/({})", denom.join("*")),
        }
    }

    /// True if the exponent carries a negative numeric coefficient.
    fn has_negative_coeff(&self, exp: ExprHandle) -> bool {
        self.arena.coeff_factors(exp).0.is_negative()
    }

    /// Prints `base**(-exp)` for a factor moved into the denominator.
    fn flipped_pow(&self, base: ExprHandle, exp: ExprHandle) -> String {
        let (c, rest) = self.arena.coeff_factors(exp);
        let c = c.neg();
        let half = matches!(&c, Num::Exact(r) if *r == solvent_integers::Rational::from_i64(1, 2));
        if rest.is_empty() && half {
            return format!("sqrt({})", self.text(base));
        }
        let exp_str = if rest.is_empty() {
            let s = match c {
                Num::Exact(r) => r.to_string(),
                Num::Approx(v) => format_float(v),
            };
            if !s.contains('/') {
                s
            } else {
                format!("({s})")
            }
        } else {
            let mut factors = Vec::new();
            if !c.is_one() {
                factors.push(match c {
                    Num::Exact(r) => r.to_string(),
                    Num::Approx(v) => format_float(v),
                });
            }
            factors.extend(rest.iter().map(|&f| self.paren(f, PREC_MUL)));
            let s = factors.join("*");
            if factors.len() > 1 {
                format!("({s})")
            } else {
                s
            }
        };
        format!("{}**{}", self.paren(base, PREC_POW), exp_str)
    }

    fn write_pow<W: Write>(&self, out: &mut W, base: ExprHandle, exp: ExprHandle) -> fmt::Result {
        if exp == self.arena.half() {
            return write!(out, "sqrt({})", self.text(base));
        }
        if let Some(r) = self.arena.as_rational(exp) {
            if *r == solvent_integers::Rational::from_i64(-1, 2) {
                return write!(out, "1/sqrt({})", self.text(base));
            }
            if self.arena.as_i64(exp) == Some(-1) {
                return write!(out, "1/{}", self.paren(base, PREC_POW));
            }
        }
        write!(
            out,
            "{}**{}",
            self.paren(base, PREC_POW),
            self.paren(exp, PREC_POW)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Func;
    use crate::parse::parse;

    fn show(input: &str) -> String {
        let mut arena = ExprArena::new();
        let raw = parse(&mut arena, input).unwrap();
        let h = arena.canonicalize(raw).unwrap();
        arena.render(h)
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(5.0), "5.0");
        assert_eq!(format_float(2.5), "2.5");
        assert_eq!(format_float(0.1 + 0.2), "0.3");
        assert_eq!(format_float(-0.75), "-0.75");
        assert_eq!(format_float(1e20), "1.0e+20");
        assert_eq!(format_float(2.5e-7), "2.5e-7");
    }

    #[test]
    fn test_format_float_full() {
        assert_eq!(format_float_full(2.0_f64.sqrt()), "1.41421356237310");
        assert_eq!(format_float_full(1500.0), "1500.00000000000");
        assert_eq!(format_float_full(5.0), "5.00000000000000");
        assert_eq!(format_float_full(-0.75), "-0.750000000000000");
        assert_eq!(format_float_full(0.001), "0.00100000000000000");
        assert_eq!(format_float_full(1e20), "1.00000000000000e+20");
        assert_eq!(format_float_full(0.0), "0.0");
    }

    #[test]
    fn test_lone_float_full_precision() {
        assert_eq!(show("2^0.5"), "1.41421356237310");
        assert_eq!(show("2.5*x"), "2.5*x");
        assert_eq!(show("x + 0.5"), "x + 0.5");
    }

    #[test]
    fn test_print_sums() {
        assert_eq!(show("2*x + 3"), "2*x + 3");
        assert_eq!(show("3 + x^2 - 2x"), "x**2 - 2*x + 3");
        assert_eq!(show("1 - x"), "1 - x");
        assert_eq!(show("1 + pi"), "1 + pi");
        assert_eq!(show("1 + sin(x) + x"), "x + sin(x) + 1");
        assert_eq!(show("1/x + x + 1"), "x + 1 + 1/x");
    }

    #[test]
    fn test_print_products() {
        assert_eq!(show("2*(x+3)"), "2*x + 6");
        assert_eq!(show("-x"), "-x");
        assert_eq!(show("-x^2"), "-x**2");
        assert_eq!(show("2*x/(x^2+1)"), "2*x/(x**2 + 1)");
        assert_eq!(show("1/(2*sqrt(x))"), "1/(2*sqrt(x))");
        assert_eq!(show("x^3/3 - x/2"), "x**3/3 - x/2");
        assert_eq!(show("sqrt(2)*x/3"), "sqrt(2)*x/3");
        assert_eq!(show("exp(2x)/x^2"), "exp(2*x)/x**2");
    }

    #[test]
    fn test_print_powers() {
        assert_eq!(show("x^-2"), "x**(-2)");
        assert_eq!(show("x^(3/2)"), "x**(3/2)");
        assert_eq!(show("sqrt(8)"), "2*sqrt(2)");
        assert_eq!(show("1/sqrt(1 - x^2)"), "1/sqrt(1 - x**2)");
        assert_eq!(show("2^x"), "2**x");
        assert_eq!(show("tan(x)^2 + 1"), "tan(x)**2 + 1");
    }

    #[test]
    fn test_print_complex() {
        assert_eq!(show("sqrt(-4)"), "2*I");
        assert_eq!(show("-1 - sqrt(-2)"), "-1 - sqrt(2)*I");
        assert_eq!(show("-1/2 + sqrt(-3)/2"), "-1/2 + sqrt(3)*I/2");
    }

    #[test]
    fn test_print_unevaluated_product() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let three = arena.integer(3);
        let sum = arena.add(&[x, three]).unwrap();
        let two = arena.integer(2);
        let p = arena.mul_unevaluated(&[sum, two]);
        assert_eq!(arena.render(p), "2*(x + 3)");

        let sin = arena.func(Func::Sin, x).unwrap();
        let neg = arena.neg(sin).unwrap();
        assert_eq!(arena.render(neg), "-sin(x)");
    }
}
