//! Dense univariate polynomials over Q.

use num_traits::{One, Zero};
use solvent_integers::{Integer, Rational};
use std::fmt;

/// A dense univariate polynomial with rational coefficients.
///
/// Coefficients are stored in ascending degree order and the representation
/// is normalized: no trailing zeros, and the zero polynomial is `[0]`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DensePoly {
    /// Coefficients in ascending degree order.
    coeffs: Vec<Rational>,
}

impl DensePoly {
    /// Creates a new polynomial from coefficients.
    #[must_use]
    pub fn new(mut coeffs: Vec<Rational>) -> Self {
        while coeffs.len() > 1 && coeffs.last().is_some_and(Zero::is_zero) {
            coeffs.pop();
        }

        if coeffs.is_empty() {
            coeffs.push(Rational::zero());
        }

        Self { coeffs }
    }

    /// Creates a polynomial from integer coefficients.
    #[must_use]
    pub fn from_i64s(coeffs: &[i64]) -> Self {
        Self::new(coeffs.iter().map(|&c| Rational::from(c)).collect())
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            coeffs: vec![Rational::zero()],
        }
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self {
            coeffs: vec![Rational::one()],
        }
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: Rational) -> Self {
        Self::new(vec![c])
    }

    /// Creates the polynomial x.
    #[must_use]
    pub fn x() -> Self {
        Self::new(vec![Rational::zero(), Rational::one()])
    }

    /// Creates the monomial c * x^n.
    #[must_use]
    pub fn monomial(c: Rational, n: usize) -> Self {
        let mut coeffs = vec![Rational::zero(); n + 1];
        coeffs[n] = c;
        Self::new(coeffs)
    }

    /// The linear polynomial `x - root`.
    #[must_use]
    pub fn linear_factor(root: &Rational) -> Self {
        Self::new(vec![-root, Rational::one()])
    }

    /// Returns the degree of the polynomial (0 for the zero polynomial).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    /// Returns true for constant polynomials (including zero).
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() == 1
    }

    /// Returns the leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> &Rational {
        &self.coeffs[self.coeffs.len() - 1]
    }

    /// Returns the coefficient of x^i.
    #[must_use]
    pub fn coeff(&self, i: usize) -> Rational {
        self.coeffs.get(i).cloned().unwrap_or_else(Rational::zero)
    }

    /// Returns all coefficients.
    #[must_use]
    pub fn coeffs(&self) -> &[Rational] {
        &self.coeffs
    }

    /// Evaluates the polynomial at a point using Horner's method.
    #[must_use]
    pub fn eval(&self, x: &Rational) -> Rational {
        let mut result = Rational::zero();
        for c in self.coeffs.iter().rev() {
            result = &(&result * x) + c;
        }
        result
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut result = Vec::with_capacity(len);

        for i in 0..len {
            result.push(self.coeff(i) + other.coeff(i));
        }

        Self::new(result)
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self::new(self.coeffs.iter().map(|c| -c).collect())
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies two polynomials (schoolbook).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }

        let n = self.coeffs.len();
        let m = other.coeffs.len();
        let mut result = vec![Rational::zero(); n + m - 1];

        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                result[i + j] = &result[i + j] + &(a * b);
            }
        }

        Self::new(result)
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: &Rational) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self::new(self.coeffs.iter().map(|x| x * c).collect())
    }

    /// Computes the formal derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        if self.degree() == 0 {
            return Self::zero();
        }

        let result = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c * &Rational::from(Integer::from(i as u64)))
            .collect();

        Self::new(result)
    }

    /// Raises the polynomial to a non-negative integer power.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul(&base);
            }
        }

        result
    }

    /// Multiplicity of the root `x = 0`, i.e. the number of low-order zero
    /// coefficients.
    #[must_use]
    pub fn zero_root_multiplicity(&self) -> usize {
        if self.is_zero() {
            return 0;
        }
        self.coeffs.iter().take_while(|c| c.is_zero()).count()
    }

    /// Divides by x^n, dropping the `n` lowest coefficients.
    #[must_use]
    pub fn unshift(&self, n: usize) -> Self {
        Self::new(self.coeffs.iter().skip(n).cloned().collect())
    }

    /// Splits the polynomial as `content * primitive` where `primitive` has
    /// coprime integer coefficients and a positive leading coefficient.
    #[must_use]
    pub fn content_primitive(&self) -> (Rational, DensePoly) {
        if self.is_zero() {
            return (Rational::zero(), Self::zero());
        }
        let den_lcm = self
            .coeffs
            .iter()
            .fold(Integer::one(), |acc, c| acc.lcm(&c.denominator()));
        let num_gcd = self
            .coeffs
            .iter()
            .filter(|c| !c.is_zero())
            .fold(Integer::zero(), |acc, c| acc.gcd(&c.numerator()));

        let mut content = Rational::new(num_gcd, den_lcm);
        if self.leading_coeff().is_negative() {
            content = -content;
        }
        let primitive = self.scale(&content.recip());
        (content, primitive)
    }
}

impl fmt::Debug for DensePoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DensePoly({self})")
    }
}

impl fmt::Display for DensePoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut terms = Vec::new();
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }

            let term = match i {
                0 => format!("{c}"),
                1 => format!("{c}*x"),
                _ => format!("{c}*x^{i}"),
            };
            terms.push(term);
        }

        write!(f, "{}", terms.join(" + "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> Rational {
        Rational::from_i64(n, d)
    }

    #[test]
    fn test_basic_ops() {
        let p = DensePoly::from_i64s(&[1, 2]); // 1 + 2x
        let r = DensePoly::from_i64s(&[3, 4]); // 3 + 4x

        let sum = p.add(&r);
        assert_eq!(sum.coeff(0), q(4, 1));
        assert_eq!(sum.coeff(1), q(6, 1));
        assert!(p.sub(&p).is_zero());
    }

    #[test]
    fn test_mul() {
        let p = DensePoly::from_i64s(&[1, 2]);
        let r = DensePoly::from_i64s(&[3, 4]);

        // (1 + 2x)(3 + 4x) = 3 + 10x + 8x^2
        assert_eq!(p.mul(&r), DensePoly::from_i64s(&[3, 10, 8]));
        assert_eq!(p.pow(2), DensePoly::from_i64s(&[1, 4, 4]));
        assert_eq!(p.pow(0), DensePoly::one());
    }

    #[test]
    fn test_eval() {
        // p(x) = 1 + 2x + 3x^2
        let p = DensePoly::from_i64s(&[1, 2, 3]);

        // p(2) = 1 + 4 + 12 = 17
        assert_eq!(p.eval(&q(2, 1)), q(17, 1));
        assert_eq!(p.eval(&q(1, 2)), q(11, 4));
    }

    #[test]
    fn test_derivative() {
        let p = DensePoly::from_i64s(&[5, 3, 0, 2]);
        assert_eq!(p.derivative(), DensePoly::from_i64s(&[3, 0, 6]));
        assert!(DensePoly::constant(q(7, 1)).derivative().is_zero());
    }

    #[test]
    fn test_content_primitive() {
        // -x^2/2 + 3/4 = (-1/4) * (2x^2 - 3)
        let p = DensePoly::new(vec![q(3, 4), q(0, 1), q(-1, 2)]);
        let (c, prim) = p.content_primitive();
        assert_eq!(c, q(-1, 4));
        assert_eq!(prim, DensePoly::from_i64s(&[-3, 0, 2]));
    }

    #[test]
    fn test_zero_roots() {
        let p = DensePoly::from_i64s(&[0, 0, 1, 1]);
        assert_eq!(p.zero_root_multiplicity(), 2);
        assert_eq!(p.unshift(2), DensePoly::from_i64s(&[1, 1]));
    }
}
