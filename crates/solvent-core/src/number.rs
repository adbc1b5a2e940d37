//! Numeric coefficients.
//!
//! [`Num`] is the value of a numeric leaf: an exact rational or a float.
//! Arithmetic mixing the two yields a float.

use num_traits::{One, Zero};
use solvent_integers::Rational;

/// An exact or approximate number.
#[derive(Debug, Clone, PartialEq)]
pub enum Num {
    /// Exact rational value.
    Exact(Rational),
    /// Floating-point value.
    Approx(f64),
}

impl Num {
    /// Exact zero.
    #[must_use]
    pub fn zero() -> Self {
        Num::Exact(Rational::zero())
    }

    /// Exact one.
    #[must_use]
    pub fn one() -> Self {
        Num::Exact(Rational::one())
    }

    /// Exact integer.
    #[must_use]
    pub fn int(n: i64) -> Self {
        Num::Exact(Rational::from(n))
    }

    /// True for exact or approximate zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Num::Exact(r) => r.is_zero(),
            Num::Approx(f) => *f == 0.0,
        }
    }

    /// True only for exact one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        matches!(self, Num::Exact(r) if r.is_one())
    }

    /// True for exact or approximate negative values.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            Num::Exact(r) => r.is_negative(),
            Num::Approx(f) => *f < 0.0,
        }
    }

    /// True if this is a float.
    #[must_use]
    pub fn is_approx(&self) -> bool {
        matches!(self, Num::Approx(_))
    }

    /// Returns the exact value, if any.
    #[must_use]
    pub fn as_exact(&self) -> Option<&Rational> {
        match self {
            Num::Exact(r) => Some(r),
            Num::Approx(_) => None,
        }
    }

    /// Converts to `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match self {
            Num::Exact(r) => r.to_f64(),
            Num::Approx(f) => *f,
        }
    }

    /// Sum of two numbers.
    #[must_use]
    pub fn add(&self, other: &Num) -> Num {
        match (self, other) {
            (Num::Exact(a), Num::Exact(b)) => Num::Exact(a + b),
            _ => Num::Approx(self.to_f64() + other.to_f64()),
        }
    }

    /// Product of two numbers.
    #[must_use]
    pub fn mul(&self, other: &Num) -> Num {
        match (self, other) {
            (Num::Exact(a), Num::Exact(b)) => Num::Exact(a * b),
            _ => Num::Approx(self.to_f64() * other.to_f64()),
        }
    }

    /// Negation.
    #[must_use]
    pub fn neg(&self) -> Num {
        match self {
            Num::Exact(r) => Num::Exact(-r),
            Num::Approx(f) => Num::Approx(-f),
        }
    }

    /// Reciprocal, or `None` for zero.
    #[must_use]
    pub fn recip(&self) -> Option<Num> {
        match self {
            Num::Exact(r) => r.checked_recip().map(Num::Exact),
            Num::Approx(f) if *f != 0.0 => Some(Num::Approx(1.0 / f)),
            Num::Approx(_) => None,
        }
    }
}

impl From<Rational> for Num {
    fn from(r: Rational) -> Self {
        Num::Exact(r)
    }
}
