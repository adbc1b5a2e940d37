//! Arbitrary precision integers.
//!
//! This module wraps `dashu::IBig` with the handful of operations the
//! expression engine needs: exact roots for surd simplification, GCDs for
//! polynomial content, and conversions to machine integers.

use dashu::base::{Abs, Gcd, Signed as DashuSigned};
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// Largest magnitude for which [`Integer::extract_power`] searches for
/// perfect-power factors.
const POWER_SEARCH_LIMIT: u64 = 1_000_000_000_000;

/// An arbitrary precision integer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(IBig);

impl Integer {
    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Parses a string of decimal digits, with an optional leading sign.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid integer.
    pub fn parse(s: &str) -> Result<Self, dashu::base::error::ParseError> {
        IBig::from_str_radix(s, 10).map(Self)
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if this integer is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Returns true if this integer is even.
    #[must_use]
    pub fn is_even(&self) -> bool {
        (&self.0 % &IBig::from(2)).is_zero()
    }

    /// Computes the greatest common divisor (always non-negative).
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        Self(IBig::from(self.0.clone().gcd(other.0.clone())))
    }

    /// Computes the least common multiple (always non-negative).
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let g = self.gcd(other);
        Self(&self.0 / &g.0 * &other.0).abs()
    }

    /// Returns the inner `dashu::IBig`.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }

    /// Attempts to convert to an i64.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }

    /// Converts to the nearest f64.
    ///
    /// Values outside the i64 range go through their decimal form.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        match self.to_i64() {
            Some(v) => v as f64,
            None => self.0.to_string().parse().unwrap_or(f64::NAN),
        }
    }

    /// Computes self^exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Returns the exact `n`-th root when `self` is a perfect `n`-th power.
    ///
    /// Only values that fit in an i64 are examined; negative values have a
    /// root only for odd `n`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn exact_root(&self, n: u32) -> Option<Self> {
        if n == 0 {
            return None;
        }
        if n == 1 {
            return Some(self.clone());
        }
        let value = self.to_i64()?;
        if value < 0 {
            if n % 2 == 0 {
                return None;
            }
            return Self::new(-value).exact_root(n).map(|r| -r);
        }

        let estimate = (value as f64).powf(1.0 / f64::from(n)).round() as i64;
        for candidate in estimate.saturating_sub(1)..=estimate.saturating_add(1) {
            if candidate < 0 {
                continue;
            }
            if let Some(p) = candidate.checked_pow(n) {
                if p == value {
                    return Some(Self::new(candidate));
                }
            }
        }
        None
    }

    /// Splits `|self|` as `outside^n * inside` with `outside` maximal.
    ///
    /// Returns `None` when there is nothing to pull out (outside = 1) or the
    /// value is too large to search.
    #[must_use]
    pub fn extract_power(&self, n: u32) -> Option<(Self, Self)> {
        if n < 2 {
            return None;
        }
        let mut inside = u64::try_from(self.abs().to_i64()?).ok()?;
        if inside > POWER_SEARCH_LIMIT {
            return None;
        }

        let mut outside: u64 = 1;
        let mut k: u64 = 2;
        while let Some(kn) = k.checked_pow(n) {
            if kn > inside {
                break;
            }
            while inside % kn == 0 {
                inside /= kn;
                outside *= k;
            }
            k += 1;
        }

        if outside == 1 {
            None
        } else {
            Some((Self::from(outside), Self::from(inside)))
        }
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Integer {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add for &Integer {
    type Output = Integer;

    fn add(self, rhs: Self) -> Self::Output {
        Integer(&self.0 + &rhs.0)
    }
}

impl Sub for Integer {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub for &Integer {
    type Output = Integer;

    fn sub(self, rhs: Self) -> Self::Output {
        Integer(&self.0 - &rhs.0)
    }
}

impl Mul for Integer {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul for &Integer {
    type Output = Integer;

    fn mul(self, rhs: Self) -> Self::Output {
        Integer(&self.0 * &rhs.0)
    }
}

impl Div for Integer {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Div for &Integer {
    type Output = Integer;

    fn div(self, rhs: Self) -> Self::Output {
        Integer(&self.0 / &rhs.0)
    }
}

impl Rem for Integer {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self::Output {
        Self(self.0 % rhs.0)
    }
}

impl Rem for &Integer {
    type Output = Integer;

    fn rem(self, rhs: Self) -> Self::Output {
        Integer(&self.0 % &rhs.0)
    }
}

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        Integer(-&self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self::new(i64::from(value))
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self(IBig::from(value))
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}
