//! Factorization of univariate polynomials over Q.

use num_traits::{One, Zero};
use solvent_integers::Rational;
use solvent_poly::{rational_roots, DensePoly};

use crate::squarefree::squarefree_decomposition;

/// A primitive integer factor with its multiplicity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnivariateFactor {
    /// Primitive polynomial with integer coefficients and positive leading
    /// coefficient.
    pub poly: DensePoly,
    /// The multiplicity (power) of this factor.
    pub multiplicity: usize,
}

/// Result of univariate factorization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnivariateFactorization {
    /// Rational content, carrying the sign.
    pub content: Rational,
    /// Factors, linear ones first in increasing root order.
    pub factors: Vec<UnivariateFactor>,
}

impl UnivariateFactorization {
    /// Reconstructs the original polynomial from factorization.
    #[must_use]
    pub fn to_polynomial(&self) -> DensePoly {
        let mut result = DensePoly::constant(self.content.clone());
        for f in &self.factors {
            let m = u32::try_from(f.multiplicity).unwrap_or(u32::MAX);
            result = result.mul(&f.poly.pow(m));
        }
        result
    }
}

/// The primitive integer form of `x - root`: `q*x - p` for `root = p/q`.
fn linear(root: &Rational) -> DensePoly {
    DensePoly::linear_factor(root).content_primitive().1
}

/// Factors `p` over Q into its content, rational linear factors and
/// squarefree remainders without rational roots.
///
/// Remainders are not split further, so `x**4 + 3*x**2 + 2` comes back as
/// a single factor.
#[must_use]
pub fn factor_univariate(p: &DensePoly) -> UnivariateFactorization {
    if p.degree() == 0 {
        return UnivariateFactorization {
            content: p.coeff(0),
            factors: Vec::new(),
        };
    }

    let (mut content, primitive) = p.content_primitive();
    let mut linears = Vec::new();
    let mut others = Vec::new();
    for (part, multiplicity) in squarefree_decomposition(&primitive) {
        match rational_roots(&part) {
            Some((roots, rest)) => {
                for r in roots {
                    linears.push((r.value, multiplicity));
                }
                if rest.degree() > 0 {
                    others.push(UnivariateFactor {
                        poly: rest.content_primitive().1,
                        multiplicity,
                    });
                }
            }
            None => others.push(UnivariateFactor {
                poly: part.content_primitive().1,
                multiplicity,
            }),
        }
    }
    linears.sort_by(|a, b| a.0.cmp(&b.0));

    let mut factors: Vec<UnivariateFactor> = linears
        .iter()
        .map(|(root, multiplicity)| UnivariateFactor {
            poly: linear(root),
            multiplicity: *multiplicity,
        })
        .collect();
    factors.extend(others);

    // Primitive factors multiply to a primitive polynomial; any leftover
    // scalar belongs to the content.
    let mut lc_product = Rational::one();
    for f in &factors {
        let m = u32::try_from(f.multiplicity).unwrap_or(u32::MAX);
        lc_product = &lc_product * &f.poly.leading_coeff().pow(m);
    }
    if !lc_product.is_zero() {
        content = &content * &(primitive.leading_coeff() / &lc_product);
    }

    UnivariateFactorization { content, factors }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polys(f: &UnivariateFactorization) -> Vec<(DensePoly, usize)> {
        f.factors
            .iter()
            .map(|u| (u.poly.clone(), u.multiplicity))
            .collect()
    }

    #[test]
    fn test_cubic() {
        let p = DensePoly::from_i64s(&[-6, 11, -6, 1]);
        let f = factor_univariate(&p);
        assert_eq!(f.content, Rational::from(1));
        assert_eq!(
            polys(&f),
            vec![
                (DensePoly::from_i64s(&[-1, 1]), 1),
                (DensePoly::from_i64s(&[-2, 1]), 1),
                (DensePoly::from_i64s(&[-3, 1]), 1),
            ]
        );
        assert_eq!(f.to_polynomial(), p);
    }

    #[test]
    fn test_content_and_fractional_root() {
        // -6x^2 + 3x = -3 * x * (2x - 1)
        let p = DensePoly::from_i64s(&[0, 3, -6]);
        let f = factor_univariate(&p);
        assert_eq!(f.content, Rational::from(-3));
        assert_eq!(
            polys(&f),
            vec![
                (DensePoly::from_i64s(&[0, 1]), 1),
                (DensePoly::from_i64s(&[-1, 2]), 1),
            ]
        );
        assert_eq!(f.to_polynomial(), p);
    }

    #[test]
    fn test_repeated_and_irreducible() {
        // (x + 1)^2 (x^2 + 1)
        let p = DensePoly::from_i64s(&[1, 1])
            .pow(2)
            .mul(&DensePoly::from_i64s(&[1, 0, 1]));
        let f = factor_univariate(&p);
        assert_eq!(
            polys(&f),
            vec![
                (DensePoly::from_i64s(&[1, 1]), 2),
                (DensePoly::from_i64s(&[1, 0, 1]), 1),
            ]
        );
        assert_eq!(f.to_polynomial(), p);
    }

    #[test]
    fn test_constant() {
        let f = factor_univariate(&DensePoly::from_i64s(&[4]));
        assert_eq!(f.content, Rational::from(4));
        assert!(f.factors.is_empty());
    }
}
