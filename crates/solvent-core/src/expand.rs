//! Algebraic expansion.

use hashbrown::HashMap;

use crate::arena::ExprArena;
use crate::error::{MathError, MathResult};
use crate::expr::ExprNode;
use crate::handle::ExprHandle;

impl ExprArena {
    /// Distributes products over sums and expands integer powers of sums,
    /// recursively, including inside function arguments.
    ///
    /// `(x + 1)**2` becomes `x**2 + 2*x + 1`. Negative powers expand their
    /// positive counterpart and stay in the denominator.
    ///
    /// # Errors
    ///
    /// Fails with [`MathError::TooManyTerms`] or
    /// [`MathError::ExponentTooLarge`] when the expansion exceeds the arena's
    /// limits.
    pub fn expand(&mut self, h: ExprHandle) -> MathResult<ExprHandle> {
        let mut memo = HashMap::new();
        self.expand_memo(h, &mut memo)
    }

    fn expand_memo(
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
                    terms.push(self.expand_memo(a, memo)?);
                }
                self.add(&terms)?
            }
            ExprNode::Mul(args) => {
                let mut acc = vec![self.one()];
                for a in args {
                    let f = self.expand_memo(a, memo)?;
                    let rhs = self.terms(f);
                    acc = self.distribute(&acc, &rhs)?;
                }
                self.add(&acc)?
            }
            ExprNode::Pow { base, exp } => {
                let b = self.expand_memo(base, memo)?;
                let e = self.expand_memo(exp, memo)?;
                self.expand_power(b, e)?
            }
            ExprNode::Function { func, arg } => {
                let a = self.expand_memo(arg, memo)?;
                self.func(func, a)?
            }
        };
        memo.insert(h, result);
        Ok(result)
    }

    /// Pairwise products of two term lists.
    fn distribute(
        &mut self,
        lhs: &[ExprHandle],
        rhs: &[ExprHandle],
    ) -> MathResult<Vec<ExprHandle>> {
        let limit = self.limits().max_terms;
        if lhs.len().saturating_mul(rhs.len()) > limit {
            return Err(MathError::TooManyTerms { limit });
        }
        let mut out = Vec::with_capacity(lhs.len() * rhs.len());
        for &a in lhs {
            for &b in rhs {
                out.push(self.mul(&[a, b])?);
            }
        }
        Ok(out)
    }

    fn expand_power(&mut self, base: ExprHandle, exp: ExprHandle) -> MathResult<ExprHandle> {
        let Some(n) = self.as_i64(exp) else {
            return self.pow(base, exp);
        };
        if !matches!(self.get(base), ExprNode::Add(_)) {
            return self.pow(base, exp);
        }
        let limit = self.limits().max_exponent;
        if n.unsigned_abs() > u64::from(limit) {
            return Err(MathError::ExponentTooLarge {
                exponent: n.to_string(),
                limit,
            });
        }

        let base_terms = self.terms(base);
        let mut acc = base;
        for _ in 1..n.unsigned_abs() {
            let lhs = self.terms(acc);
            let products = self.distribute(&lhs, &base_terms)?;
            acc = self.add(&products)?;
        }
        if n < 0 {
            let m = self.neg_one();
            self.pow(acc, m)
        } else {
            Ok(acc)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::Limits;

    #[test]
    fn test_expand_binomial_cube() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let one = arena.one();
        let sum = arena.add(&[x, one]).unwrap();
        let cube = arena.powi(sum, 3).unwrap();
        let expanded = arena.expand(cube).unwrap();

        let x3 = arena.powi(x, 3).unwrap();
        let three = arena.integer(3);
        let x2 = arena.powi(x, 2).unwrap();
        let t2 = arena.mul(&[three, x2]).unwrap();
        let t1 = arena.mul(&[three, x]).unwrap();
        let expected = arena.add(&[x3, t2, t1, one]).unwrap();
        assert_eq!(expanded, expected);
    }

    #[test]
    fn test_expand_difference_of_squares() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let y = arena.symbol("y");
        let s = arena.add(&[x, y]).unwrap();
        let d = arena.sub(x, y).unwrap();
        let prod = arena.mul(&[s, d]).unwrap();
        let expanded = arena.expand(prod).unwrap();

        let x2 = arena.powi(x, 2).unwrap();
        let y2 = arena.powi(y, 2).unwrap();
        let expected = arena.sub(x2, y2).unwrap();
        assert_eq!(expanded, expected);
    }

    #[test]
    fn test_expand_inside_function() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let one = arena.one();
        let sum = arena.add(&[x, one]).unwrap();
        let sq = arena.powi(sum, 2).unwrap();
        let sin = arena.func(crate::expr::Func::Sin, sq).unwrap();
        let expanded = arena.expand(sin).unwrap();

        let inner = arena.expand(sq).unwrap();
        let expected = arena.func(crate::expr::Func::Sin, inner).unwrap();
        assert_eq!(expanded, expected);
        assert_ne!(expanded, sin);
    }

    #[test]
    fn test_expand_term_limit() {
        let mut arena = ExprArena::with_limits(Limits {
            max_terms: 10,
            ..Limits::default()
        });
        let x = arena.symbol("x");
        let y = arena.symbol("y");
        let z = arena.symbol("z");
        let sum = arena.add(&[x, y, z]).unwrap();
        let big = arena.powi(sum, 6).unwrap();
        assert!(matches!(
            arena.expand(big),
            Err(MathError::TooManyTerms { .. })
        ));
    }
}
