//! Substitution.

use hashbrown::HashMap;

use crate::arena::ExprArena;
use crate::error::MathResult;
use crate::expr::ExprNode;
use crate::handle::ExprHandle;

impl ExprArena {
    /// Replaces every occurrence of `target` in `h` with `value` and
    /// re-canonicalizes the result.
    ///
    /// # Errors
    ///
    /// Fails when the substituted expression has no value, e.g. `1/x` at
    /// `x = 0`.
    pub fn substitute(
        &mut self,
        h: ExprHandle,
        target: ExprHandle,
        value: ExprHandle,
    ) -> MathResult<ExprHandle> {
        let mut memo = HashMap::new();
        memo.insert(target, value);
        self.subs_memo(h, &mut memo)
    }

    fn subs_memo(
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
                    terms.push(self.subs_memo(a, memo)?);
                }
                self.add(&terms)?
            }
            ExprNode::Mul(args) => {
                let mut factors = Vec::with_capacity(args.len());
                for a in args {
                    factors.push(self.subs_memo(a, memo)?);
                }
                self.mul(&factors)?
            }
            ExprNode::Pow { base, exp } => {
                let b = self.subs_memo(base, memo)?;
                let e = self.subs_memo(exp, memo)?;
                self.pow(b, e)?
            }
            ExprNode::Function { func, arg } => {
                let a = self.subs_memo(arg, memo)?;
                self.func(func, a)?
            }
        };
        memo.insert(h, result);
        Ok(result)
    }
}
