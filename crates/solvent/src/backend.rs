//! The symbolic backend handlers compute with.

use solvent_core::{ExprArena, ExprHandle, Limits};
use solvent_limits::Point;
use solvent_simplify::Simplifier;

use crate::error::CasError;

/// Symbolic operations needed by the handlers.
///
/// Expressions are opaque values owned by the backend; they are only
/// meaningful to the backend that produced them.
pub trait Backend {
    /// An expression owned by this backend.
    type Expr: Copy;

    /// Parses expression text into canonical form.
    ///
    /// # Errors
    ///
    /// Fails on malformed text or when evaluating the expression fails.
    fn parse(&mut self, text: &str) -> Result<Self::Expr, CasError>;

    /// The symbol with the given name.
    fn symbol(&mut self, name: &str) -> Self::Expr;

    /// Solves `lhs = rhs` for `var`.
    ///
    /// # Errors
    ///
    /// Fails when no method applies to the equation.
    fn solve_equation(
        &mut self,
        lhs: Self::Expr,
        rhs: Self::Expr,
        var: Self::Expr,
    ) -> Result<Vec<Self::Expr>, CasError>;

    /// The derivative of `f` with respect to `var`.
    ///
    /// # Errors
    ///
    /// Fails on functions without a derivative rule.
    fn differentiate(&mut self, f: Self::Expr, var: Self::Expr) -> Result<Self::Expr, CasError>;

    /// An antiderivative of `f` with respect to `var`.
    ///
    /// # Errors
    ///
    /// Fails when no closed form is found.
    fn integrate(&mut self, f: Self::Expr, var: Self::Expr) -> Result<Self::Expr, CasError>;

    /// The simplest equivalent form found for `e`.
    ///
    /// # Errors
    ///
    /// Fails only if rebuilding the result fails.
    fn simplify(&mut self, e: Self::Expr) -> Result<Self::Expr, CasError>;

    /// `e` factored over the rationals.
    ///
    /// # Errors
    ///
    /// Fails when an expansion step exceeds the resource limits.
    fn factor(&mut self, e: Self::Expr) -> Result<Self::Expr, CasError>;

    /// `e` with products and powers of sums multiplied out.
    ///
    /// # Errors
    ///
    /// Fails when the expansion exceeds the resource limits.
    fn expand(&mut self, e: Self::Expr) -> Result<Self::Expr, CasError>;

    /// The limit of `f` as `var` approaches `point`.
    ///
    /// # Errors
    ///
    /// Fails when the limit does not exist or cannot be determined.
    fn limit(
        &mut self,
        f: Self::Expr,
        var: Self::Expr,
        point: Self::Expr,
    ) -> Result<Self::Expr, CasError>;

    /// Prints an expression.
    fn render(&self, e: Self::Expr) -> String;
}

/// The backend over the solvent CAS crates.
///
/// Holds one expression arena; create a new backend per problem.
pub struct CasBackend<'s> {
    arena: ExprArena,
    simplifier: &'s Simplifier,
}

impl<'s> CasBackend<'s> {
    /// Creates a backend with a fresh arena.
    #[must_use]
    pub fn new(limits: Limits, simplifier: &'s Simplifier) -> Self {
        Self {
            arena: ExprArena::with_limits(limits),
            simplifier,
        }
    }

    /// The underlying arena.
    #[must_use]
    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }
}

impl Backend for CasBackend<'_> {
    type Expr = ExprHandle;

    fn parse(&mut self, text: &str) -> Result<ExprHandle, CasError> {
        let raw = solvent_core::parse(&mut self.arena, text)?;
        Ok(self.arena.canonicalize(raw)?)
    }

    fn symbol(&mut self, name: &str) -> ExprHandle {
        self.arena.symbol(name)
    }

    fn solve_equation(
        &mut self,
        lhs: ExprHandle,
        rhs: ExprHandle,
        var: ExprHandle,
    ) -> Result<Vec<ExprHandle>, CasError> {
        Ok(solvent_solve::solve(&mut self.arena, lhs, rhs, var)?)
    }

    fn differentiate(&mut self, f: ExprHandle, var: ExprHandle) -> Result<ExprHandle, CasError> {
        Ok(solvent_diff::diff(&mut self.arena, f, var)?)
    }

    fn integrate(&mut self, f: ExprHandle, var: ExprHandle) -> Result<ExprHandle, CasError> {
        Ok(solvent_integrate::integrate(&mut self.arena, f, var)?)
    }

    fn simplify(&mut self, e: ExprHandle) -> Result<ExprHandle, CasError> {
        Ok(solvent_simplify::simplify(&mut self.arena, e, self.simplifier))
    }

    fn factor(&mut self, e: ExprHandle) -> Result<ExprHandle, CasError> {
        Ok(solvent_factor::factor(&mut self.arena, e)?)
    }

    fn expand(&mut self, e: ExprHandle) -> Result<ExprHandle, CasError> {
        Ok(self.arena.expand(e)?)
    }

    fn limit(
        &mut self,
        f: ExprHandle,
        var: ExprHandle,
        point: ExprHandle,
    ) -> Result<ExprHandle, CasError> {
        let point = Point::from_expr(&self.arena, point);
        Ok(solvent_limits::limit(&mut self.arena, f, var, point)?)
    }

    fn render(&self, e: ExprHandle) -> String {
        self.arena.render(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_canonical() {
        let simplifier = Simplifier::new();
        let mut cas = CasBackend::new(Limits::default(), &simplifier);
        let a = cas.parse("x + x").unwrap();
        let b = cas.parse("2*x").unwrap();
        assert_eq!(a, b);
        assert_eq!(cas.render(a), "2*x");
    }

    #[test]
    fn test_operations() {
        let simplifier = Simplifier::new();
        let mut cas = CasBackend::new(Limits::default(), &simplifier);
        let x = cas.symbol("x");

        let f = cas.parse("x^3").unwrap();
        let d = cas.differentiate(f, x).unwrap();
        assert_eq!(cas.render(d), "3*x**2");

        let i = cas.integrate(f, x).unwrap();
        assert_eq!(cas.render(i), "x**4/4");

        let p = cas.parse("(x + 1)^2").unwrap();
        let e = cas.expand(p).unwrap();
        assert_eq!(cas.render(e), "x**2 + 2*x + 1");
        let back = cas.factor(e).unwrap();
        assert_eq!(cas.render(back), "(x + 1)**2");
    }

    #[test]
    fn test_parse_error() {
        let simplifier = Simplifier::new();
        let mut cas = CasBackend::new(Limits::default(), &simplifier);
        let err = cas.parse("2 +").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_limit_at_infinity_token() {
        let simplifier = Simplifier::new();
        let mut cas = CasBackend::new(Limits::default(), &simplifier);
        let x = cas.symbol("x");
        let f = cas.parse("1/x").unwrap();
        let oo = cas.parse("infinity").unwrap();
        let v = cas.limit(f, x, oo).unwrap();
        assert_eq!(cas.render(v), "0");
    }
}
