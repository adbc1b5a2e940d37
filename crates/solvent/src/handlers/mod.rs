//! Problem handlers and the rules choosing between them.
//!
//! Each handler pulls its inputs out of the normalized problem text with a
//! regular expression, calls the backend and formats a fixed template.
//! A text the handler cannot read gives [`Outcome::Unrecognized`] with a
//! phrasing hint; a failed computation is returned as an error.

pub mod algebra;
pub mod calculus;
pub mod equation;
pub mod generic;
pub mod geometry;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::backend::Backend;
use crate::error::HandlerError;
use crate::outcome::Outcome;

pub use algebra::Transform;

/// Result of running a handler.
pub type HandlerResult = Result<Outcome, HandlerError>;

/// The handler a problem is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Solve an equation for one variable.
    Equation,
    /// Differentiate `f(x)`.
    Derivative,
    /// Indefinite integral in `x`.
    Integral,
    /// Simplify an expression.
    Simplify,
    /// Factor an expression.
    Factor,
    /// Expand an expression.
    Expand,
    /// Limit at a point.
    Limit,
    /// Area of a plane shape.
    Area,
    /// Volume of a solid.
    Volume,
    /// Arithmetic or symbolic evaluation.
    Generic,
}

impl Route {
    /// Chooses a handler for normalized (trimmed, lowercase) text.
    ///
    /// The rules are checked in order and the first match wins.
    #[must_use]
    pub fn select(text: &str) -> Self {
        let has = |word: &str| text.contains(word);
        if has("solve") && (has("equation") || has("=")) {
            Route::Equation
        } else if has("derivative") || has("differentiate") {
            Route::Derivative
        } else if has("integrate") || has("integral") {
            Route::Integral
        } else if has("simplify") {
            Route::Simplify
        } else if has("factor") {
            Route::Factor
        } else if has("expand") {
            Route::Expand
        } else if has("limit") {
            Route::Limit
        } else if has("area")
            && ["circle", "square", "triangle", "rectangle"]
                .into_iter()
                .any(has)
        {
            Route::Area
        } else if has("volume") {
            Route::Volume
        } else {
            Route::Generic
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Route::Equation => "equation",
            Route::Derivative => "derivative",
            Route::Integral => "integral",
            Route::Simplify => "simplify",
            Route::Factor => "factor",
            Route::Expand => "expand",
            Route::Limit => "limit",
            Route::Area => "area",
            Route::Volume => "volume",
            Route::Generic => "generic",
        }
    }

    /// Runs the handler on normalized text.
    ///
    /// # Errors
    ///
    /// Returns the computation error of a problem that was read but could
    /// not be solved.
    pub fn run<B: Backend>(self, backend: &mut B, text: &str) -> HandlerResult {
        match self {
            Route::Equation => equation::solve(backend, text),
            Route::Derivative => calculus::derivative(backend, text),
            Route::Integral => calculus::integral(backend, text),
            Route::Simplify => algebra::transform(backend, text, Transform::Simplify),
            Route::Factor => algebra::transform(backend, text, Transform::Factor),
            Route::Expand => algebra::transform(backend, text, Transform::Expand),
            Route::Limit => calculus::limit(backend, text),
            Route::Area => geometry::area(text),
            Route::Volume => geometry::volume(text),
            Route::Generic => generic::evaluate(backend, text),
        }
    }
}

/// Parses `text`, reporting a syntax error as `None`.
///
/// Errors raised while evaluating a well-formed expression are returned.
pub(crate) fn parse_or_none<B: Backend>(
    backend: &mut B,
    text: &str,
) -> Result<Option<B::Expr>, HandlerError> {
    match backend.parse(text) {
        Ok(e) => Ok(Some(e)),
        Err(e) if e.is_parse() => {
            debug!(text, error = %e, "expression did not parse");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// The first capture group of the first pattern that matches.
pub(crate) fn first_capture<'t>(patterns: &[&Lazy<Regex>], text: &'t str) -> Option<&'t str> {
    patterns
        .iter()
        .find_map(|re| re.captures(text).and_then(|c| c.get(1)))
        .map(|m| m.as_str())
}

/// Strips whitespace and closing sentence punctuation.
pub(crate) fn trim_sentence(s: &str) -> &str {
    s.trim().trim_end_matches(['.', '?', '!']).trim_end()
}
