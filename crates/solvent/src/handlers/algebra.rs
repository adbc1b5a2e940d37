//! Simplify, factor and expand.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use super::{parse_or_none, trim_sentence, HandlerResult};
use crate::backend::Backend;
use crate::outcome::Outcome;

static SIMPLIFY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"simplify ([^,.]+)").expect("valid pattern"));
static FACTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"factor ([^,.]+)").expect("valid pattern"));
static EXPAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"expand ([^,.]+)").expect("valid pattern"));

/// A rewrite of a single expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    /// Smallest equivalent form.
    Simplify,
    /// Product of factors over the rationals.
    Factor,
    /// Multiplied-out sum.
    Expand,
}

impl Transform {
    /// The command word.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Transform::Simplify => "simplify",
            Transform::Factor => "factor",
            Transform::Expand => "expand",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Transform::Simplify => "Simplified",
            Transform::Factor => "Factored",
            Transform::Expand => "Expanded",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Transform::Simplify => &*SIMPLIFY,
            Transform::Factor => &*FACTOR,
            Transform::Expand => &*EXPAND,
        }
    }

    /// Hint shown when no expression follows the command word.
    #[must_use]
    pub fn hint(self) -> String {
        let verb = self.verb();
        format!("I couldn't identify the expression to {verb}. Please format it as '{verb} ...'")
    }
}

/// Applies `transform` to the expression after its command word.
///
/// # Errors
///
/// Returns the backend error when the rewrite exceeds the resource limits.
pub fn transform<B: Backend>(backend: &mut B, text: &str, transform: Transform) -> HandlerResult {
    let source = transform
        .pattern()
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| trim_sentence(m.as_str()));
    let Some(source) = source else {
        warn!(text, verb = transform.verb(), "no expression found");
        return Ok(Outcome::Unrecognized(transform.hint()));
    };
    let Some(e) = parse_or_none(backend, source)? else {
        return Ok(Outcome::Unrecognized(transform.hint()));
    };

    let result = match transform {
        Transform::Simplify => backend.simplify(e)?,
        Transform::Factor => backend.factor(e)?,
        Transform::Expand => backend.expand(e)?,
    };
    Ok(Outcome::Solved(format!(
        "{}: {}",
        transform.label(),
        backend.render(result)
    )))
}
