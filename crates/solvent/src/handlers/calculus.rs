//! Derivatives, integrals and limits.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::{first_capture, parse_or_none, trim_sentence, HandlerResult};
use crate::backend::Backend;
use crate::outcome::Outcome;

/// Shown when no function to differentiate was found.
pub const DERIVATIVE_HINT: &str = "I couldn't identify the function to differentiate. \
     Please format it as 'find the derivative of f(x) = ...'";

/// Shown when no function to integrate was found.
pub const INTEGRAL_HINT: &str = "I couldn't identify the function to integrate. \
     Please format it as 'find the integral of ...' or 'integrate ...'";

/// Shown when no limit problem was found.
pub const LIMIT_HINT: &str = "I couldn't identify the limit problem. \
     Please format it as 'limit of [expression] as [variable] approaches [value]'";

static FUNCTION_DEF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"f\(x\)\s*=\s*([^,]+)").expect("valid pattern"));
static DERIVATIVE_OF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"derivative of ([^,.]+)").expect("valid pattern"));
static DIFFERENTIATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"differentiate ([^,.]+)").expect("valid pattern"));

static INTEGRAL_OF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"integral of ([^,.]+)").expect("valid pattern"));
static INTEGRATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"integrate ([^,.]+)").expect("valid pattern"));
static DIFFERENTIAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\bdx\s*$").expect("valid pattern"));

static LIMIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"limit of (.+?) as ([a-z]) approaches ([^\s,]+)")
        .expect("valid pattern")
});

/// Differentiates `f(x) = ...` or `derivative of ...` with respect to `x`.
///
/// # Errors
///
/// Returns the differentiation error for functions without a rule.
pub fn derivative<B: Backend>(backend: &mut B, text: &str) -> HandlerResult {
    let Some(source) = first_capture(&[&FUNCTION_DEF, &DERIVATIVE_OF, &DIFFERENTIATE], text)
    else {
        warn!(text, "no function to differentiate");
        return Ok(Outcome::Unrecognized(DERIVATIVE_HINT.to_string()));
    };
    let source = trim_sentence(source);
    let Some(f) = parse_or_none(backend, source)? else {
        return Ok(Outcome::Unrecognized(DERIVATIVE_HINT.to_string()));
    };

    let x = backend.symbol("x");
    let d = backend.differentiate(f, x)?;
    Ok(Outcome::Solved(format!("f'(x) = {}", backend.render(d))))
}

/// Integrates `integral of ...` or `integrate ...` in `x`.
///
/// A trailing `dx` is dropped from the integrand.
///
/// # Errors
///
/// Returns the integration error when no antiderivative is found.
pub fn integral<B: Backend>(backend: &mut B, text: &str) -> HandlerResult {
    let Some(source) = first_capture(&[&INTEGRAL_OF, &INTEGRATE], text) else {
        warn!(text, "no function to integrate");
        return Ok(Outcome::Unrecognized(INTEGRAL_HINT.to_string()));
    };
    let source = DIFFERENTIAL.replace(trim_sentence(source), "");
    let Some(f) = parse_or_none(backend, &source)? else {
        return Ok(Outcome::Unrecognized(INTEGRAL_HINT.to_string()));
    };

    let x = backend.symbol("x");
    let antiderivative = backend.integrate(f, x)?;
    Ok(Outcome::Solved(format!(
        "∫{source} dx = {} + C",
        backend.render(antiderivative)
    )))
}

/// Evaluates `limit of ... as v approaches p`.
///
/// # Errors
///
/// Returns the limit error when the limit does not exist or cannot be
/// determined.
pub fn limit<B: Backend>(backend: &mut B, text: &str) -> HandlerResult {
    let Some(caps) = LIMIT.captures(text) else {
        warn!(text, "no limit problem");
        return Ok(Outcome::Unrecognized(LIMIT_HINT.to_string()));
    };
    let (Some(expr), Some(var), Some(point)) = (caps.get(1), caps.get(2), caps.get(3)) else {
        return Ok(Outcome::Unrecognized(LIMIT_HINT.to_string()));
    };
    let expr_text = expr.as_str().trim();
    let var_name = var.as_str();
    let point_text = trim_sentence(point.as_str());
    debug!(expr = expr_text, var = var_name, point = point_text, "limit extracted");

    let Some(f) = parse_or_none(backend, expr_text)? else {
        return Ok(Outcome::Unrecognized(LIMIT_HINT.to_string()));
    };
    let Some(p) = parse_or_none(backend, point_text)? else {
        return Ok(Outcome::Unrecognized(LIMIT_HINT.to_string()));
    };

    let v = backend.symbol(var_name);
    let value = backend.limit(f, v, p)?;
    Ok(Outcome::Solved(format!(
        "lim({expr_text}) as {var_name}→{point_text} = {}",
        backend.render(value)
    )))
}
