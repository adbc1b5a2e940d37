//! Single-variable equations.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::{parse_or_none, HandlerResult};
use crate::backend::Backend;
use crate::error::HandlerError;
use crate::outcome::Outcome;

/// Shown when no equation could be read.
pub const HINT: &str =
    "I couldn't parse the equation properly. Please format it as 'solve for x: ax + b = c'";

static EQUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^=]+)=([^=]+)").expect("valid pattern"));
static VARIABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"solve for ([a-z])").expect("valid pattern"));
static COMMAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"solve(?: for [a-z]:?)?").expect("valid pattern"));

/// Solves the first `lhs = rhs` in `text` for the requested variable.
///
/// The whole text is tried first; if its sides do not parse, the `solve`
/// command words are removed and the remainder is tried again.
///
/// # Errors
///
/// Returns the solver's error when an equation was read but could not be
/// solved.
pub fn solve<B: Backend>(backend: &mut B, text: &str) -> HandlerResult {
    let var_name = VARIABLE
        .captures(text)
        .and_then(|c| c.get(1))
        .map_or("x", |m| m.as_str());

    if let Some(answer) = attempt(backend, text, var_name)? {
        return Ok(answer);
    }
    let stripped = COMMAND.replace_all(text, "");
    debug!(remainder = %stripped, "retrying equation without command words");
    if let Some(answer) = attempt(backend, &stripped, var_name)? {
        return Ok(answer);
    }
    warn!(text, "no equation found");
    Ok(Outcome::Unrecognized(HINT.to_string()))
}

/// Extracts and solves one equation; `None` when it cannot be read.
fn attempt<B: Backend>(
    backend: &mut B,
    text: &str,
    var_name: &str,
) -> Result<Option<Outcome>, HandlerError> {
    let Some(caps) = EQUATION.captures(text) else {
        return Ok(None);
    };
    let (Some(lhs), Some(rhs)) = (caps.get(1), caps.get(2)) else {
        return Ok(None);
    };
    let Some(lhs) = parse_or_none(backend, lhs.as_str())? else {
        return Ok(None);
    };
    let Some(rhs) = parse_or_none(backend, rhs.as_str())? else {
        return Ok(None);
    };

    let var = backend.symbol(var_name);
    let roots = backend.solve_equation(lhs, rhs, var)?;
    let rendered: Vec<String> = roots.into_iter().map(|r| backend.render(r)).collect();
    Ok(Some(Outcome::Solved(format!(
        "{var_name} = {}",
        rendered.join(", ")
    ))))
}
