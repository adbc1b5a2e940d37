//! Fallback for problems no other handler claims.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::{equation, parse_or_none, HandlerResult};
use crate::backend::Backend;
use crate::outcome::Outcome;

/// Shown when the text is not an expression.
pub const HINT: &str = "I couldn't determine how to solve this problem. \
     Please try reformulating it or specifying the type of math problem.";

static COMMAND_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"find|calculate|compute|what is|solve").expect("valid pattern"));

/// Evaluates the text left after removing command words.
///
/// Pure arithmetic and symbolic expressions give `Result: {value}`; text
/// containing `=` is handed to the equation handler.
///
/// # Errors
///
/// Returns the evaluation error of a well-formed expression, such as a
/// division by zero.
pub fn evaluate<B: Backend>(backend: &mut B, text: &str) -> HandlerResult {
    let cleaned = COMMAND_WORDS.replace_all(text, "");
    let cleaned = cleaned.trim();

    if !is_arithmetic(cleaned) && cleaned.contains('=') {
        debug!("delegating to the equation handler");
        return equation::solve(backend, text);
    }
    match parse_or_none(backend, cleaned)? {
        Some(value) => Ok(Outcome::Solved(format!("Result: {}", backend.render(value)))),
        None => {
            warn!(text, "nothing to evaluate");
            Ok(Outcome::Unrecognized(HINT.to_string()))
        }
    }
}

fn is_arithmetic(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit() || ".+-*/^() ".contains(c))
}
