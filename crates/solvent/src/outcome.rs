//! The result of solving one problem.

use serde::{Deserialize, Serialize};

/// Opening of every hard-failure message.
pub const APOLOGY: &str = "I couldn't solve this problem. Error: ";

/// What a solve produced, with the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Outcome {
    /// An answer.
    Solved(String),
    /// The handler could not read the problem; the text says how to phrase
    /// it.
    Unrecognized(String),
    /// A computation failed; the text is an apology carrying the error.
    Failed(String),
}

impl Outcome {
    /// A failure outcome for an error.
    #[must_use]
    pub fn failed(error: &impl std::fmt::Display) -> Self {
        Outcome::Failed(format!("{APOLOGY}{error}"))
    }

    /// The text shown to the user.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Outcome::Solved(t) | Outcome::Unrecognized(t) | Outcome::Failed(t) => t,
        }
    }

    /// Consumes the outcome, returning its text.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Outcome::Solved(t) | Outcome::Unrecognized(t) | Outcome::Failed(t) => t,
        }
    }

    /// True for [`Outcome::Solved`].
    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_message() {
        let outcome = Outcome::failed(&"division by zero");
        assert_eq!(
            outcome.text(),
            "I couldn't solve this problem. Error: division by zero"
        );
        assert!(!outcome.is_solved());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&Outcome::Solved("x = 2".into())).unwrap();
        assert_eq!(json, r#"{"kind":"solved","text":"x = 2"}"#);
        let back: Outcome = serde_json::from_str(r#"{"kind":"unrecognized","text":"hint"}"#).unwrap();
        assert_eq!(back, Outcome::Unrecognized("hint".into()));
    }
}
