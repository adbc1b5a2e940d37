//! Problem categories and the keyword classifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Broad kind of a math problem.
///
/// Advisory only: the category is logged but never decides which handler
/// runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Equations and expression manipulation.
    Algebra,
    /// Derivatives, integrals and limits.
    Calculus,
    /// Areas and volumes.
    Geometry,
    /// Anything else.
    #[default]
    General,
}

impl Category {
    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Algebra => "algebra",
            Category::Calculus => "calculus",
            Category::Geometry => "geometry",
            Category::General => "general",
        }
    }

    /// Reads a problem-type hint, treating unknown names as
    /// [`Category::General`].
    #[must_use]
    pub fn from_hint(hint: &str) -> Self {
        hint.parse().unwrap_or_else(|()| {
            tracing::debug!(hint, "unknown problem type, using general");
            Category::General
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "algebra" => Ok(Category::Algebra),
            "calculus" => Ok(Category::Calculus),
            "geometry" => Ok(Category::Geometry),
            "general" => Ok(Category::General),
            _ => Err(()),
        }
    }
}

/// Keyword groups in priority order; the first group with a hit wins.
const KEYWORDS: &[(&[&str], Category)] = &[
    (&["derivative", "differentiate", "slope"], Category::Calculus),
    (&["integrate", "integral", "antiderivative"], Category::Calculus),
    (&["solve", "equation", "find x", "="], Category::Algebra),
    (&["simplify", "expand", "factor"], Category::Algebra),
    (&["limit", "approaches"], Category::Calculus),
    (
        &["area", "perimeter", "circle", "triangle", "square"],
        Category::Geometry,
    ),
    (
        &["volume", "surface area", "sphere", "cylinder", "cube"],
        Category::Geometry,
    ),
];

/// Classifies normalized (trimmed, lowercase) problem text by keywords.
#[must_use]
pub fn detect_category(text: &str) -> Category {
    KEYWORDS
        .iter()
        .find(|(words, _)| words.iter().any(|w| text.contains(w)))
        .map_or(Category::General, |&(_, c)| c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_category() {
        assert_eq!(detect_category("find the slope of the tangent"), Category::Calculus);
        assert_eq!(detect_category("integrate x^2"), Category::Calculus);
        assert_eq!(detect_category("2x = 4"), Category::Algebra);
        assert_eq!(detect_category("factor x^2 - 1"), Category::Algebra);
        assert_eq!(detect_category("limit of 1/x as x approaches 0"), Category::Calculus);
        assert_eq!(detect_category("area of a circle"), Category::Geometry);
        assert_eq!(detect_category("volume of a cube"), Category::Geometry);
        assert_eq!(detect_category("what is 2+2"), Category::General);
    }

    #[test]
    fn test_priority() {
        // "solve" outranks "circle"
        assert_eq!(
            detect_category("solve for r: the circle has area 4"),
            Category::Algebra
        );
        // "surface area" is caught by the earlier "area" group
        assert_eq!(detect_category("surface area of a sphere"), Category::Geometry);
    }

    #[test]
    fn test_hint_parsing() {
        assert_eq!(Category::from_hint("Calculus"), Category::Calculus);
        assert_eq!(Category::from_hint(" geometry "), Category::Geometry);
        assert_eq!(Category::from_hint("statistics"), Category::General);
        assert_eq!(Category::Algebra.to_string(), "algebra");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Category::Calculus).unwrap();
        assert_eq!(json, "\"calculus\"");
        let back: Category = serde_json::from_str("\"geometry\"").unwrap();
        assert_eq!(back, Category::Geometry);
    }
}
