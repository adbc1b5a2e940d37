//! Areas and volumes of named shapes.
//!
//! Dimensions are read as floats and printed the way a Python float prints,
//! so `5` shows as `5.0`.

use std::f64::consts::PI;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::warn;

use super::HandlerResult;
use crate::error::HandlerError;
use crate::outcome::Outcome;

/// Shown when no plane shape was recognized.
pub const AREA_HINT: &str = "I couldn't identify the geometric shape to calculate the area. \
     Please specify the shape and its dimensions.";

/// Shown when no solid was recognized.
pub const VOLUME_HINT: &str = "I couldn't identify the 3D shape to calculate the volume. \
     Please specify the shape and its dimensions.";

static CIRCLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"area of (a|the) circle with radius ([0-9.]+)")
        .expect("valid pattern")
});
static RECTANGLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"area of (a|the) rectangle with (length|width) ([0-9.]+) and (length|width) ([0-9.]+)")
        .expect("valid pattern")
});
static TRIANGLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"area of (a|the) triangle with base ([0-9.]+) and height ([0-9.]+)")
        .expect("valid pattern")
});

static SPHERE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"volume of (a|the) sphere with radius ([0-9.]+)")
        .expect("valid pattern")
});
static CUBE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"volume of (a|the) cube with side ([0-9.]+)").expect("valid pattern"));
static CYLINDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"volume of (a|the) cylinder with radius ([0-9.]+) and height ([0-9.]+)")
        .expect("valid pattern")
});

/// Area of a circle, rectangle or triangle.
///
/// # Errors
///
/// Returns [`HandlerError::InvalidNumber`] for a dimension such as `.`.
pub fn area(text: &str) -> HandlerResult {
    if let Some(c) = CIRCLE.captures(text) {
        let r = number(&c, 2)?;
        let a = PI * r.powf(2.0);
        return Ok(Outcome::Solved(format!(
            "Area of circle with radius {} = {}²π ≈ {a:.2} square units",
            py_float(r),
            py_float(r)
        )));
    }
    if let Some(c) = RECTANGLE.captures(text) {
        let (d1, d2) = (number(&c, 3)?, number(&c, 5)?);
        return Ok(Outcome::Solved(format!(
            "Area of rectangle with dimensions {} × {} = {} square units",
            py_float(d1),
            py_float(d2),
            py_float(d1 * d2)
        )));
    }
    if let Some(c) = TRIANGLE.captures(text) {
        let (b, h) = (number(&c, 2)?, number(&c, 3)?);
        return Ok(Outcome::Solved(format!(
            "Area of triangle with base {} and height {} = {} square units",
            py_float(b),
            py_float(h),
            py_float(0.5 * b * h)
        )));
    }
    warn!(text, "no plane shape recognized");
    Ok(Outcome::Unrecognized(AREA_HINT.to_string()))
}

/// Volume of a sphere, cube or cylinder.
///
/// # Errors
///
/// Returns [`HandlerError::InvalidNumber`] for a dimension such as `.`.
pub fn volume(text: &str) -> HandlerResult {
    if let Some(c) = SPHERE.captures(text) {
        let r = number(&c, 2)?;
        let v = (4.0 / 3.0) * PI * r.powf(3.0);
        return Ok(Outcome::Solved(format!(
            "Volume of sphere with radius {} = (4/3)π·{}³ ≈ {v:.2} cubic units",
            py_float(r),
            py_float(r)
        )));
    }
    if let Some(c) = CUBE.captures(text) {
        let s = number(&c, 2)?;
        return Ok(Outcome::Solved(format!(
            "Volume of cube with side {} = {} cubic units",
            py_float(s),
            py_float(s.powf(3.0))
        )));
    }
    if let Some(c) = CYLINDER.captures(text) {
        let (r, h) = (number(&c, 2)?, number(&c, 3)?);
        let v = PI * r.powf(2.0) * h;
        return Ok(Outcome::Solved(format!(
            "Volume of cylinder with radius {} and height {} = π·{}²·{} ≈ {v:.2} cubic units",
            py_float(r),
            py_float(h),
            py_float(r),
            py_float(h)
        )));
    }
    warn!(text, "no solid recognized");
    Ok(Outcome::Unrecognized(VOLUME_HINT.to_string()))
}

fn number(caps: &Captures<'_>, group: usize) -> Result<f64, HandlerError> {
    let text = caps.get(group).map_or("", |m| m.as_str());
    text.parse()
        .map_err(|_| HandlerError::InvalidNumber(text.to_string()))
}

/// Formats a float the way Python's `repr` does.
fn py_float(v: f64) -> String {
    if !v.is_finite() {
        return if v.is_nan() {
            "nan".to_string()
        } else if v > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    let magnitude = v.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let s = format!("{v:e}");
        let (mantissa, exponent) = s.split_once('e').unwrap_or((s.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.abs());
    }
    let s = v.to_string();
    if s.contains('.') {
        s
    } else {
        format!("{s}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solved(result: HandlerResult) -> String {
        match result.unwrap() {
            Outcome::Solved(s) => s,
            other => panic!("unsolved: {other:?}"),
        }
    }

    #[test]
    fn test_areas() {
        assert_eq!(
            solved(area("find the area of a circle with radius 5")),
            "Area of circle with radius 5.0 = 5.0²π ≈ 78.54 square units"
        );
        assert_eq!(
            solved(area("area of the rectangle with length 4 and width 2.5")),
            "Area of rectangle with dimensions 4.0 × 2.5 = 10.0 square units"
        );
        assert_eq!(
            solved(area("area of a triangle with base 3 and height 5")),
            "Area of triangle with base 3.0 and height 5.0 = 7.5 square units"
        );
    }

    #[test]
    fn test_volumes() {
        assert_eq!(
            solved(volume("volume of a sphere with radius 3")),
            "Volume of sphere with radius 3.0 = (4/3)π·3.0³ ≈ 113.10 cubic units"
        );
        assert_eq!(
            solved(volume("volume of a cube with side 1.5")),
            "Volume of cube with side 1.5 = 3.375 cubic units"
        );
        assert_eq!(
            solved(volume("volume of a cylinder with radius 2 and height 10")),
            "Volume of cylinder with radius 2.0 and height 10.0 = π·2.0²·10.0 ≈ 125.66 cubic units"
        );
    }

    #[test]
    fn test_unknown_shape() {
        assert_eq!(
            area("area of a square with side 2").unwrap(),
            Outcome::Unrecognized(AREA_HINT.into())
        );
        assert_eq!(
            volume("volume of a cone").unwrap(),
            Outcome::Unrecognized(VOLUME_HINT.into())
        );
    }

    #[test]
    fn test_invalid_number() {
        let err = area("area of a circle with radius .").unwrap_err();
        assert_eq!(err, HandlerError::InvalidNumber(".".into()));
        assert_eq!(
            err.to_string(),
            "could not convert string to float: '.'"
        );
    }

    #[test]
    fn test_py_float() {
        assert_eq!(py_float(5.0), "5.0");
        assert_eq!(py_float(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(py_float(1e16), "1e+16");
        assert_eq!(py_float(0.00001), "1e-05");
        assert_eq!(py_float(0.0), "0.0");
    }
}
