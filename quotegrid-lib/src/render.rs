//! Cell formatting and style classification
//!
//! A [`RenderPolicy`] turns a raw cell value into display text plus a
//! [`StyleClass`]. Formatting is total: any value, including null and
//! non-numeric input, produces a cell.

use serde::Deserialize;
use serde::Serialize;

use crate::model::Value;
use crate::model::format_float;

/// Placeholder text for null cells.
pub const NULL_PLACEHOLDER: &str = "";

/// Formatting rule declared per column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderPolicy {
    /// Plain string form, neutral style.
    #[default]
    None,
    /// Signed percentage: `+2.35%`, `-1.2%`, `0%`.
    SignedPercent,
    /// Signed delta: `+0.12`, `-0.4`, `0`.
    SignedDelta,
}

/// Style classification of a formatted cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleClass {
    /// Gain.
    Positive,
    /// Loss.
    Negative,
    /// Unchanged, null or not classified.
    #[default]
    Neutral,
}

/// A formatted cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// Display text.
    pub text: String,
    /// Style classification.
    pub style: StyleClass,
}

impl Cell {
    /// Creates a neutral cell.
    pub fn neutral(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: StyleClass::Neutral,
        }
    }

    /// Creates an empty neutral cell.
    pub fn placeholder() -> Self {
        Self::neutral(NULL_PLACEHOLDER)
    }
}

impl RenderPolicy {
    /// Formats a value under this policy.
    ///
    /// # Example
    ///
    /// ```
    /// use quotegrid_lib::model::Value;
    /// use quotegrid_lib::render::{RenderPolicy, StyleClass};
    ///
    /// let cell = RenderPolicy::SignedPercent.format(&Value::from(2.35));
    /// assert_eq!(cell.text, "+2.35%");
    /// assert_eq!(cell.style, StyleClass::Positive);
    /// ```
    pub fn format(self, value: &Value) -> Cell {
        match self {
            RenderPolicy::None => Cell::neutral(value.to_string()),
            RenderPolicy::SignedPercent => signed(value, "%"),
            RenderPolicy::SignedDelta => signed(value, ""),
        }
    }

    /// Returns `true` if this policy classifies values by sign.
    pub fn is_signed(self) -> bool {
        !matches!(self, RenderPolicy::None)
    }
}

fn signed(value: &Value, suffix: &str) -> Cell {
    if value.is_null() {
        return Cell::placeholder();
    }

    // Numeric strings keep their original spelling; only the sign is read.
    let Some(n) = value.as_f64() else {
        return Cell::neutral(value.to_string());
    };
    let body = match value {
        Value::String(s) => s.trim().trim_start_matches('+').to_string(),
        Value::Float(f) => format_float(*f),
        _ => value.to_string(),
    };

    if n > 0.0 {
        Cell {
            text: format!("+{}{}", body, suffix),
            style: StyleClass::Positive,
        }
    } else if n < 0.0 {
        Cell {
            text: format!("{}{}", body, suffix),
            style: StyleClass::Negative,
        }
    } else {
        Cell::neutral(format!("0{}", suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_percent() {
        let p = RenderPolicy::SignedPercent;
        assert_eq!(
            p.format(&Value::from(2.35)),
            Cell {
                text: "+2.35%".into(),
                style: StyleClass::Positive
            }
        );
        assert_eq!(
            p.format(&Value::from(-1.2)),
            Cell {
                text: "-1.2%".into(),
                style: StyleClass::Negative
            }
        );
        assert_eq!(p.format(&Value::Integer(0)), Cell::neutral("0%"));
        assert_eq!(p.format(&Value::Float(0.0)), Cell::neutral("0%"));
        assert_eq!(p.format(&Value::Null), Cell::neutral(""));
    }

    #[test]
    fn test_signed_delta() {
        let p = RenderPolicy::SignedDelta;
        assert_eq!(p.format(&Value::from(0.12)).text, "+0.12");
        assert_eq!(p.format(&Value::Integer(-3)).text, "-3");
        assert_eq!(p.format(&Value::Integer(-3)).style, StyleClass::Negative);
        assert_eq!(p.format(&Value::Float(-0.0)), Cell::neutral("0"));
    }

    #[test]
    fn test_signed_tolerates_strings() {
        let p = RenderPolicy::SignedPercent;
        assert_eq!(p.format(&Value::from("1.50")).text, "+1.50%");
        assert_eq!(p.format(&Value::from("-0.3")).style, StyleClass::Negative);
        assert_eq!(p.format(&Value::from("-")), Cell::neutral("-"));
    }

    #[test]
    fn test_none_policy_is_always_neutral() {
        let p = RenderPolicy::None;
        assert_eq!(p.format(&Value::from(-5.5)), Cell::neutral("-5.5"));
        assert_eq!(p.format(&Value::from("PingAn")), Cell::neutral("PingAn"));
        assert_eq!(p.format(&Value::Null), Cell::placeholder());
    }
}
