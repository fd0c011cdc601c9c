//! Viewer-supplied input values for the Inputs screen.
//!
//! Values arrive from free-form widgets, so a field may hold a number or an
//! arbitrary string. Numeric coercion is best effort and never fails: a value
//! that cannot be parsed contributes zero to any formula.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw value of a single input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Already-numeric value (e.g., from a slider or number widget).
    Number(f64),
    /// Free text typed by the viewer.
    Text(String),
}

impl FieldValue {
    /// Coerces this value to a number, `parseFloat`-style.
    ///
    /// Numbers pass through unchanged. Strings are trimmed and parsed from
    /// their longest leading numeric prefix, so `"10"` and `"10 kWh"` both
    /// yield `10.0`. Anything unparsable yields `0.0`.
    #[must_use]
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Text(s) => parse_numeric_prefix(s.trim()),
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// One field entry: the typed value plus the unit the viewer picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInput {
    /// Raw field value.
    pub value: FieldValue,
    /// Unit of measure selected for this field (e.g., "$", "kWh").
    pub unit: String,
}

impl FieldInput {
    /// Creates a field entry.
    #[must_use]
    pub fn new(value: FieldValue, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }
}

/// Input values keyed by driver key, then by dense field index.
///
/// Keys are the stable driver identifiers from the catalog. Keys that do not
/// resolve to a known driver still participate in calculation through the
/// sum-of-numeric-fields fallback.
pub type InputTable = BTreeMap<String, BTreeMap<u32, FieldInput>>;

/// Parses the longest leading numeric prefix of a string.
///
/// Mirrors the permissive coercion the input widgets rely on: an optional
/// sign, digits, one decimal point, and an optional exponent. Returns `0.0`
/// when no prefix parses.
fn parse_numeric_prefix(s: &str) -> f64 {
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }

    if !seen_digit {
        return 0.0;
    }

    // Optional exponent, only kept if it is complete.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_passes_through() {
        assert_eq!(FieldValue::Number(42.5).as_number(), 42.5);
        assert_eq!(FieldValue::Number(-3.0).as_number(), -3.0);
    }

    #[test]
    fn test_text_coercion() {
        assert_eq!(FieldValue::Text("10".into()).as_number(), 10.0);
        assert_eq!(FieldValue::Text("  3.5 ".into()).as_number(), 3.5);
        assert_eq!(FieldValue::Text("-2.25".into()).as_number(), -2.25);
        assert_eq!(FieldValue::Text("1e3".into()).as_number(), 1000.0);
    }

    #[test]
    fn test_text_coercion_takes_leading_prefix() {
        assert_eq!(FieldValue::Text("10 kWh".into()).as_number(), 10.0);
        assert_eq!(FieldValue::Text("12.5abc".into()).as_number(), 12.5);
        assert_eq!(FieldValue::Text("1e".into()).as_number(), 1.0);
    }

    #[test]
    fn test_unparsable_text_is_zero() {
        assert_eq!(FieldValue::Text("abc".into()).as_number(), 0.0);
        assert_eq!(FieldValue::Text(String::new()).as_number(), 0.0);
        assert_eq!(FieldValue::Text("$12".into()).as_number(), 0.0);
        assert_eq!(FieldValue::Text(".".into()).as_number(), 0.0);
        assert_eq!(FieldValue::Text("-".into()).as_number(), 0.0);
    }

    #[test]
    fn test_field_value_deserializes_untagged() {
        let n: FieldValue = serde_json::from_str("12.5").unwrap();
        assert_eq!(n, FieldValue::Number(12.5));

        let s: FieldValue = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(s, FieldValue::Text("12.5".into()));
    }
}
