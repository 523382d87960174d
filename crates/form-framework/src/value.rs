//! # Field Values
//!
//! A form field holds one [`FieldValue`]: nothing, a boolean, a number or text.
//! Inputs coming from a UI are usually text, so numeric reads go through
//! [`parse_float`] / [`parse_int`], which accept the leading number of a string
//! and ignore whatever trails it (`"12kg"` reads as `12`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// The raw value of a single form field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// `true` for `Null` and for empty text. Numbers and booleans are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Bool(_) | FieldValue::Number(_) => false,
        }
    }

    /// Numeric reading of the value, `None` when nothing numeric can be read.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if !n.is_nan() => Some(*n),
            FieldValue::Text(text) => parse_float(text),
            _ => None,
        }
    }

    /// Integer reading of the value using the leading-integer rule.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            FieldValue::Text(text) => parse_int(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Text form of the value; `Null` renders as an empty string.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Number of characters, as counted by length validators.
    pub fn char_len(&self) -> usize {
        match self {
            FieldValue::Null => 0,
            other => other.to_string().chars().count(),
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

static NULL: FieldValue = FieldValue::Null;

/// Snapshot of a group's values, in field order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValue(IndexMap<String, FieldValue>);

impl FormValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.0.insert(field.into(), value);
    }

    /// Value of `field`, or `Null` when the field is absent.
    pub fn get(&self, field: &str) -> &FieldValue {
        self.0.get(field).unwrap_or(&NULL)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn text(&self, field: &str) -> String {
        self.get(field).to_text()
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).as_number()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Reads the leading decimal number of `input`.
///
/// Leading whitespace is skipped, an optional sign, digits, an optional
/// fraction and an optional exponent are accepted; anything after that is
/// ignored. Returns `None` when no digit is found.
pub fn parse_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Reads the leading integer of `input` (`"12.7"` reads as `12`).
pub fn parse_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_reads_leading_number() {
        assert_eq!(parse_float("12.50"), Some(12.5));
        assert_eq!(parse_float("  7kg"), Some(7.0));
        assert_eq!(parse_float(".5"), Some(0.5));
        assert_eq!(parse_float("-3"), Some(-3.0));
        assert_eq!(parse_float("1e3x"), Some(1000.0));
        assert_eq!(parse_float("2e"), Some(2.0));
        assert_eq!(parse_float("abc"), None);
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("-."), None);
    }

    #[test]
    fn test_parse_int_truncates_fraction() {
        assert_eq!(parse_int("12.7"), Some(12));
        assert_eq!(parse_int("40 units"), Some(40));
        assert_eq!(parse_int("x40"), None);
    }

    #[test]
    fn test_field_value_emptiness_and_numbers() {
        assert!(FieldValue::Null.is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(!FieldValue::from(0.0).is_empty());
        assert!(!FieldValue::from(false).is_empty());

        assert_eq!(FieldValue::from("100").as_number(), Some(100.0));
        assert_eq!(FieldValue::from(3.0).to_text(), "3");
        assert_eq!(FieldValue::from(true).as_number(), None);
        assert_eq!(FieldValue::Null.to_text(), "");
    }

    #[test]
    fn test_form_value_missing_field_reads_null() {
        let value: FormValue = [("quantity", FieldValue::from(3.0))].into_iter().collect();
        assert_eq!(value.number("quantity"), Some(3.0));
        assert_eq!(value.get("unitPrice"), &FieldValue::Null);
        assert_eq!(value.text("unitPrice"), "");
    }
}
