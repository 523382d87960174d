//! # Validators
//!
//! Field-level rules ([`Validator`]) and group-level rules ([`GroupValidator`]).
//!
//! Every built-in rule except [`Validator::Required`] and [`Validator::RequiredTrue`]
//! passes on an empty value, so "is it there?" and "is it well formed?" are
//! reported separately.

use crate::value::{FieldValue, FormValue};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use std::sync::{Arc, LazyLock};

/// One failed rule: a stable `kind` (e.g. `"minlength"`) and a readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// All failures of one control or group, keyed by kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, error: ValidationError) {
        self.0.insert(error.kind, error.message);
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.0.contains_key(kind)
    }

    pub fn message(&self, kind: &str) -> Option<&str> {
        self.0.get(kind).map(String::as_str)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        let mut errors = ValidationErrors::new();
        for error in iter {
            errors.insert(error);
        }
        errors
    }
}

type FieldRule = dyn Fn(&FieldValue) -> Option<ValidationError> + Send + Sync;
type GroupRule = dyn Fn(&FormValue) -> Option<ValidationError> + Send + Sync;

// Local part and domain labels as accepted by common web form engines.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is a valid regex")
});

/// A rule applied to a single field.
#[derive(Clone)]
pub enum Validator {
    Required,
    /// The value must be the boolean `true`.
    RequiredTrue,
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    Integer,
    Email,
    Pattern(Regex),
    Custom { kind: String, rule: Arc<FieldRule> },
}

impl Validator {
    /// Builds a [`Validator::Pattern`]. The pattern is used as written, so anchor
    /// it with `^...$` to match the whole value.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Validator::Pattern(Regex::new(pattern)?))
    }

    /// A rule that fails with `kind` whenever `passes` returns `false`.
    pub fn custom(
        kind: impl Into<String>,
        message: impl Into<String>,
        passes: impl Fn(&FieldValue) -> bool + Send + Sync + 'static,
    ) -> Self {
        let kind = kind.into();
        let message = message.into();
        let error_kind = kind.clone();
        Validator::Custom {
            kind,
            rule: Arc::new(move |value| {
                if passes(value) {
                    None
                } else {
                    Some(ValidationError::new(error_kind.clone(), message.clone()))
                }
            }),
        }
    }

    pub fn validate(&self, value: &FieldValue) -> Option<ValidationError> {
        match self {
            Validator::Required => value
                .is_empty()
                .then(|| ValidationError::new("required", "This field is required")),
            Validator::RequiredTrue => (value.as_bool() != Some(true))
                .then(|| ValidationError::new("requiredtrue", "This field must be accepted")),
            Validator::MinLength(min) => {
                let len = value.char_len();
                (!value.is_empty() && len < *min).then(|| {
                    ValidationError::new("minlength", format!("Must be at least {} characters (got {})", min, len))
                })
            }
            Validator::MaxLength(max) => {
                let len = value.char_len();
                (!value.is_empty() && len > *max).then(|| {
                    ValidationError::new("maxlength", format!("Must be at most {} characters (got {})", max, len))
                })
            }
            Validator::Min(min) => match value.as_number() {
                Some(n) if !value.is_empty() && n < *min => {
                    Some(ValidationError::new("min", format!("Must be at least {}", min)))
                }
                _ => None,
            },
            Validator::Max(max) => match value.as_number() {
                Some(n) if !value.is_empty() && n > *max => {
                    Some(ValidationError::new("max", format!("Must be at most {}", max)))
                }
                _ => None,
            },
            Validator::Integer => {
                if value.is_empty() {
                    return None;
                }
                let whole = match value {
                    FieldValue::Number(n) => n.is_finite() && n.fract() == 0.0,
                    FieldValue::Text(text) => text.trim().parse::<i64>().is_ok(),
                    _ => false,
                };
                (!whole).then(|| ValidationError::new("integer", "Must be a whole number"))
            }
            Validator::Email => {
                if value.is_empty() {
                    return None;
                }
                let text = value.to_text();
                let well_formed = text.len() <= 254
                    && text.split_once('@').is_some_and(|(local, _)| local.len() <= 64)
                    && EMAIL.is_match(&text);
                (!well_formed).then(|| ValidationError::new("email", "Must be a valid email address"))
            }
            Validator::Pattern(regex) => {
                if value.is_empty() {
                    return None;
                }
                (!regex.is_match(&value.to_text()))
                    .then(|| ValidationError::new("pattern", format!("Must match {}", regex.as_str())))
            }
            Validator::Custom { rule, .. } => rule(value),
        }
    }
}

impl Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Required => f.write_str("Required"),
            Validator::RequiredTrue => f.write_str("RequiredTrue"),
            Validator::MinLength(n) => write!(f, "MinLength({})", n),
            Validator::MaxLength(n) => write!(f, "MaxLength({})", n),
            Validator::Min(n) => write!(f, "Min({})", n),
            Validator::Max(n) => write!(f, "Max({})", n),
            Validator::Integer => f.write_str("Integer"),
            Validator::Email => f.write_str("Email"),
            Validator::Pattern(regex) => write!(f, "Pattern({})", regex.as_str()),
            Validator::Custom { kind, .. } => write!(f, "Custom({})", kind),
        }
    }
}

/// A cross-field rule evaluated over the whole group value.
#[derive(Clone)]
pub struct GroupValidator {
    kind: String,
    rule: Arc<GroupRule>,
}

impl GroupValidator {
    pub fn new(
        kind: impl Into<String>,
        rule: impl Fn(&FormValue) -> Option<ValidationError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind: kind.into(),
            rule: Arc::new(rule),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn validate(&self, value: &FormValue) -> Option<ValidationError> {
        (self.rule)(value)
    }
}

impl Debug for GroupValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupValidator({})", self.kind)
    }
}
