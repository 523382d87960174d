//! # Form Controls
//!
//! A [`FormControl`] is one named input: its value, its validators, the errors those
//! validators report and the derived [`FormStatus`]. Controls are owned by a
//! [`FormGroup`](crate::group::FormGroup), which is the only place that mutates them.

use crate::status::{FormStatus, StatusEvent};
use crate::validator::{ValidationErrors, Validator};
use crate::value::FieldValue;

#[derive(Debug, Clone)]
pub struct FormControl {
    name: String,
    label: String,
    value: FieldValue,
    default: FieldValue,
    validators: Vec<Validator>,
    errors: ValidationErrors,
    status: FormStatus,
    touched: bool,
    dirty: bool,
}

impl FormControl {
    /// Creates a control holding `default` and validates it immediately.
    pub fn new(name: impl Into<String>, default: impl Into<FieldValue>) -> Self {
        let name = name.into();
        let default = default.into();
        let mut control = Self {
            label: name.clone(),
            name,
            value: default.clone(),
            default,
            validators: Vec::new(),
            errors: ValidationErrors::new(),
            status: FormStatus::Valid,
            touched: false,
            dirty: false,
        };
        control.validate();
        control
    }

    /// Display name used in user-facing messages.
    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self.validate();
        self
    }

    pub fn with_validators(mut self, validators: impl IntoIterator<Item = Validator>) -> Self {
        self.validators.extend(validators);
        self.validate();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn has_error(&self, kind: &str) -> bool {
        self.errors.contains(kind)
    }

    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }

    pub fn is_invalid(&self) -> bool {
        self.status.is_invalid()
    }

    pub fn is_enabled(&self) -> bool {
        !self.status.is_disabled()
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn set_value(&mut self, value: FieldValue) {
        self.value = value;
        self.dirty = true;
        self.validate();
    }

    /// Writes a value without marking the control dirty (programmatic patch).
    pub(crate) fn patch_value(&mut self, value: FieldValue) {
        self.value = value;
        self.validate();
    }

    pub(crate) fn reset(&mut self) {
        self.value = self.default.clone();
        self.touched = false;
        self.dirty = false;
        self.validate();
    }

    pub(crate) fn mark_touched(&mut self) {
        self.touched = true;
    }

    pub(crate) fn disable(&mut self) {
        self.status = self.status.next(StatusEvent::Disabled);
    }

    pub(crate) fn enable(&mut self) {
        let has_errors = self.run_validators();
        self.status = self.status.next(StatusEvent::Enabled { has_errors });
    }

    pub(crate) fn mark_pending(&mut self) {
        self.status = self.status.next(StatusEvent::ValidationStarted);
    }

    /// Completes a pending validation, merging its errors into the control.
    pub(crate) fn settle(&mut self, errors: ValidationErrors) {
        if !self.status.is_pending() {
            return;
        }
        for kind in errors.kinds() {
            let message = errors.message(kind).unwrap_or_default().to_string();
            self.errors.insert(crate::validator::ValidationError::new(kind, message));
        }
        let has_errors = !self.errors.is_empty();
        self.status = self.status.next(StatusEvent::ValidationSettled { has_errors });
    }

    fn validate(&mut self) {
        let has_errors = self.run_validators();
        self.status = self.status.next(StatusEvent::Validated { has_errors });
    }

    fn run_validators(&mut self) -> bool {
        self.errors = self
            .validators
            .iter()
            .filter_map(|validator| validator.validate(&self.value))
            .collect();
        !self.errors.is_empty()
    }
}
