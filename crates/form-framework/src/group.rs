//! # Form Groups
//!
//! A [`FormGroup`] is an ordered set of [`FormControl`]s plus cross-field
//! [`GroupValidator`]s. Every mutation revalidates the group and queues
//! [`FormEvent`]s in an internal outbox; the page runtime drains the outbox
//! with [`FormGroup::take_events`] and dispatches the events to observers.
//!
//! ## Notification order
//!
//! For a single `set_value` the outbox receives, in order:
//!
//! 1. `FieldValue` for the control
//! 2. `FieldStatus` for the control
//! 3. `GroupValue`
//! 4. `GroupStatus`
//!
//! Status notifications are queued on every revalidation, even when the status
//! is unchanged. Touching a control queues nothing.

use crate::control::FormControl;
use crate::error::FormError;
use crate::status::FormStatus;
use crate::validator::{GroupValidator, ValidationErrors};
use crate::value::{FieldValue, FormValue};
use indexmap::IndexMap;

/// Where a notification comes from. Observers subscribe to a `Source`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    GroupValue,
    GroupStatus,
    FieldValue(String),
    FieldStatus(String),
}

impl Source {
    pub fn field_value(field: impl Into<String>) -> Self {
        Source::FieldValue(field.into())
    }

    pub fn field_status(field: impl Into<String>) -> Self {
        Source::FieldStatus(field.into())
    }
}

/// A change notification produced by a [`FormGroup`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    FieldValue { field: String, value: FieldValue },
    FieldStatus { field: String, status: FormStatus },
    GroupValue(FormValue),
    GroupStatus(FormStatus),
}

impl FormEvent {
    pub fn source(&self) -> Source {
        match self {
            FormEvent::FieldValue { field, .. } => Source::FieldValue(field.clone()),
            FormEvent::FieldStatus { field, .. } => Source::FieldStatus(field.clone()),
            FormEvent::GroupValue(_) => Source::GroupValue,
            FormEvent::GroupStatus(_) => Source::GroupStatus,
        }
    }

    /// The status carried by a status notification.
    pub fn status(&self) -> Option<FormStatus> {
        match self {
            FormEvent::FieldStatus { status, .. } | FormEvent::GroupStatus(status) => Some(*status),
            _ => None,
        }
    }

    pub fn field_value(&self) -> Option<&FieldValue> {
        match self {
            FormEvent::FieldValue { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn group_value(&self) -> Option<&FormValue> {
        match self {
            FormEvent::GroupValue(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormGroup {
    controls: IndexMap<String, FormControl>,
    validators: Vec<GroupValidator>,
    errors: ValidationErrors,
    status: FormStatus,
    outbox: Vec<FormEvent>,
}

impl FormGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a control. Building a group queues no notifications.
    pub fn with_control(mut self, control: FormControl) -> Self {
        self.controls.insert(control.name().to_string(), control);
        self.revalidate();
        self
    }

    pub fn with_validator(mut self, validator: GroupValidator) -> Self {
        self.validators.push(validator);
        self.revalidate();
        self
    }

    pub fn get(&self, field: &str) -> Option<&FormControl> {
        self.controls.get(field)
    }

    pub fn controls(&self) -> impl Iterator<Item = &FormControl> {
        self.controls.values()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }

    /// Group-level errors only; field errors live on each control.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn has_error(&self, kind: &str) -> bool {
        self.errors.contains(kind)
    }

    /// Values of the enabled controls.
    pub fn value(&self) -> FormValue {
        self.controls
            .values()
            .filter(|control| control.is_enabled())
            .map(|control| (control.name().to_string(), control.value().clone()))
            .collect()
    }

    /// Values of every control, disabled ones included.
    pub fn raw_value(&self) -> FormValue {
        self.controls
            .values()
            .map(|control| (control.name().to_string(), control.value().clone()))
            .collect()
    }

    /// Labels of the controls that are invalid and have been touched.
    pub fn invalid_touched_labels(&self) -> Vec<String> {
        self.controls
            .values()
            .filter(|control| control.is_invalid() && control.is_touched())
            .map(|control| control.label().to_string())
            .collect()
    }

    /// Names of every invalid control, touched or not.
    pub fn invalid_fields(&self) -> Vec<String> {
        self.controls
            .values()
            .filter(|control| control.is_invalid())
            .map(|control| control.name().to_string())
            .collect()
    }

    /// User input on one field.
    pub fn set_value(&mut self, field: &str, value: FieldValue) -> Result<(), FormError> {
        let control = self.control_mut(field)?;
        control.set_value(value);
        self.queue_control(field);
        self.revalidate_and_queue();
        Ok(())
    }

    /// Programmatic write of several fields. Unknown fields are ignored.
    pub fn patch_value<K, V>(&mut self, values: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut touched_any = false;
        for (field, value) in values {
            let field = field.into();
            if let Some(control) = self.controls.get_mut(&field) {
                control.patch_value(value.into());
                self.queue_control(&field);
                touched_any = true;
            }
        }
        if touched_any {
            self.revalidate_and_queue();
        }
    }

    /// Restores every control to its default, untouched and pristine.
    pub fn reset(&mut self) {
        let names: Vec<String> = self.controls.keys().cloned().collect();
        for name in &names {
            if let Some(control) = self.controls.get_mut(name) {
                control.reset();
            }
            self.queue_control(name);
        }
        self.revalidate_and_queue();
    }

    pub fn mark_touched(&mut self, field: &str) -> Result<(), FormError> {
        self.control_mut(field)?.mark_touched();
        Ok(())
    }

    pub fn mark_all_touched(&mut self) {
        for control in self.controls.values_mut() {
            control.mark_touched();
        }
    }

    pub fn disable(&mut self, field: &str) -> Result<(), FormError> {
        self.control_mut(field)?.disable();
        self.queue_control(field);
        self.revalidate_and_queue();
        Ok(())
    }

    pub fn enable(&mut self, field: &str) -> Result<(), FormError> {
        self.control_mut(field)?.enable();
        self.queue_control(field);
        self.revalidate_and_queue();
        Ok(())
    }

    /// Puts a field into `PENDING` while an out-of-band check runs.
    pub fn mark_pending(&mut self, field: &str) -> Result<(), FormError> {
        self.control_mut(field)?.mark_pending();
        self.queue_status(field);
        self.revalidate_and_queue();
        Ok(())
    }

    /// Resolves a pending field with the errors found by the out-of-band check.
    pub fn settle(&mut self, field: &str, errors: ValidationErrors) -> Result<(), FormError> {
        self.control_mut(field)?.settle(errors);
        self.queue_status(field);
        self.revalidate_and_queue();
        Ok(())
    }

    /// Drains the queued notifications.
    pub fn take_events(&mut self) -> Vec<FormEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub fn has_events(&self) -> bool {
        !self.outbox.is_empty()
    }

    fn control_mut(&mut self, field: &str) -> Result<&mut FormControl, FormError> {
        self.controls
            .get_mut(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))
    }

    fn queue_control(&mut self, field: &str) {
        if let Some(control) = self.controls.get(field) {
            self.outbox.push(FormEvent::FieldValue {
                field: field.to_string(),
                value: control.value().clone(),
            });
        }
        self.queue_status(field);
    }

    fn queue_status(&mut self, field: &str) {
        if let Some(control) = self.controls.get(field) {
            self.outbox.push(FormEvent::FieldStatus {
                field: field.to_string(),
                status: control.status(),
            });
        }
    }

    fn revalidate(&mut self) {
        let value = self.value();
        self.errors = self
            .validators
            .iter()
            .filter_map(|validator| validator.validate(&value))
            .collect();
        self.status = FormStatus::aggregate(
            !self.errors.is_empty(),
            self.controls.values().map(FormControl::status),
        );
    }

    fn revalidate_and_queue(&mut self) {
        self.revalidate();
        self.outbox.push(FormEvent::GroupValue(self.value()));
        self.outbox.push(FormEvent::GroupStatus(self.status));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{ValidationError, Validator};

    fn login_form() -> FormGroup {
        FormGroup::new()
            .with_control(
                FormControl::new("username", "")
                    .labelled("Username")
                    .with_validators([Validator::Required, Validator::MinLength(4)]),
            )
            .with_control(FormControl::new("password", ""))
            .with_control(FormControl::new("confirm", ""))
            .with_validator(GroupValidator::new("mismatch", |value| {
                (value.get("password") != value.get("confirm"))
                    .then(|| ValidationError::new("mismatch", "Passwords differ"))
            }))
    }

    #[test]
    fn test_building_queues_nothing() {
        let form = login_form();
        assert!(!form.has_events());
        assert_eq!(form.status(), FormStatus::Invalid);
    }

    #[test]
    fn test_set_value_queues_field_then_group_events() {
        let mut form = login_form();
        form.set_value("username", "abcd".into()).unwrap();

        let events = form.take_events();
        let sources: Vec<Source> = events.iter().map(FormEvent::source).collect();
        assert_eq!(
            sources,
            vec![
                Source::field_value("username"),
                Source::field_status("username"),
                Source::GroupValue,
                Source::GroupStatus,
            ]
        );
        assert_eq!(events[1].status(), Some(FormStatus::Valid));
        assert_eq!(events[3].status(), Some(FormStatus::Valid));
        assert!(!form.has_events());
    }

    #[test]
    fn test_group_validator_controls_group_status() {
        let mut form = login_form();
        form.set_value("username", "abcd".into()).unwrap();
        form.set_value("password", "secret".into()).unwrap();
        assert!(form.has_error("mismatch"));
        assert_eq!(form.status(), FormStatus::Invalid);
        // The confirmation field itself stays valid; only the group fails.
        assert!(form.get("confirm").unwrap().is_valid());

        form.set_value("confirm", "secret".into()).unwrap();
        assert!(form.is_valid());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut form = login_form();
        let err = form.set_value("nickname", "x".into()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown field: nickname");
        assert!(form.mark_touched("nickname").is_err());
    }

    #[test]
    fn test_patch_value_emits_one_group_notification() {
        let mut form = login_form();
        form.patch_value([("username", "abcd"), ("password", "x"), ("ignored", "y")]);
        let events = form.take_events();
        let group_events = events
            .iter()
            .filter(|e| matches!(e, FormEvent::GroupValue(_) | FormEvent::GroupStatus(_)))
            .count();
        assert_eq!(group_events, 2);
        assert_eq!(events.len(), 6);
        assert!(!form.get("username").unwrap().is_dirty());
    }

    #[test]
    fn test_touched_labels_and_reset() {
        let mut form = login_form();
        assert!(form.invalid_touched_labels().is_empty());
        form.mark_all_touched();
        assert_eq!(form.invalid_touched_labels(), vec!["Username".to_string()]);
        assert_eq!(form.invalid_fields(), vec!["username".to_string()]);

        form.set_value("username", "abcd".into()).unwrap();
        form.reset();
        assert_eq!(form.get("username").unwrap().value(), &FieldValue::from(""));
        assert!(form.invalid_touched_labels().is_empty());
    }

    #[test]
    fn test_disabled_fields_leave_the_group_value() {
        let mut form = login_form();
        form.disable("username").unwrap();
        assert!(!form.value().contains("username"));
        assert!(form.raw_value().contains("username"));
        assert!(form.is_valid());

        form.enable("username").unwrap();
        assert_eq!(form.status(), FormStatus::Invalid);
    }

    #[test]
    fn test_pending_field_holds_group_in_pending() {
        let mut form = login_form();
        form.set_value("username", "abcd".into()).unwrap();
        form.mark_pending("username").unwrap();
        assert_eq!(form.status(), FormStatus::Pending);

        form.settle("username", ValidationErrors::new()).unwrap();
        assert_eq!(form.status(), FormStatus::Valid);
    }
}
