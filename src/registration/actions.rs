//! Reactions, commands and results of the registration page.

use form_framework::{FormStatus, FormValue};
use indexmap::IndexMap;
use std::time::Duration;

pub const USERNAME_DEBOUNCE: Duration = Duration::from_millis(300);
pub const PASSWORD_DEBOUNCE: Duration = Duration::from_millis(300);
pub const EMAIL_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationReaction {
    /// Tracks the group status and its message.
    UpdateStatus,
    /// Recomputes the names of the invalid, touched fields.
    RefreshInvalidFields,
    UsernameStatus,
    PasswordStatus,
    EmailStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationCommand {
    Submit,
    TogglePasswordVisibility,
}

/// Results from RegistrationCommands - variants match 1:1 with RegistrationCommand
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationReply {
    /// The submitted registration.
    Submit(FormValue),
    /// Whether the password is now shown.
    TogglePasswordVisibility(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationView {
    pub value: FormValue,
    pub status: FormStatus,
    pub message: String,
    pub invalid_field_names: Vec<String>,
    pub show_password: bool,
    pub field_statuses: IndexMap<String, FormStatus>,
    /// Error kinds per field, for fields that currently fail.
    pub field_errors: IndexMap<String, Vec<String>>,
    /// Error kinds of the cross-field rules.
    pub group_errors: Vec<String>,
}

/// Text shown for each form status.
pub fn status_message(status: FormStatus) -> &'static str {
    match status {
        FormStatus::Valid => "Form complete and valid - ready to submit",
        FormStatus::Invalid => "Some fields have errors - please review",
        FormStatus::Pending => "Validating information...",
        FormStatus::Disabled => "Form disabled",
    }
}
