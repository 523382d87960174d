//! [`FormPage`] implementation of the registration form.
//!
//! Besides enforcing the field rules, the page follows the group status: every
//! status notification refreshes the status message and the list of fields
//! the user has touched and still needs to fix.

use super::actions::*;
use super::error::RegistrationError;
use super::validators::{password_match, password_strength};
use crate::prompt::Prompt;
use async_trait::async_trait;
use form_framework::{FormControl, FormEvent, FormGroup, FormPage, FormStatus, Observers, Source, Validator};
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info};

pub const INCOMPLETE_MESSAGE: &str = "Please fill in all fields correctly";
pub const REGISTERED_MESSAGE: &str = "Registration successful!";

pub struct RegistrationPage {
    form: FormGroup,
    status: FormStatus,
    invalid_field_names: Vec<String>,
    show_password: bool,
}

impl Default for RegistrationPage {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationPage {
    pub fn new() -> Self {
        let form = Self::build_form();
        Self {
            status: form.status(),
            form,
            invalid_field_names: Vec::new(),
            show_password: false,
        }
    }

    pub fn build_form() -> FormGroup {
        FormGroup::new()
            .with_control(
                FormControl::new("username", "")
                    .labelled("Username")
                    .with_validators([Validator::Required, Validator::MinLength(4), Validator::MaxLength(20)]),
            )
            .with_control(
                FormControl::new("email", "")
                    .labelled("Email")
                    .with_validators([Validator::Required, Validator::Email]),
            )
            .with_control(
                FormControl::new("password", "")
                    .labelled("Password")
                    .with_validators([Validator::Required, Validator::MinLength(8), password_strength()]),
            )
            .with_control(
                FormControl::new("confirmPassword", "")
                    .labelled("Confirm password")
                    .with_validator(Validator::Required),
            )
            .with_control(
                FormControl::new("age", "")
                    .labelled("Age")
                    .with_validators([Validator::Required, Validator::Integer, Validator::Min(18.0), Validator::Max(120.0)]),
            )
            .with_control(
                FormControl::new("termsAccepted", false)
                    .labelled("Terms and conditions")
                    .with_validator(Validator::RequiredTrue),
            )
            .with_validator(password_match())
    }

    fn refresh_invalid_fields(&mut self) {
        self.invalid_field_names = self.form.invalid_touched_labels();
    }
}

#[async_trait]
impl FormPage for RegistrationPage {
    type Reaction = RegistrationReaction;
    type Command = RegistrationCommand;
    type Reply = RegistrationReply;
    type View = RegistrationView;
    type Context = Arc<dyn Prompt>;
    type Error = RegistrationError;

    fn form(&self) -> &FormGroup {
        &self.form
    }

    fn form_mut(&mut self) -> &mut FormGroup {
        &mut self.form
    }

    fn observe(&self, observers: &mut Observers<RegistrationReaction>) {
        observers.on(Source::GroupStatus, RegistrationReaction::UpdateStatus);
        observers.on_debounced(
            Source::field_status("username"),
            USERNAME_DEBOUNCE,
            RegistrationReaction::UsernameStatus,
        );
        observers.on_debounced(
            Source::field_status("password"),
            PASSWORD_DEBOUNCE,
            RegistrationReaction::PasswordStatus,
        );
        observers.on_debounced(Source::field_status("email"), EMAIL_DEBOUNCE, RegistrationReaction::EmailStatus);
        observers.on(Source::GroupStatus, RegistrationReaction::RefreshInvalidFields);
    }

    fn view(&self) -> RegistrationView {
        let field_errors = self
            .form
            .controls()
            .filter(|control| !control.errors().is_empty())
            .map(|control| {
                let kinds: Vec<String> = control.errors().kinds().map(str::to_string).collect();
                (control.name().to_string(), kinds)
            })
            .collect::<IndexMap<_, _>>();

        RegistrationView {
            value: self.form.value(),
            status: self.status,
            message: status_message(self.status).to_string(),
            invalid_field_names: self.invalid_field_names.clone(),
            show_password: self.show_password,
            field_statuses: self
                .form
                .controls()
                .map(|control| (control.name().to_string(), control.status()))
                .collect(),
            field_errors,
            group_errors: self.form.errors().kinds().map(str::to_string).collect(),
        }
    }

    async fn react(
        &mut self,
        reaction: RegistrationReaction,
        event: &FormEvent,
        _prompt: &Arc<dyn Prompt>,
    ) -> Result<(), RegistrationError> {
        let status = event.status().unwrap_or(self.status);
        match reaction {
            RegistrationReaction::UpdateStatus => {
                self.status = status;
                info!(%status, "Form status");
            }
            RegistrationReaction::RefreshInvalidFields => self.refresh_invalid_fields(),
            RegistrationReaction::UsernameStatus => {
                debug!(%status, "Username status");
                if status.is_valid() {
                    debug!("Username valid");
                }
            }
            RegistrationReaction::PasswordStatus => {
                debug!(%status, "Password status");
                if status.is_invalid() {
                    debug!("Password does not meet the requirements");
                }
            }
            RegistrationReaction::EmailStatus => {
                if status.is_valid() {
                    debug!("Email valid, ready for an availability check");
                }
            }
        }
        Ok(())
    }

    async fn handle_command(
        &mut self,
        command: RegistrationCommand,
        prompt: &Arc<dyn Prompt>,
    ) -> Result<RegistrationReply, RegistrationError> {
        match command {
            RegistrationCommand::Submit => {
                if !self.form.is_valid() {
                    self.form.mark_all_touched();
                    self.refresh_invalid_fields();
                    prompt.alert(INCOMPLETE_MESSAGE);
                    return Err(RegistrationError::Incomplete {
                        invalid_fields: self.invalid_field_names.clone(),
                    });
                }
                let value = self.form.value();
                info!(username = %value.text("username"), "Registration submitted");
                prompt.alert(REGISTERED_MESSAGE);
                self.form.reset();
                Ok(RegistrationReply::Submit(value))
            }
            RegistrationCommand::TogglePasswordVisibility => {
                self.show_password = !self.show_password;
                Ok(RegistrationReply::TogglePasswordVisibility(self.show_password))
            }
        }
    }
}
