//! Error types for the registration page.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistrationError {
    /// Submit was attempted before every field passed.
    #[error("Please fill in all fields correctly (invalid: {})", .invalid_fields.join(", "))]
    Incomplete { invalid_fields: Vec<String> },

    #[error("Page communication error: {0}")]
    PageCommunication(String),
}

impl From<String> for RegistrationError {
    fn from(msg: String) -> Self {
        RegistrationError::PageCommunication(msg)
    }
}
