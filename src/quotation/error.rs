//! Error types for the quotation page.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum QuoteError {
    /// Submit was attempted while some field is invalid.
    #[error("Please fill in all fields correctly")]
    InvalidForm,

    /// An error occurred while communicating with the page.
    #[error("Page communication error: {0}")]
    PageCommunication(String),
}

impl From<String> for QuoteError {
    fn from(msg: String) -> Self {
        QuoteError::PageCommunication(msg)
    }
}
