//! Error types for the inventory page.

use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    /// Save was attempted while some field is invalid.
    #[error("Please fill in all fields correctly")]
    InvalidForm,

    /// The remote store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A field pattern failed to compile.
    #[error("Invalid field pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Page communication error: {0}")]
    PageCommunication(String),
}

impl From<String> for InventoryError {
    fn from(msg: String) -> Self {
        InventoryError::PageCommunication(msg)
    }
}
