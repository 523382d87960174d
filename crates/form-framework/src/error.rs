//! # Framework Errors
//!
//! Errors raised by the form engine and the page runtime. Page-specific errors
//! travel through the runtime boxed inside [`FormError::PageError`].

/// Errors that can occur within the form framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Page closed")]
    PageClosed,
    #[error("Page dropped response channel")]
    PageDropped,
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Page error: {0}")]
    PageError(Box<dyn std::error::Error + Send + Sync>),
}

impl FormError {
    /// Recovers a page error of type `E`, or hands the error back unchanged.
    pub fn downcast<E>(self) -> Result<E, FormError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            FormError::PageError(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(FormError::PageError),
            other => Err(other),
        }
    }
}
