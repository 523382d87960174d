//! Error types for the product store.

use thiserror::Error;

/// A failed round-trip, described by a single readable message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    /// The request never produced an HTTP response (connection refused, timeout, …).
    #[error("Error: {message}")]
    Client { message: String },

    /// The backend answered with a non-success status.
    #[error("Error code: {status}\nMessage: {message}")]
    Server { status: u16, message: String },
}

impl TransportError {
    pub fn client(message: impl Into<String>) -> Self {
        TransportError::Client {
            message: message.into(),
        }
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        TransportError::Server {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Client { .. } => None,
            TransportError::Server { status, .. } => Some(*status),
        }
    }
}

/// Errors that can occur during product store operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The requested product does not exist.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The backend answered with a body that is not the expected envelope.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Every attempt of a retried read failed; carries the last failure.
    #[error("{last} (after {attempts} attempts)")]
    RetriesExhausted { attempts: u32, last: Box<StoreError> },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_distinguish_origin() {
        let client = TransportError::client("connection refused");
        assert_eq!(client.to_string(), "Error: connection refused");

        let server = TransportError::server(500, "Internal Server Error");
        assert_eq!(server.to_string(), "Error code: 500\nMessage: Internal Server Error");
        assert_eq!(server.status(), Some(500));
    }

    #[test]
    fn test_exhausted_keeps_last_failure() {
        let err = StoreError::RetriesExhausted {
            attempts: 3,
            last: Box::new(TransportError::client("timed out").into()),
        };
        assert_eq!(err.to_string(), "Error: timed out (after 3 attempts)");
    }
}
