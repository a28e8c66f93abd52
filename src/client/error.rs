//! Client-side error types.

use thiserror::Error;

/// Input rejected by a form before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Title is required")]
    MissingTitle,

    #[error("Please select a future date and time")]
    DueDateNotInFuture,
}

/// A filter name that is not one of `ALL`, `COMPLETED` or `PENDING`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Unknown filter '{0}'. Expected 'ALL', 'COMPLETED' or 'PENDING'")]
    Unknown(String),
}

/// Failure of a remote task operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// A success response body could not be decoded.
    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error(transparent)]
    Form(#[from] FormError),
}

impl ClientError {
    /// Returns the HTTP status for server-reported failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
