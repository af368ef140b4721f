//! Error types for the auth crate.

use thiserror::Error;

/// Errors that can occur in session operations.
///
/// A credential mismatch is not an error; see
/// [`SignInOutcome::Rejected`](crate::SignInOutcome::Rejected).
#[derive(Debug, Error)]
pub enum AuthError {
    /// A sign-in field was left empty.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// Two directory entries share an id or contact address.
    #[error("duplicate identity: {0}")]
    DuplicateIdentity(String),

    /// The persisted session record could not be used.
    #[error("corrupt session record: {0}")]
    CorruptRecord(String),

    /// The storage backend failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;
