//! Error types for the sign-in client.

use thiserror::Error;

/// Result type for sign-in operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Sign-in client errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Configuration error (missing project id, bad endpoint). Raised before
    /// any network call is attempted.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The identity service rejected or could not process a call. The
    /// message is user-displayable and is also mirrored onto the in-flight
    /// [`AuthState`](crate::AuthState)'s `error` field.
    #[error("{0}")]
    Remote(String),

    /// An operation was invoked in a state that does not support it. The
    /// state machine rejects the call and stays where it was.
    #[error("`{operation}` is not valid while {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },
}
