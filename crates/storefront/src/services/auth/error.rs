//! Authentication error types.

use thiserror::Error;

use royal_bike_core::EmailError;

use crate::db::RepositoryError;
use crate::services::session::SessionError;

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. The two are never distinguished.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration did not complete.
    #[error("registration failed: {0}")]
    RegistrationFailed(#[from] RegistrationFailure),

    /// The user collection could not be read.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] RepositoryError),

    /// The identity could not be bound to the session.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Why a registration failed.
///
/// Only ever logged; users are sent back to the form with a generic message.
#[derive(Debug, Error)]
pub enum RegistrationFailure {
    /// A required field was left empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Age is not a whole number in range.
    #[error("invalid age: {0:?}")]
    InvalidAge(String),

    /// Another account already uses this email.
    #[error("email already registered")]
    EmailTaken,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(RepositoryError),
}
