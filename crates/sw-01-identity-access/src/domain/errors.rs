//! # Identity Errors
//!
//! Validation errors are returned before anything is mutated. A rejected
//! password or biometric match is NOT an error: those surface as `Ok(None)`.

use shared_types::RepositoryError;
use thiserror::Error;

/// Invalid `AuthenticationPolicy` parameters.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// Session duration must be positive and finite
    #[error("Session duration must be positive")]
    InvalidSessionDuration,

    /// At least one attempt must be allowed
    #[error("Max failed attempts must be positive")]
    InvalidMaxFailedAttempts,

    /// Block duration must be finite and non-negative
    #[error("Block duration must be non-negative")]
    InvalidBlockDuration,
}

/// Password format violations.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password is empty")]
    EmptyPassword,

    #[error("Password is shorter than {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Password is longer than {max} characters")]
    PasswordTooLong { max: usize },

    #[error("Password must contain a letter")]
    PasswordMissingLetter,

    #[error("Password must contain a digit")]
    PasswordMissingDigit,
}

/// Session lifecycle errors.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Only an active session can be renewed
    #[error("Session is not active")]
    NotActive,
}

/// Gatekeeper operation errors.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GatekeeperError {
    /// Failed-attempt threshold reached and the block period has not elapsed
    #[error("Access is blocked")]
    AccessBlocked,

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Biometric hardware failure. Opaque to the domain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Biometric service failure: {reason}")]
pub struct BiometricError {
    pub reason: String,
}

impl BiometricError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Password encryption failure. Never carries the plain text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Password encryption failed: {reason}")]
pub struct EncryptionError {
    pub reason: String,
}

/// Errors returned by the identity service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("A primary user is already registered")]
    UserAlreadyRegistered,

    #[error("Primary user not found")]
    PrimaryUserNotFound,

    #[error("Gatekeeper not found")]
    GatekeeperNotFound,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Gatekeeper(#[from] GatekeeperError),

    #[error(transparent)]
    Storage(#[from] RepositoryError),

    #[error(transparent)]
    Biometric(#[from] BiometricError),

    #[error(transparent)]
    Encryption(#[from] EncryptionError),
}

/// Result alias for identity operations.
pub type IdentityResult<T> = Result<T, IdentityError>;
