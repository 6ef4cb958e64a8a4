//! # Error Types
//!
//! Errors reported by persistence collaborators.

use thiserror::Error;

/// Failure of an underlying storage collaborator (database, Keychain, ...).
///
/// The domain never inspects the cause; it only propagates it. Messages must
/// not embed secrets.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store could not be read.
    #[error("Storage read failed: {0}")]
    ReadFailed(String),

    /// The backing store rejected a write.
    #[error("Storage write failed: {0}")]
    WriteFailed(String),

    /// A persisted record could not be decoded.
    #[error("Stored record is corrupt: {0}")]
    Corrupt(String),
}
