//! # Account Errors
//!
//! No variant carries key material, seeds or mnemonic words.

use crate::domain::entities::Address;
use shared_types::RepositoryError;
use thiserror::Error;

/// Errors that can occur while deriving, storing or using accounts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountError {
    /// Phrase is not a valid English BIP39 mnemonic
    #[error("Invalid mnemonic phrase")]
    InvalidMnemonic,

    /// Generated accounts must use 12-word mnemonics
    #[error("Invalid mnemonic word count: expected {expected}, got {actual}")]
    InvalidMnemonicWordCount { expected: usize, actual: usize },

    /// Zero, out of range, or underivable secret key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// r, s or v outside the secp256k1 bounds
    #[error("Signature components out of bounds")]
    SignatureOutOfBounds,

    /// r, s or v could not be parsed
    #[error("Malformed signature encoding")]
    InvalidSignatureEncoding,

    #[error("Signing failed")]
    SigningFailed,

    #[error("Failed to recover signer")]
    RecoveryFailed,

    #[error("Invalid browser extension code: {0}")]
    InvalidExtensionCode(String),

    /// Safe creation needs at least one owner
    #[error("Safe must have at least one owner")]
    NoOwners,

    #[error("Invalid confirmation count {count} for {owners} owners")]
    InvalidConfirmationCount { count: usize, owners: usize },

    #[error("Owner address must be non-zero")]
    ZeroOwnerAddress,

    #[error("Account not found: {0}")]
    AccountNotFound(Address),

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

/// Result alias for account operations.
pub type AccountResult<T> = Result<T, AccountError>;
