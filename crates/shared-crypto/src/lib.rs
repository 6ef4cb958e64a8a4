//! # Shared Crypto
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256, SHA3-256, HMAC-SHA256 | Addresses, message digests, password encryption |
//! | `ecdsa` | secp256k1 | Account signing and signer recovery |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic, low-S normalization (EIP-2)
//! - **Comparisons**: digest equality via `subtle`, no early exit

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;

// Re-exports
pub use ecdsa::{RecoverableSignature, Secp256k1KeyPair, Secp256k1PublicKey};
pub use errors::CryptoError;
pub use hashing::{constant_time_eq, hmac_sha256, keccak256, sha3_256, Hash};
