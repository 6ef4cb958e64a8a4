//! # Externally Owned Accounts Subsystem (SW-02)
//!
//! Derives the wallet owner's keys from a BIP39 mnemonic, signs with them
//! and checks every signature handed in from outside against the secp256k1
//! bounds before it is trusted.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): addresses, keys, derivation, signing, bounds,
//!   extension pairing codes, Safe creation payloads
//! - **Ports Layer** (`ports/`): `AccountApi` and the `SecureKeyStore` SPI
//! - **Adapters Layer** (`adapters/`): in-memory key store
//! - **Service Layer** (`service.rs`): `AccountService`
//!
//! ## Security Notes
//!
//! - Private keys and mnemonics wipe their memory on drop and never appear
//!   in `Debug` output, errors or logs
//! - Wallet messages are digested with SHA3-256, Ethereum payloads with
//!   Keccak-256; the two paths never share a digest

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::InMemoryKeyStore;
pub use domain::bounds::{
    is_r_within_bounds, is_s_within_bounds, is_v_within_bounds, is_within_bounds,
    is_within_bounds_decimal, random_s, SECP256K1_N, S_UPPER_BOUND,
};
pub use domain::derivation::{
    derive_address, derive_private_key, derive_private_key_at, derive_public_key,
    generate_mnemonic, parse_mnemonic, Network, MNEMONIC_WORD_COUNT,
};
pub use domain::entities::{
    Address, EthSignature, ExternallyOwnedAccount, Mnemonic, PrivateKey, PublicKey,
};
pub use domain::errors::{AccountError, AccountResult};
pub use domain::extension_code::{address_from_browser_extension_code, ExtensionCode};
pub use domain::safe_creation::{SafeCreationResponse, SafeCreationTransactionRequest};
pub use domain::signing::{hash_message, recover_address, sign, sign_hash, verify};
pub use ports::inbound::AccountApi;
pub use ports::outbound::SecureKeyStore;
pub use service::AccountService;
