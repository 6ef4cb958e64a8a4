//! # Domain Entities
//!
//! Addresses, keys, mnemonics and signatures of externally owned accounts.
//! Secret-bearing types wipe their memory on drop and print as `<redacted>`.

use crate::domain::errors::AccountError;
use primitive_types::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use shared_crypto::{constant_time_eq, keccak256, Secp256k1KeyPair, Secp256k1PublicKey};
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// =============================================================================
// Address
// =============================================================================

/// 20-byte Ethereum address. Displays in EIP-55 mixed-case checksum form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// EIP-55: uppercase every hex letter whose nibble in
    /// keccak256(lowercase hex) is >= 8.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());
        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let byte = hash[i / 2];
            let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl FromStr for Address {
    type Err = AccountError;

    /// Accepts 40 hex digits with or without `0x`. All-lower and all-upper
    /// input is taken as is; mixed case must carry a valid checksum.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != 40 {
            return Err(AccountError::InvalidAddress(s.to_string()));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| AccountError::InvalidAddress(s.to_string()))?;
        let address = Self(bytes);

        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper && address.to_checksum()[2..] != *digits {
            return Err(AccountError::InvalidAddress(s.to_string()));
        }
        Ok(address)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Keys
// =============================================================================

/// secp256k1 secret scalar. Always in `[1, n)`.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Validate and wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, AccountError> {
        Secp256k1KeyPair::from_bytes(&bytes).map_err(|_| AccountError::InvalidPrivateKey)?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub(crate) fn key_pair(&self) -> Result<Secp256k1KeyPair, AccountError> {
        Secp256k1KeyPair::from_bytes(&self.0).map_err(|_| AccountError::InvalidPrivateKey)
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(&self.0, &other.0)
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Compressed (33-byte) secp256k1 public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey(Secp256k1PublicKey);

impl PublicKey {
    /// Parse a compressed or uncompressed SEC1 key.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, AccountError> {
        Secp256k1PublicKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|_| AccountError::InvalidPublicKey)
    }

    pub fn as_bytes(&self) -> &[u8; 33] {
        self.0.as_bytes()
    }

    pub(crate) fn from_inner(key: Secp256k1PublicKey) -> Self {
        Self(key)
    }

    pub(crate) fn inner(&self) -> &Secp256k1PublicKey {
        &self.0
    }
}

// =============================================================================
// Mnemonic
// =============================================================================

/// BIP39 word list.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic {
    words: Vec<String>,
}

impl Mnemonic {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Space-separated phrase, wiped when dropped.
    pub fn phrase(&self) -> Zeroizing<String> {
        Zeroizing::new(self.words.join(" "))
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mnemonic(<{} words redacted>)", self.words.len())
    }
}

// =============================================================================
// Account
// =============================================================================

/// Keypair-controlled Ethereum account, identified by its address.
///
/// `mnemonic` is `None` for accounts derived at a non-zero index: the
/// phrase belongs to the account it was derived from.
#[derive(Clone, PartialEq, Eq)]
pub struct ExternallyOwnedAccount {
    address: Address,
    mnemonic: Option<Mnemonic>,
    private_key: PrivateKey,
    public_key: PublicKey,
    derived_index: u32,
}

impl ExternallyOwnedAccount {
    pub fn new(
        address: Address,
        mnemonic: Option<Mnemonic>,
        private_key: PrivateKey,
        public_key: PublicKey,
        derived_index: u32,
    ) -> Self {
        Self {
            address,
            mnemonic,
            private_key,
            public_key,
            derived_index,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn mnemonic(&self) -> Option<&Mnemonic> {
        self.mnemonic.as_ref()
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn derived_index(&self) -> u32 {
        self.derived_index
    }
}

impl fmt::Debug for ExternallyOwnedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternallyOwnedAccount")
            .field("address", &self.address)
            .field("mnemonic", &self.mnemonic)
            .field("private_key", &self.private_key)
            .field("public_key", &self.public_key)
            .field("derived_index", &self.derived_index)
            .finish()
    }
}

// =============================================================================
// Signature
// =============================================================================

/// Ethereum-style ECDSA signature with `v` in {27, 28}.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthSignature {
    pub r: U256,
    pub s: U256,
    pub v: u8,
}

impl EthSignature {
    pub fn new(r: U256, s: U256, v: u8) -> Self {
        Self { r, s, v }
    }

    /// Parse decimal `r` and `s` strings as sent by the relay service and
    /// the browser extension.
    pub fn from_decimal_strings(r: &str, s: &str, v: u8) -> Result<Self, AccountError> {
        let r = U256::from_dec_str(r).map_err(|_| AccountError::InvalidSignatureEncoding)?;
        let s = U256::from_dec_str(s).map_err(|_| AccountError::InvalidSignatureEncoding)?;
        Ok(Self { r, s, v })
    }
}
