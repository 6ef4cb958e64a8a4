//! # Digests and MACs
//!
//! Two SHA-3 flavours live side by side here and must not be confused:
//!
//! - [`keccak256`] is the original Keccak padding used by Ethereum for
//!   addresses and transaction hashes.
//! - [`sha3_256`] is the FIPS-202 SHA3-256 used to digest wallet messages
//!   before signing.
//!
//! [`hmac_sha256`] keys the password encryption of the identity crate.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use sha3::{Digest, Keccak256, Sha3_256};
use subtle::ConstantTimeEq;

use crate::CryptoError;

/// 256-bit digest.
pub type Hash = [u8; 32];

type HmacSha256 = Hmac<Sha256>;

/// Keccak-256 (pre-standard SHA-3 padding, as used by Ethereum).
pub fn keccak256(data: &[u8]) -> Hash {
    Keccak256::digest(data).into()
}

/// FIPS-202 SHA3-256.
pub fn sha3_256(data: &[u8]) -> Hash {
    Sha3_256::digest(data).into()
}

/// HMAC-SHA256 of `data` under `key`.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Hash, CryptoError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| CryptoError::InvalidInput(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().into())
}

/// Compare two byte strings without an early exit on the first mismatch.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_sha3_256_abc() {
        assert_eq!(
            hex::encode(sha3_256(b"abc")),
            "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
        );
    }

    #[test]
    fn test_keccak_and_sha3_differ() {
        assert_ne!(keccak256(b"wallet"), sha3_256(b"wallet"));
    }

    #[test]
    fn test_hmac_rfc4231_case_2() {
        let mac = hmac_sha256(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            hex::encode(mac),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_hmac_key_changes_output() {
        let a = hmac_sha256(&[1u8; 32], b"Password1").unwrap();
        let b = hmac_sha256(&[2u8; 32], b"Password1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"same", b"same"));
        assert!(!constant_time_eq(b"same", b"diff"));
        assert!(!constant_time_eq(b"short", b"longer"));
    }
}
