//! # Signing Service
//!
//! Two digests are in play and are never interchanged:
//!
//! - wallet messages are digested with FIPS SHA3-256 ([`hash_message`]) and
//!   signed with [`sign`]
//! - Ethereum payloads arrive already Keccak-256 hashed and are signed with
//!   [`sign_hash`]
//!
//! Every signature read back in is bounds-checked before it is used.

use crate::domain::entities::{Address, EthSignature, PrivateKey, PublicKey};
use crate::domain::errors::{AccountError, AccountResult};
use primitive_types::U256;
use shared_crypto::{sha3_256, Hash, RecoverableSignature};

/// SHA3-256 digest of a wallet message.
pub fn hash_message(message: &[u8]) -> Hash {
    sha3_256(message)
}

/// Sign `message` (SHA3-256 digested) with `private_key`.
pub fn sign(message: &[u8], private_key: &PrivateKey) -> AccountResult<EthSignature> {
    sign_hash(&hash_message(message), private_key)
}

/// Sign a precomputed 32-byte digest.
pub fn sign_hash(hash: &Hash, private_key: &PrivateKey) -> AccountResult<EthSignature> {
    let signature = private_key
        .key_pair()?
        .sign_prehash(hash)
        .map_err(|_| AccountError::SigningFailed)?;
    Ok(to_eth_signature(&signature))
}

/// Verify `signature` over `message` against `public_key`.
///
/// Out-of-bounds signatures are rejected without touching the curve.
pub fn verify(signature: &EthSignature, message: &[u8], public_key: &PublicKey) -> bool {
    if !signature.is_within_bounds() {
        return false;
    }
    public_key
        .inner()
        .verify_prehash(&hash_message(message), &to_recoverable(signature))
        .is_ok()
}

/// Address of the key that produced `signature` over `hash`.
pub fn recover_address(hash: &Hash, signature: &EthSignature) -> AccountResult<Address> {
    if !signature.is_within_bounds() {
        return Err(AccountError::SignatureOutOfBounds);
    }
    let public_key = to_recoverable(signature)
        .recover(hash)
        .map_err(|_| AccountError::RecoveryFailed)?;
    public_key
        .ethereum_address()
        .map(Address::from_bytes)
        .map_err(|_| AccountError::RecoveryFailed)
}

fn to_eth_signature(signature: &RecoverableSignature) -> EthSignature {
    EthSignature {
        r: U256::from_big_endian(&signature.r),
        s: U256::from_big_endian(&signature.s),
        v: 27 + signature.recovery_id,
    }
}

// Caller has checked bounds, so v is 27 or 28 and r, s fit in 32 bytes.
fn to_recoverable(signature: &EthSignature) -> RecoverableSignature {
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    signature.r.to_big_endian(&mut r);
    signature.s.to_big_endian(&mut s);
    RecoverableSignature {
        r,
        s,
        recovery_id: signature.v - 27,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bounds::{S_UPPER_BOUND, SECP256K1_N};
    use crate::domain::derivation::{derive_address, derive_public_key};
    use shared_crypto::keccak256;

    fn random_key() -> PrivateKey {
        let pair = shared_crypto::Secp256k1KeyPair::generate();
        PrivateKey::from_bytes(pair.to_bytes()).unwrap()
    }

    #[test]
    fn test_sign_verify() {
        let key = random_key();
        let public_key = derive_public_key(&key).unwrap();

        let signature = sign(b"hello wallet", &key).unwrap();
        assert!(signature.is_within_bounds());
        assert!(verify(&signature, b"hello wallet", &public_key));
        assert!(!verify(&signature, b"hello wallet!", &public_key));
    }

    #[test]
    fn test_verify_wrong_key() {
        let signature = sign(b"msg", &random_key()).unwrap();
        let other = derive_public_key(&random_key()).unwrap();
        assert!(!verify(&signature, b"msg", &other));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let key = random_key();
        assert_eq!(sign(b"same", &key).unwrap(), sign(b"same", &key).unwrap());
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let key = random_key();
        let public_key = derive_public_key(&key).unwrap();
        let signature = sign(b"msg", &key).unwrap();

        let mut high_s = signature;
        high_s.s = SECP256K1_N - signature.s;
        assert!(high_s.s > S_UPPER_BOUND);
        assert!(!verify(&high_s, b"msg", &public_key));

        let mut bad_v = signature;
        bad_v.v = 0;
        assert!(!verify(&bad_v, b"msg", &public_key));
        assert_eq!(
            recover_address(&hash_message(b"msg"), &bad_v),
            Err(AccountError::SignatureOutOfBounds)
        );
    }

    #[test]
    fn test_recover_address() {
        let key = random_key();
        let address = derive_address(&derive_public_key(&key).unwrap()).unwrap();

        let hash = keccak256(b"ethereum payload");
        let signature = sign_hash(&hash, &key).unwrap();
        assert_eq!(recover_address(&hash, &signature).unwrap(), address);
    }

    #[test]
    fn test_message_hash_is_sha3_not_keccak() {
        let key = random_key();
        let address = derive_address(&derive_public_key(&key).unwrap()).unwrap();
        let signature = sign(b"payload", &key).unwrap();

        assert_eq!(
            recover_address(&hash_message(b"payload"), &signature).unwrap(),
            address
        );
        assert_ne!(
            recover_address(&keccak256(b"payload"), &signature).ok(),
            Some(address)
        );
    }
}
