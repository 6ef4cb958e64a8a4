//! # ECDSA Signatures (secp256k1)
//!
//! Recoverable secp256k1 signatures over caller-supplied 32-byte digests.
//! Which digest is used (SHA3-256 for wallet messages, Keccak-256 for
//! Ethereum payloads) is the caller's decision; nothing here hashes
//! implicitly.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalization (EIP-2), recovery id adjusted to match
//! - Constant-time scalar operations (k256)

use crate::hashing::keccak256;
use crate::CryptoError;
use k256::ecdsa::{
    signature::hazmat::PrehashVerifier, RecoveryId, Signature, SigningKey, VerifyingKey,
};

/// Compressed secp256k1 public key (33 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Secp256k1PublicKey([u8; 33]);

impl Secp256k1PublicKey {
    /// Parse a SEC1 encoded key, compressed (33 bytes) or uncompressed (65 bytes).
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let key = VerifyingKey::from_sec1_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self::from_verifying_key(&key))
    }

    fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(true);
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(point.as_bytes());
        Self(bytes)
    }

    fn verifying_key(&self) -> Result<VerifyingKey, CryptoError> {
        VerifyingKey::from_sec1_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Get raw compressed bytes.
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    /// Uncompressed SEC1 form (0x04 || x || y).
    pub fn to_uncompressed(&self) -> Result<[u8; 65], CryptoError> {
        let point = self.verifying_key()?.to_encoded_point(false);
        let mut bytes = [0u8; 65];
        bytes.copy_from_slice(point.as_bytes());
        Ok(bytes)
    }

    /// Ethereum address: last 20 bytes of keccak256(x || y).
    pub fn ethereum_address(&self) -> Result<[u8; 20], CryptoError> {
        let uncompressed = self.to_uncompressed()?;
        let hash = keccak256(&uncompressed[1..]);
        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        Ok(address)
    }

    /// Verify `(r, s)` over a 32-byte digest.
    ///
    /// High-S signatures are rejected.
    pub fn verify_prehash(
        &self,
        prehash: &[u8; 32],
        signature: &RecoverableSignature,
    ) -> Result<(), CryptoError> {
        let sig = signature.to_k256()?;
        self.verifying_key()?
            .verify_prehash(prehash, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

/// `(r, s)` plus the recovery id (0 or 1) needed to recover the signer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    /// Big-endian r scalar
    pub r: [u8; 32],
    /// Big-endian s scalar
    pub s: [u8; 32],
    /// Recovery id, 0 or 1
    pub recovery_id: u8,
}

impl RecoverableSignature {
    fn to_k256(&self) -> Result<Signature, CryptoError> {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..].copy_from_slice(&self.s);
        Signature::from_slice(&bytes).map_err(|_| CryptoError::InvalidSignature)
    }

    /// Recover the public key that produced this signature over `prehash`.
    pub fn recover(&self, prehash: &[u8; 32]) -> Result<Secp256k1PublicKey, CryptoError> {
        let sig = self.to_k256()?;
        let recovery_id = RecoveryId::try_from(self.recovery_id)
            .map_err(|_| CryptoError::InvalidRecoveryId(self.recovery_id))?;
        let key = VerifyingKey::recover_from_prehash(prehash, &sig, recovery_id)
            .map_err(|_| CryptoError::RecoveryFailed)?;
        Ok(Secp256k1PublicKey::from_verifying_key(&key))
    }
}

/// secp256k1 ECDSA keypair.
///
/// The underlying `SigningKey` zeroizes its scalar on drop.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes). Zero and values >= n are rejected.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_slice(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Get public key (compressed, 33 bytes).
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey::from_verifying_key(self.signing_key.verifying_key())
    }

    /// Sign a 32-byte digest (deterministic RFC 6979, low-S).
    pub fn sign_prehash(&self, prehash: &[u8; 32]) -> Result<RecoverableSignature, CryptoError> {
        let (sig, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(prehash)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        let bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(RecoverableSignature {
            r,
            s,
            recovery_id: recovery_id.to_byte(),
        })
    }

    /// Get secret key bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}
