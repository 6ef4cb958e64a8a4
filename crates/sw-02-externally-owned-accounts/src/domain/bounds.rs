//! # ECDSA Signature Bounds
//!
//! Component ranges for secp256k1 signatures (Ethereum yellow paper,
//! appendix F):
//!
//! - `0 <= r < n`
//! - `0 <= s <= n/2 + 1` (low-S canonical form)
//! - `v ∈ {27, 28}`
//!
//! Signatures arriving from the relay service or the browser extension are
//! checked against these bounds before anything else touches them.

use crate::domain::entities::EthSignature;
use primitive_types::U256;
use rand::RngCore;

/// secp256k1 group order n.
pub const SECP256K1_N: U256 = U256([
    0xBFD2_5E8C_D036_4141,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
]);

/// Largest accepted `s`: n/2 + 1.
pub const S_UPPER_BOUND: U256 = U256([
    0xDFE9_2F46_681B_20A1,
    0x5D57_6E73_57A4_501D,
    0xFFFF_FFFF_FFFF_FFFF,
    0x7FFF_FFFF_FFFF_FFFF,
]);

pub const V_LOWER: u8 = 27;
pub const V_UPPER: u8 = 28;

pub fn is_r_within_bounds(r: &U256) -> bool {
    *r < SECP256K1_N
}

pub fn is_s_within_bounds(s: &U256) -> bool {
    *s <= S_UPPER_BOUND
}

pub fn is_v_within_bounds(v: u8) -> bool {
    (V_LOWER..=V_UPPER).contains(&v)
}

/// Whether every component of `(r, s, v)` is within bounds.
pub fn is_within_bounds(r: &U256, s: &U256, v: u8) -> bool {
    is_r_within_bounds(r) && is_s_within_bounds(s) && is_v_within_bounds(v)
}

/// Same check on decimal strings; unparsable input is out of bounds.
pub fn is_within_bounds_decimal(r: &str, s: &str, v: u8) -> bool {
    match EthSignature::from_decimal_strings(r, s, v) {
        Ok(sig) => sig.is_within_bounds(),
        Err(_) => false,
    }
}

impl EthSignature {
    pub fn is_within_bounds(&self) -> bool {
        is_within_bounds(&self.r, &self.s, self.v)
    }
}

/// Uniformly random `s` in `[0, n/2 + 1]`.
///
/// Draws 255-bit candidates and rejects those above the bound; the bound
/// is just under 2^255 so a retry is rare.
pub fn random_s() -> U256 {
    let mut rng = rand::rngs::OsRng;
    let mut bytes = [0u8; 32];
    loop {
        rng.fill_bytes(&mut bytes);
        bytes[0] &= 0x7f;
        let candidate = U256::from_big_endian(&bytes);
        if is_s_within_bounds(&candidate) {
            return candidate;
        }
    }
}
