//! Safe creation request sent to the relay service, and the signature part
//! of its response.
//!
//! The relay answers with a deployment transaction signed by a key derived
//! from our random `s`. Its `r`/`s`/`v` come back as decimal strings and
//! must pass the bounds check before they are used to build anything.

use crate::domain::bounds::is_s_within_bounds;
use crate::domain::entities::{Address, EthSignature};
use crate::domain::errors::{AccountError, AccountResult};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Body of the relay's Safe creation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafeCreationTransactionRequest {
    pub owners: Vec<String>,
    pub threshold: String,
    pub s: String,
}

impl SafeCreationTransactionRequest {
    /// # Errors
    /// * `NoOwners` - `owners` is empty
    /// * `InvalidConfirmationCount` - not in `1..=owners.len()`
    /// * `ZeroOwnerAddress` - an owner is the zero address
    /// * `SignatureOutOfBounds` - `ecdsa_random_s` above n/2 + 1
    pub fn new(
        owners: &[Address],
        confirmation_count: usize,
        ecdsa_random_s: U256,
    ) -> AccountResult<Self> {
        if owners.is_empty() {
            return Err(AccountError::NoOwners);
        }
        if !(1..=owners.len()).contains(&confirmation_count) {
            return Err(AccountError::InvalidConfirmationCount {
                count: confirmation_count,
                owners: owners.len(),
            });
        }
        if owners.iter().any(Address::is_zero) {
            return Err(AccountError::ZeroOwnerAddress);
        }
        if !is_s_within_bounds(&ecdsa_random_s) {
            return Err(AccountError::SignatureOutOfBounds);
        }
        Ok(Self {
            owners: owners.iter().map(Address::to_checksum).collect(),
            threshold: confirmation_count.to_string(),
            s: ecdsa_random_s.to_string(),
        })
    }
}

/// Relay response to a Safe creation request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SafeCreationResponse {
    pub signature: ResponseSignature,
    pub tx: ResponseTransaction,
    pub safe: String,
    pub payment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResponseSignature {
    pub r: String,
    pub s: String,
    pub v: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseTransaction {
    pub from: String,
    pub value: u64,
    pub data: String,
    pub gas: String,
    pub gas_price: String,
    pub nonce: u64,
}

impl SafeCreationResponse {
    /// Decode the relay's signature, rejecting it unless every component is
    /// within bounds.
    pub fn validated_signature(&self) -> AccountResult<EthSignature> {
        let v: u8 = self
            .signature
            .v
            .trim()
            .parse()
            .map_err(|_| AccountError::InvalidSignatureEncoding)?;
        let signature = EthSignature::from_decimal_strings(&self.signature.r, &self.signature.s, v)?;
        if !signature.is_within_bounds() {
            return Err(AccountError::SignatureOutOfBounds);
        }
        Ok(signature)
    }

    /// Address the Safe will be deployed at.
    pub fn safe_address(&self) -> AccountResult<Address> {
        self.safe.parse()
    }
}
