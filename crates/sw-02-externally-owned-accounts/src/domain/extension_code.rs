//! Browser extension pairing code.
//!
//! The extension shows a JSON code:
//!
//! ```text
//! { "expirationDate": "<string>",
//!   "signature": { "v": 27, "r": "<decimal>", "s": "<decimal>" } }
//! ```
//!
//! The signature covers `"GNO" + expirationDate`, digested like any other
//! wallet message. Recovering its signer yields the extension's address.

use crate::domain::entities::{Address, EthSignature};
use crate::domain::errors::{AccountError, AccountResult};
use crate::domain::signing::{hash_message, recover_address};
use serde::{Deserialize, Serialize};

/// Prefix of the signed pairing message.
pub const EXTENSION_MESSAGE_PREFIX: &str = "GNO";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionCode {
    pub expiration_date: String,
    pub signature: ExtensionSignature,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionSignature {
    pub v: u64,
    pub r: String,
    pub s: String,
}

impl ExtensionCode {
    pub fn parse(code: &str) -> AccountResult<Self> {
        serde_json::from_str(code).map_err(|e| AccountError::InvalidExtensionCode(e.to_string()))
    }

    /// Message the extension signed.
    pub fn message(&self) -> String {
        format!("{}{}", EXTENSION_MESSAGE_PREFIX, self.expiration_date)
    }

    /// Decode and bounds-check the embedded signature.
    pub fn eth_signature(&self) -> AccountResult<EthSignature> {
        let v = u8::try_from(self.signature.v).map_err(|_| AccountError::SignatureOutOfBounds)?;
        let signature = EthSignature::from_decimal_strings(&self.signature.r, &self.signature.s, v)?;
        if !signature.is_within_bounds() {
            return Err(AccountError::SignatureOutOfBounds);
        }
        Ok(signature)
    }

    /// Address of the extension that produced this code.
    pub fn signer(&self) -> AccountResult<Address> {
        let signature = self.eth_signature()?;
        recover_address(&hash_message(self.message().as_bytes()), &signature)
    }
}

/// Recover the extension's address from its pairing code.
pub fn address_from_browser_extension_code(code: &str) -> AccountResult<Address> {
    ExtensionCode::parse(code)?.signer()
}
