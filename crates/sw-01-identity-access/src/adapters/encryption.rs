//! HMAC-SHA256 password encryption keyed by a per-device secret.

use crate::domain::errors::EncryptionError;
use crate::ports::outbound::EncryptionService;
use shared_crypto::hmac_sha256;
use std::fmt;

/// `hex(HMAC-SHA256(secret, password))`.
pub struct HmacEncryptionService {
    secret: [u8; 32],
}

impl HmacEncryptionService {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }
}

impl fmt::Debug for HmacEncryptionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacEncryptionService")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl EncryptionService for HmacEncryptionService {
    fn encrypted(&self, plain_text: &str) -> Result<String, EncryptionError> {
        let mac = hmac_sha256(&self.secret, plain_text.as_bytes()).map_err(|e| EncryptionError {
            reason: e.to_string(),
        })?;
        Ok(hex::encode(mac))
    }
}
