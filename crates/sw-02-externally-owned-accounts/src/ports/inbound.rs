//! # Inbound Ports (Driving Ports / API)

use crate::domain::derivation::Network;
use crate::domain::entities::{Address, EthSignature, ExternallyOwnedAccount};
use crate::domain::errors::AccountResult;
use primitive_types::U256;
use shared_crypto::Hash;

/// Externally owned account API.
pub trait AccountApi: Send + Sync {
    /// Generate a fresh 12-word mnemonic, derive its first account and
    /// store it.
    ///
    /// # Errors
    /// * `InvalidMnemonicWordCount` - the generator produced another length
    /// * `Storage` - the key store refused the account
    fn generate_account(&self) -> AccountResult<ExternallyOwnedAccount>;

    /// Restore the first account of an existing mnemonic phrase.
    fn import_account(&self, phrase: &str) -> AccountResult<ExternallyOwnedAccount>;

    /// Derive and store the account at `index` of the mnemonic owned by
    /// `from`. The derived account carries no mnemonic.
    ///
    /// # Errors
    /// * `AccountNotFound` - `from` is not stored
    /// * `InvalidMnemonic` - `from` has no mnemonic to derive from
    fn derive_account(&self, from: &Address, index: u32)
        -> AccountResult<ExternallyOwnedAccount>;

    fn find_account(&self, address: &Address) -> AccountResult<ExternallyOwnedAccount>;

    fn remove_account(&self, address: &Address) -> AccountResult<()>;

    /// Sign a wallet message (SHA3-256 digest) with the stored key.
    fn sign_message(&self, address: &Address, message: &[u8]) -> AccountResult<EthSignature>;

    /// Sign an already Keccak-256 hashed Ethereum payload.
    fn sign_hash(&self, address: &Address, hash: &Hash) -> AccountResult<EthSignature>;

    /// Verify a wallet message signature against a stored account.
    fn verify(
        &self,
        address: &Address,
        signature: &EthSignature,
        message: &[u8],
    ) -> AccountResult<bool>;

    fn recover_address(&self, hash: &Hash, signature: &EthSignature) -> AccountResult<Address>;

    /// Address of the browser extension that produced a pairing code.
    fn address_from_browser_extension_code(&self, code: &str) -> AccountResult<Address>;

    /// Random `s` for a Safe creation request.
    fn ecdsa_random_s(&self) -> U256;

    fn network(&self) -> Network;
}
