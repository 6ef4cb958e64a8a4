//! # Account Service
//!
//! Application service implementing `AccountApi`.
//!
//! Key material is read from the `SecureKeyStore` for every signing call
//! and dropped (and wiped) as soon as the signature is produced.

use crate::domain::bounds::random_s;
use crate::domain::derivation::{
    derive_address, derive_private_key_at, derive_public_key, generate_mnemonic, parse_mnemonic,
    Network, MNEMONIC_WORD_COUNT,
};
use crate::domain::entities::{Address, EthSignature, ExternallyOwnedAccount, Mnemonic};
use crate::domain::errors::{AccountError, AccountResult};
use crate::domain::extension_code;
use crate::domain::signing;
use crate::ports::inbound::AccountApi;
use crate::ports::outbound::SecureKeyStore;
use primitive_types::U256;
use shared_crypto::Hash;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Externally owned account service.
pub struct AccountService<K: SecureKeyStore> {
    key_store: Arc<K>,
    network: Network,
}

impl<K: SecureKeyStore> AccountService<K> {
    pub fn new(key_store: Arc<K>, network: Network) -> Self {
        Self { key_store, network }
    }

    fn account_from_mnemonic(
        &self,
        mnemonic: &Mnemonic,
        index: u32,
        keep_mnemonic: bool,
    ) -> AccountResult<ExternallyOwnedAccount> {
        let private_key = derive_private_key_at(mnemonic, self.network, index)?;
        let public_key = derive_public_key(&private_key)?;
        let address = derive_address(&public_key)?;
        let mnemonic = keep_mnemonic.then(|| mnemonic.clone());
        Ok(ExternallyOwnedAccount::new(
            address,
            mnemonic,
            private_key,
            public_key,
            index,
        ))
    }

    fn store(&self, account: &ExternallyOwnedAccount) -> AccountResult<()> {
        self.key_store.save(account)?;
        info!(
            address = %account.address(),
            derived_index = account.derived_index(),
            network = %self.network,
            "[sw-02] account stored"
        );
        Ok(())
    }
}

impl<K: SecureKeyStore> AccountApi for AccountService<K> {
    fn generate_account(&self) -> AccountResult<ExternallyOwnedAccount> {
        let mnemonic = generate_mnemonic()?;
        if mnemonic.word_count() != MNEMONIC_WORD_COUNT {
            return Err(AccountError::InvalidMnemonicWordCount {
                expected: MNEMONIC_WORD_COUNT,
                actual: mnemonic.word_count(),
            });
        }
        let account = self.account_from_mnemonic(&mnemonic, 0, true)?;
        self.store(&account)?;
        Ok(account)
    }

    fn import_account(&self, phrase: &str) -> AccountResult<ExternallyOwnedAccount> {
        let mnemonic = parse_mnemonic(phrase)?;
        let account = self.account_from_mnemonic(&mnemonic, 0, true)?;
        self.store(&account)?;
        Ok(account)
    }

    fn derive_account(
        &self,
        from: &Address,
        index: u32,
    ) -> AccountResult<ExternallyOwnedAccount> {
        let source = self.find_account(from)?;
        if index == source.derived_index() {
            return Ok(source);
        }
        let mnemonic = source.mnemonic().ok_or(AccountError::InvalidMnemonic)?;
        let account = self.account_from_mnemonic(mnemonic, index, false)?;
        self.store(&account)?;
        Ok(account)
    }

    fn find_account(&self, address: &Address) -> AccountResult<ExternallyOwnedAccount> {
        self.key_store
            .find(address)?
            .ok_or(AccountError::AccountNotFound(*address))
    }

    fn remove_account(&self, address: &Address) -> AccountResult<()> {
        self.key_store.remove(address)?;
        info!(address = %address, "[sw-02] account removed");
        Ok(())
    }

    fn sign_message(&self, address: &Address, message: &[u8]) -> AccountResult<EthSignature> {
        let account = self.find_account(address)?;
        let signature = signing::sign(message, account.private_key())?;
        debug!(address = %address, "[sw-02] message signed");
        Ok(signature)
    }

    fn sign_hash(&self, address: &Address, hash: &Hash) -> AccountResult<EthSignature> {
        let account = self.find_account(address)?;
        let signature = signing::sign_hash(hash, account.private_key())?;
        debug!(address = %address, "[sw-02] hash signed");
        Ok(signature)
    }

    fn verify(
        &self,
        address: &Address,
        signature: &EthSignature,
        message: &[u8],
    ) -> AccountResult<bool> {
        let account = self.find_account(address)?;
        Ok(signing::verify(signature, message, account.public_key()))
    }

    fn recover_address(&self, hash: &Hash, signature: &EthSignature) -> AccountResult<Address> {
        signing::recover_address(hash, signature)
    }

    fn address_from_browser_extension_code(&self, code: &str) -> AccountResult<Address> {
        extension_code::address_from_browser_extension_code(code).map_err(|e| {
            warn!(error = %e, "[sw-02] browser extension code rejected");
            e
        })
    }

    fn ecdsa_random_s(&self) -> U256 {
        random_s()
    }

    fn network(&self) -> Network {
        self.network
    }
}
