//! In-memory key store.

use crate::domain::entities::{Address, ExternallyOwnedAccount};
use crate::ports::outbound::SecureKeyStore;
use parking_lot::RwLock;
use shared_types::RepositoryError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Key store held in process memory. Accounts are wiped when removed or
/// when the store is dropped.
#[derive(Default)]
pub struct InMemoryKeyStore {
    accounts: RwLock<HashMap<Address, ExternallyOwnedAccount>>,
    offline: AtomicBool,
}

impl InMemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a keychain outage.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }

    fn check_online(&self, error: fn(String) -> RepositoryError) -> Result<(), RepositoryError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(error("key store offline".to_string()));
        }
        Ok(())
    }
}

impl SecureKeyStore for InMemoryKeyStore {
    fn save(&self, account: &ExternallyOwnedAccount) -> Result<(), RepositoryError> {
        self.check_online(RepositoryError::WriteFailed)?;
        self.accounts.write().insert(account.address(), account.clone());
        Ok(())
    }

    fn find(&self, address: &Address) -> Result<Option<ExternallyOwnedAccount>, RepositoryError> {
        self.check_online(RepositoryError::ReadFailed)?;
        Ok(self.accounts.read().get(address).cloned())
    }

    fn remove(&self, address: &Address) -> Result<(), RepositoryError> {
        self.check_online(RepositoryError::WriteFailed)?;
        self.accounts.write().remove(address);
        Ok(())
    }
}
