//! # Outbound Ports (Driven Ports / SPI)

use crate::domain::entities::{Address, ExternallyOwnedAccount};
use shared_types::RepositoryError;

/// Secure storage of account key material, keyed by address.
///
/// The service never caches keys itself: every signing call goes through
/// [`SecureKeyStore::find`].
pub trait SecureKeyStore: Send + Sync {
    fn save(&self, account: &ExternallyOwnedAccount) -> Result<(), RepositoryError>;

    fn find(&self, address: &Address) -> Result<Option<ExternallyOwnedAccount>, RepositoryError>;

    fn remove(&self, address: &Address) -> Result<(), RepositoryError>;
}
