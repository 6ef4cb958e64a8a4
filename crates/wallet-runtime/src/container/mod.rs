//! # Service Container
//!
//! Holds the identity-access and account services together with the
//! adapters they were built on. Every collaborator is injected here; no
//! service looks anything up globally.

pub mod config;

pub use config::{load_config, ConfigError, RejectedOverride, WalletConfig};

use shared_types::{Clock, SystemClock};
use std::sync::Arc;
use sw_01_identity_access::{
    GatekeeperState, HmacEncryptionService, IdentityApi, IdentityResult, IdentityService,
    InMemoryGatekeeperRepository, InMemoryUserRepository, MockBiometricService,
};
use sw_02_externally_owned_accounts::{AccountService, InMemoryKeyStore};
use tracing::info;

/// Identity service as wired by the runtime.
pub type WalletIdentityService<C> = IdentityService<
    InMemoryUserRepository,
    InMemoryGatekeeperRepository,
    HmacEncryptionService,
    MockBiometricService,
    C,
>;

/// Account service as wired by the runtime.
pub type WalletAccountService = AccountService<InMemoryKeyStore>;

/// Wallet services and their adapters.
pub struct WalletContainer<C: Clock = SystemClock> {
    pub users: Arc<InMemoryUserRepository>,
    pub gatekeepers: Arc<InMemoryGatekeeperRepository>,
    pub biometrics: Arc<MockBiometricService>,
    pub key_store: Arc<InMemoryKeyStore>,
    pub identity: Arc<WalletIdentityService<C>>,
    pub accounts: Arc<WalletAccountService>,
}

impl WalletContainer<SystemClock> {
    /// Build the container on the system clock with no biometric sensor.
    pub fn new(config: &WalletConfig) -> Result<Self, ConfigError> {
        Self::with_collaborators(
            config,
            Arc::new(SystemClock),
            Arc::new(MockBiometricService::unavailable()),
        )
    }
}

impl<C: Clock> WalletContainer<C> {
    /// Build the container with an explicit clock and biometric adapter.
    ///
    /// # Errors
    /// * `InvalidPolicy` - the configured authentication policy is invalid
    pub fn with_collaborators(
        config: &WalletConfig,
        clock: Arc<C>,
        biometrics: Arc<MockBiometricService>,
    ) -> Result<Self, ConfigError> {
        let policy = config.authentication.policy()?;

        let users = Arc::new(InMemoryUserRepository::new());
        let gatekeepers = Arc::new(InMemoryGatekeeperRepository::new());
        let encryption = Arc::new(HmacEncryptionService::new(
            config.security.password_hmac_secret,
        ));
        let key_store = Arc::new(InMemoryKeyStore::new());

        let identity = Arc::new(IdentityService::new(
            Arc::clone(&users),
            Arc::clone(&gatekeepers),
            encryption,
            Arc::clone(&biometrics),
            clock,
            policy,
        ));
        let accounts = Arc::new(AccountService::new(
            Arc::clone(&key_store),
            config.accounts.network,
        ));

        info!(
            network = %config.accounts.network,
            session_secs = config.authentication.session_duration_secs,
            max_failed_attempts = config.authentication.max_failed_attempts,
            block_secs = config.authentication.block_duration_secs,
            "Wallet container initialized"
        );

        Ok(Self {
            users,
            gatekeepers,
            biometrics,
            key_store,
            identity,
            accounts,
        })
    }

    /// Make sure a gatekeeper exists and report the access state it is in.
    pub fn prepare_access(&self) -> IdentityResult<GatekeeperState> {
        self.identity.ensure_gatekeeper()?;
        self.identity.access_state()
    }
}
