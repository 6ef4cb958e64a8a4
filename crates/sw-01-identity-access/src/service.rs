//! # Identity Service
//!
//! Application service implementing `IdentityApi`.
//!
//! ## Architecture
//!
//! - Implements the inbound port (`IdentityApi`)
//! - Loads the gatekeeper fresh from its repository on every call and
//!   persists it after every mutation
//! - Serializes every gatekeeper read-modify-write under one mutex, so two
//!   concurrent attempts can never race on the failure counter

use crate::domain::errors::{IdentityError, IdentityResult};
use crate::domain::gatekeeper::{Gatekeeper, GatekeeperState};
use crate::domain::password::validate_password;
use crate::domain::policy::AuthenticationPolicy;
use crate::domain::user::User;
use crate::ports::inbound::IdentityApi;
use crate::ports::outbound::{
    BiometricAuthenticationService, BiometryKind, EncryptionService, GatekeeperRepository,
    UserRepository,
};
use parking_lot::Mutex;
use shared_types::{Clock, Timestamp, UserId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Identity and access orchestrator.
pub struct IdentityService<U, G, E, B, C>
where
    U: UserRepository,
    G: GatekeeperRepository,
    E: EncryptionService,
    B: BiometricAuthenticationService,
    C: Clock,
{
    users: Arc<U>,
    gatekeepers: Arc<G>,
    encryption: Arc<E>,
    biometrics: Arc<B>,
    clock: Arc<C>,
    /// Policy given to the gatekeeper created at registration.
    default_policy: AuthenticationPolicy,
    gatekeeper_lock: Mutex<()>,
}

impl<U, G, E, B, C> IdentityService<U, G, E, B, C>
where
    U: UserRepository,
    G: GatekeeperRepository,
    E: EncryptionService,
    B: BiometricAuthenticationService,
    C: Clock,
{
    pub fn new(
        users: Arc<U>,
        gatekeepers: Arc<G>,
        encryption: Arc<E>,
        biometrics: Arc<B>,
        clock: Arc<C>,
        default_policy: AuthenticationPolicy,
    ) -> Self {
        Self {
            users,
            gatekeepers,
            encryption,
            biometrics,
            clock,
            default_policy,
            gatekeeper_lock: Mutex::new(()),
        }
    }

    pub fn default_policy(&self) -> &AuthenticationPolicy {
        &self.default_policy
    }

    /// Build a policy, assign a new id and persist a fresh gatekeeper,
    /// replacing any existing one.
    pub fn create_gatekeeper(
        &self,
        session_duration: Duration,
        max_failed_attempts: u32,
        block_duration: Duration,
    ) -> IdentityResult<Gatekeeper> {
        let policy =
            AuthenticationPolicy::new(session_duration, max_failed_attempts, block_duration)?;
        let _guard = self.gatekeeper_lock.lock();
        self.replace_gatekeeper(policy)
    }

    /// Create a gatekeeper with the default policy unless one exists.
    pub fn ensure_gatekeeper(&self) -> IdentityResult<Gatekeeper> {
        let _guard = self.gatekeeper_lock.lock();
        match self.gatekeepers.gatekeeper()? {
            Some(gatekeeper) => Ok(gatekeeper),
            None => self.replace_gatekeeper(self.default_policy),
        }
    }

    // Caller holds `gatekeeper_lock`.
    fn replace_gatekeeper(&self, policy: AuthenticationPolicy) -> IdentityResult<Gatekeeper> {
        if let Some(existing) = self.gatekeepers.gatekeeper()? {
            self.gatekeepers.remove(&existing)?;
        }
        let gatekeeper = Gatekeeper::new(self.gatekeepers.next_id(), policy);
        self.gatekeepers.save(&gatekeeper)?;
        info!(
            gatekeeper_id = %gatekeeper.id(),
            session_secs = policy.session_duration().as_secs_f64(),
            max_failed_attempts = policy.max_failed_attempts(),
            block_secs = policy.block_duration().as_secs_f64(),
            "[sw-01] gatekeeper created"
        );
        Ok(gatekeeper)
    }

    // Caller holds `gatekeeper_lock`.
    fn load_gatekeeper(&self) -> IdentityResult<Gatekeeper> {
        self.gatekeepers
            .gatekeeper()?
            .ok_or(IdentityError::GatekeeperNotFound)
    }

    fn primary_user(&self) -> IdentityResult<User> {
        self.users
            .primary_user()?
            .ok_or(IdentityError::PrimaryUserNotFound)
    }

    /// Successful credential check: start a session and bind it to the user.
    // Caller holds `gatekeeper_lock`.
    fn grant_access(
        &self,
        gatekeeper: &mut Gatekeeper,
        mut user: User,
        now: Timestamp,
    ) -> IdentityResult<UserId> {
        let session_id = gatekeeper.record_successful_authentication(now)?;
        self.gatekeepers.save(gatekeeper)?;
        user.attach_session(session_id);
        self.users.save(&user)?;
        info!(user_id = %user.id(), session_id = %session_id, "[sw-01] access granted");
        Ok(user.id())
    }

    fn log_blocked(&self, gatekeeper: &Gatekeeper, now: Timestamp) {
        if let GatekeeperState::Blocked { until } = gatekeeper.state(now) {
            warn!(
                failed_attempts = gatekeeper.failed_attempt_count(),
                blocked_until = %until,
                "[sw-01] authentication blocked"
            );
        }
    }
}

impl<U, G, E, B, C> IdentityApi for IdentityService<U, G, E, B, C>
where
    U: UserRepository,
    G: GatekeeperRepository,
    E: EncryptionService,
    B: BiometricAuthenticationService,
    C: Clock,
{
    fn register_user(&self, password: &str) -> IdentityResult<UserId> {
        let _guard = self.gatekeeper_lock.lock();
        if self.users.primary_user()?.is_some() {
            return Err(IdentityError::UserAlreadyRegistered);
        }
        validate_password(password)?;

        let encrypted = self.encryption.encrypted(password)?;
        let user = User::new(self.users.next_id(), encrypted);
        self.users.save(&user)?;
        self.replace_gatekeeper(self.default_policy)?;
        self.biometrics.activate()?;

        info!(user_id = %user.id(), "[sw-01] primary user registered");
        Ok(user.id())
    }

    fn authenticate_user(&self, password: &str) -> IdentityResult<Option<UserId>> {
        let _guard = self.gatekeeper_lock.lock();
        let now = self.clock.now();
        let mut gatekeeper = self.load_gatekeeper()?;
        if !gatekeeper.is_access_possible(now) {
            self.log_blocked(&gatekeeper, now);
            return Ok(None);
        }

        let encrypted = self.encryption.encrypted(password)?;
        match self.users.find_by_encrypted_password(&encrypted)? {
            Some(user) => self.grant_access(&mut gatekeeper, user, now).map(Some),
            None => {
                gatekeeper.record_failed_authentication(now);
                self.gatekeepers.save(&gatekeeper)?;
                debug!(
                    failed_attempts = gatekeeper.failed_attempt_count(),
                    "[sw-01] password rejected"
                );
                self.log_blocked(&gatekeeper, now);
                Ok(None)
            }
        }
    }

    fn authenticate_user_biometrically(&self) -> IdentityResult<Option<UserId>> {
        let _guard = self.gatekeeper_lock.lock();
        let now = self.clock.now();
        let mut gatekeeper = self.load_gatekeeper()?;
        if !gatekeeper.is_access_possible(now) {
            self.log_blocked(&gatekeeper, now);
            return Ok(None);
        }
        let user = self.primary_user()?;
        if !self.biometrics.is_available() {
            debug!("[sw-01] biometry unavailable");
            return Ok(None);
        }

        if self.biometrics.authenticate()? {
            self.grant_access(&mut gatekeeper, user, now).map(Some)
        } else {
            debug!("[sw-01] biometric match rejected");
            Ok(None)
        }
    }

    fn is_user_authenticated(&self) -> IdentityResult<bool> {
        let _guard = self.gatekeeper_lock.lock();
        let now = self.clock.now();
        let Some(user) = self.users.primary_user()? else {
            return Ok(false);
        };
        let Some(gatekeeper) = self.gatekeepers.gatekeeper()? else {
            return Ok(false);
        };
        Ok(user
            .session_id()
            .is_some_and(|session_id| gatekeeper.has_access(session_id, now)))
    }

    fn update_primary_user_password(&self, new_password: &str) -> IdentityResult<()> {
        let _guard = self.gatekeeper_lock.lock();
        let mut user = self.primary_user()?;
        validate_password(new_password)?;

        user.update_password(self.encryption.encrypted(new_password)?);
        self.users.save(&user)?;
        info!(user_id = %user.id(), "[sw-01] password updated");
        Ok(())
    }

    fn renew_session(&self) -> IdentityResult<()> {
        let _guard = self.gatekeeper_lock.lock();
        let now = self.clock.now();
        let mut gatekeeper = self.load_gatekeeper()?;
        gatekeeper.use_access(now)?;
        self.gatekeepers.save(&gatekeeper)?;
        Ok(())
    }

    fn sign_out(&self) -> IdentityResult<()> {
        let _guard = self.gatekeeper_lock.lock();
        let now = self.clock.now();
        let mut gatekeeper = self.load_gatekeeper()?;
        gatekeeper.finish_session(now);
        self.gatekeepers.save(&gatekeeper)?;
        info!("[sw-01] signed out");
        Ok(())
    }

    fn access_state(&self) -> IdentityResult<GatekeeperState> {
        let _guard = self.gatekeeper_lock.lock();
        Ok(self.load_gatekeeper()?.state(self.clock.now()))
    }

    fn update_authentication_policy(&self, policy: AuthenticationPolicy) -> IdentityResult<()> {
        let _guard = self.gatekeeper_lock.lock();
        let mut gatekeeper = self.load_gatekeeper()?;
        gatekeeper.update_policy(policy);
        self.gatekeepers.save(&gatekeeper)?;
        info!(
            session_secs = policy.session_duration().as_secs_f64(),
            max_failed_attempts = policy.max_failed_attempts(),
            block_secs = policy.block_duration().as_secs_f64(),
            "[sw-01] authentication policy updated"
        );
        Ok(())
    }

    fn reset_all(&self) -> IdentityResult<()> {
        let _guard = self.gatekeeper_lock.lock();
        if let Some(user) = self.users.primary_user()? {
            self.users.remove(&user)?;
        }
        if let Some(mut gatekeeper) = self.gatekeepers.gatekeeper()? {
            gatekeeper.reset();
            self.gatekeepers.save(&gatekeeper)?;
        }
        warn!("[sw-01] identity data wiped");
        Ok(())
    }

    fn is_biometry_available(&self) -> bool {
        self.biometrics.is_available()
    }

    fn biometry_kind(&self) -> BiometryKind {
        self.biometrics.biometry_kind()
    }
}
